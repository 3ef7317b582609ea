//! PuppetView Core - Reference image overlay engines
//!
//! This crate provides the host-independent parts of PuppetView: the
//! interactive screen-region selector used for cropping and color sampling,
//! and the transform engine that shapes floating reference image windows.

pub mod color;
pub mod geometry;
pub mod input;
pub mod registry;
pub mod selection;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod transform;
pub mod window;

pub use color::{ColorFormat, Loupe};
pub use geometry::{Bounds, Point, Quad};
pub use input::{Button, Key, Modifiers, WheelInput};
pub use registry::{LoadedWindow, WindowId, WindowRegistry};
pub use selection::{Cursor, Handle, OverlayFrame, RegionSelector, SelectionOutcome};
pub use session::{
    CaptureError, ColorProbeSession, CropSession, RepaintTimer, ScreenCapture, SessionError,
    SessionStatus,
};
pub use settings::{Settings, WindowSettings};
pub use snapshot::{extract_region, CropRect, Snapshot, SnapshotError};
pub use transform::{ImageTransform, RenderGeometry, TransformEngine};
pub use window::{ImageState, ImageWindow, MenuState, StateError, WindowCommand, WindowEvent};
