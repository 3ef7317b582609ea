//! Full-screen overlay sessions.
//!
//! A session freezes the screen once, then lets the user work on that
//! snapshot until it accepts or cancels:
//!
//! - [`CropSession`] selects a region and hands back the cropped pixels
//! - [`ColorProbeSession`] samples a pixel and hands back its text form
//!
//! Both are driven by the host: input events go in as they arrive, and a
//! [`RepaintTimer`] polled with host timestamps says when to redraw.

mod crop;
mod probe;
mod timer;

use crate::snapshot::{Snapshot, SnapshotError};
use thiserror::Error;

pub use crop::CropSession;
pub use probe::{ColorProbeSession, ProbeFrame, ProbeKeyResponse};
pub use timer::RepaintTimer;

/// Failures of the screen capture backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("No display available for capture")]
    DisplayUnavailable,

    #[error("Screen capture permission denied")]
    PermissionDenied,

    #[error("Capture backend failed: {0}")]
    Backend(String),

    #[error("Captured frame is invalid: {0}")]
    InvalidFrame(#[from] SnapshotError),
}

/// Errors that prevent a session from starting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Screen capture failed: {0}")]
    Capture(#[from] CaptureError),
}

/// Takes one snapshot of the whole screen.
pub trait ScreenCapture {
    fn capture(&mut self) -> Result<Snapshot, CaptureError>;
}

impl<F> ScreenCapture for F
where
    F: FnMut() -> Result<Snapshot, CaptureError>,
{
    fn capture(&mut self) -> Result<Snapshot, CaptureError> {
        self()
    }
}

/// Whether a session still accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Finished,
}

fn capture_once<C: ScreenCapture + ?Sized>(capture: &mut C) -> Result<Snapshot, SessionError> {
    match capture.capture() {
        Ok(snapshot) => {
            log::info!("Captured {}x{} screen snapshot", snapshot.width(), snapshot.height());
            Ok(snapshot)
        }
        Err(e) => {
            log::warn!("Screen capture failed: {}", e);
            Err(e.into())
        }
    }
}
