//! Pixel snapshots: screen captures and window bitmaps.
//!
//! This module provides:
//! - The immutable RGB [`Snapshot`] buffer
//! - Sub-rectangle extraction for committed crops
//! - Greyscale derivation for the greyscale render variant
//!
//! A snapshot is taken once per overlay session and never mutated; every
//! derived buffer is a new snapshot.

mod crop;
mod greyscale;
mod types;

pub use crop::{extract_region, CropRect};
pub use greyscale::{grey_level, to_greyscale};
pub use types::{Snapshot, SnapshotError};
