//! Detector-plane assembly and sky-frame remapping for the three EPIC
//! cameras.
//!
//! Each camera delivers its exposure as a list of per-CCD count grids. This
//! crate stitches those grids into a single detector plane using per-camera
//! layout tables ([`layout`]), then warps the plane onto a common square
//! sky canvas using the pointing geometry ([`warp`]), so the three cameras
//! can be compared or co-added pixel for pixel.
//!
//! The layouts are data, not code: each camera is described by a table of
//! band slots and per-CCD orientation transforms, and the assembly routine
//! interprets whichever table matches the camera.

pub mod assemble;
pub mod error;
pub mod layout;
pub mod raster;
pub mod warp;

pub use assemble::assemble_detector_plane;
pub use error::MosaicError;
pub use layout::{layout_for, InstrumentLayout, Slot, Transform};
pub use warp::{remap_observation, warp_to_sky, PointingMeta, SKY_CANVAS};
