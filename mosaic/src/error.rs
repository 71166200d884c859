//! Error taxonomy for detector-plane assembly and sky warping.

use shared::Instrument;
use thiserror::Error;

/// Errors raised while assembling or warping a camera's variability plane.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Wrong number of element grids for the camera.
    #[error("{instrument} expects {expected} element grids, got {found}")]
    ElementCount {
        instrument: Instrument,
        expected: usize,
        found: usize,
    },

    /// An element grid had the wrong shape.
    #[error("{instrument} element {element} has shape {found:?}, expected {expected:?}")]
    ElementShape {
        instrument: Instrument,
        element: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A legal axis range from the pointing metadata spans zero, backwards
    /// or a non-finite value.
    #[error("{instrument} {axis} legal range {range:?} has non-positive span")]
    DegenerateLegalRange {
        instrument: Instrument,
        axis: &'static str,
        range: (f64, f64),
    },

    /// A projected footprint limit is NaN or infinite, so no whole-pixel
    /// margin can be derived from it.
    #[error("{instrument} {axis} projected range {range:?} is not finite")]
    NonFiniteFootprint {
        instrument: Instrument,
        axis: &'static str,
        range: (f64, f64),
    },

    /// The projected footprint extends outside the legal range, leaving a
    /// negative whole-pixel margin.
    #[error(
        "{instrument} {axis} axis: projected footprint extends outside the \
         legal range (margins {margins:?} px)"
    )]
    FootprintOutsideLegal {
        instrument: Instrument,
        axis: &'static str,
        margins: (i64, i64),
    },

    /// The footprint margins consume the whole canvas, leaving no pixels to
    /// resample into.
    #[error("{instrument} {axis} axis: margins leave a {size} px resample target")]
    EmptyResampleTarget {
        instrument: Instrument,
        axis: &'static str,
        size: i64,
    },

    /// Both footprint margins truncate to zero, so the fixed pad budget
    /// cannot be apportioned between them.
    #[error("{instrument} {axis} axis: zero footprint margins, cannot split the pad budget")]
    NoFootprintMargin {
        instrument: Instrument,
        axis: &'static str,
    },

    /// Internal band stacking produced mismatched block shapes.
    #[error("detector plane stacking failed: {0}")]
    Stack(#[from] ndarray::ShapeError),
}
