//! Common value types for the EPIC transient cross-match pipeline.
//!
//! Everything downstream of the variability search speaks in these terms:
//! the camera tag, the detected [`Source`] record with its correlation
//! label, equatorial positions with great-circle separations, and the
//! sexagesimal strings the overlay table prints.

pub mod equatorial;
pub mod instrument;
pub mod sexagesimal;
pub mod source;

pub use equatorial::Equatorial;
pub use instrument::{Instrument, ParseInstrumentError};
pub use source::{CorrelationLabel, Source};
