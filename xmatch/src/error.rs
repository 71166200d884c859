//! Error taxonomy for the correlation engine.

use shared::Instrument;
use thiserror::Error;

/// Errors raised while validating or correlating detection lists.
///
/// Degenerate but valid inputs (empty lists, no matches) are not errors;
/// every variant here means malformed input.
#[derive(Debug, Error)]
pub enum XmatchError {
    /// A detection list carried a record from a different camera.
    #[error("detection list for {expected} contains a record tagged {found} (id {id})")]
    MixedInstruments {
        /// Camera the list was declared to hold.
        expected: Instrument,
        /// Camera tag actually found on the record.
        found: Instrument,
        /// Identifier of the offending record.
        id: u32,
    },

    /// A match radius was zero, negative or not finite.
    #[error("{instrument} source {id} has invalid match radius {radius_arcsec} arcsec")]
    InvalidRadius {
        /// Camera whose detection list carried the radius.
        instrument: Instrument,
        /// Identifier of the offending record.
        id: u32,
        /// The rejected radius value, arcseconds.
        radius_arcsec: f64,
    },

    /// Both sides of a pairwise correlation named the same camera.
    #[error("pairwise correlation requires two distinct cameras, got {0} on both sides")]
    SameInstrumentPair(Instrument),
}
