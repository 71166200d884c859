//! Detected transient-source records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equatorial::Equatorial;
use crate::instrument::Instrument;

/// Scale from raw detector pixels to projected sky pixels.
pub const RAW_TO_SKY_PIXELS: f64 = 64.0;

/// Angular size of one projected sky pixel, in arcseconds.
pub const SKY_PIXEL_ARCSEC: f64 = 0.05;

/// Cross-camera correlation label, rewritten by each annotation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrelationLabel {
    /// No counterpart found on the other cameras.
    #[default]
    Unmatched,
    /// Matched by this partner camera.
    Pair(Instrument),
    /// Matched by both other cameras.
    Triple,
}

impl fmt::Display for CorrelationLabel {
    /// Renders the flag the overlay table prints: empty for unmatched, the
    /// partner tag for a pair, the `Triple` sentinel for a full match.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationLabel::Unmatched => Ok(()),
            CorrelationLabel::Pair(partner) => write!(f, "{partner}"),
            CorrelationLabel::Triple => f.write_str("Triple"),
        }
    }
}

/// One detected transient candidate on a single camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Identifier within the camera's list, dense `1..=N` after duplicate
    /// suppression.
    pub id: u32,
    /// Camera that detected the source.
    pub instrument: Instrument,
    /// Right ascension of the variability centroid, degrees.
    pub ra_deg: f64,
    /// Declination of the variability centroid, degrees.
    pub dec_deg: f64,
    /// Variable-area match radius, arcseconds.
    pub radius_arcsec: f64,
    /// Detector element the detection came from.
    pub element: usize,
    /// Raw pixel column on the element.
    pub raw_x: u32,
    /// Raw pixel row on the element.
    pub raw_y: u32,
    /// Projected sky-grid x position, sky pixels.
    pub sky_x: f64,
    /// Projected sky-grid y position, sky pixels.
    pub sky_y: f64,
    /// Match radius in projected sky pixels.
    pub sky_radius_px: f64,
    /// Correlation label from the most recent annotation pass.
    pub label: CorrelationLabel,
}

impl Source {
    /// Builds a record from a raw detection and its projected position.
    ///
    /// The raw radius (detector pixels) scales by [`RAW_TO_SKY_PIXELS`] to
    /// sky pixels and by [`SKY_PIXEL_ARCSEC`] to arcseconds. The projected
    /// position comes from the caller's astrometric solution.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw_detection(
        id: u32,
        instrument: Instrument,
        element: usize,
        raw_x: u32,
        raw_y: u32,
        raw_radius_px: f64,
        ra_deg: f64,
        dec_deg: f64,
        sky_x: f64,
        sky_y: f64,
    ) -> Self {
        let sky_radius_px = raw_radius_px * RAW_TO_SKY_PIXELS;
        Source {
            id,
            instrument,
            ra_deg,
            dec_deg,
            radius_arcsec: sky_radius_px * SKY_PIXEL_ARCSEC,
            element,
            raw_x,
            raw_y,
            sky_x,
            sky_y,
            sky_radius_px,
            label: CorrelationLabel::Unmatched,
        }
    }

    /// Sky position of the variability centroid.
    pub fn position(&self) -> Equatorial {
        Equatorial::from_degrees(self.ra_deg, self.dec_deg)
    }
}
