//! Camera tags for the three EPIC imagers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a camera tag string is not one of the three imagers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown instrument tag {0:?}, expected PN, M1 or M2")]
pub struct ParseInstrumentError(pub String);

/// One of the three co-aligned EPIC cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    /// The pn-junction camera, a single rectangular detector plane.
    Pn,
    /// The first MOS camera.
    M1,
    /// The second MOS camera.
    M2,
}

impl Instrument {
    /// All three cameras in canonical order.
    pub const ALL: [Instrument; 3] = [Instrument::Pn, Instrument::M1, Instrument::M2];

    /// Short uppercase tag, as carried in source and correlation tables.
    pub fn tag(&self) -> &'static str {
        match self {
            Instrument::Pn => "PN",
            Instrument::M1 => "M1",
            Instrument::M2 => "M2",
        }
    }

    /// Whether this camera belongs to the MOS family, whose detector plane
    /// is cruciform rather than rectangular.
    pub fn is_mos(&self) -> bool {
        matches!(self, Instrument::M1 | Instrument::M2)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Instrument {
    type Err = ParseInstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PN" => Ok(Instrument::Pn),
            "M1" => Ok(Instrument::M1),
            "M2" => Ok(Instrument::M2),
            other => Err(ParseInstrumentError(other.to_string())),
        }
    }
}
