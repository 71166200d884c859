//! The global correlation edge table.

use serde::{Deserialize, Serialize};
use shared::{Instrument, Source};

/// Identifying fields of one endpoint of a correlation edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Source identifier within its camera's list.
    pub id: u32,
    /// Camera the source belongs to.
    pub instrument: Instrument,
    /// Right ascension, degrees.
    pub ra_deg: f64,
    /// Declination, degrees.
    pub dec_deg: f64,
    /// Match radius, arcseconds.
    pub radius_arcsec: f64,
}

impl Endpoint {
    pub(crate) fn from_source(source: &Source) -> Self {
        Endpoint {
            id: source.id,
            instrument: source.instrument,
            ra_deg: source.ra_deg,
            dec_deg: source.dec_deg,
            radius_arcsec: source.radius_arcsec,
        }
    }

    /// Whether this endpoint refers to the given source record.
    pub fn refers_to(&self, source: &Source) -> bool {
        self.id == source.id && self.instrument == source.instrument
    }

    /// Whether two endpoints name the same source.
    pub fn same_source(&self, other: &Endpoint) -> bool {
        self.id == other.id && self.instrument == other.instrument
    }
}

/// One cross-camera match between two detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEdge {
    /// Endpoint from the first list handed to the correlator.
    pub first: Endpoint,
    /// Endpoint from the second list.
    pub second: Endpoint,
}

/// Append-only table of correlation edges across all camera pairs.
///
/// The three pairwise runs accumulate here; consumers pull the sub-table
/// for one ordered camera pair. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTable {
    edges: Vec<CorrelationEdge>,
}

impl EdgeTable {
    pub fn new() -> Self {
        EdgeTable::default()
    }

    /// Appends the edges from one pairwise run.
    pub fn extend(&mut self, edges: Vec<CorrelationEdge>) {
        self.edges.extend(edges);
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[CorrelationEdge] {
        &self.edges
    }

    /// The sub-table whose endpoints are tagged `(first, second)`, in
    /// insertion order.
    pub fn pair(&self, first: Instrument, second: Instrument) -> Vec<&CorrelationEdge> {
        self.edges
            .iter()
            .filter(|edge| {
                edge.first.instrument == first && edge.second.instrument == second
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
