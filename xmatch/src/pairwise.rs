//! Pairwise cross-camera correlation.

use log::{debug, info};
use shared::{Instrument, Source};

use crate::dedup::validate_list;
use crate::error::XmatchError;
use crate::table::{CorrelationEdge, EdgeTable, Endpoint};

/// Correlates two cameras' detection lists.
///
/// Every cross pair closer on the sky than the sum of the two match radii
/// becomes an edge. The scan is the full cross product in list order, so
/// the edge table preserves `(index_1, index_2)` enumeration order; the
/// per-observation lists are tens of sources, so no spatial index is used.
///
/// # Errors
///
/// Fails when both sides name the same camera, a list contains a record
/// from another camera, or a match radius is invalid.
pub fn correlate_pair(
    inst_1: Instrument,
    sources_1: &[Source],
    inst_2: Instrument,
    sources_2: &[Source],
) -> Result<Vec<CorrelationEdge>, XmatchError> {
    if inst_1 == inst_2 {
        return Err(XmatchError::SameInstrumentPair(inst_1));
    }
    validate_list(inst_1, sources_1)?;
    validate_list(inst_2, sources_2)?;

    let mut edges = Vec::new();
    for s1 in sources_1 {
        let p1 = s1.position();
        for s2 in sources_2 {
            let separation = p1.separation_arcsec(&s2.position());
            if separation < s1.radius_arcsec + s2.radius_arcsec {
                edges.push(CorrelationEdge {
                    first: Endpoint::from_source(s1),
                    second: Endpoint::from_source(s2),
                });
            }
        }
    }
    debug!("{inst_1}x{inst_2}: {} correlated pairs", edges.len());
    Ok(edges)
}

/// Runs the three pairwise correlations and assembles the global edge table.
///
/// The three jobs are independent and run in parallel; their edges land in
/// the table in the fixed order (PN, M1), (M1, M2), (PN, M2).
pub fn correlate_all(
    pn: &[Source],
    m1: &[Source],
    m2: &[Source],
) -> Result<EdgeTable, XmatchError> {
    let ((pn_m1, m1_m2), pn_m2) = rayon::join(
        || {
            rayon::join(
                || correlate_pair(Instrument::Pn, pn, Instrument::M1, m1),
                || correlate_pair(Instrument::M1, m1, Instrument::M2, m2),
            )
        },
        || correlate_pair(Instrument::Pn, pn, Instrument::M2, m2),
    );

    let mut table = EdgeTable::new();
    table.extend(pn_m1?);
    table.extend(m1_m2?);
    table.extend(pn_m2?);
    info!("correlation table holds {} edges", table.len());
    Ok(table)
}
