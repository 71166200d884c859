//! Transitive triple-correlation resolution.

use log::debug;
use serde::{Deserialize, Serialize};
use shared::Instrument;

use crate::table::EdgeTable;

/// A source detected by all three cameras, identified per camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripleMatch {
    /// Identifier of the PN detection.
    pub pn: u32,
    /// Identifier of the M1 detection.
    pub m1: u32,
    /// Identifier of the M2 detection.
    pub m2: u32,
}

/// Chains pairwise edges into three-camera matches.
///
/// For each (PN, M1) edge, the (PN, M2) edges sharing its PN endpoint and
/// the (M1, M2) edges sharing its M1 endpoint are candidate chains; every
/// combination whose two M2 endpoints name the same detection closes a
/// triple. Endpoints compare on identifier and camera tag together. The
/// output is recomputed from scratch on every call and keeps one row per
/// agreeing combination, so a source reached through several chains appears
/// several times.
pub fn resolve_triples(table: &EdgeTable) -> Vec<TripleMatch> {
    let pn_m1 = table.pair(Instrument::Pn, Instrument::M1);
    let m1_m2 = table.pair(Instrument::M1, Instrument::M2);
    let pn_m2 = table.pair(Instrument::Pn, Instrument::M2);

    let mut triples = Vec::new();
    for seed in pn_m1 {
        let via_pn: Vec<_> = pn_m2
            .iter()
            .copied()
            .filter(|edge| edge.first.same_source(&seed.first))
            .collect();
        let via_m1: Vec<_> = m1_m2
            .iter()
            .copied()
            .filter(|edge| edge.first.same_source(&seed.second))
            .collect();

        for chain_pn in &via_pn {
            for chain_m1 in &via_m1 {
                if chain_pn.second.same_source(&chain_m1.second) {
                    triples.push(TripleMatch {
                        pn: seed.first.id,
                        m1: seed.second.id,
                        m2: chain_pn.second.id,
                    });
                }
            }
        }
    }
    debug!("resolved {} triple matches", triples.len());
    triples
}
