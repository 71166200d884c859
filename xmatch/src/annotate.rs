//! Correlation-label annotation of detection lists.

use shared::{CorrelationLabel, Instrument, Source};

use crate::table::{CorrelationEdge, EdgeTable};
use crate::triple::TripleMatch;

/// Which endpoint of an edge a camera's detections occupy.
#[derive(Debug, Clone, Copy)]
enum Side {
    First,
    Second,
}

/// The two pair tables relevant to one camera, in precedence order, with
/// the endpoint side to inspect and the partner camera a hit names.
///
/// Precedence is part of the labelling contract: the first table listed
/// wins, the second is consulted only on a miss.
fn lookup_order(instrument: Instrument) -> [(Instrument, Instrument, Side, Instrument); 2] {
    use Instrument::{M1, M2, Pn};
    match instrument {
        Pn => [(Pn, M1, Side::First, M1), (Pn, M2, Side::First, M2)],
        M1 => [(M1, M2, Side::First, M2), (Pn, M1, Side::Second, Pn)],
        M2 => [(M1, M2, Side::Second, M1), (Pn, M2, Side::Second, Pn)],
    }
}

/// Rewrites the correlation labels of one camera's detection list.
///
/// Every label is reset, then reassigned from the current table: a source
/// found in one of its camera's two pair tables is labelled with the
/// partner camera, and membership in the triple list overrides the label
/// with [`CorrelationLabel::Triple`]. Re-running against an emptier table
/// clears stale labels, so annotation stays additive over the records.
pub fn annotate_sources(
    instrument: Instrument,
    sources: &mut [Source],
    table: &EdgeTable,
    triples: &[TripleMatch],
) {
    let lookups: [(Vec<&CorrelationEdge>, Side, Instrument); 2] = lookup_order(instrument)
        .map(|(first, second, side, partner)| (table.pair(first, second), side, partner));

    for source in sources.iter_mut() {
        source.label = CorrelationLabel::Unmatched;

        for (edges, side, partner) in &lookups {
            let hit = edges.iter().any(|edge| {
                let endpoint = match side {
                    Side::First => &edge.first,
                    Side::Second => &edge.second,
                };
                endpoint.refers_to(source)
            });
            if hit {
                source.label = CorrelationLabel::Pair(*partner);
                break;
            }
        }

        if in_triple(source, triples) {
            source.label = CorrelationLabel::Triple;
        }
    }
}

/// Annotates all three camera lists against the same table and triples.
pub fn annotate_all(
    pn: &mut [Source],
    m1: &mut [Source],
    m2: &mut [Source],
    table: &EdgeTable,
    triples: &[TripleMatch],
) {
    annotate_sources(Instrument::Pn, pn, table, triples);
    annotate_sources(Instrument::M1, m1, table, triples);
    annotate_sources(Instrument::M2, m2, table, triples);
}

fn in_triple(source: &Source, triples: &[TripleMatch]) -> bool {
    triples.iter().any(|triple| {
        let id = match source.instrument {
            Instrument::Pn => triple.pn,
            Instrument::M1 => triple.m1,
            Instrument::M2 => triple.m2,
        };
        id == source.id
    })
}
