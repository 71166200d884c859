//! Duplicate suppression within one camera's detection list.
//!
//! The variability search runs several detection box sizes over the same
//! field, so one physical source can appear once per box size. Larger
//! variable areas win: a detection whose centroid lies strictly inside a
//! larger detection's match radius is dropped. The containment test is a
//! centre-in-disk heuristic, not a circle-overlap test.

use log::debug;
use shared::{Instrument, Source};

use crate::error::XmatchError;

/// Removes detections lying inside a larger detection's match radius and
/// renumbers the survivors densely from 1.
///
/// Candidates are ranked by descending radius, ties broken by ascending
/// original identifier, and each candidate suppresses every later one whose
/// centre falls strictly inside its radius. A suppressed candidate still
/// suppresses its own smaller neighbours. Survivors are returned in
/// ascending original-identifier order.
///
/// # Errors
///
/// Fails when a record carries a different camera tag than `instrument`, or
/// a match radius that is not finite and positive.
pub fn suppress_duplicates(
    instrument: Instrument,
    sources: &[Source],
) -> Result<Vec<Source>, XmatchError> {
    validate_list(instrument, sources)?;

    let mut order: Vec<usize> = (0..sources.len()).collect();
    order.sort_by(|&a, &b| {
        sources[b]
            .radius_arcsec
            .total_cmp(&sources[a].radius_arcsec)
            .then(sources[a].id.cmp(&sources[b].id))
    });

    let mut suppressed = vec![false; sources.len()];
    for (rank, &i) in order.iter().enumerate() {
        let winner = &sources[i];
        let centre = winner.position();
        for &j in &order[rank + 1..] {
            if centre.separation_arcsec(&sources[j].position()) < winner.radius_arcsec {
                suppressed[j] = true;
            }
        }
    }

    let mut survivors: Vec<Source> = sources
        .iter()
        .enumerate()
        .filter(|(index, _)| !suppressed[*index])
        .map(|(_, source)| source.clone())
        .collect();
    survivors.sort_by_key(|source| source.id);
    for (index, survivor) in survivors.iter_mut().enumerate() {
        survivor.id = index as u32 + 1;
    }

    debug!(
        "{instrument}: suppressed {} of {} detections as duplicates",
        sources.len() - survivors.len(),
        sources.len()
    );
    Ok(survivors)
}

/// Checks that a detection list is homogeneous and its radii are usable.
pub(crate) fn validate_list(
    instrument: Instrument,
    sources: &[Source],
) -> Result<(), XmatchError> {
    for source in sources {
        if source.instrument != instrument {
            return Err(XmatchError::MixedInstruments {
                expected: instrument,
                found: source.instrument,
                id: source.id,
            });
        }
        if !source.radius_arcsec.is_finite() || source.radius_arcsec <= 0.0 {
            return Err(XmatchError::InvalidRadius {
                instrument,
                id: source.id,
                radius_arcsec: source.radius_arcsec,
            });
        }
    }
    Ok(())
}
