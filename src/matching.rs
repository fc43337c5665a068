//! Cross-frame region matching by correspondence majority vote.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{Correspondence, Frame};

/// Counts emitted by one matching pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMatchDiagnostics {
    pub prev_regions: usize,
    pub matched: usize,
    /// Previous regions with no corroborating correspondence at all.
    pub unmatched: usize,
}

/// Map every previous-frame region to at most one current-frame region.
///
/// A correspondence votes for the pair `(P, C)` when its previous-frame
/// feature lies in `P`'s rectangle and its current-frame feature in `C`'s.
/// Each previous region takes the current region with the most votes;
/// equal counts resolve to the lowest current-region id, so repeated runs
/// on identical input agree. Previous regions that collect no votes are
/// absent from the mapping rather than paired with a sentinel.
pub fn match_regions(
    matches: &[Correspondence],
    prev: &Frame,
    curr: &Frame,
) -> (BTreeMap<u32, u32>, RegionMatchDiagnostics) {
    let mut tallies: BTreeMap<u32, BTreeMap<u32, usize>> = BTreeMap::new();
    for m in matches {
        let prev_pt = prev.features[m.prev_idx];
        let curr_pt = curr.features[m.curr_idx];
        for prev_region in prev.regions.iter().filter(|r| r.rect.contains(prev_pt)) {
            let tally = tallies.entry(prev_region.id).or_default();
            for curr_region in curr.regions.iter().filter(|r| r.rect.contains(curr_pt)) {
                *tally.entry(curr_region.id).or_insert(0) += 1;
            }
        }
    }

    let mut mapping = BTreeMap::new();
    for region in &prev.regions {
        let Some(tally) = tallies.get(&region.id) else {
            continue;
        };
        // ascending id order keeps the lowest identifier on equal votes
        let mut best: Option<(u32, usize)> = None;
        for (&curr_id, &votes) in tally {
            if best.map_or(true, |(_, best_votes)| votes > best_votes) {
                best = Some((curr_id, votes));
            }
        }
        if let Some((curr_id, votes)) = best {
            debug!("region match {} -> {} ({votes} votes)", region.id, curr_id);
            mapping.insert(region.id, curr_id);
        }
    }

    let diag = RegionMatchDiagnostics {
        prev_regions: prev.regions.len(),
        matched: mapping.len(),
        unmatched: prev.regions.len() - mapping.len(),
    };
    (mapping, diag)
}
