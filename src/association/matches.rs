//! Correspondence-to-region assignment with displacement-outlier removal.

use log::debug;
use serde::Serialize;

use crate::types::{pixel_distance, Correspondence, DetectionRegion, PixelPoint};

/// Counts emitted while populating one region's correspondence list.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFilterDiagnostics {
    /// Correspondences whose current-frame feature fell inside the region.
    pub candidates: usize,
    pub kept: usize,
    pub rejected: usize,
    /// Mean displacement of the candidates, before any removal.
    pub mean_displacement: f64,
}

/// Assign to `region` every correspondence whose current-frame feature lies
/// inside its rectangle, then drop those whose displacement reaches
/// `outlier_ratio` times the mean displacement of the assigned set.
///
/// Every retain decision is taken against the mean computed before any
/// removal; the filter is a single pass, never a mutate-while-iterating
/// walk. With zero candidates the region is left empty and no filtering
/// happens.
pub fn assign_matches(
    region: &mut DetectionRegion,
    matches: &[Correspondence],
    prev_features: &[PixelPoint],
    curr_features: &[PixelPoint],
    outlier_ratio: f64,
) -> MatchFilterDiagnostics {
    let candidates: Vec<Correspondence> = matches
        .iter()
        .filter(|m| region.rect.contains(curr_features[m.curr_idx]))
        .copied()
        .collect();
    if candidates.is_empty() {
        region.matches.clear();
        return MatchFilterDiagnostics::default();
    }

    let displacements: Vec<f64> = candidates
        .iter()
        .map(|m| pixel_distance(prev_features[m.prev_idx], curr_features[m.curr_idx]))
        .collect();
    let mean = displacements.iter().sum::<f64>() / displacements.len() as f64;
    let threshold = outlier_ratio * mean;

    let mut kept = Vec::with_capacity(candidates.len());
    for (m, d) in candidates.iter().zip(&displacements) {
        if *d < threshold {
            kept.push(*m);
        }
    }

    let diag = MatchFilterDiagnostics {
        candidates: candidates.len(),
        kept: kept.len(),
        rejected: candidates.len() - kept.len(),
        mean_displacement: mean,
    };
    if diag.rejected > 0 {
        debug!(
            "region {}: kept {}/{} correspondences (mean displacement {:.2} px)",
            region.id, diag.kept, diag.candidates, mean
        );
    }
    region.matches = kept;
    diag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn region() -> DetectionRegion {
        DetectionRegion::new(0, Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    fn identity_matches(n: usize) -> Vec<Correspondence> {
        (0..n).map(|i| Correspondence::new(i, i)).collect()
    }

    #[test]
    fn outlier_against_prefilter_mean_is_removed() {
        // displacements 10, 10, 10, 100: mean 32.5, threshold 48.75
        let prev = vec![[0.0, 10.0], [10.0, 10.0], [20.0, 10.0], [140.0, 10.0]];
        let curr = vec![[10.0, 10.0], [20.0, 10.0], [30.0, 10.0], [40.0, 10.0]];
        let mut reg = region();
        let diag = assign_matches(&mut reg, &identity_matches(4), &prev, &curr, 1.5);
        assert_eq!(diag.candidates, 4);
        assert_eq!(diag.kept, 3);
        assert!((diag.mean_displacement - 32.5).abs() < 1e-9);
        assert_eq!(reg.matches, identity_matches(3));
    }

    #[test]
    fn displacement_at_threshold_is_rejected() {
        // displacements 1, 1, 2: mean 4/3, threshold exactly 2
        let prev = vec![[9.0, 10.0], [19.0, 10.0], [28.0, 10.0]];
        let curr = vec![[10.0, 10.0], [20.0, 10.0], [30.0, 10.0]];
        let mut reg = region();
        let diag = assign_matches(&mut reg, &identity_matches(3), &prev, &curr, 1.5);
        assert_eq!(diag.kept, 2);
        assert_eq!(reg.matches, identity_matches(2));
    }

    #[test]
    fn features_outside_the_region_are_not_candidates() {
        let prev = vec![[0.0, 0.0], [0.0, 0.0]];
        let curr = vec![[50.0, 50.0], [150.0, 50.0]];
        let mut reg = region();
        let diag = assign_matches(&mut reg, &identity_matches(2), &prev, &curr, 1.5);
        assert_eq!(diag.candidates, 1);
        assert_eq!(reg.matches, vec![Correspondence::new(0, 0)]);
    }

    #[test]
    fn empty_candidate_set_skips_filtering() {
        let prev = vec![[0.0, 0.0]];
        let curr = vec![[200.0, 200.0]];
        let mut reg = region();
        let diag = assign_matches(&mut reg, &identity_matches(1), &prev, &curr, 1.5);
        assert_eq!(diag.candidates, 0);
        assert!(reg.matches.is_empty());
    }
}
