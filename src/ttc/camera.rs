//! TTC from image motion: median pairwise distance-ratio statistics.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::{pixel_distance, Correspondence, PixelPoint};

/// Gates applied to each correspondence pair before its ratio is used.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTtcParams {
    /// Pairs closer than this in the current frame are too unstable to
    /// contribute a ratio (pixels). Tied to the image resolution; tune it
    /// alongside the feature pipeline.
    pub min_pair_distance: f64,
    /// Previous-frame separations at or below this are treated as
    /// coincident features and skipped.
    pub epsilon: f64,
}

impl Default for CameraTtcParams {
    fn default() -> Self {
        Self {
            min_pair_distance: 100.0,
            epsilon: f64::EPSILON,
        }
    }
}

/// Estimate TTC from the filtered correspondence set of one region.
///
/// Every unordered pair of distinct correspondences contributes the ratio
/// of its current-frame to previous-frame feature separation; the median
/// ratio is the relative scale change between the frames. Mismatched and
/// near-duplicate pairs put a long tail on the ratio distribution, which
/// the median rides out without a second outlier pass.
///
/// Returns `NaN` when no pair passes the gates and positive infinity when
/// the median ratio is exactly one (no scale change).
pub fn compute_camera_ttc(
    matches: &[Correspondence],
    prev_features: &[PixelPoint],
    curr_features: &[PixelPoint],
    frame_rate: f64,
    params: &CameraTtcParams,
) -> f64 {
    let mut ratios = Vec::new();
    for (i, outer) in matches.iter().enumerate() {
        let outer_prev = prev_features[outer.prev_idx];
        let outer_curr = curr_features[outer.curr_idx];
        for inner in &matches[i + 1..] {
            let dist_prev = pixel_distance(outer_prev, prev_features[inner.prev_idx]);
            let dist_curr = pixel_distance(outer_curr, curr_features[inner.curr_idx]);
            if dist_prev > params.epsilon && dist_curr >= params.min_pair_distance {
                ratios.push(dist_curr / dist_prev);
            }
        }
    }

    if ratios.is_empty() {
        debug!("camera TTC: no stable correspondence pairs");
        return f64::NAN;
    }

    ratios.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = ratios.len() / 2;
    let median_ratio = if ratios.len() % 2 == 0 {
        0.5 * (ratios[mid - 1] + ratios[mid])
    } else {
        ratios[mid]
    };

    let dt = 1.0 / frame_rate;
    if median_ratio == 1.0 {
        return f64::INFINITY;
    }
    -dt / (1.0 - median_ratio)
}
