//! TTC from range data: closest in-lane point tracking.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clustering::{cluster_points, ClusterParams};
use crate::types::RangePoint;

/// Parameters for the range-based estimator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeTtcParams {
    /// Half-width of the assumed ego lane (metres); only points with
    /// `|y|` below this count towards the closest distance.
    pub lane_half_width: f64,
    /// Clustering applied to each point set to strip stray returns
    /// before the closest-point scan.
    pub cluster: ClusterParams,
}

impl Default for RangeTtcParams {
    fn default() -> Self {
        Self {
            lane_half_width: 2.0,
            cluster: ClusterParams::default(),
        }
    }
}

/// Estimate TTC from the previous- and current-frame range points of one
/// matched region.
///
/// Each set is clustered independently to reject outlier returns, then
/// restricted to the ego lane; the minimum forward distance of each frame
/// feeds the constant-velocity model. Returns `NaN` when either frame has
/// no qualifying point and positive infinity when the closest distance
/// did not change.
pub fn compute_range_ttc(
    prev_points: &[RangePoint],
    curr_points: &[RangePoint],
    frame_rate: f64,
    params: &RangeTtcParams,
) -> f64 {
    let (prev_clustered, _) = cluster_points(prev_points, &params.cluster);
    let (curr_clustered, _) = cluster_points(curr_points, &params.cluster);

    let min_prev = closest_in_lane(&prev_clustered, params.lane_half_width);
    let min_curr = closest_in_lane(&curr_clustered, params.lane_half_width);
    let (Some(min_prev), Some(min_curr)) = (min_prev, min_curr) else {
        debug!("range TTC: no in-lane points after clustering");
        return f64::NAN;
    };

    let dt = 1.0 / frame_rate;
    if min_prev == min_curr {
        return f64::INFINITY;
    }
    min_curr / ((min_prev - min_curr) / dt)
}

/// Minimum forward distance among points inside the ego lane, if any.
fn closest_in_lane(points: &[RangePoint], half_width: f64) -> Option<f64> {
    points
        .iter()
        .filter(|p| p.y.abs() < half_width)
        .map(|p| p.x)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}
