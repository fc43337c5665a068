//! Parameter types configuring the fusion pipeline.
//!
//! Defaults carry the constants the estimators were tuned with on
//! 10 Hz automotive data; the camera-side pixel thresholds scale with
//! image resolution and are the first knobs to revisit on a different
//! sensor setup.

use serde::{Deserialize, Serialize};

use crate::ttc::{CameraTtcParams, RangeTtcParams};

/// Pipeline-wide parameters controlling association and both estimators.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    /// Capture rate shared by both sensors (frames per second).
    pub frame_rate: f64,
    /// Fraction in `[0, 1)` trimmed from each region rectangle before
    /// range points are tested against it.
    pub shrink_factor: f64,
    /// Correspondences displaced by at least this multiple of the
    /// region-mean displacement are dropped.
    pub match_outlier_ratio: f64,
    /// Range-based estimator: clustering and ego-lane restriction.
    pub range_ttc: RangeTtcParams,
    /// Camera-based estimator: ratio-pair gates.
    pub camera_ttc: CameraTtcParams,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            frame_rate: 10.0,
            shrink_factor: 0.1,
            match_outlier_ratio: 1.5,
            range_ttc: RangeTtcParams::default(),
            camera_ttc: CameraTtcParams::default(),
        }
    }
}
