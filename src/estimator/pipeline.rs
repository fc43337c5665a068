//! The fusion pipeline: region matching, association, per-region TTC.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::association::{assign_matches, assign_range_points, RangeAssignmentDiagnostics};
use crate::diagnostics::TimingBreakdown;
use crate::matching::{match_regions, RegionMatchDiagnostics};
use crate::projection::{CameraCalibration, Projector};
use crate::ttc::{compute_camera_ttc, compute_range_ttc};
use crate::types::{Correspondence, DetectionRegion, Frame, RegionTtc};

use super::params::FusionParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything one frame-pair run produces: the previous→current region
/// mapping, the per-region TTC estimates, and stage diagnostics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionReport {
    pub region_matches: BTreeMap<u32, u32>,
    pub estimates: Vec<RegionTtc>,
    pub matching: RegionMatchDiagnostics,
    pub prev_assignment: RangeAssignmentDiagnostics,
    pub curr_assignment: RangeAssignmentDiagnostics,
    pub timing: TimingBreakdown,
}

/// Sensor-fusion TTC estimator over consecutive frame pairs.
///
/// Construction pre-composes the calibration triple; `process` is pure
/// over its inputs and may be called for any number of frame pairs.
pub struct TtcEstimator {
    params: FusionParams,
    projector: Projector,
}

impl TtcEstimator {
    /// Create an estimator with the supplied parameters and calibration.
    pub fn new(params: FusionParams, calibration: &CameraCalibration) -> Self {
        Self {
            params,
            projector: calibration.projector(),
        }
    }

    pub fn params(&self) -> &FusionParams {
        &self.params
    }

    /// Run one TTC cycle over a frame pair and its correspondence list.
    ///
    /// A region that cannot produce an estimate reports `NaN`/`inf`
    /// scalars; it never aborts the other regions.
    pub fn process(
        &self,
        prev: &Frame,
        curr: &Frame,
        matches: &[Correspondence],
    ) -> FusionReport {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let (region_matches, matching) = match_regions(matches, prev, curr);
        timing.push("regionMatching", elapsed_ms(stage));

        let stage = Instant::now();
        let mut prev_regions = prev.regions.clone();
        let mut curr_regions = curr.regions.clone();
        let prev_assignment = assign_range_points(
            &mut prev_regions,
            &prev.range_points,
            &self.projector,
            self.params.shrink_factor,
        );
        let curr_assignment = assign_range_points(
            &mut curr_regions,
            &curr.range_points,
            &self.projector,
            self.params.shrink_factor,
        );
        timing.push("rangeAssignment", elapsed_ms(stage));

        let stage = Instant::now();
        let pairs: Vec<(u32, u32)> = region_matches.iter().map(|(&p, &c)| (p, c)).collect();
        let estimates =
            self.estimate_regions(&pairs, &prev_regions, &curr_regions, prev, curr, matches);
        timing.push("regionTtc", elapsed_ms(stage));

        timing.total_ms = elapsed_ms(total_start);
        FusionReport {
            region_matches,
            estimates,
            matching,
            prev_assignment,
            curr_assignment,
            timing,
        }
    }

    fn estimate_regions(
        &self,
        pairs: &[(u32, u32)],
        prev_regions: &[DetectionRegion],
        curr_regions: &[DetectionRegion],
        prev: &Frame,
        curr: &Frame,
        matches: &[Correspondence],
    ) -> Vec<RegionTtc> {
        #[cfg(feature = "parallel")]
        {
            pairs
                .par_iter()
                .filter_map(|&(prev_id, curr_id)| {
                    self.estimate_region(prev_id, curr_id, prev_regions, curr_regions, prev, curr, matches)
                })
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pairs
                .iter()
                .filter_map(|&(prev_id, curr_id)| {
                    self.estimate_region(prev_id, curr_id, prev_regions, curr_regions, prev, curr, matches)
                })
                .collect()
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn estimate_region(
        &self,
        prev_id: u32,
        curr_id: u32,
        prev_regions: &[DetectionRegion],
        curr_regions: &[DetectionRegion],
        prev: &Frame,
        curr: &Frame,
        matches: &[Correspondence],
    ) -> Option<RegionTtc> {
        let prev_region = prev_regions.iter().find(|r| r.id == prev_id)?;
        let mut curr_region = curr_regions.iter().find(|r| r.id == curr_id)?.clone();

        assign_matches(
            &mut curr_region,
            matches,
            &prev.features,
            &curr.features,
            self.params.match_outlier_ratio,
        );
        let camera_ttc = compute_camera_ttc(
            &curr_region.matches,
            &prev.features,
            &curr.features,
            self.params.frame_rate,
            &self.params.camera_ttc,
        );
        let range_ttc = compute_range_ttc(
            &prev_region.range_points,
            &curr_region.range_points,
            self.params.frame_rate,
            &self.params.range_ttc,
        );

        Some(RegionTtc {
            prev_id,
            curr_id,
            range_ttc,
            camera_ttc,
            matches_used: curr_region.matches.len(),
            prev_range_points: prev_region.range_points.len(),
            curr_range_points: curr_region.range_points.len(),
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
