#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod association;
pub mod clustering;
pub mod config;
pub mod diagnostics;
pub mod estimator;
pub mod matching;
pub mod projection;
pub mod ttc;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + per-cycle results.
pub use crate::estimator::{FusionParams, FusionReport, TtcEstimator};
pub use crate::projection::{CameraCalibration, Projector};
pub use crate::types::{Correspondence, DetectionRegion, Frame, RangePoint, Rect, RegionTtc};

// Stage-level helpers that are generally useful on their own.
pub use crate::clustering::{cluster_points, ClusterParams};
pub use crate::matching::match_regions;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::projection::CameraCalibration;
    pub use crate::types::{Correspondence, DetectionRegion, Frame, RangePoint, Rect};
    pub use crate::{FusionParams, FusionReport, RegionTtc, TtcEstimator};
}
