//! Fusion estimator orchestrating the per-frame-pair TTC cycle.
//!
//! Overview
//! - Matches detection regions across the frame pair by correspondence
//!   majority vote; unmatched previous regions drop out of the cycle.
//! - Projects each frame's range points through the fixed calibration and
//!   assigns them to the single region enclosing the projection.
//! - Per matched region pair: assigns and displacement-filters the
//!   correspondences, then computes the range-based and camera-based TTC
//!   estimates independently.
//! - Per-region work touches disjoint data; with the `parallel` feature
//!   it fans out over a rayon pool once the region mapping is fixed.
//!
//! Modules
//! - [`params`] – configuration aggregating every stage's knobs.
//! - `pipeline` – the [`TtcEstimator`] implementation and its report.

pub mod params;
mod pipeline;

pub use params::FusionParams;
pub use pipeline::{FusionReport, TtcEstimator};
