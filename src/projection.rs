//! Projection of vehicle-frame range points into pixel coordinates.

use nalgebra::{Matrix3x4, Matrix4, Vector4};
use serde::Serialize;

use crate::types::{PixelPoint, RangePoint};

const EPS: f64 = 1e-9;

/// Fixed camera calibration supplied by the upstream pipeline: intrinsic
/// projection, rectification and vehicle-to-camera extrinsic transforms,
/// composed in that order and unchanged across frames.
#[derive(Clone, Debug, Serialize)]
pub struct CameraCalibration {
    pub intrinsic: Matrix3x4<f64>,
    pub rectification: Matrix4<f64>,
    pub extrinsic: Matrix4<f64>,
}

impl CameraCalibration {
    /// Pre-multiply the calibration triple into a single projective map.
    pub fn projector(&self) -> Projector {
        Projector {
            composite: self.intrinsic * self.rectification * self.extrinsic,
        }
    }
}

/// Precomposed projective map from vehicle coordinates to pixels.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    composite: Matrix3x4<f64>,
}

impl Projector {
    /// Homogeneous projection of a range point.
    ///
    /// The third component of the projected vector normalizes the first
    /// two. Returns `None` when it vanishes (point on the principal
    /// plane) or the result is non-finite; callers drop such points from
    /// region assignment.
    pub fn project(&self, point: &RangePoint) -> Option<PixelPoint> {
        let v = self.composite * Vector4::new(point.x, point.y, point.z, 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        Some([v[0] / w, v[1] / w])
    }
}
