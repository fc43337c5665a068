use nalgebra::{Matrix3x4, Matrix4};
use ttc_fusion::prelude::*;

/// Forward-looking pinhole camera: focal length 500 px, principal point
/// (600, 300), vehicle axes (x forward, y left, z up) rotated into camera
/// axes. A point at `(x, y, z)` lands at
/// `(600 - 500 y / x, 300 - 500 z / x)`.
pub fn calibration() -> CameraCalibration {
    let intrinsic = Matrix3x4::new(
        500.0, 0.0, 600.0, 0.0, //
        0.0, 500.0, 300.0, 0.0, //
        0.0, 0.0, 1.0, 0.0,
    );
    let extrinsic = Matrix4::new(
        0.0, -1.0, 0.0, 0.0, //
        0.0, 0.0, -1.0, 0.0, //
        1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    );
    CameraCalibration {
        intrinsic,
        rectification: Matrix4::identity(),
        extrinsic,
    }
}

/// A wall of range returns at forward distance `x`, spread laterally
/// across the ego lane, plus one isolated return closer to the sensor.
pub fn wall_with_stray(x: f64, stray_x: f64) -> Vec<RangePoint> {
    let mut points: Vec<RangePoint> = (-10..=10)
        .map(|i| RangePoint::new(x, i as f64 * 0.1, 0.0))
        .collect();
    points.push(RangePoint::new(stray_x, 0.0, -0.5));
    points
}

/// One frame pair watching a single preceding vehicle.
///
/// The lead vehicle's rectangle is identical in both frames (ids differ);
/// its feature pattern expands by a factor 1.2 about the rectangle centre
/// and its range wall advances from 8.0 m to 7.8 m. A second previous
/// region sits in a corner with no features at all.
pub fn lead_vehicle_scene() -> (Frame, Frame, Vec<Correspondence>) {
    let rect = Rect::new(500.0, 200.0, 200.0, 200.0);

    let prev_features = vec![
        [550.0, 300.0],
        [650.0, 300.0],
        [600.0, 250.0],
        [600.0, 350.0],
        [600.0, 300.0],
    ];
    // scaled by 1.2 about (600, 300)
    let curr_features = vec![
        [540.0, 300.0],
        [660.0, 300.0],
        [600.0, 240.0],
        [600.0, 360.0],
        [600.0, 300.0],
    ];
    let matches: Vec<Correspondence> = (0..prev_features.len())
        .map(|i| Correspondence::new(i, i))
        .collect();

    let prev = Frame {
        features: prev_features,
        regions: vec![
            DetectionRegion::new(0, rect),
            DetectionRegion::new(1, Rect::new(0.0, 0.0, 80.0, 80.0)),
        ],
        range_points: wall_with_stray(8.0, 6.5),
    };
    let curr = Frame {
        features: curr_features,
        regions: vec![DetectionRegion::new(5, rect)],
        range_points: wall_with_stray(7.8, 6.3),
    };
    (prev, curr, matches)
}
