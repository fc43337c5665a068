//! Range-point to region assignment.

use log::debug;
use serde::Serialize;

use crate::projection::Projector;
use crate::types::{DetectionRegion, RangePoint, Rect};

/// Counts emitted by one assignment pass over a frame's point cloud.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAssignmentDiagnostics {
    pub total: usize,
    pub assigned: usize,
    /// Projections landing in two or more shrunken rectangles.
    pub ambiguous: usize,
    /// Projections landing in no rectangle.
    pub outside: usize,
    /// Points whose projection was degenerate.
    pub degenerate: usize,
}

/// Project every range point and append it to the one region whose
/// shrunken rectangle contains the projection.
///
/// Shrinking each rectangle towards its centre by `shrink_factor` drops
/// boundary points that tend to belong to neighbouring objects or the
/// background. Points enclosed by several rectangles, by none, or with a
/// degenerate projection are discarded, never assigned.
pub fn assign_range_points(
    regions: &mut [DetectionRegion],
    points: &[RangePoint],
    projector: &Projector,
    shrink_factor: f64,
) -> RangeAssignmentDiagnostics {
    let mut diag = RangeAssignmentDiagnostics {
        total: points.len(),
        ..Default::default()
    };
    let shrunken: Vec<Rect> = regions.iter().map(|r| r.rect.shrunk(shrink_factor)).collect();

    for point in points {
        let Some(pixel) = projector.project(point) else {
            diag.degenerate += 1;
            continue;
        };

        let mut owner = None;
        let mut enclosing = 0usize;
        for (idx, rect) in shrunken.iter().enumerate() {
            if rect.contains(pixel) {
                owner = Some(idx);
                enclosing += 1;
            }
        }

        match (owner, enclosing) {
            (Some(idx), 1) => {
                regions[idx].range_points.push(*point);
                diag.assigned += 1;
            }
            (_, 0) => diag.outside += 1,
            _ => diag.ambiguous += 1,
        }
    }

    if diag.assigned < diag.total {
        debug!(
            "range assignment: {} of {} points assigned ({} ambiguous, {} outside, {} degenerate)",
            diag.assigned, diag.total, diag.ambiguous, diag.outside, diag.degenerate
        );
    }
    diag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CameraCalibration;
    use nalgebra::{Matrix3x4, Matrix4};

    /// Forward pinhole used throughout the association tests: a point at
    /// `(10, y, z)` lands at `(600 - 50 y, 300 - 50 z)`.
    fn projector() -> Projector {
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
        .projector()
    }

    fn regions(rects: &[Rect]) -> Vec<DetectionRegion> {
        rects
            .iter()
            .enumerate()
            .map(|(i, &rect)| DetectionRegion::new(i as u32, rect))
            .collect()
    }

    #[test]
    fn point_in_overlap_is_assigned_to_neither() {
        let mut regs = regions(&[
            Rect::new(500.0, 200.0, 100.0, 100.0),
            Rect::new(550.0, 200.0, 100.0, 100.0),
        ]);
        // (10, 0.5, 1.0) projects to (575, 250): inside both rectangles
        // (10, 1.6, 1.0) projects to (520, 250): inside only the first
        let points = [
            RangePoint::new(10.0, 0.5, 1.0),
            RangePoint::new(10.0, 1.6, 1.0),
        ];
        let diag = assign_range_points(&mut regs, &points, &projector(), 0.0);
        assert_eq!(diag.assigned, 1);
        assert_eq!(diag.ambiguous, 1);
        assert_eq!(regs[0].range_points, vec![points[1]]);
        assert!(regs[1].range_points.is_empty());
    }

    #[test]
    fn degenerate_projection_is_dropped() {
        let mut regs = regions(&[Rect::new(0.0, 0.0, 2000.0, 2000.0)]);
        let points = [RangePoint::new(0.0, 0.0, 0.0)];
        let diag = assign_range_points(&mut regs, &points, &projector(), 0.0);
        assert_eq!(diag.degenerate, 1);
        assert!(regs[0].range_points.is_empty());
    }

    #[test]
    fn larger_shrink_factor_accepts_a_subset() {
        let rect = Rect::new(500.0, 200.0, 200.0, 200.0);
        // lateral spread covering the rectangle including its margins
        let points: Vec<RangePoint> = (-12..=12)
            .map(|i| RangePoint::new(10.0, i as f64 * 0.18, -0.2))
            .collect();

        let collect = |factor: f64| -> Vec<RangePoint> {
            let mut regs = regions(&[rect]);
            assign_range_points(&mut regs, &points, &projector(), factor);
            regs.remove(0).range_points
        };

        let loose = collect(0.0);
        let tight = collect(0.5);
        assert!(tight.len() < loose.len());
        for p in &tight {
            assert!(loose.contains(p), "point {p:?} accepted only when shrunk");
        }
    }
}
