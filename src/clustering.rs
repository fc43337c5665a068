//! Euclidean clustering over unordered 3D point sets.
//!
//! The clusterer partitions points into connected components under a
//! proximity tolerance (two points link when their distance is at most the
//! tolerance, transitively) and keeps only components inside a size band.
//! Isolated returns and implausibly large blobs drop out; retained points
//! come back as one concatenated set, since downstream only membership in a
//! retained cluster matters.

use kiddo::{KdTree, SquaredEuclidean};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::RangePoint;

/// Connectivity tolerance and cluster size band.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Neighbour radius linking two points into the same cluster (metres).
    pub tolerance: f64,
    /// Components smaller than this are discarded as stray returns.
    pub min_size: usize,
    /// Components larger than this are discarded as well.
    pub max_size: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            min_size: 30,
            max_size: 25_000,
        }
    }
}

/// Counts emitted by one clustering pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDiagnostics {
    pub total_points: usize,
    pub clusters: usize,
    pub kept_clusters: usize,
    pub kept_points: usize,
    pub rejected_small: usize,
    pub rejected_large: usize,
}

/// Cluster `points` under `params` and return every point that belongs to
/// a retained component. An empty input yields an empty result.
pub fn cluster_points(
    points: &[RangePoint],
    params: &ClusterParams,
) -> (Vec<RangePoint>, ClusterDiagnostics) {
    let mut diag = ClusterDiagnostics {
        total_points: points.len(),
        ..Default::default()
    };
    if points.is_empty() {
        return (Vec::new(), diag);
    }

    let mut tree: KdTree<f64, 3> = KdTree::with_capacity(points.len());
    for (idx, p) in points.iter().enumerate() {
        tree.add(&[p.x, p.y, p.z], idx as u64);
    }

    let tolerance_sq = params.tolerance * params.tolerance;
    let mut visited = vec![false; points.len()];
    let mut kept = Vec::new();

    for seed in 0..points.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        // grow the connected component by repeated radius queries
        let mut cluster = vec![seed];
        let mut cursor = 0;
        while cursor < cluster.len() {
            let p = &points[cluster[cursor]];
            for neighbour in tree.within_unsorted::<SquaredEuclidean>(&[p.x, p.y, p.z], tolerance_sq)
            {
                let idx = neighbour.item as usize;
                if !visited[idx] {
                    visited[idx] = true;
                    cluster.push(idx);
                }
            }
            cursor += 1;
        }

        diag.clusters += 1;
        if cluster.len() < params.min_size {
            diag.rejected_small += 1;
        } else if cluster.len() > params.max_size {
            diag.rejected_large += 1;
        } else {
            diag.kept_clusters += 1;
            kept.extend(cluster.into_iter().map(|idx| points[idx]));
        }
    }

    diag.kept_points = kept.len();
    if diag.kept_clusters < diag.clusters {
        debug!(
            "clustering kept {}/{} clusters ({} points of {})",
            diag.kept_clusters, diag.clusters, diag.kept_points, diag.total_points
        );
    }
    (kept, diag)
}
