//! Read-only export of a path tree for rasterizers and presets

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{Graph, PathId};

/// A path's geometry plus, recursively, the branches rooted on it
///
/// Branches are listed by their root's position along the path, then by the
/// path comparator, so equal graphs give byte-identical serialisations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub ordinal: u64,
    pub positions: Vec<DVec3>,
    pub length: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<PathSnapshot>,
}

impl PathSnapshot {
    /// Number of paths in this tree, this one included
    pub fn path_count(&self) -> usize {
        1 + self
            .branches
            .iter()
            .map(PathSnapshot::path_count)
            .sum::<usize>()
    }

    /// Combined length of every path in this tree
    pub fn total_length(&self) -> f64 {
        self.length
            + self
                .branches
                .iter()
                .map(PathSnapshot::total_length)
                .sum::<f64>()
    }
}

impl Graph {
    pub fn snapshot(&self, path: PathId) -> Option<PathSnapshot> {
        let ordinal = self.path_ordinal(path)?;
        let branches = self
            .branching_points_sorted(path)
            .into_iter()
            .flat_map(|point| self.branches_sorted(point))
            .filter_map(|branch| self.snapshot(branch))
            .collect();
        Some(PathSnapshot {
            ordinal,
            positions: self.all_positions(path),
            length: self.length(path),
            branches,
        })
    }
}
