use glam::DVec3;

use super::counter::IdCounter;
use super::handle::Arena;
use super::path::PathNode;
use super::point::PointNode;
use super::{PathId, PointId};
use crate::error::{GraphError, GraphResult};

/// Owner of every point and path in one street network
///
/// Single-threaded: shared positions are `Rc` cells, so a `Graph` stays on the
/// thread that drives its generation pass.
pub struct Graph {
    pub(super) points: Arena<PointNode>,
    pub(super) paths: Arena<PathNode>,
    pub(super) ids: IdCounter,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_counter(IdCounter::new())
    }

    /// Create a graph whose first point or path gets ordinal `first`
    pub fn with_first_id(first: u64) -> Self {
        Self::with_counter(IdCounter::starting_at(first))
    }

    pub fn with_counter(ids: IdCounter) -> Self {
        Self {
            points: Arena::new(),
            paths: Arena::new(),
            ids,
        }
    }

    /// Ordinal the next created point or path will receive
    pub fn next_ordinal(&self) -> u64 {
        self.ids.peek()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        self.points.contains(point)
    }

    pub fn contains_path(&self, path: PathId) -> bool {
        self.paths.contains(path)
    }

    pub(super) fn require_point(&self, point: PointId) -> GraphResult<&PointNode> {
        self.points.get(point).ok_or(GraphError::UnknownPoint(point))
    }

    pub(super) fn require_path(&self, path: PathId) -> GraphResult<&PathNode> {
        self.paths.get(path).ok_or(GraphError::UnknownPath(path))
    }

    /// Allocate a point without validating the position
    pub(super) fn insert_point(&mut self, position: DVec3) -> PointId {
        let ordinal = self.ids.next_id();
        self.points.insert(PointNode::new(ordinal, position))
    }

    /// Free a point's slot if nothing references it any more
    ///
    /// A point is reclaimable once it has no path, no links, no attachments and
    /// roots no branches. Returns `false` (and keeps the point) otherwise.
    pub fn release_point(&mut self, point: PointId) -> bool {
        let Some(unreferenced) = self.points.get(point).map(PointNode::is_unreferenced) else {
            return false;
        };
        if !unreferenced {
            log::trace!("release_point: {point:?} is still referenced");
            return false;
        }
        self.points.remove(point);
        true
    }

    /// Tear a path down and free its slot
    ///
    /// Unregisters the path from its branch root, unlinks every point in it and
    /// clears their path back-reference. The points stay allocated.
    pub fn dispose_path(&mut self, path: PathId) -> bool {
        let Some(root) = self.paths.get(path).map(|node| node.root) else {
            return false;
        };
        if let Some(root) = root {
            self.unbranch(root, path);
        }

        let points = self.all_points(path);
        for &point in &points {
            self.disconnect_previous(point);
            self.disconnect_next(point);
            if let Some(node) = self.points.get_mut(point) {
                node.path = None;
            }
        }
        self.paths.remove(path);
        log::debug!("Disposed path {path:?} ({} points)", points.len());
        true
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
