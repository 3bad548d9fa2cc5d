//! Path bookkeeping and structural mutation
//!
//! Every mutation here relinks and updates the intermediate/branching sets in
//! one step. Operations handed a point that is not where they expect it (wrong
//! path, endpoint instead of intermediate, already owned elsewhere) leave the
//! path untouched and report `false`/`None`.

use std::cmp::Ordering;

use ahash::AHashSet;
use glam::DVec3;

use super::{Graph, PathId, PointId, PointKey};
use crate::error::{GraphError, GraphResult};
use crate::rng::GraphRng;

/// A linked run of points between a start and a finish
pub struct PathNode {
    pub(super) ordinal: u64,
    pub(super) start: PointId,
    pub(super) finish: PointId,
    pub(super) intermediate: AHashSet<PointId>,
    pub(super) branching_points: AHashSet<PointId>,
    /// Point this path was branched from, if any
    pub(super) root: Option<PointId>,
}

impl Graph {
    /// Create a path linking `start` directly to `finish`
    pub fn new_path(&mut self, start: PointId, finish: PointId) -> GraphResult<PathId> {
        for point in [start, finish] {
            if self.require_point(point)?.path.is_some() {
                return Err(GraphError::PointInUse(point));
            }
        }
        if start == finish {
            return Err(GraphError::DegeneratePath(start));
        }

        self.disconnect_previous(start);
        self.disconnect_next(finish);
        self.connect(start, finish);

        let ordinal = self.ids.next_id();
        let path = self.paths.insert(PathNode {
            ordinal,
            start,
            finish,
            intermediate: AHashSet::new(),
            branching_points: AHashSet::new(),
            root: None,
        });
        self.adopt(path, start, false);
        self.adopt(path, finish, false);
        Ok(path)
    }

    pub fn path_start(&self, path: PathId) -> Option<PointId> {
        self.paths.get(path).map(|node| node.start)
    }

    pub fn path_finish(&self, path: PathId) -> Option<PointId> {
        self.paths.get(path).map(|node| node.finish)
    }

    pub fn path_ordinal(&self, path: PathId) -> Option<u64> {
        self.paths.get(path).map(|node| node.ordinal)
    }

    /// Point this path was branched from
    pub fn branch_root(&self, path: PathId) -> Option<PointId> {
        self.paths.get(path).and_then(|node| node.root)
    }

    fn path_key(&self, path: PathId) -> Option<(PointKey, PointKey)> {
        let node = self.paths.get(path)?;
        Some((self.point_key(node.start)?, self.point_key(node.finish)?))
    }

    /// Compare paths by start point, then by finish point
    pub fn cmp_paths(&self, a: PathId, b: PathId) -> Option<Ordering> {
        Some(self.path_key(a)?.cmp(&self.path_key(b)?))
    }

    pub fn path_precedes(&self, a: PathId, b: PathId) -> bool {
        self.cmp_paths(a, b) == Some(Ordering::Less)
    }

    /// Return the live paths of `paths` in comparator order
    pub fn sort_paths(&self, paths: &[PathId]) -> Vec<PathId> {
        let mut keyed: Vec<_> = paths
            .iter()
            .filter_map(|&path| self.path_key(path).map(|key| (key, path)))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, path)| path).collect()
    }

    pub fn count_intermediate(&self, path: PathId) -> usize {
        self.paths
            .get(path)
            .map_or(0, |node| node.intermediate.len())
    }

    pub fn has_intermediate(&self, path: PathId) -> bool {
        self.count_intermediate(path) > 0
    }

    pub fn point_in_path(&self, path: PathId, point: PointId) -> bool {
        self.paths.get(path).is_some_and(|node| {
            node.start == point || node.finish == point || node.intermediate.contains(&point)
        })
    }

    fn is_intermediate(&self, path: PathId, point: PointId) -> bool {
        self.paths
            .get(path)
            .is_some_and(|node| node.intermediate.contains(&point))
    }

    /// Live and not owned by any path
    fn is_free(&self, point: PointId) -> bool {
        self.points.get(point).is_some_and(|node| node.path.is_none())
    }

    /// Record `point` as a member of `path`
    fn adopt(&mut self, path: PathId, point: PointId, intermediate: bool) {
        let Some(node) = self.points.get_mut(point) else {
            return;
        };
        node.path = Some(path);
        let branching = !node.branches.is_empty();
        if let Some(path_node) = self.paths.get_mut(path) {
            if intermediate {
                path_node.intermediate.insert(point);
            }
            if branching {
                path_node.branching_points.insert(point);
            }
        }
    }

    /// Drop `point` from `path`'s bookkeeping. Links are left to the caller.
    fn disown(&mut self, path: PathId, point: PointId) {
        if let Some(path_node) = self.paths.get_mut(path) {
            path_node.intermediate.remove(&point);
            path_node.branching_points.remove(&point);
        }
        if let Some(node) = self.points.get_mut(point) {
            if node.path == Some(path) {
                node.path = None;
            }
        }
    }

    /// Replace the start point
    ///
    /// The old start is unlinked and loses its path back-reference.
    pub fn set_start(&mut self, path: PathId, point: PointId) -> bool {
        let Some(old) = self.path_start(path) else {
            return false;
        };
        if !self.is_free(point) {
            log::trace!("set_start: {point:?} is not free");
            return false;
        }
        let Some(first) = self.next(old) else {
            return false;
        };

        self.disconnect_next(old);
        self.disconnect_previous(point);
        self.connect(point, first);
        if let Some(node) = self.paths.get_mut(path) {
            node.start = point;
        }
        self.disown(path, old);
        self.adopt(path, point, false);
        true
    }

    /// Replace the finish point
    ///
    /// The old finish is unlinked and loses its path back-reference.
    pub fn set_finish(&mut self, path: PathId, point: PointId) -> bool {
        let Some(old) = self.path_finish(path) else {
            return false;
        };
        if !self.is_free(point) {
            log::trace!("set_finish: {point:?} is not free");
            return false;
        }
        let Some(last) = self.previous(old) else {
            return false;
        };

        self.disconnect_previous(old);
        self.disconnect_next(point);
        self.connect(last, point);
        if let Some(node) = self.paths.get_mut(path) {
            node.finish = point;
        }
        self.disown(path, old);
        self.adopt(path, point, false);
        true
    }

    /// The `n`-th intermediate, counting from 1 at the start
    pub fn get_point(&self, path: PathId, n: usize) -> Option<PointId> {
        let node = self.paths.get(path)?;
        if n == 0 || n > node.intermediate.len() {
            return None;
        }
        self.iter_forward(node.start)
            .nth(n - 1)
            .map(|(_, point)| point)
            .filter(|&point| point != node.finish)
    }

    /// Points strictly between `from` and `to`, in path order
    ///
    /// `None` when either point is not in the path or `to` does not come
    /// after `from`.
    pub fn get_points(&self, path: PathId, from: PointId, to: PointId) -> Option<Vec<PointId>> {
        if !self.point_in_path(path, from) || !self.point_in_path(path, to) {
            return None;
        }
        if from == to {
            return Some(Vec::new());
        }
        let mut run = Vec::new();
        for (_, point) in self.iter_forward(from) {
            if point == to {
                return Some(run);
            }
            run.push(point);
        }
        None
    }

    /// Uniformly chosen intermediate, or `None` for a two-point path
    ///
    /// The choice is an index into path order, so equal RNG streams pick equal
    /// points regardless of set iteration order.
    pub fn random_intermediate_point<R: GraphRng + ?Sized>(
        &self,
        path: PathId,
        rng: &mut R,
    ) -> Option<PointId> {
        let count = self.count_intermediate(path);
        if count == 0 {
            return None;
        }
        self.get_point(path, rng.pick_index(count) + 1)
    }

    /// Splice `point` between two adjacent members of `path`
    pub fn insert_between(
        &mut self,
        path: PathId,
        previous: PointId,
        next: PointId,
        point: PointId,
    ) -> bool {
        let adjacent = self.point_in_path(path, previous)
            && self.point_in_path(path, next)
            && self.next(previous) == Some(next);
        if !adjacent || !self.is_free(point) {
            log::trace!("insert_between: rejected {point:?} between {previous:?} and {next:?}");
            return false;
        }
        self.connect(previous, point);
        self.connect(point, next);
        self.adopt(path, point, true);
        true
    }

    /// Insert before the current `n`-th intermediate, or before the finish
    /// when `n` exceeds the intermediate count
    pub fn insert_at(&mut self, path: PathId, n: usize, point: PointId) -> bool {
        if n == 0 {
            return false;
        }
        let target = match self.get_point(path, n) {
            Some(target) => target,
            None => match self.path_finish(path) {
                Some(finish) => finish,
                None => return false,
            },
        };
        self.insert_before(path, target, point)
    }

    pub fn insert_before(&mut self, path: PathId, target: PointId, point: PointId) -> bool {
        if self.path_start(path) == Some(target) || !self.point_in_path(path, target) {
            return false;
        }
        match self.previous(target) {
            Some(previous) => self.insert_between(path, previous, target, point),
            None => false,
        }
    }

    pub fn insert_after(&mut self, path: PathId, target: PointId, point: PointId) -> bool {
        if self.path_finish(path) == Some(target) || !self.point_in_path(path, target) {
            return false;
        }
        match self.next(target) {
            Some(next) => self.insert_between(path, target, next, point),
            None => false,
        }
    }

    /// Insert immediately before the finish
    pub fn insert(&mut self, path: PathId, point: PointId) -> bool {
        match self.path_finish(path) {
            Some(finish) => self.insert_before(path, finish, point),
            None => false,
        }
    }

    /// Excise an intermediate and join its neighbours
    pub fn remove(&mut self, path: PathId, point: PointId) -> bool {
        if !self.is_intermediate(path, point) {
            return false;
        }
        let (Some(previous), Some(next)) = (self.previous(point), self.next(point)) else {
            return false;
        };
        self.disconnect_previous(point);
        self.disconnect_next(point);
        self.connect(previous, next);
        self.disown(path, point);
        true
    }

    pub fn remove_previous(&mut self, path: PathId, target: PointId) -> Option<PointId> {
        if !self.point_in_path(path, target) {
            return None;
        }
        let previous = self.previous(target)?;
        self.remove(path, previous).then_some(previous)
    }

    pub fn remove_next(&mut self, path: PathId, target: PointId) -> Option<PointId> {
        if !self.point_in_path(path, target) {
            return None;
        }
        let next = self.next(target)?;
        self.remove(path, next).then_some(next)
    }

    pub fn remove_at(&mut self, path: PathId, n: usize) -> Option<PointId> {
        let point = self.get_point(path, n)?;
        self.remove(path, point).then_some(point)
    }

    /// Demote the finish to last intermediate and install `point` after it
    pub fn extend(&mut self, path: PathId, point: PointId) -> bool {
        let Some(old) = self.path_finish(path) else {
            return false;
        };
        if !self.is_free(point) {
            return false;
        }
        self.disconnect_previous(point);
        self.disconnect_next(point);
        self.connect(old, point);
        if let Some(node) = self.paths.get_mut(path) {
            node.finish = point;
            node.intermediate.insert(old);
        }
        self.adopt(path, point, false);
        true
    }

    /// Promote the last intermediate to finish
    ///
    /// Returns `false` without touching the path when there is nothing to
    /// promote.
    pub fn shorten(&mut self, path: PathId) -> bool {
        if !self.has_intermediate(path) {
            return false;
        }
        let Some(old) = self.path_finish(path) else {
            return false;
        };
        let Some(last) = self.previous(old) else {
            return false;
        };
        self.disconnect_previous(old);
        if let Some(node) = self.paths.get_mut(path) {
            node.finish = last;
            node.intermediate.remove(&last);
        }
        self.disown(path, old);
        true
    }

    /// Shorten up to `n` times, returning how many steps happened
    pub fn shorten_by(&mut self, path: PathId, n: usize) -> usize {
        (0..n).take_while(|_| self.shorten(path)).count()
    }

    /// Drop every point after `stop` and make `stop` the finish
    ///
    /// Returns the removed points in path order.
    pub fn cut_off(&mut self, path: PathId, stop: PointId) -> Option<Vec<PointId>> {
        if !self.point_in_path(path, stop) || self.path_start(path) == Some(stop) {
            return None;
        }
        let removed: Vec<PointId> = self.iter_forward(stop).map(|(_, point)| point).collect();
        self.disconnect_next(stop);
        for &point in &removed {
            self.disconnect_next(point);
            self.disown(path, point);
        }
        if let Some(node) = self.paths.get_mut(path) {
            node.finish = stop;
            node.intermediate.remove(&stop);
        }
        Some(removed)
    }

    /// Remove all intermediates, linking start straight to finish
    pub fn clear_intermediate(&mut self, path: PathId) -> Vec<PointId> {
        let (Some(start), Some(finish)) = (self.path_start(path), self.path_finish(path)) else {
            return Vec::new();
        };
        let removed: Vec<PointId> = self
            .iter_forward(start)
            .map(|(_, point)| point)
            .take_while(|&point| point != finish)
            .collect();
        for &point in &removed {
            self.disconnect_previous(point);
            self.disconnect_next(point);
            self.disown(path, point);
        }
        self.connect(start, finish);
        removed
    }

    /// Start, intermediates and finish in order
    pub fn all_points(&self, path: PathId) -> Vec<PointId> {
        let Some(node) = self.paths.get(path) else {
            return Vec::new();
        };
        std::iter::once(node.start)
            .chain(self.iter_forward(node.start).map(|(_, point)| point))
            .collect()
    }

    pub fn all_positions(&self, path: PathId) -> Vec<DVec3> {
        self.all_points(path)
            .into_iter()
            .filter_map(|point| self.position(point))
            .collect()
    }

    /// Branching points in order of occurrence from start to finish
    pub fn branching_points_sorted(&self, path: PathId) -> Vec<PointId> {
        let Some(node) = self.paths.get(path) else {
            return Vec::new();
        };
        if node.branching_points.is_empty() {
            return Vec::new();
        }
        self.all_points(path)
            .into_iter()
            .filter(|point| node.branching_points.contains(point))
            .collect()
    }

    /// Move the contiguous intermediate run `first..=last` in front of
    /// `other`'s finish
    pub fn transfer_points_to(
        &mut self,
        path: PathId,
        other: PathId,
        first: PointId,
        last: PointId,
    ) -> bool {
        if path == other || !self.contains_path(other) {
            return false;
        }
        if !self.is_intermediate(path, first) || !self.is_intermediate(path, last) {
            return false;
        }
        let mut run = vec![first];
        if first != last {
            for (_, point) in self.iter_forward(first) {
                if !self.is_intermediate(path, point) {
                    log::trace!("transfer_points_to: {last:?} does not follow {first:?}");
                    return false;
                }
                run.push(point);
                if point == last {
                    break;
                }
            }
        }

        let (Some(before), Some(after)) = (self.previous(first), self.next(last)) else {
            return false;
        };
        let Some(other_finish) = self.path_finish(other) else {
            return false;
        };
        let Some(other_last) = self.previous(other_finish) else {
            return false;
        };

        self.disconnect_previous(first);
        self.disconnect_next(last);
        self.connect(before, after);
        self.connect(other_last, first);
        self.connect(last, other_finish);

        for &point in &run {
            self.disown(path, point);
            self.adopt(other, point, true);
        }
        log::trace!("Transferred {} points from {path:?} to {other:?}", run.len());
        true
    }

    /// Cut the path at intermediate `point`
    ///
    /// The original path now finishes at `point`. The returned path starts at
    /// a copy of `point` attached to it (a point belongs to one path only) and
    /// carries everything that used to follow `point`.
    pub fn split_at(&mut self, path: PathId, point: PointId) -> Option<PathId> {
        if !self.is_intermediate(path, point) {
            return None;
        }
        let tail: Vec<PointId> = self.iter_forward(point).map(|(_, p)| p).collect();
        let (&first, &finish) = (tail.first()?, tail.last()?);
        let position = self.position(point)?;

        self.disconnect_next(point);
        for &moved in &tail {
            self.disown(path, moved);
        }
        if let Some(node) = self.paths.get_mut(path) {
            node.finish = point;
            node.intermediate.remove(&point);
        }

        let start = self.insert_point(position);
        self.attach_pair(point, start);
        self.connect(start, first);

        let ordinal = self.ids.next_id();
        let split = self.paths.insert(PathNode {
            ordinal,
            start,
            finish,
            intermediate: AHashSet::new(),
            branching_points: AHashSet::new(),
            root: None,
        });
        self.adopt(split, start, false);
        for &moved in &tail {
            self.adopt(split, moved, moved != finish);
        }
        log::trace!("Split {path:?} at {point:?} into {split:?}");
        Some(split)
    }
}
