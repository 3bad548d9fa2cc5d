//! Point operations: linking, attachment, branching and ordering

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::rc::Rc;

use ahash::AHashSet;
use glam::DVec3;

use super::iter::{ForwardPoints, ReversePoints};
use super::{Graph, PathId, PointId};
use crate::error::{GraphError, GraphResult, ensure_finite};

/// A node of the street graph
///
/// Attached points hold clones of the same position cell, so a write through
/// any of them is seen by all.
pub struct PointNode {
    pub(super) ordinal: u64,
    pub(super) position: Rc<Cell<DVec3>>,
    pub(super) path: Option<PathId>,
    pub(super) previous: Option<PointId>,
    pub(super) next: Option<PointId>,
    pub(super) attached: AHashSet<PointId>,
    pub(super) branches: AHashSet<PathId>,
}

impl PointNode {
    pub(super) fn new(ordinal: u64, position: DVec3) -> Self {
        Self {
            ordinal,
            position: Rc::new(Cell::new(position)),
            path: None,
            previous: None,
            next: None,
            attached: AHashSet::new(),
            branches: AHashSet::new(),
        }
    }

    pub(super) fn position(&self) -> DVec3 {
        self.position.get()
    }

    pub(super) fn key(&self) -> PointKey {
        PointKey {
            position: self.position(),
            ordinal: self.ordinal,
        }
    }

    /// Nothing in the graph refers to this point
    pub(super) fn is_unreferenced(&self) -> bool {
        self.path.is_none()
            && self.previous.is_none()
            && self.next.is_none()
            && self.attached.is_empty()
            && self.branches.is_empty()
    }
}

/// Deterministic sort key for a point
///
/// Orders lexicographically by `x`, `y`, `z`, then ordinal. Coordinates use
/// `f64::total_cmp`, so the order is total even for signed zeros.
#[derive(Debug, Clone, Copy)]
pub struct PointKey {
    pub position: DVec3,
    pub ordinal: u64,
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .x
            .total_cmp(&other.position.x)
            .then_with(|| self.position.y.total_cmp(&other.position.y))
            .then_with(|| self.position.z.total_cmp(&other.position.z))
            .then_with(|| self.ordinal.cmp(&other.ordinal))
    }
}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointKey {}

impl Graph {
    /// Create an unlinked point at `position`
    ///
    /// The position is copied into a fresh cell owned by the point.
    pub fn new_point(&mut self, position: DVec3) -> GraphResult<PointId> {
        let position = ensure_finite(position)?;
        Ok(self.insert_point(position))
    }

    pub fn position(&self, point: PointId) -> Option<DVec3> {
        self.points.get(point).map(PointNode::position)
    }

    /// Move a point, and with it every point attached to it
    pub fn set_position(&mut self, point: PointId, position: DVec3) -> GraphResult<()> {
        let position = ensure_finite(position)?;
        self.require_point(point)?.position.set(position);
        Ok(())
    }

    /// Construction-order ordinal, used only as a sort tie-break
    pub fn point_ordinal(&self, point: PointId) -> Option<u64> {
        self.points.get(point).map(|node| node.ordinal)
    }

    pub fn point_path(&self, point: PointId) -> Option<PathId> {
        self.points.get(point).and_then(|node| node.path)
    }

    pub fn previous(&self, point: PointId) -> Option<PointId> {
        self.points.get(point).and_then(|node| node.previous)
    }

    pub fn next(&self, point: PointId) -> Option<PointId> {
        self.points.get(point).and_then(|node| node.next)
    }

    /// Same live point. Distinct points at one position are not equal.
    pub fn points_equal(&self, a: PointId, b: PointId) -> bool {
        a == b && self.points.contains(a)
    }

    pub fn point_key(&self, point: PointId) -> Option<PointKey> {
        self.points.get(point).map(PointNode::key)
    }

    /// Compare two live points by position, then ordinal
    pub fn cmp_points(&self, a: PointId, b: PointId) -> Option<Ordering> {
        Some(self.point_key(a)?.cmp(&self.point_key(b)?))
    }

    /// `a` strictly precedes `b`
    pub fn point_precedes(&self, a: PointId, b: PointId) -> bool {
        self.cmp_points(a, b) == Some(Ordering::Less)
    }

    /// Return the live points of `points` in comparator order
    ///
    /// Stale handles are dropped from the result.
    pub fn sort_points(&self, points: &[PointId]) -> Vec<PointId> {
        let mut keyed: Vec<(PointKey, PointId)> = points
            .iter()
            .filter_map(|&point| self.point_key(point).map(|key| (key, point)))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, point)| point).collect()
    }

    /// Link `points` into a chain, first to last
    ///
    /// Only the `previous`/`next` fields are touched, never path membership.
    /// A neighbour displaced by the new links loses its back-link as well.
    pub fn link(&mut self, points: &[PointId]) -> GraphResult<()> {
        for &point in points {
            self.require_point(point)?;
        }
        for pair in points.windows(2) {
            if pair[0] == pair[1] {
                return Err(GraphError::SelfLink(pair[0]));
            }
        }
        for pair in points.windows(2) {
            self.connect(pair[0], pair[1]);
        }
        Ok(())
    }

    pub fn unlink_from_previous(&mut self, point: PointId) -> GraphResult<()> {
        self.require_point(point)?;
        self.disconnect_previous(point);
        Ok(())
    }

    pub fn unlink_from_next(&mut self, point: PointId) -> GraphResult<()> {
        self.require_point(point)?;
        self.disconnect_next(point);
        Ok(())
    }

    pub fn unlink(&mut self, point: PointId) -> GraphResult<()> {
        self.require_point(point)?;
        self.disconnect_previous(point);
        self.disconnect_next(point);
        Ok(())
    }

    /// Fresh point at the same position, with no relations at all
    pub fn copy_point(&mut self, point: PointId) -> GraphResult<PointId> {
        let position = self.require_point(point)?.position();
        Ok(self.insert_point(position))
    }

    /// Make every point in `others` share `point`'s position
    ///
    /// An attached point brings its own attachment group along, so all points
    /// reachable through attachments always share a single cell.
    pub fn attach(&mut self, point: PointId, others: &[PointId]) -> GraphResult<()> {
        self.require_point(point)?;
        for &other in others {
            self.require_point(other)?;
        }
        for &other in others {
            if other != point {
                self.attach_pair(point, other);
            }
        }
        Ok(())
    }

    pub(super) fn attach_pair(&mut self, point: PointId, other: PointId) {
        let Some(cell) = self.points.get(point).map(|node| Rc::clone(&node.position)) else {
            return;
        };
        let shares_cell = self
            .points
            .get(other)
            .is_some_and(|node| Rc::ptr_eq(&node.position, &cell));
        if !shares_cell {
            for member in self.attachment_group(other) {
                if let Some(node) = self.points.get_mut(member) {
                    node.position = Rc::clone(&cell);
                }
            }
        }
        if let Some(node) = self.points.get_mut(point) {
            node.attached.insert(other);
        }
        if let Some(node) = self.points.get_mut(other) {
            node.attached.insert(point);
        }
    }

    /// Remove one attachment, symmetrically
    ///
    /// The side that no longer reaches `point` keeps its current position
    /// value in a cell of its own.
    pub fn detach(&mut self, point: PointId, other: PointId) -> bool {
        if !self.is_attached(point, other) {
            return false;
        }
        if let Some(node) = self.points.get_mut(point) {
            node.attached.remove(&other);
        }
        if let Some(node) = self.points.get_mut(other) {
            node.attached.remove(&point);
        }

        let group = self.attachment_group(other);
        if !group.contains(&point) {
            let value = self.position(other).unwrap_or_default();
            let cell = Rc::new(Cell::new(value));
            for member in group {
                if let Some(node) = self.points.get_mut(member) {
                    node.position = Rc::clone(&cell);
                }
            }
        }
        true
    }

    /// Remove every attachment of `point`, returning how many were removed
    pub fn detach_all(&mut self, point: PointId) -> usize {
        self.attached_sorted(point)
            .into_iter()
            .filter(|&other| self.detach(point, other))
            .count()
    }

    pub fn is_attached(&self, point: PointId, other: PointId) -> bool {
        self.points
            .get(point)
            .is_some_and(|node| node.attached.contains(&other))
    }

    pub fn attached_sorted(&self, point: PointId) -> Vec<PointId> {
        let Some(node) = self.points.get(point) else {
            return Vec::new();
        };
        let attached: Vec<PointId> = node.attached.iter().copied().collect();
        self.sort_points(&attached)
    }

    /// All points reachable from `point` through attachments, `point` included
    fn attachment_group(&self, point: PointId) -> AHashSet<PointId> {
        let mut group = AHashSet::new();
        let mut queue = VecDeque::from([point]);
        while let Some(current) = queue.pop_front() {
            if !group.insert(current) {
                continue;
            }
            if let Some(node) = self.points.get(current) {
                queue.extend(node.attached.iter().copied());
            }
        }
        group
    }

    /// Grow a branch path from `point` to `finish`
    ///
    /// The branch starts at a copy of `point` attached to it, so the two move
    /// together. `point` is registered as a branching point of its own path.
    pub fn branch(&mut self, point: PointId, finish: PointId) -> GraphResult<PathId> {
        self.require_point(point)?;
        if self.require_point(finish)?.path.is_some() {
            return Err(GraphError::PointInUse(finish));
        }
        if finish == point {
            return Err(GraphError::DegeneratePath(point));
        }

        let start = self.copy_point(point)?;
        self.attach_pair(point, start);
        let branch = self.new_path(start, finish)?;

        if let Some(node) = self.paths.get_mut(branch) {
            node.root = Some(point);
        }
        let parent = self.points.get_mut(point).and_then(|node| {
            node.branches.insert(branch);
            node.path
        });
        if let Some(node) = parent.and_then(|parent| self.paths.get_mut(parent)) {
            node.branching_points.insert(point);
        }
        log::trace!("Branched {branch:?} from {point:?}");
        Ok(branch)
    }

    pub fn has_branches(&self, point: PointId) -> bool {
        self.points
            .get(point)
            .is_some_and(|node| !node.branches.is_empty())
    }

    pub fn branches_sorted(&self, point: PointId) -> Vec<PathId> {
        let Some(node) = self.points.get(point) else {
            return Vec::new();
        };
        let branches: Vec<PathId> = node.branches.iter().copied().collect();
        self.sort_paths(&branches)
    }

    /// Drop one branch registration from `point`
    ///
    /// The branch path itself is left intact.
    pub fn unbranch(&mut self, point: PointId, branch: PathId) -> bool {
        let Some(node) = self.points.get_mut(point) else {
            return false;
        };
        if !node.branches.remove(&branch) {
            return false;
        }
        let emptied_parent = if node.branches.is_empty() {
            node.path
        } else {
            None
        };
        if let Some(parent) = emptied_parent.and_then(|parent| self.paths.get_mut(parent)) {
            parent.branching_points.remove(&point);
        }
        if let Some(branch_node) = self.paths.get_mut(branch) {
            if branch_node.root == Some(point) {
                branch_node.root = None;
            }
        }
        true
    }

    pub fn unbranch_all(&mut self, point: PointId) -> usize {
        self.branches_sorted(point)
            .into_iter()
            .filter(|&branch| self.unbranch(point, branch))
            .count()
    }

    /// Walk forward from the point after `point` to the end of its chain
    pub fn iter_forward(&self, point: PointId) -> ForwardPoints<'_> {
        ForwardPoints::new(self, point)
    }

    /// Walk backward from the point before `point` to the start of its chain
    pub fn iter_reverse(&self, point: PointId) -> ReversePoints<'_> {
        ReversePoints::new(self, point)
    }

    /// Return a point to its freshly constructed state, keeping ordinal and position
    ///
    /// An intermediate is first removed from its path. Endpoints cannot be
    /// cleared while their path exists.
    pub fn clear_point(&mut self, point: PointId) -> GraphResult<()> {
        let path = self.require_point(point)?.path;
        if let Some(path) = path {
            if !self.remove(path, point) {
                return Err(GraphError::PointInUse(point));
            }
        }
        self.disconnect_previous(point);
        self.disconnect_next(point);
        self.detach_all(point);
        self.unbranch_all(point);
        Ok(())
    }

    /// Set `a.next = b` and `b.previous = a`, severing displaced back-links
    pub(super) fn connect(&mut self, a: PointId, b: PointId) {
        let old_next = self.next(a);
        if let Some(old) = old_next.filter(|&old| old != b) {
            if let Some(node) = self.points.get_mut(old) {
                if node.previous == Some(a) {
                    node.previous = None;
                }
            }
        }
        let old_previous = self.previous(b);
        if let Some(old) = old_previous.filter(|&old| old != a) {
            if let Some(node) = self.points.get_mut(old) {
                if node.next == Some(b) {
                    node.next = None;
                }
            }
        }
        if let Some(node) = self.points.get_mut(a) {
            node.next = Some(b);
        }
        if let Some(node) = self.points.get_mut(b) {
            node.previous = Some(a);
        }
    }

    pub(super) fn disconnect_previous(&mut self, point: PointId) {
        let Some(previous) = self.points.get_mut(point).and_then(|node| node.previous.take())
        else {
            return;
        };
        if let Some(node) = self.points.get_mut(previous) {
            if node.next == Some(point) {
                node.next = None;
            }
        }
    }

    pub(super) fn disconnect_next(&mut self, point: PointId) {
        let Some(next) = self.points.get_mut(point).and_then(|node| node.next.take()) else {
            return;
        };
        if let Some(node) = self.points.get_mut(next) {
            if node.previous == Some(point) {
                node.previous = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(graph: &mut Graph, x: f64, y: f64, z: f64) -> PointId {
        graph.new_point(DVec3::new(x, y, z)).unwrap()
    }

    #[test]
    fn test_new_point_rejects_non_finite() {
        let mut graph = Graph::new();
        let err = graph.new_point(DVec3::new(0.0, f64::NAN, 0.0));
        assert!(matches!(err, Err(GraphError::NonFinitePosition(_))));
        assert_eq!(graph.point_count(), 0);
    }

    #[test]
    fn test_equality_is_identity() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 1.0, 2.0, 3.0);
        let b = point(&mut graph, 1.0, 2.0, 3.0);
        assert!(graph.points_equal(a, a));
        assert!(!graph.points_equal(a, b));
    }

    #[test]
    fn test_comparator_is_strict() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 0.0, 0.0, 0.0);
        let c = point(&mut graph, -1.0, 5.0, 5.0);

        assert!(!graph.point_precedes(a, a));
        // Coincident points fall back to ordinal
        assert!(graph.point_precedes(a, b));
        assert!(!graph.point_precedes(b, a));
        // x dominates
        assert!(graph.point_precedes(c, a));

        assert_eq!(graph.sort_points(&[b, a, c]), vec![c, a, b]);
    }

    #[test]
    fn test_sort_points_drops_stale_handles() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 1.0, 0.0, 0.0);
        let b = point(&mut graph, 0.0, 0.0, 0.0);
        assert!(graph.release_point(a));
        assert_eq!(graph.sort_points(&[a, b]), vec![b]);
        assert_eq!(graph.cmp_points(a, b), None);
    }

    #[test]
    fn test_link_and_unlink() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 0.0, 0.0);
        let c = point(&mut graph, 2.0, 0.0, 0.0);

        graph.link(&[a, b, c]).unwrap();
        assert_eq!(graph.next(a), Some(b));
        assert_eq!(graph.previous(c), Some(b));

        graph.unlink_from_next(a).unwrap();
        assert_eq!(graph.next(a), None);
        assert_eq!(graph.previous(b), None);
        assert_eq!(graph.next(b), Some(c));

        graph.unlink(b).unwrap();
        assert_eq!(graph.previous(c), None);
        assert_eq!(graph.next(b), None);
    }

    #[test]
    fn test_link_severs_displaced_neighbour() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 0.0, 0.0);
        let c = point(&mut graph, 2.0, 0.0, 0.0);

        graph.link(&[a, b]).unwrap();
        graph.link(&[a, c]).unwrap();
        assert_eq!(graph.next(a), Some(c));
        assert_eq!(graph.previous(b), None);
    }

    #[test]
    fn test_link_rejects_self_link() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        assert_eq!(graph.link(&[a, a]), Err(GraphError::SelfLink(a)));
        assert_eq!(graph.next(a), None);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 3.0, 4.0, 5.0);
        let b = point(&mut graph, 0.0, 0.0, 0.0);
        graph.link(&[a, b]).unwrap();

        let copy = graph.copy_point(a).unwrap();
        assert_eq!(graph.position(copy), graph.position(a));
        assert_eq!(graph.next(copy), None);
        assert!(graph.point_ordinal(copy) > graph.point_ordinal(b));

        graph.set_position(a, DVec3::ONE).unwrap();
        assert_eq!(graph.position(copy), Some(DVec3::new(3.0, 4.0, 5.0)));
    }

    #[test]
    fn test_attached_points_share_position() {
        let mut graph = Graph::new();
        let p1 = point(&mut graph, 0.0, 0.0, 0.0);
        let p2 = point(&mut graph, 9.0, 9.0, 9.0);

        graph.attach(p1, &[p2]).unwrap();
        assert!(graph.is_attached(p1, p2));
        assert!(graph.is_attached(p2, p1));
        assert_eq!(graph.position(p2), Some(DVec3::ZERO));

        graph.set_position(p1, DVec3::splat(5.0)).unwrap();
        assert_eq!(graph.position(p2), Some(DVec3::splat(5.0)));

        // Writes through either side are visible to the other
        graph.set_position(p2, DVec3::splat(7.0)).unwrap();
        assert_eq!(graph.position(p1), Some(DVec3::splat(7.0)));
    }

    #[test]
    fn test_attach_brings_group_along() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 0.0, 0.0);
        let c = point(&mut graph, 2.0, 0.0, 0.0);

        graph.attach(b, &[c]).unwrap();
        graph.attach(a, &[b]).unwrap();

        graph.set_position(a, DVec3::Y).unwrap();
        assert_eq!(graph.position(c), Some(DVec3::Y));
        assert_eq!(graph.attached_sorted(b), vec![a, c]);
    }

    #[test]
    fn test_detach_keeps_value() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 1.0, 1.0);
        graph.attach(a, &[b]).unwrap();
        graph.set_position(a, DVec3::splat(2.0)).unwrap();

        assert!(graph.detach(a, b));
        assert!(!graph.detach(a, b));
        assert_eq!(graph.position(b), Some(DVec3::splat(2.0)));

        graph.set_position(a, DVec3::splat(3.0)).unwrap();
        assert_eq!(graph.position(b), Some(DVec3::splat(2.0)));
    }

    #[test]
    fn test_detach_all() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 0.0, 0.0);
        let c = point(&mut graph, 2.0, 0.0, 0.0);
        graph.attach(a, &[b, c]).unwrap();

        assert_eq!(graph.detach_all(a), 2);
        assert!(graph.attached_sorted(a).is_empty());
        assert!(graph.attached_sorted(c).is_empty());

        graph.set_position(b, DVec3::NEG_ONE).unwrap();
        assert_eq!(graph.position(a), Some(DVec3::ZERO));
        assert_eq!(graph.position(c), Some(DVec3::ZERO));
    }

    #[test]
    fn test_branch_registers_on_parent() {
        let mut graph = Graph::new();
        let start = point(&mut graph, 0.0, 0.0, 0.0);
        let finish = point(&mut graph, 10.0, 0.0, 0.0);
        let main = graph.new_path(start, finish).unwrap();
        let mid = point(&mut graph, 5.0, 0.0, 0.0);
        assert!(graph.insert(main, mid));

        let tip = point(&mut graph, 5.0, 0.0, 8.0);
        let side = graph.branch(mid, tip).unwrap();

        let side_start = graph.path_start(side).unwrap();
        assert_ne!(side_start, mid);
        assert!(graph.is_attached(mid, side_start));
        assert_eq!(graph.path_finish(side), Some(tip));
        assert_eq!(graph.branch_root(side), Some(mid));
        assert!(graph.has_branches(mid));
        assert_eq!(graph.branching_points_sorted(main), vec![mid]);

        // Moving the root moves the branch start
        graph.set_position(mid, DVec3::new(5.0, 2.0, 0.0)).unwrap();
        assert_eq!(graph.position(side_start), Some(DVec3::new(5.0, 2.0, 0.0)));

        assert!(graph.unbranch(mid, side));
        assert!(!graph.unbranch(mid, side));
        assert!(!graph.has_branches(mid));
        assert!(graph.branching_points_sorted(main).is_empty());
        assert_eq!(graph.branch_root(side), None);
    }

    #[test]
    fn test_branch_rejects_owned_finish() {
        let mut graph = Graph::new();
        let a = point(&mut graph, 0.0, 0.0, 0.0);
        let b = point(&mut graph, 1.0, 0.0, 0.0);
        graph.new_path(a, b).unwrap();

        let before = graph.point_count();
        assert_eq!(graph.branch(a, b), Err(GraphError::PointInUse(b)));
        assert_eq!(graph.point_count(), before);
    }

    #[test]
    fn test_unbranch_all() {
        let mut graph = Graph::new();
        let root = point(&mut graph, 0.0, 0.0, 0.0);
        let t1 = point(&mut graph, 1.0, 0.0, 0.0);
        let t2 = point(&mut graph, 0.0, 0.0, 1.0);
        graph.branch(root, t1).unwrap();
        graph.branch(root, t2).unwrap();

        assert_eq!(graph.branches_sorted(root).len(), 2);
        assert_eq!(graph.unbranch_all(root), 2);
        assert!(!graph.has_branches(root));
    }

    #[test]
    fn test_iterators_walk_to_the_ends() {
        let mut graph = Graph::new();
        let start = point(&mut graph, 0.0, 0.0, 0.0);
        let finish = point(&mut graph, 3.0, 0.0, 0.0);
        let path = graph.new_path(start, finish).unwrap();
        let a = point(&mut graph, 1.0, 0.0, 0.0);
        let b = point(&mut graph, 2.0, 0.0, 0.0);
        assert!(graph.insert(path, a));
        assert!(graph.insert(path, b));

        let forward: Vec<_> = graph.iter_forward(a).collect();
        assert_eq!(forward, vec![(1, b), (2, finish)]);

        let reverse: Vec<_> = graph.iter_reverse(b).collect();
        assert_eq!(reverse, vec![(1, a), (2, start)]);

        // Restartable
        assert_eq!(graph.iter_forward(a).count(), 2);
        assert_eq!(graph.iter_forward(finish).count(), 0);
    }

    #[test]
    fn test_clear_point() {
        let mut graph = Graph::new();
        let start = point(&mut graph, 0.0, 0.0, 0.0);
        let finish = point(&mut graph, 2.0, 0.0, 0.0);
        let path = graph.new_path(start, finish).unwrap();
        let mid = point(&mut graph, 1.0, 0.0, 0.0);
        let other = point(&mut graph, 1.0, 1.0, 0.0);
        assert!(graph.insert(path, mid));
        graph.attach(mid, &[other]).unwrap();

        graph.clear_point(mid).unwrap();
        assert_eq!(graph.point_path(mid), None);
        assert_eq!(graph.next(mid), None);
        assert!(graph.attached_sorted(mid).is_empty());
        assert_eq!(graph.next(start), Some(finish));
        assert_eq!(graph.count_intermediate(path), 0);

        assert_eq!(graph.clear_point(start), Err(GraphError::PointInUse(start)));
    }
}
