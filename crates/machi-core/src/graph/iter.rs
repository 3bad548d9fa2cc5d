//! Lazy walks along point links

use super::{Graph, PointId};

/// Forward walk over `next` links, yielding `(ordinal, point)` from 1
///
/// Starts after the origin point and ends at the last point of the chain
/// (a path's finish). The step budget is the number of live points, so a
/// hand-linked cycle ends the walk instead of hanging it.
pub struct ForwardPoints<'a> {
    graph: &'a Graph,
    cursor: Option<PointId>,
    ordinal: usize,
    budget: usize,
}

impl<'a> ForwardPoints<'a> {
    pub(super) fn new(graph: &'a Graph, origin: PointId) -> Self {
        Self {
            graph,
            cursor: graph.next(origin),
            ordinal: 0,
            budget: graph.point_count(),
        }
    }
}

impl Iterator for ForwardPoints<'_> {
    type Item = (usize, PointId);

    fn next(&mut self) -> Option<Self::Item> {
        if self.budget == 0 {
            return None;
        }
        let current = self.cursor?;
        self.budget -= 1;
        self.cursor = self.graph.next(current);
        self.ordinal += 1;
        Some((self.ordinal, current))
    }
}

/// Mirror of [`ForwardPoints`] over `previous` links
pub struct ReversePoints<'a> {
    graph: &'a Graph,
    cursor: Option<PointId>,
    ordinal: usize,
    budget: usize,
}

impl<'a> ReversePoints<'a> {
    pub(super) fn new(graph: &'a Graph, origin: PointId) -> Self {
        Self {
            graph,
            cursor: graph.previous(origin),
            ordinal: 0,
            budget: graph.point_count(),
        }
    }
}

impl Iterator for ReversePoints<'_> {
    type Item = (usize, PointId);

    fn next(&mut self) -> Option<Self::Item> {
        if self.budget == 0 {
            return None;
        }
        let current = self.cursor?;
        self.budget -= 1;
        self.cursor = self.graph.previous(current);
        self.ordinal += 1;
        Some((self.ordinal, current))
    }
}
