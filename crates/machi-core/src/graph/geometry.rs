//! Geometric passes over paths
//!
//! `y` is the vertical axis; `x` and `z` are the horizontal axes that the
//! wave and slant shapes work in.

use glam::DVec3;

use super::{Graph, PathId, PointId};
use crate::error::{GraphError, GraphResult, ensure_positive};

/// Slack for floating-point comparisons on coordinates and ratios
const EPSILON: f64 = 1e-9;

/// Most points `subdivide` may insert into a single segment
pub const MAX_SEGMENT_SUBDIVISIONS: usize = 1 << 20;

/// Angle between the incoming (`a -> b`) and outgoing (`b -> c`) directions
///
/// Zero when either segment has no length.
fn turn_angle(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    let incoming = b - a;
    let outgoing = c - b;
    let denominator = incoming.length() * outgoing.length();
    if denominator <= EPSILON * EPSILON {
        return 0.0;
    }
    (incoming.dot(outgoing) / denominator).clamp(-1.0, 1.0).acos()
}

impl Graph {
    /// Sum of segment lengths from start to finish
    pub fn length(&self, path: PathId) -> f64 {
        self.all_positions(path)
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Insert evenly spaced points so no segment exceeds `segment_length`
    ///
    /// Returns the number of inserted points. Running it again with the same
    /// length inserts nothing. A length that would split any segment into more
    /// than [`MAX_SEGMENT_SUBDIVISIONS`] pieces is rejected before the path is
    /// touched.
    pub fn subdivide(&mut self, path: PathId, segment_length: f64) -> GraphResult<usize> {
        let segment_length = ensure_positive("segment_length", segment_length)?;
        self.require_path(path)?;

        let points = self.all_points(path);
        let positions = self.all_positions(path);
        let longest = positions
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .fold(0.0, f64::max);
        if longest / segment_length > MAX_SEGMENT_SUBDIVISIONS as f64 {
            return Err(GraphError::InvalidParameter {
                name: "segment_length",
                value: segment_length,
            });
        }
        let mut inserted = 0;
        for pair in points.windows(2) {
            let (Some(from), Some(to)) = (self.position(pair[0]), self.position(pair[1])) else {
                continue;
            };
            let distance = from.distance(to);
            if distance <= segment_length {
                continue;
            }
            let segments = ((distance / segment_length) - EPSILON).ceil().max(1.0) as usize;
            for i in 1..segments {
                let position = from.lerp(to, i as f64 / segments as f64);
                let point = self.insert_point(position);
                if self.insert_before(path, pair[1], point) {
                    inserted += 1;
                }
            }
        }
        log::debug!("Subdivided {path:?} at {segment_length}: {inserted} points inserted");
        Ok(inserted)
    }

    /// Remove near-collinear intermediates
    ///
    /// An intermediate goes when the angle between its incoming and outgoing
    /// directions is below `angle_threshold` (radians). Branching points and
    /// points with attachments or branches are always kept. Returns the
    /// number of removed points.
    pub fn unsubdivide(&mut self, path: PathId, angle_threshold: f64) -> GraphResult<usize> {
        if !angle_threshold.is_finite() || angle_threshold < 0.0 {
            return Err(GraphError::InvalidParameter {
                name: "angle_threshold",
                value: angle_threshold,
            });
        }
        let node = self.require_path(path)?;
        let (start, finish) = (node.start, node.finish);

        let mut removed = 0;
        let mut previous = start;
        let mut current = self.next(start);
        while let Some(point) = current.filter(|&point| point != finish) {
            let next = self.next(point);
            let collinear = match (self.position(previous), self.position(point), next) {
                (Some(a), Some(b), Some(next)) => self
                    .position(next)
                    .is_some_and(|c| turn_angle(a, b, c) < angle_threshold),
                _ => false,
            };
            if collinear && self.is_simplifiable(path, point) && self.remove(path, point) {
                removed += 1;
            } else {
                previous = point;
            }
            current = next;
        }
        log::debug!("Unsubdivided {path:?}: {removed} points removed");
        Ok(removed)
    }

    /// Simplification must not destroy topologically significant points
    fn is_simplifiable(&self, path: PathId, point: PointId) -> bool {
        let branching = self
            .paths
            .get(path)
            .is_some_and(|node| node.branching_points.contains(&point));
        let anchored = self
            .points
            .get(point)
            .is_some_and(|node| !node.attached.is_empty() || !node.branches.is_empty());
        !branching && !anchored
    }

    /// Reset the path to a straight start-finish line, optionally subdivided
    pub fn make_straight(
        &mut self,
        path: PathId,
        segment_length: Option<f64>,
    ) -> GraphResult<usize> {
        if let Some(length) = segment_length {
            ensure_positive("segment_length", length)?;
        }
        self.require_path(path)?;
        self.clear_intermediate(path);
        match segment_length {
            Some(length) => self.subdivide(path, length),
            None => Ok(0),
        }
    }

    /// Reshape the path into a sine wave along the start-finish line
    ///
    /// Places `segment_count - 1` evenly spaced intermediates, the `i`-th
    /// displaced by `amplitude * sin(i * density)` perpendicular to the
    /// dominant horizontal axis.
    pub fn make_wave(
        &mut self,
        path: PathId,
        segment_count: usize,
        amplitude: f64,
        density: f64,
    ) -> GraphResult<usize> {
        if segment_count == 0 {
            return Err(GraphError::InvalidParameter {
                name: "segment_count",
                value: 0.0,
            });
        }
        for (name, value) in [("amplitude", amplitude), ("density", density)] {
            if !value.is_finite() {
                return Err(GraphError::InvalidParameter { name, value });
            }
        }
        let (from, to) = self.endpoint_positions(path)?;
        self.clear_intermediate(path);

        let delta = to - from;
        let offset_axis = if delta.x.abs() >= delta.z.abs() {
            DVec3::Z
        } else {
            DVec3::X
        };
        for i in 1..segment_count {
            let t = i as f64 / segment_count as f64;
            let offset = offset_axis * amplitude * (i as f64 * density).sin();
            let point = self.insert_point(from.lerp(to, t) + offset);
            self.insert(path, point);
        }
        Ok(segment_count - 1)
    }

    /// Reshape the path into a 45 degree run followed by an axis-aligned run
    ///
    /// The corner covers the minor horizontal offset at a 1:1 slope, then the
    /// path continues along the dominant axis. Inserts nothing when the
    /// displacement is already axis-aligned or already exactly diagonal.
    pub fn make_slanted(&mut self, path: PathId) -> GraphResult<usize> {
        let (from, to) = self.endpoint_positions(path)?;
        self.clear_intermediate(path);

        let delta = to - from;
        let (dx, dz) = (delta.x.abs(), delta.z.abs());
        if dx < EPSILON || dz < EPSILON || (dx - dz).abs() < EPSILON {
            return Ok(0);
        }

        let corner = if dx > dz {
            from + DVec3::new(delta.x.signum() * dz, delta.y * dz / dx, delta.z)
        } else {
            from + DVec3::new(delta.x, delta.y * dx / dz, delta.z.signum() * dx)
        };
        let point = self.insert_point(corner);
        self.insert(path, point);
        Ok(1)
    }

    fn endpoint_positions(&self, path: PathId) -> GraphResult<(DVec3, DVec3)> {
        let node = self.require_path(path)?;
        let from = self.require_point(node.start)?.position();
        let to = self.require_point(node.finish)?.position();
        Ok((from, to))
    }
}
