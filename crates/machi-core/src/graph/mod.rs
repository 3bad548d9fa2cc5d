//! Point/path street graph
//!
//! Streets, corridors and other linear city features are modelled as paths:
//! doubly-linked runs of points between a start and a finish. Paths can sprout
//! branch paths from interior points, and points can be attached to each other
//! so that they share one mutable position.
//!
//! All nodes live in a [`Graph`]. Callers hold [`PointId`]/[`PathId`] handles;
//! every relation between nodes is stored as a handle too, so the graph never
//! forms ownership cycles and stale handles are detected rather than reused.

mod counter;
mod geometry;
#[allow(clippy::module_inception)]
mod graph;
mod handle;
mod iter;
mod path;
mod point;
mod snapshot;

pub use counter::IdCounter;
pub use geometry::MAX_SEGMENT_SUBDIVISIONS;
pub use graph::Graph;
pub use handle::{Arena, Handle};
pub use iter::{ForwardPoints, ReversePoints};
pub use path::PathNode;
pub use point::{PointKey, PointNode};
pub use snapshot::PathSnapshot;

/// Handle to a point in a [`Graph`]
pub type PointId = Handle<PointNode>;

/// Handle to a path in a [`Graph`]
pub type PathId = Handle<PathNode>;
