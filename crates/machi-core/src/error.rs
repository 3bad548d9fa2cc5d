//! Graph error types
//!
//! Every variant is an invalid-argument condition: the caller handed the graph
//! something it cannot work with. Expected outcomes of iterative path building
//! (wrong path membership, out-of-range ordinals, shortening a minimal path)
//! are not errors and come back as `None`/`false` from the operation itself.

use glam::DVec3;
use thiserror::Error;

use crate::graph::{PathId, PointId};

/// Errors raised by graph construction and parameterised geometry passes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A position had a NaN or infinite component.
    #[error("position {0} is not a finite 3D coordinate")]
    NonFinitePosition(DVec3),

    /// The point handle is stale or was never issued by this graph.
    #[error("{0:?} does not refer to a live point")]
    UnknownPoint(PointId),

    /// The path handle is stale or was never issued by this graph.
    #[error("{0:?} does not refer to a live path")]
    UnknownPath(PathId),

    /// The point is already part of another path's sequence.
    #[error("{0:?} already belongs to a path")]
    PointInUse(PointId),

    /// A path cannot start and finish at the same point.
    #[error("path start and finish are the same point {0:?}")]
    DegeneratePath(PointId),

    /// A point cannot be linked to itself.
    #[error("cannot link {0:?} to itself")]
    SelfLink(PointId),

    /// A numeric parameter was out of its accepted range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name as it appears in the operation signature.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Reject NaN/infinite positions.
pub(crate) fn ensure_finite(position: DVec3) -> GraphResult<DVec3> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(GraphError::NonFinitePosition(position))
    }
}

/// Reject non-positive or non-finite scalar parameters.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> GraphResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GraphError::InvalidParameter { name, value })
    }
}
