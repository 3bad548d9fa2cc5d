pub mod error;
pub mod graph;
pub mod layout;
pub mod rng;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, PathId, PathSnapshot, PointId};
pub use rng::GraphRng;
