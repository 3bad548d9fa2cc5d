//! Street layout - grows a street network on top of the point/path graph

pub mod config;
mod generator;

pub use config::{
    BranchParams, StreetLayoutConfig, StreetStyle, StyleWeights, SubdivisionParams, TrunkParams,
    WaveParams,
};
pub use generator::{StreetNetwork, StreetNetworkGenerator};
