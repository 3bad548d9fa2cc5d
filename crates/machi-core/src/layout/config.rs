//! Street layout configuration - serializable parameters for street generation
//!
//! Captures everything the street-network generator needs, so layouts can be
//! stored as RON presets and tweaked without recompiling.
//! The seed is NOT part of the config - same config + different seed = different town.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::rng::GraphRng;

/// Complete street layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreetLayoutConfig {
    /// Display name for this configuration
    pub name: String,

    /// Main street that every other street branches from
    pub trunk: TrunkParams,

    /// Side street growth
    pub branching: BranchParams,

    /// Relative weights of street shapes
    pub styles: StyleWeights,

    /// Shape of wave-style streets
    pub wave: WaveParams,

    /// Segment length and simplification
    pub subdivision: SubdivisionParams,
}

/// Main street placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrunkParams {
    /// Start of the main street in world coordinates
    pub origin: [f64; 3],
    /// Direction in the horizontal plane, degrees from +x towards +z (default: 0)
    pub heading_degrees: f64,
    /// Length of the main street (default: 160)
    pub length: f64,
}

/// Side street growth parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchParams {
    /// Levels of side streets below the trunk (default: 2)
    pub max_depth: u32,
    /// Branch attempts per street (default: 4)
    pub attempts_per_street: u32,
    /// Probability that an attempt produces a side street (default: 0.6)
    pub probability: f64,
    /// Shortest side street before falloff (default: 24)
    pub min_length: f64,
    /// Longest side street before falloff (default: 64)
    pub max_length: f64,
    /// Length multiplier applied per depth level (default: 0.6)
    pub length_falloff: f64,
}

/// Relative weights for street shapes. Zero disables a shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleWeights {
    pub straight: f64,
    pub wave: f64,
    pub slanted: f64,
}

/// Wave-style street parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveParams {
    /// Segments per wave street (default: 8)
    pub segment_count: usize,
    /// Peak sideways displacement (default: 4)
    pub amplitude: f64,
    /// Phase advance per segment in radians (default: 0.8)
    pub density: f64,
}

/// Subdivision and simplification passes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdivisionParams {
    /// Longest allowed segment after subdivision (default: 8)
    pub segment_length: f64,
    /// Run the collinear simplification pass at the end (default: true)
    pub simplify: bool,
    /// Turns below this angle are simplified away (default: 2 degrees)
    pub simplify_angle_degrees: f64,
}

/// Shape applied to a freshly created street
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetStyle {
    Straight,
    Wave,
    Slanted,
}

// Default implementations

impl Default for StreetLayoutConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            trunk: TrunkParams::default(),
            branching: BranchParams::default(),
            styles: StyleWeights::default(),
            wave: WaveParams::default(),
            subdivision: SubdivisionParams::default(),
        }
    }
}

impl Default for TrunkParams {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            heading_degrees: 0.0,
            length: 160.0,
        }
    }
}

impl Default for BranchParams {
    fn default() -> Self {
        Self {
            max_depth: 2,
            attempts_per_street: 4,
            probability: 0.6,
            min_length: 24.0,
            max_length: 64.0,
            length_falloff: 0.6,
        }
    }
}

impl Default for StyleWeights {
    fn default() -> Self {
        Self {
            straight: 3.0,
            wave: 1.0,
            slanted: 1.0,
        }
    }
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            segment_count: 8,
            amplitude: 4.0,
            density: 0.8,
        }
    }
}

impl Default for SubdivisionParams {
    fn default() -> Self {
        Self {
            segment_length: 8.0,
            simplify: true,
            simplify_angle_degrees: 2.0,
        }
    }
}

impl StyleWeights {
    /// Pick a style with probability proportional to its weight
    ///
    /// Falls back to `Straight` when every weight is zero.
    pub fn choose<R: GraphRng + ?Sized>(&self, rng: &mut R) -> StreetStyle {
        let weights = [
            (StreetStyle::Straight, self.straight.max(0.0)),
            (StreetStyle::Wave, self.wave.max(0.0)),
            (StreetStyle::Slanted, self.slanted.max(0.0)),
        ];
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 {
            return StreetStyle::Straight;
        }
        let mut roll = rng.unit_f64() * total;
        for (style, weight) in weights {
            if roll < weight {
                return style;
            }
            roll -= weight;
        }
        StreetStyle::Straight
    }
}

impl StreetLayoutConfig {
    /// Names accepted by [`StreetLayoutConfig::preset`]
    pub const PRESETS: [&'static str; 4] =
        ["default", "grid_town", "winding_village", "diagonal_suburb"];

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "grid_town" => Some(Self::preset_grid_town()),
            "winding_village" => Some(Self::preset_winding_village()),
            "diagonal_suburb" => Some(Self::preset_diagonal_suburb()),
            _ => None,
        }
    }

    /// Straight streets only, dense branching
    pub fn preset_grid_town() -> Self {
        let mut config = Self {
            name: "Grid Town".to_string(),
            ..Default::default()
        };
        config.styles = StyleWeights {
            straight: 1.0,
            wave: 0.0,
            slanted: 0.0,
        };
        config.branching.attempts_per_street = 6;
        config.branching.probability = 0.8;
        config
    }

    /// Long meandering streets with few side roads
    pub fn preset_winding_village() -> Self {
        let mut config = Self {
            name: "Winding Village".to_string(),
            ..Default::default()
        };
        config.styles = StyleWeights {
            straight: 0.5,
            wave: 3.0,
            slanted: 0.0,
        };
        config.wave.amplitude = 6.0;
        config.wave.segment_count = 12;
        config.branching.attempts_per_street = 3;
        config.branching.probability = 0.5;
        config.subdivision.segment_length = 4.0;
        config
    }

    /// Off-axis trunk with 45 degree side streets
    pub fn preset_diagonal_suburb() -> Self {
        let mut config = Self {
            name: "Diagonal Suburb".to_string(),
            ..Default::default()
        };
        config.trunk.heading_degrees = 30.0;
        config.styles = StyleWeights {
            straight: 1.0,
            wave: 0.0,
            slanted: 3.0,
        };
        config.branching.max_depth = 3;
        config
    }

    /// Reject parameter combinations the generator cannot honour
    pub fn validate(&self) -> GraphResult<()> {
        let positive = [
            ("trunk.length", self.trunk.length),
            ("branching.min_length", self.branching.min_length),
            ("branching.max_length", self.branching.max_length),
            ("branching.length_falloff", self.branching.length_falloff),
            ("subdivision.segment_length", self.subdivision.segment_length),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::InvalidParameter { name, value });
            }
        }
        if self.branching.max_length < self.branching.min_length {
            return Err(GraphError::InvalidParameter {
                name: "branching.max_length",
                value: self.branching.max_length,
            });
        }
        if !(0.0..=1.0).contains(&self.branching.probability) {
            return Err(GraphError::InvalidParameter {
                name: "branching.probability",
                value: self.branching.probability,
            });
        }
        if self.wave.segment_count == 0 {
            return Err(GraphError::InvalidParameter {
                name: "wave.segment_count",
                value: 0.0,
            });
        }
        let finite = [
            ("trunk.heading_degrees", self.trunk.heading_degrees),
            ("wave.amplitude", self.wave.amplitude),
            ("wave.density", self.wave.density),
            (
                "subdivision.simplify_angle_degrees",
                self.subdivision.simplify_angle_degrees,
            ),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(GraphError::InvalidParameter { name, value });
            }
        }
        if self.trunk.origin.iter().any(|c| !c.is_finite()) {
            return Err(GraphError::InvalidParameter {
                name: "trunk.origin",
                value: f64::NAN,
            });
        }
        Ok(())
    }
}
