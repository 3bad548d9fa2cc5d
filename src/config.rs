//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `machi.ron` file (if exists)
//! 3. Environment variables prefixed with `MACHI_`
//!
//! Example environment variable: `MACHI_GENERATION__SEED=7`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Which town to generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// World seed
    pub seed: u64,
    /// Built-in layout preset, see `StreetLayoutConfig::PRESETS`
    pub preset: String,
    /// RON layout file; takes precedence over `preset`
    #[serde(default)]
    pub layout_file: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            preset: "default".to_string(),
            layout_file: None,
        }
    }
}

/// Where and how the snapshot is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Indented multi-line RON instead of a single line
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("streets.ron"),
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `machi.ron` in the working directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("machi.ron"))
    }

    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `file` (optional, missing is fine)
    /// 3. Environment variables prefixed with `MACHI_` (highest priority)
    pub fn load_from(file: &Path) -> Result<Self> {
        Self::load_layers(file, environment())
    }

    fn load_layers(file: &Path, environment: Environment) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("generation.seed", 42_i64)?
            .set_default("generation.preset", "default")?
            .set_default("output.path", "streets.ron")?
            .set_default("output.pretty", true)?
            // Layer 2: Config file
            .add_source(File::from(file).format(FileFormat::Ron).required(false))
            // Layer 3: Environment variables (MACHI_GENERATION__SEED, etc.)
            .add_source(environment);

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

/// `MACHI_` prefix, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix("MACHI")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
