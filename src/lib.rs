//! # Machi - procedural street networks
//!
//! Application glue around `machi-core`: layered configuration and RON
//! snapshot export for the `machi` command-line generator.

pub mod config;
pub mod export;

pub use config::AppConfig;
