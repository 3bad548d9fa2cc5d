//! Reading layouts and writing street snapshots as RON files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use machi_core::layout::StreetLayoutConfig;
use machi_core::PathSnapshot;
use ron::ser::PrettyConfig;

/// Load and validate a street layout from a RON file
pub fn load_layout(path: &Path) -> Result<StreetLayoutConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file {}", path.display()))?;
    let layout: StreetLayoutConfig = ron::from_str(&text)
        .with_context(|| format!("Failed to parse layout file {}", path.display()))?;
    layout
        .validate()
        .with_context(|| format!("Invalid layout in {}", path.display()))?;
    Ok(layout)
}

/// Write `snapshot` to `path`, creating parent directories as needed
pub fn write_snapshot(snapshot: &PathSnapshot, path: &Path, pretty: bool) -> Result<()> {
    let text = if pretty {
        ron::ser::to_string_pretty(snapshot, PrettyConfig::default())
    } else {
        ron::to_string(snapshot)
    }
    .context("Failed to serialize snapshot")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote snapshot to {}", path.display());
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<PathSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse snapshot {}", path.display()))
}
