use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use machi::{AppConfig, export};
use machi_core::layout::{StreetLayoutConfig, StreetNetworkGenerator};
use machi_core::Graph;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Built-in layout preset
    #[arg(long)]
    preset: Option<String>,

    /// RON layout file; takes precedence over any preset
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Where to write the street snapshot
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the built-in presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.list_presets {
        for name in StreetLayoutConfig::PRESETS {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(preset) = args.preset {
        config.generation.preset = preset;
    }
    if let Some(layout) = args.layout {
        config.generation.layout_file = Some(layout);
    }
    if let Some(output) = args.output {
        config.output.path = output;
    }

    let layout = match &config.generation.layout_file {
        Some(path) => export::load_layout(path)?,
        None => match StreetLayoutConfig::preset(&config.generation.preset) {
            Some(layout) => layout,
            None => bail!(
                "Unknown preset '{}', expected one of: {}",
                config.generation.preset,
                StreetLayoutConfig::PRESETS.join(", ")
            ),
        },
    };

    log::info!(
        "Generating '{}' with seed {}",
        layout.name,
        config.generation.seed
    );
    let generator = StreetNetworkGenerator::from_config(config.generation.seed, layout);
    let mut graph = Graph::new();
    let network = generator.generate(&mut graph)?;

    let Some(snapshot) = network.snapshot(&graph) else {
        bail!("Generated network has no trunk street");
    };
    log::info!(
        "{} streets, {:.1} total length, {} points",
        snapshot.path_count(),
        snapshot.total_length(),
        graph.point_count()
    );

    export::write_snapshot(&snapshot, &config.output.path, config.output.pretty)
}
