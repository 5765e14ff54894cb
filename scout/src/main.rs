//! Run a scouting simulation on an ASCII scenario map.
//!
//! ```text
//! RUST_LOG=debug scout --map scout/maps/outpost.txt --ticks 3000 --seed 42
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scout_lib::{OUTPOST, Scenario, Scout, ScoutConfig, World};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario map (`#` wall, `.` floor, `S` start, `1`-`9` targets, `E` threats).
    /// Uses the built-in outpost map when omitted.
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// JSON file overriding parts of the scout configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of simulation ticks.
    #[arg(long, default_value_t = 2_000)]
    ticks: u64,

    /// Seed for threat movement.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ScoutConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ScoutConfig::default(),
    };

    let text = match &args.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?,
        None => OUTPOST.to_string(),
    };
    let scenario = Scenario::parse(&text).context("parsing scenario map")?;
    log::info!(
        "map {}x{}, start {}, {} targets, {} threats",
        scenario.terrain.grid().width(),
        scenario.terrain.grid().height(),
        scenario.start,
        scenario.targets.len(),
        scenario.threats.len()
    );

    let mut world = World::new(&scenario, &config, args.seed).context("building world")?;
    let mut scout = Scout::new(scenario.targets.iter().copied(), config);
    let summary = world.run(&mut scout, args.ticks);
    log::info!("{summary}");
    Ok(())
}
