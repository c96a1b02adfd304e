//! Run a seeded crowdfunding simulation.
//!
//! Usage: `crowdfund-sim [config.json] [output.json]`

use anyhow::Context;
use crowdfund_simulation::engine::{CampaignSimulator, SimConfig};
use crowdfund_simulation::export::{build_export, export_json, write_to_file};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading simulation config {}", path))?;
            serde_json::from_str::<SimConfig>(&raw)
                .with_context(|| format!("parsing simulation config {}", path))?
        }
        None => SimConfig::default(),
    };

    let mut sim = CampaignSimulator::new(config)?;
    sim.run()?;
    let export = build_export(&sim);

    match args.next() {
        Some(out) => {
            write_to_file(&export, &out)?;
            info!(path = %out, "Simulation export written");
        }
        None => println!("{}", export_json(&export)?),
    }
    Ok(())
}
