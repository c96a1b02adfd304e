//! Simulation export
//!
//! Serializes metrics and final campaign snapshots to JSON for external
//! consumption.

use crate::engine::CampaignSimulator;
use crate::metrics::SimMetrics;
use crowdfund_types::campaign::CampaignSnapshot;
use serde::{Deserialize, Serialize};

/// Combined export containing all simulation outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub seed: u64,
    pub metrics: SimMetrics,
    pub campaigns: Vec<CampaignSnapshot>,
    pub event_count: usize,
}

/// Build a complete simulation export from a finished (or partial) run.
pub fn build_export(sim: &CampaignSimulator) -> SimulationExport {
    let registry = sim.registry();
    let campaigns = (0..registry.count())
        .filter_map(|i| {
            registry
                .campaign(crowdfund_types::ids::CampaignId::new(i as u64))
                .ok()
                .map(|c| c.snapshot())
        })
        .collect();

    SimulationExport {
        version: crate::VERSION.to_string(),
        seed: sim.config().seed,
        metrics: sim.metrics().clone(),
        campaigns,
        event_count: sim.event_count(),
    }
}

/// Export complete simulation data as JSON.
pub fn export_json(export: &SimulationExport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: &str) -> anyhow::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)?;
    Ok(())
}
