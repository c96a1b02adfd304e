//! Campaign Simulation Framework
//!
//! Drives the registry with seeded random donors, donations and
//! settlements, checking the custody invariants after every step.
//!
//! # Modules
//! - `engine` — Seeded simulator over a registry and balance book
//! - `metrics` — Counters and totals gathered from emitted events
//! - `export` — JSON export of metrics and final campaign snapshots

pub mod engine;
pub mod metrics;
pub mod export;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
