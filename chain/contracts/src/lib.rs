//! Campaign Registry & Escrow Custody
//!
//! This crate implements the bookkeeping core of the crowdfunding registry:
//! campaign creation and listing, the per-campaign donation ledger and
//! leaderboard, the campaign lifecycle, and escrow payouts.
//!
//! # Modules
//! - `errors`: Error taxonomy (validation, state, authorization, bounds)
//! - `events`: Notifications returned by every mutating operation
//! - `config`: Registry configuration (page size, leaderboard capacity)
//! - `registry`: Campaign creation, identity, pagination, event log
//! - `campaign`: Campaign record and Ongoing/Completed/Cancelled state machine
//! - `ledger`: Per-donor cumulative donations
//! - `leaderboard`: Bounded, amount-sorted top donors
//! - `custody`: Escrow balance, owner withdrawal, donor refunds

pub mod errors;
pub mod events;
pub mod config;
pub mod registry;
pub mod campaign;
pub mod ledger;
pub mod leaderboard;
pub mod custody;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
