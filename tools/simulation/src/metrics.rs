//! Simulation metrics
//!
//! Tracks campaigns, donations, settlements and payout totals.

use crowdfund_contracts::events::ContractEvent;
use crowdfund_types::numeric::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated simulation metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub campaigns_created: u64,
    pub donations_accepted: u64,
    pub donations_rejected: u64,
    pub campaigns_completed: u64,
    pub campaigns_cancelled: u64,
    pub withdrawals: u64,
    pub refunds: u64,
    pub total_donated: Amount,
    pub total_withdrawn: Amount,
    pub total_refunded: Amount,
}

impl SimMetrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self {
            campaigns_created: 0,
            donations_accepted: 0,
            donations_rejected: 0,
            campaigns_completed: 0,
            campaigns_cancelled: 0,
            withdrawals: 0,
            refunds: 0,
            total_donated: Amount::ZERO,
            total_withdrawn: Amount::ZERO,
            total_refunded: Amount::ZERO,
        }
    }

    /// Record a single event into metrics.
    pub fn record_event(&mut self, event: &ContractEvent) {
        match event {
            ContractEvent::CampaignCreated(_) => {
                self.campaigns_created += 1;
            }
            ContractEvent::DonationReceived(e) => {
                self.donations_accepted += 1;
                accumulate(&mut self.total_donated, e.amount);
            }
            ContractEvent::CampaignCompleted(_) => {
                self.campaigns_completed += 1;
            }
            ContractEvent::CampaignCancelled(_) => {
                self.campaigns_cancelled += 1;
            }
            ContractEvent::FundsWithdrawn(e) => {
                self.withdrawals += 1;
                accumulate(&mut self.total_withdrawn, e.amount);
            }
            ContractEvent::DonationRefunded(e) => {
                self.refunds += 1;
                accumulate(&mut self.total_refunded, e.amount);
            }
        }
    }

    /// Process a batch of events.
    pub fn ingest_events(&mut self, events: &[ContractEvent]) {
        for event in events {
            self.record_event(event);
        }
    }

    /// Record a donation the registry refused.
    pub fn record_rejected_donation(&mut self) {
        self.donations_rejected += 1;
    }

    /// Donated funds not yet paid out to anyone.
    pub fn held_in_escrow(&self) -> Amount {
        let paid = self.total_withdrawn.as_wei() + self.total_refunded.as_wei();
        Amount::from_wei(self.total_donated.as_wei().saturating_sub(paid))
    }

    /// Build a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Campaigns: {} | Donations: {} ({} rejected) | Completed: {} | Cancelled: {} | Donated: {} ETH | Withdrawn: {} ETH | Refunded: {} ETH",
            self.campaigns_created,
            self.donations_accepted,
            self.donations_rejected,
            self.campaigns_completed,
            self.campaigns_cancelled,
            ether(self.total_donated),
            ether(self.total_withdrawn),
            ether(self.total_refunded),
        )
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn accumulate(total: &mut Amount, amount: Amount) {
    *total = total
        .checked_add(amount)
        .unwrap_or(Amount::from_wei(u128::MAX));
}

fn ether(amount: Amount) -> Decimal {
    amount.to_ether().unwrap_or(Decimal::MAX)
}
