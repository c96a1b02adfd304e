//! Seeded campaign simulator
//!
//! Creates campaigns, lets a fixed population of donors give random
//! amounts, settles campaigns along the way (complete + withdraw when
//! funded, cancel + refund everyone otherwise) and verifies the custody
//! invariants after every operation. Identical seeds replay identically.

use crowdfund_contracts::config::RegistryConfig;
use crowdfund_contracts::custody::BalanceBook;
use crowdfund_contracts::errors::{ConfigError, CrowdfundError};
use crowdfund_contracts::registry::Registry;
use crowdfund_types::campaign::CampaignStatus;
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Builder;

use crate::metrics::SimMetrics;

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub campaigns: usize,
    pub donors: usize,
    /// Donation attempts across all campaigns.
    pub rounds: usize,
    /// Goals are drawn from 1..=max_goal_ether.
    pub max_goal_ether: u64,
    /// Donations are drawn from 1..=max_donation_wei.
    pub max_donation_wei: u128,
    /// Chance per round that a random campaign is settled early.
    pub settle_probability: f64,
    /// Chance that an underfunded-or-not campaign is cancelled on settlement.
    pub cancel_probability: f64,
    pub registry: RegistryConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            campaigns: 8,
            donors: 25,
            rounds: 1_000,
            max_goal_ether: 20,
            max_donation_wei: 2_000_000_000_000_000_000,
            settle_probability: 0.01,
            cancel_probability: 0.3,
            registry: RegistryConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        };
        if self.campaigns == 0 {
            return Err(invalid("campaigns", "must be at least 1"));
        }
        if self.donors == 0 {
            return Err(invalid("donors", "must be at least 1"));
        }
        if self.max_goal_ether == 0 {
            return Err(invalid("max_goal_ether", "must be at least 1"));
        }
        if self.max_donation_wei == 0 {
            return Err(invalid("max_donation_wei", "must be at least 1"));
        }
        // Every round landing on one campaign must still fit its total.
        if self
            .max_donation_wei
            .checked_mul(self.rounds.max(1) as u128)
            .is_none()
        {
            return Err(invalid(
                "max_donation_wei",
                "rounds * max_donation_wei overflows a campaign total",
            ));
        }
        for (field, p) in [
            ("settle_probability", self.settle_probability),
            ("cancel_probability", self.cancel_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, "must be within [0, 1]"));
            }
        }
        self.registry.validate()
    }
}

/// Errors that abort a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("invalid simulation config: {0}")]
    Config(#[from] ConfigError),

    #[error("unexpected contract failure: {0}")]
    Contract(#[from] CrowdfundError),

    #[error("invariant violated on campaign {campaign_id}: {detail}")]
    InvariantViolated {
        campaign_id: CampaignId,
        detail: String,
    },
}

/// Deterministic driver over a registry and an in-process balance book.
pub struct CampaignSimulator {
    config: SimConfig,
    registry: Registry,
    bank: BalanceBook,
    owners: Vec<AccountId>,
    donors: Vec<AccountId>,
    rng: ChaCha8Rng,
    metrics: SimMetrics,
    event_count: usize,
}

impl CampaignSimulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let registry = Registry::with_config(config.registry.clone())?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let donors = (0..config.donors).map(|_| seeded_account(&mut rng)).collect();

        Ok(Self {
            config,
            registry,
            bank: BalanceBook::new(),
            owners: Vec::new(),
            donors,
            rng,
            metrics: SimMetrics::new(),
            event_count: 0,
        })
    }

    /// Run the full scenario: create, donate, settle everything.
    pub fn run(&mut self) -> Result<&SimMetrics, SimError> {
        info!(
            seed = self.config.seed,
            campaigns = self.config.campaigns,
            donors = self.config.donors,
            rounds = self.config.rounds,
            "Starting campaign simulation"
        );

        for i in 0..self.config.campaigns {
            let owner = seeded_account(&mut self.rng);
            let goal = Amount::ether(self.rng.gen_range(1..=self.config.max_goal_ether));
            self.registry
                .create(format!("Campaign {}", i), "Simulated campaign", goal, owner)?;
            self.owners.push(owner);
        }
        self.flush_events();

        for _ in 0..self.config.rounds {
            let campaign = self.random_campaign();
            let donor = self.donors[self.rng.gen_range(0..self.donors.len())];
            let amount = Amount::from_wei(self.rng.gen_range(1..=self.config.max_donation_wei));

            match self.registry.donate(campaign, donor, amount) {
                Ok(_) => {}
                Err(CrowdfundError::State(_)) => self.metrics.record_rejected_donation(),
                Err(err) => return Err(err.into()),
            }
            self.verify(campaign)?;

            if self.rng.gen_bool(self.config.settle_probability) {
                let target = self.random_campaign();
                self.settle(target)?;
            }
            self.flush_events();
        }

        for index in 0..self.owners.len() {
            self.settle(CampaignId::new(index as u64))?;
        }
        self.flush_events();

        info!(summary = %self.metrics.summary(), "Simulation finished");
        Ok(&self.metrics)
    }

    /// Settle an ongoing campaign. Already-settled campaigns are skipped.
    fn settle(&mut self, id: CampaignId) -> Result<(), SimError> {
        let campaign = self.registry.campaign(id).map_err(CrowdfundError::from)?;
        if campaign.status() != CampaignStatus::Ongoing {
            return Ok(());
        }
        let owner = campaign.owner();
        let funded = campaign.total_raised() >= campaign.goal();
        let cancel = !funded || self.rng.gen_bool(self.config.cancel_probability);

        if cancel {
            self.registry.cancel(id, owner)?;
            let refundable: Vec<AccountId> = self
                .registry
                .campaign(id)
                .map_err(CrowdfundError::from)?
                .all_donations()
                .iter()
                .map(|e| e.donor)
                .collect();
            debug!(campaign_id = %id, donors = refundable.len(), "Refunding cancelled campaign");
            for donor in refundable {
                self.registry.refund(id, donor, &mut self.bank)?;
                self.verify(id)?;
            }
        } else {
            self.registry.complete(id, owner)?;
            self.registry.withdraw(id, owner, &mut self.bank)?;
        }
        self.verify(id)
    }

    /// Check the custody invariants of one campaign.
    pub fn verify(&self, id: CampaignId) -> Result<(), SimError> {
        let campaign = self.registry.campaign(id).map_err(CrowdfundError::from)?;
        let violation = |detail: String| SimError::InvariantViolated {
            campaign_id: id,
            detail,
        };

        let donations = campaign.all_donations();
        let ledger_sum: u128 = donations.iter().map(|e| e.cumulative_amount.as_wei()).sum();
        if ledger_sum != campaign.total_raised().as_wei() {
            return Err(violation(format!(
                "total raised {} != ledger sum {}",
                campaign.total_raised(),
                ledger_sum
            )));
        }

        let expected_escrow = campaign.total_raised().checked_sub(campaign.paid_out());
        if expected_escrow != Some(campaign.escrow_balance()) {
            return Err(violation(format!(
                "escrow {} != raised {} - paid out {}",
                campaign.escrow_balance(),
                campaign.total_raised(),
                campaign.paid_out()
            )));
        }

        if campaign.final_top_donors().len() > campaign.leaderboard_capacity() {
            return Err(violation("leaderboard exceeds capacity".to_string()));
        }

        Ok(())
    }

    fn random_campaign(&mut self) -> CampaignId {
        CampaignId::new(self.rng.gen_range(0..self.owners.len()) as u64)
    }

    fn flush_events(&mut self) {
        let events = self.registry.drain_events();
        self.event_count += events.len();
        self.metrics.ingest_events(&events);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bank(&self) -> &BalanceBook {
        &self.bank
    }

    pub fn metrics(&self) -> &SimMetrics {
        &self.metrics
    }

    /// Registry events observed so far.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Account ids drawn from the simulation RNG so that runs replay exactly.
fn seeded_account(rng: &mut ChaCha8Rng) -> AccountId {
    AccountId::from_uuid(Builder::from_random_bytes(rng.gen()).into_uuid())
}
