//! Campaign — a single funding record and its lifecycle state machine
//!
//! `Ongoing` → `Completed` | `Cancelled`. Both targets are terminal.
//! Donations are accepted only while ongoing; every donation updates the
//! ledger, the escrow and the leaderboard together.

use crowdfund_types::campaign::{
    CampaignSnapshot, CampaignStatus, DonationEntry, DonorPosition, LeaderboardEntry,
};
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::custody::Escrow;
use crate::errors::{AuthorizationError, CrowdfundError, StateError, ValidationError};
use crate::events::{CampaignCancelled, CampaignCompleted, ContractEvent, DonationReceived};
use crate::leaderboard::{Leaderboard, Placement};
use crate::ledger::Ledger;

#[derive(Debug, Clone)]
pub struct Campaign {
    pub(crate) id: CampaignId,
    pub(crate) owner: AccountId,
    title: String,
    description: String,
    goal: Amount,
    pub(crate) status: CampaignStatus,
    pub(crate) ledger: Ledger,
    leaderboard: Leaderboard,
    pub(crate) escrow: Escrow,
}

impl Campaign {
    /// Build a campaign in the `Ongoing` state with nothing raised.
    ///
    /// Title and description must be non-empty and the goal positive;
    /// otherwise no record is created. Records are built by the registry,
    /// which supplies a validated leaderboard capacity.
    pub(crate) fn new(
        id: CampaignId,
        title: impl Into<String>,
        description: impl Into<String>,
        goal: Amount,
        owner: AccountId,
        leaderboard_capacity: usize,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();

        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if goal.is_zero() {
            return Err(ValidationError::ZeroGoal);
        }

        Ok(Self {
            id,
            owner,
            title,
            description,
            goal,
            status: CampaignStatus::Ongoing,
            ledger: Ledger::new(),
            leaderboard: Leaderboard::new(leaderboard_capacity),
            escrow: Escrow::default(),
        })
    }

    // ───────────────────────── Lifecycle ─────────────────────────

    /// Accept a donation into escrow.
    pub fn donate(
        &mut self,
        donor: AccountId,
        amount: Amount,
    ) -> Result<ContractEvent, CrowdfundError> {
        self.require_ongoing()?;
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount.into());
        }

        let entry = self.ledger.record(donor, amount)?;
        let (cumulative, seq) = (entry.cumulative_amount, entry.first_donation_seq);
        self.escrow.credit(amount);

        let placement = self.leaderboard.update(donor, cumulative, seq);
        if placement != Placement::Unchanged {
            debug!(campaign_id = %self.id, donor = %donor, ?placement, "Leaderboard updated");
        }

        let total_raised = self.ledger.total();
        debug!(
            campaign_id = %self.id,
            donor = %donor,
            amount = %amount,
            total_raised = %total_raised,
            "Donation received"
        );

        Ok(ContractEvent::DonationReceived(DonationReceived {
            campaign_id: self.id,
            donor,
            amount,
            total_raised,
        }))
    }

    /// Close a funded campaign. Owner only.
    pub fn complete(&mut self, caller: AccountId) -> Result<ContractEvent, CrowdfundError> {
        self.require_owner(caller)?;
        self.require_ongoing()?;

        let raised = self.total_raised();
        if raised < self.goal {
            warn!(campaign_id = %self.id, raised = %raised, goal = %self.goal, "Completion rejected: goal not met");
            return Err(StateError::GoalNotMet {
                raised,
                goal: self.goal,
            }
            .into());
        }

        self.status = CampaignStatus::Completed;
        info!(campaign_id = %self.id, total_raised = %raised, "Campaign completed");

        Ok(ContractEvent::CampaignCompleted(CampaignCompleted {
            campaign_id: self.id,
            total_raised: raised,
        }))
    }

    /// Cancel an ongoing campaign, opening refunds. Owner only.
    pub fn cancel(&mut self, caller: AccountId) -> Result<ContractEvent, CrowdfundError> {
        self.require_owner(caller)?;
        self.require_ongoing()?;

        self.status = CampaignStatus::Cancelled;
        info!(campaign_id = %self.id, total_raised = %self.total_raised(), "Campaign cancelled");

        Ok(ContractEvent::CampaignCancelled(CampaignCancelled {
            campaign_id: self.id,
            total_raised: self.total_raised(),
        }))
    }

    pub(crate) fn require_owner(&self, caller: AccountId) -> Result<(), AuthorizationError> {
        if caller != self.owner {
            warn!(campaign_id = %self.id, caller = %caller, "Owner-only operation rejected");
            return Err(AuthorizationError::NotOwner { caller });
        }
        Ok(())
    }

    fn require_ongoing(&self) -> Result<(), StateError> {
        if self.status.is_terminal() {
            return Err(StateError::NotOngoing {
                status: self.status,
            });
        }
        Ok(())
    }

    // ───────────────────────── Leaderboard ─────────────────────────

    /// Up to `k` top donors, never more than the leaderboard capacity.
    pub fn top_donors(&self, k: usize) -> Vec<LeaderboardEntry> {
        self.leaderboard.top(k)
    }

    /// The full leaderboard.
    pub fn final_top_donors(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.entries()
    }

    pub fn leaderboard_capacity(&self) -> usize {
        self.leaderboard.capacity()
    }

    // ───────────────────────── Reads ─────────────────────────

    pub fn id(&self) -> CampaignId {
        self.id
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn goal(&self) -> Amount {
        self.goal
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn total_raised(&self) -> Amount {
        self.ledger.total()
    }

    pub fn escrow_balance(&self) -> Amount {
        self.escrow.balance()
    }

    pub fn paid_out(&self) -> Amount {
        self.escrow.paid_out()
    }

    pub fn donor_count(&self) -> usize {
        self.ledger.donor_count()
    }

    pub fn donation(&self, donor: &AccountId) -> Option<&DonationEntry> {
        self.ledger.entry(donor)
    }

    /// Every donor's entry in first-donation order.
    pub fn all_donations(&self) -> Vec<DonationEntry> {
        self.ledger.entries().cloned().collect()
    }

    /// Fraction of the goal raised so far (1.0 = fully funded).
    ///
    /// `None` only when either amount exceeds the decimal range.
    pub fn progress(&self) -> Option<Decimal> {
        let raised = self.total_raised().to_ether().ok()?;
        let goal = self.goal.to_ether().ok()?;
        raised.checked_div(goal)
    }

    /// The donor's holding in this campaign, if any.
    pub fn position_of(&self, donor: &AccountId) -> Option<DonorPosition> {
        let entry = self.ledger.entry(donor)?;
        let refundable = match self.status {
            CampaignStatus::Cancelled => entry.outstanding(),
            _ => Amount::ZERO,
        };
        Some(DonorPosition {
            campaign_id: self.id,
            status: self.status,
            total_amount: entry.cumulative_amount,
            donation_count: entry.donation_count,
            refundable,
        })
    }

    pub fn snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot {
            id: self.id,
            owner: self.owner,
            title: self.title.clone(),
            description: self.description.clone(),
            goal: self.goal,
            status: self.status,
            total_raised: self.total_raised(),
            escrow_balance: self.escrow_balance(),
            donor_count: self.donor_count(),
        }
    }
}
