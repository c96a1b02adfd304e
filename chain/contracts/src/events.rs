//! Contract events
//!
//! Events are immutable records returned by every mutating operation.
//! How they reach a UI or watcher is up to the caller.

use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use serde::{Deserialize, Serialize};

/// New campaign registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub campaign_id: CampaignId,
    pub owner: AccountId,
    pub title: String,
    pub goal: Amount,
}

/// Donation accepted into escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceived {
    pub campaign_id: CampaignId,
    pub donor: AccountId,
    pub amount: Amount,
    /// Campaign total after this donation
    pub total_raised: Amount,
}

/// Owner closed a funded campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCompleted {
    pub campaign_id: CampaignId,
    pub total_raised: Amount,
}

/// Owner cancelled an ongoing campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCancelled {
    pub campaign_id: CampaignId,
    pub total_raised: Amount,
}

/// Escrow paid out to the owner of a completed campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub campaign_id: CampaignId,
    pub owner: AccountId,
    pub amount: Amount,
}

/// Donor refunded from a cancelled campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRefunded {
    pub campaign_id: CampaignId,
    pub donor: AccountId,
    pub amount: Amount,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    CampaignCreated(CampaignCreated),
    DonationReceived(DonationReceived),
    CampaignCompleted(CampaignCompleted),
    CampaignCancelled(CampaignCancelled),
    FundsWithdrawn(FundsWithdrawn),
    DonationRefunded(DonationRefunded),
}

impl ContractEvent {
    pub fn campaign_id(&self) -> CampaignId {
        match self {
            ContractEvent::CampaignCreated(e) => e.campaign_id,
            ContractEvent::DonationReceived(e) => e.campaign_id,
            ContractEvent::CampaignCompleted(e) => e.campaign_id,
            ContractEvent::CampaignCancelled(e) => e.campaign_id,
            ContractEvent::FundsWithdrawn(e) => e.campaign_id,
            ContractEvent::DonationRefunded(e) => e.campaign_id,
        }
    }

    /// Stable name for logs and dispatch
    pub fn label(&self) -> &'static str {
        match self {
            ContractEvent::CampaignCreated(_) => "campaign_created",
            ContractEvent::DonationReceived(_) => "donation_received",
            ContractEvent::CampaignCompleted(_) => "campaign_completed",
            ContractEvent::CampaignCancelled(_) => "campaign_cancelled",
            ContractEvent::FundsWithdrawn(_) => "funds_withdrawn",
            ContractEvent::DonationRefunded(_) => "donation_refunded",
        }
    }
}
