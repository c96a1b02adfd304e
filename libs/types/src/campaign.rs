//! Campaign lifecycle and donation types

use crate::ids::{AccountId, CampaignId};
use crate::numeric::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a campaign
///
/// `Ongoing` is the only state that accepts donations. `Completed` and
/// `Cancelled` are terminal and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CampaignStatus {
    Ongoing = 0,
    Completed = 1,
    Cancelled = 2,
}

impl CampaignStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CampaignStatus::Ongoing)
    }

    /// Numeric code used by clients (0, 1, 2)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Ongoing => "Ongoing",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Cancelled => "Cancelled",
        }
    }
}

impl TryFrom<u8> for CampaignStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CampaignStatus::Ongoing),
            1 => Ok(CampaignStatus::Completed),
            2 => Ok(CampaignStatus::Cancelled),
            other => Err(other),
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A donor's position within one campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationEntry {
    pub donor: AccountId,
    /// Sum of every donation this donor made; never decreases
    pub cumulative_amount: Amount,
    pub donation_count: u64,
    /// Set once the entry has been paid out, by owner withdrawal or refund
    pub withdrawn: bool,
    /// Order of this donor's first donation within the campaign
    pub first_donation_seq: u64,
}

impl DonationEntry {
    pub fn new(donor: AccountId, first_donation_seq: u64) -> Self {
        Self {
            donor,
            cumulative_amount: Amount::ZERO,
            donation_count: 0,
            withdrawn: false,
            first_donation_seq,
        }
    }

    /// Amount still held for this donor in escrow
    pub fn outstanding(&self) -> Amount {
        if self.withdrawn {
            Amount::ZERO
        } else {
            self.cumulative_amount
        }
    }
}

/// One row of a campaign's leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub donor: AccountId,
    pub amount: Amount,
}

/// Point-in-time read of a campaign record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub id: CampaignId,
    pub owner: AccountId,
    pub title: String,
    pub description: String,
    pub goal: Amount,
    pub status: CampaignStatus,
    pub total_raised: Amount,
    pub escrow_balance: Amount,
    pub donor_count: usize,
}

/// A donor's holding in one campaign, as seen from the donor's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorPosition {
    pub campaign_id: CampaignId,
    pub status: CampaignStatus,
    pub total_amount: Amount,
    pub donation_count: u64,
    /// What a refund would pay right now (zero unless cancelled and unclaimed)
    pub refundable: Amount,
}
