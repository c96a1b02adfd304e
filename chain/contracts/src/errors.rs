//! Contract-specific error types
//!
//! Every failure aborts the triggering operation with no partial mutation.
//! Variants carry the precondition that failed so callers can render it.

use crowdfund_types::campaign::CampaignStatus;
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use thiserror::Error;

/// Malformed input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Description is required")]
    EmptyDescription,

    #[error("Goal must be greater than zero")]
    ZeroGoal,

    #[error("Donation amount must be greater than zero")]
    ZeroAmount,

    #[error("Donation of {amount} would overflow the amount raised ({total_raised})")]
    AmountOverflow { amount: Amount, total_raised: Amount },
}

/// Operation not valid for the campaign's lifecycle state or balance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Campaign is not ongoing: status {status}")]
    NotOngoing { status: CampaignStatus },

    #[error("Goal not met: raised {raised} of {goal}")]
    GoalNotMet { raised: Amount, goal: Amount },

    #[error("Campaign is not completed: status {status}")]
    NotCompleted { status: CampaignStatus },

    #[error("Campaign is not cancelled: status {status}")]
    NotCancelled { status: CampaignStatus },

    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    #[error("Nothing to refund for donor {donor}")]
    NothingToRefund { donor: AccountId },

    #[error("Donation of {donor} already refunded")]
    AlreadyRefunded { donor: AccountId },
}

/// Caller lacks the required role
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Unauthorized: {caller} is not the campaign owner")]
    NotOwner { caller: AccountId },
}

/// Index or identity outside the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("Offset {offset} exceeds campaign count {count}")]
    OffsetOutOfRange { offset: usize, count: usize },

    #[error("Campaign not found: {campaign_id}")]
    UnknownCampaign { campaign_id: CampaignId },
}

/// External transfer refused by the receiving side
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Transfer of {amount} to {recipient} rejected: {reason}")]
    Rejected {
        recipient: AccountId,
        amount: Amount,
        reason: String,
    },
}

/// Rejected registry configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Config parse error: {0}")]
    Parse(String),
}

/// Top-level error for every registry and campaign operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrowdfundError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),
}
