//! Custody — escrowed balance, owner withdrawal and donor refunds
//!
//! Both payout paths commit their state change before the external
//! transfer runs: the balance is zeroed (or the donor's entry marked
//! withdrawn) first, then the `Transfer` is invoked with a read-only view
//! of the already-committed campaign. If the transfer fails the effects
//! are rolled back, so a payout either happens in full or not at all.

use std::collections::{HashMap, HashSet};

use crowdfund_types::campaign::CampaignStatus;
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;
use tracing::{info, warn};

use crate::campaign::Campaign;
use crate::errors::{CrowdfundError, StateError, TransferError};
use crate::events::{ContractEvent, DonationRefunded, FundsWithdrawn};

/// Which custody path produced a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutKind {
    OwnerWithdrawal,
    DonorRefund,
}

/// An outbound movement of escrowed funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub campaign_id: CampaignId,
    pub recipient: AccountId,
    pub amount: Amount,
    pub kind: PayoutKind,
}

/// Outbound transfer of funds leaving custody.
///
/// `committed` is the campaign with the payout's effects already applied.
/// Returning an error aborts the payout and restores the escrow.
pub trait Transfer {
    fn transfer(&mut self, payout: &Payout, committed: &Campaign) -> Result<(), TransferError>;
}

/// Escrowed funds of a single campaign.
///
/// Invariant: `balance == total_raised - paid_out`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Escrow {
    balance: Amount,
    paid_out: Amount,
}

impl Escrow {
    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn paid_out(&self) -> Amount {
        self.paid_out
    }

    /// Credit a donation. Callers check the campaign total for overflow
    /// first; the balance never exceeds that total.
    pub(crate) fn credit(&mut self, amount: Amount) {
        self.balance = Amount::from_wei(self.balance.as_wei() + amount.as_wei());
    }

    /// Move `amount` from balance to paid_out.
    pub(crate) fn release(&mut self, amount: Amount) -> Result<(), StateError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(StateError::NothingToWithdraw)?;
        self.balance = remaining;
        self.paid_out = Amount::from_wei(self.paid_out.as_wei() + amount.as_wei());
        Ok(())
    }

    /// Undo a `release` after a failed transfer.
    pub(crate) fn restore(&mut self, amount: Amount) {
        self.paid_out = Amount::from_wei(self.paid_out.as_wei() - amount.as_wei());
        self.balance = Amount::from_wei(self.balance.as_wei() + amount.as_wei());
    }
}

impl Campaign {
    /// Pay the whole escrow to the owner of a completed campaign.
    ///
    /// A second call, or a re-entrant call made from inside the transfer,
    /// sees a zero balance and fails with `StateError::NothingToWithdraw`.
    pub fn withdraw<T: Transfer + ?Sized>(
        &mut self,
        caller: AccountId,
        transfer: &mut T,
    ) -> Result<ContractEvent, CrowdfundError> {
        self.require_owner(caller)?;
        if self.status != CampaignStatus::Completed {
            return Err(StateError::NotCompleted {
                status: self.status,
            }
            .into());
        }

        let amount = self.escrow.balance();
        if amount.is_zero() {
            warn!(campaign_id = %self.id, "Withdrawal rejected: escrow empty");
            return Err(StateError::NothingToWithdraw.into());
        }

        self.escrow.release(amount)?;
        let flipped = self.ledger.mark_all_withdrawn();

        let payout = Payout {
            campaign_id: self.id,
            recipient: self.owner,
            amount,
            kind: PayoutKind::OwnerWithdrawal,
        };

        if let Err(err) = transfer.transfer(&payout, self) {
            self.escrow.restore(amount);
            for donor in &flipped {
                self.ledger.unmark_withdrawn(donor);
            }
            warn!(campaign_id = %self.id, amount = %amount, error = %err, "Withdrawal transfer failed, rolled back");
            return Err(err.into());
        }

        info!(campaign_id = %self.id, owner = %self.owner, amount = %amount, "Funds withdrawn");

        Ok(ContractEvent::FundsWithdrawn(FundsWithdrawn {
            campaign_id: self.id,
            owner: self.owner,
            amount,
        }))
    }

    /// Return the caller's cumulative donation from a cancelled campaign.
    ///
    /// Each donor may refund once. The entry is marked withdrawn before
    /// the transfer runs.
    pub fn refund<T: Transfer + ?Sized>(
        &mut self,
        caller: AccountId,
        transfer: &mut T,
    ) -> Result<ContractEvent, CrowdfundError> {
        if self.status != CampaignStatus::Cancelled {
            return Err(StateError::NotCancelled {
                status: self.status,
            }
            .into());
        }

        let entry = self
            .ledger
            .entry(&caller)
            .filter(|e| !e.cumulative_amount.is_zero())
            .ok_or(StateError::NothingToRefund { donor: caller })?;
        if entry.withdrawn {
            warn!(campaign_id = %self.id, donor = %caller, "Refund rejected: already refunded");
            return Err(StateError::AlreadyRefunded { donor: caller }.into());
        }

        let amount = self
            .ledger
            .mark_withdrawn(&caller)
            .ok_or(StateError::NothingToRefund { donor: caller })?;
        if let Err(err) = self.escrow.release(amount) {
            self.ledger.unmark_withdrawn(&caller);
            return Err(err.into());
        }

        let payout = Payout {
            campaign_id: self.id,
            recipient: caller,
            amount,
            kind: PayoutKind::DonorRefund,
        };

        if let Err(err) = transfer.transfer(&payout, self) {
            self.escrow.restore(amount);
            self.ledger.unmark_withdrawn(&caller);
            warn!(campaign_id = %self.id, donor = %caller, amount = %amount, error = %err, "Refund transfer failed, rolled back");
            return Err(err.into());
        }

        info!(campaign_id = %self.id, donor = %caller, amount = %amount, "Donation refunded");

        Ok(ContractEvent::DonationRefunded(DonationRefunded {
            campaign_id: self.id,
            donor: caller,
            amount,
        }))
    }
}

/// In-process `Transfer` that credits recipients in a balance map.
///
/// Recipients can be flagged to reject incoming transfers.
#[derive(Debug, Clone, Default)]
pub struct BalanceBook {
    balances: HashMap<AccountId, Amount>,
    rejecting: HashSet<AccountId>,
    receipts: Vec<Payout>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// Make every future transfer to `account` fail.
    pub fn reject(&mut self, account: AccountId) {
        self.rejecting.insert(account);
    }

    pub fn accept(&mut self, account: &AccountId) {
        self.rejecting.remove(account);
    }

    /// Every payout credited so far, oldest first.
    pub fn receipts(&self) -> &[Payout] {
        &self.receipts
    }
}

impl Transfer for BalanceBook {
    fn transfer(&mut self, payout: &Payout, _committed: &Campaign) -> Result<(), TransferError> {
        let rejected = |reason: &str| TransferError::Rejected {
            recipient: payout.recipient,
            amount: payout.amount,
            reason: reason.to_string(),
        };

        if self.rejecting.contains(&payout.recipient) {
            return Err(rejected("recipient refuses transfers"));
        }

        let current = self.balance_of(&payout.recipient);
        let credited = current
            .checked_add(payout.amount)
            .ok_or_else(|| rejected("recipient balance overflow"))?;
        self.balances.insert(payout.recipient, credited);
        self.receipts.push(payout.clone());
        Ok(())
    }
}
