//! Ledger — per-donor cumulative donations within one campaign
//!
//! Keeps the first-donation order of every donor, which the leaderboard
//! uses to break ties, and the running total so the campaign never has
//! to re-sum entries.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crowdfund_types::campaign::DonationEntry;
use crowdfund_types::ids::AccountId;
use crowdfund_types::numeric::Amount;

use crate::errors::ValidationError;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: HashMap<AccountId, DonationEntry>,
    /// Donors in order of first donation
    order: Vec<AccountId>,
    /// Σ cumulative_amount over all entries
    total: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the donor's entry, creating it on first donation.
    ///
    /// The overflow check runs before anything is touched, so a rejected
    /// donation leaves the ledger as it was.
    pub fn record(
        &mut self,
        donor: AccountId,
        amount: Amount,
    ) -> Result<&DonationEntry, ValidationError> {
        let total = self
            .total
            .checked_add(amount)
            .ok_or(ValidationError::AmountOverflow {
                amount,
                total_raised: self.total,
            })?;

        let next_seq = self.order.len() as u64;
        let entry = match self.entries.entry(donor) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                self.order.push(donor);
                vacant.insert(DonationEntry::new(donor, next_seq))
            }
        };

        self.total = total;
        // Bounded by `total`, which did not overflow.
        entry.cumulative_amount =
            Amount::from_wei(entry.cumulative_amount.as_wei() + amount.as_wei());
        entry.donation_count += 1;
        Ok(entry)
    }

    pub fn entry(&self, donor: &AccountId) -> Option<&DonationEntry> {
        self.entries.get(donor)
    }

    /// Flip the donor's `withdrawn` flag, returning the amount it releases.
    ///
    /// Returns `None` when the donor has no entry or was already paid out.
    pub fn mark_withdrawn(&mut self, donor: &AccountId) -> Option<Amount> {
        let entry = self.entries.get_mut(donor)?;
        if entry.withdrawn || entry.cumulative_amount.is_zero() {
            return None;
        }
        entry.withdrawn = true;
        Some(entry.cumulative_amount)
    }

    /// Flip every unpaid entry, returning the donors that changed.
    pub fn mark_all_withdrawn(&mut self) -> Vec<AccountId> {
        let mut flipped = Vec::new();
        for donor in &self.order {
            if let Some(entry) = self.entries.get_mut(donor) {
                if !entry.withdrawn {
                    entry.withdrawn = true;
                    flipped.push(*donor);
                }
            }
        }
        flipped
    }

    /// Undo `mark_withdrawn` after a failed transfer.
    pub(crate) fn unmark_withdrawn(&mut self, donor: &AccountId) {
        if let Some(entry) = self.entries.get_mut(donor) {
            entry.withdrawn = false;
        }
    }

    /// Entries in first-donation order.
    pub fn entries(&self) -> impl Iterator<Item = &DonationEntry> + '_ {
        self.order.iter().filter_map(|donor| self.entries.get(donor))
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn donor_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
