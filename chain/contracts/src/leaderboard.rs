//! Leaderboard — bounded top-N view over a campaign's ledger
//!
//! Ordered by cumulative amount descending. Among equal amounts the donor
//! whose first donation came earlier ranks higher, and that order holds
//! across later donations that change amounts but not relative rank.

use crowdfund_types::campaign::LeaderboardEntry;
use crowdfund_types::ids::AccountId;
use crowdfund_types::numeric::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ranked {
    donor: AccountId,
    amount: Amount,
    seq: u64,
}

impl Ranked {
    fn outranks(&self, other: &Ranked) -> bool {
        self.amount > other.amount || (self.amount == other.amount && self.seq < other.seq)
    }
}

/// Outcome of a single leaderboard update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Donor was already ranked and moved (or stayed) at `rank`.
    Repositioned { from: usize, to: usize },
    /// Donor entered a board with free capacity.
    Inserted { rank: usize },
    /// Donor entered a full board, pushing out the last entry.
    Evicted { rank: usize, evicted: AccountId },
    /// Donor's amount does not beat the board's minimum.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    capacity: usize,
    ranks: Vec<Ranked>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ranks: Vec::with_capacity(capacity),
        }
    }

    /// Apply a donor's new cumulative amount.
    ///
    /// `seq` is the donor's first-donation sequence from the ledger.
    pub fn update(&mut self, donor: AccountId, amount: Amount, seq: u64) -> Placement {
        let candidate = Ranked { donor, amount, seq };

        if let Some(from) = self.ranks.iter().position(|r| r.donor == donor) {
            self.ranks.remove(from);
            let to = self.insert_sorted(candidate);
            return Placement::Repositioned { from, to };
        }

        if self.ranks.len() < self.capacity {
            let rank = self.insert_sorted(candidate);
            return Placement::Inserted { rank };
        }

        if self.min_amount().is_some_and(|min| amount > min) {
            if let Some(evicted) = self.ranks.pop() {
                let rank = self.insert_sorted(candidate);
                return Placement::Evicted {
                    rank,
                    evicted: evicted.donor,
                };
            }
        }
        Placement::Unchanged
    }

    fn insert_sorted(&mut self, candidate: Ranked) -> usize {
        let rank = self.ranks.partition_point(|r| r.outranks(&candidate));
        self.ranks.insert(rank, candidate);
        rank
    }

    /// The first `min(k, N, donorCount)` entries.
    pub fn top(&self, k: usize) -> Vec<LeaderboardEntry> {
        self.ranks
            .iter()
            .take(k)
            .map(|r| LeaderboardEntry {
                donor: r.donor,
                amount: r.amount,
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.top(self.capacity)
    }

    /// Smallest ranked amount, or `None` while the board is empty.
    pub fn min_amount(&self) -> Option<Amount> {
        self.ranks.last().map(|r| r.amount)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
