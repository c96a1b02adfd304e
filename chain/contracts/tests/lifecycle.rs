//! Lifecycle Tests
//!
//! End-to-end flows through the registry:
//! - Creation and initial state
//! - Pagination bounds and clamping
//! - Leaderboard ordering across donations
//! - Completion → withdrawal
//! - Cancellation → refunds

use crowdfund_contracts::errors::{BoundsError, CrowdfundError, StateError, ValidationError};
use crowdfund_contracts::events::ContractEvent;
use crowdfund_contracts::custody::BalanceBook;
use crowdfund_contracts::registry::Registry;
use crowdfund_types::campaign::CampaignStatus;
use crowdfund_types::ids::{AccountId, CampaignId};
use crowdfund_types::numeric::Amount;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn registry_with(count: usize) -> Registry {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    for i in 0..count {
        registry
            .create(format!("Campaign {}", i), "Description", Amount::ether(1), owner)
            .unwrap();
    }
    registry
}

fn ether_amounts(registry: &Registry, id: CampaignId) -> Vec<u128> {
    registry
        .campaign(id)
        .unwrap()
        .top_donors(usize::MAX)
        .iter()
        .map(|e| e.amount.as_wei() / Amount::ether(1).as_wei())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// Creation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_created_campaign_is_ongoing_and_empty() {
    init_tracing();
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();

    let campaign = registry.campaign(id).unwrap();
    assert_eq!(campaign.status(), CampaignStatus::Ongoing);
    assert_eq!(campaign.total_raised(), Amount::ZERO);
    assert_eq!(campaign.escrow_balance(), Amount::ZERO);
    assert!(campaign.top_donors(5).is_empty());
}

#[test]
fn test_invalid_creations_rejected() {
    let mut registry = Registry::new();
    let owner = AccountId::new();

    assert_eq!(
        registry.create("", "D", Amount::ether(1), owner),
        Err(CrowdfundError::Validation(ValidationError::EmptyTitle))
    );
    assert_eq!(
        registry.create("T", "", Amount::ether(1), owner),
        Err(CrowdfundError::Validation(ValidationError::EmptyDescription))
    );
    assert_eq!(
        registry.create("T", "D", Amount::ZERO, owner),
        Err(CrowdfundError::Validation(ValidationError::ZeroGoal))
    );
    assert_eq!(registry.count(), 0);
}

// ═══════════════════════════════════════════════════════════════════
// Pagination
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_pagination_table() {
    assert_eq!(registry_with(10).list(5, 0).unwrap().len(), 5);
    assert_eq!(registry_with(7).list(10, 0).unwrap().len(), 7);
    assert_eq!(registry_with(25).list(25, 0).unwrap().len(), 20);
    assert_eq!(registry_with(10).list(5, 10).unwrap().len(), 0);
    assert_eq!(
        registry_with(10).list(5, 11),
        Err(BoundsError::OffsetOutOfRange { offset: 11, count: 10 })
    );
}

#[test]
fn test_pagination_is_creation_ordered() {
    let registry = registry_with(12);
    let first = registry.list(6, 0).unwrap();
    let second = registry.list(6, 6).unwrap();
    let all: Vec<_> = first.into_iter().chain(second).collect();
    let expected: Vec<_> = (0..12).map(CampaignId::new).collect();
    assert_eq!(all, expected);
}

#[test]
fn test_terminal_campaigns_stay_listed() {
    let mut registry = registry_with(2);
    let owner = registry.campaign(CampaignId::new(0)).unwrap().owner();
    registry.cancel(CampaignId::new(0), owner).unwrap();
    assert_eq!(registry.list(20, 0).unwrap().len(), 2);
}

// ═══════════════════════════════════════════════════════════════════
// Leaderboard
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_leaderboard_sorted_and_resorted() {
    init_tracing();
    let mut registry = Registry::new();
    let id = registry
        .create("T", "D", Amount::ether(100), AccountId::new())
        .unwrap();
    let (a, b, c) = (AccountId::new(), AccountId::new(), AccountId::new());

    registry.donate(id, a, Amount::ether(1)).unwrap();
    registry.donate(id, b, Amount::ether(5)).unwrap();
    registry.donate(id, c, Amount::ether(3)).unwrap();
    assert_eq!(ether_amounts(&registry, id), vec![5, 3, 1]);

    registry.donate(id, a, Amount::ether(5)).unwrap();
    assert_eq!(ether_amounts(&registry, id), vec![6, 5, 3]);

    let campaign = registry.campaign(id).unwrap();
    assert_eq!(campaign.top_donors(1)[0].donor, a);
    assert_eq!(campaign.top_donors(2).len(), 2);
    assert_eq!(campaign.final_top_donors().len(), 3);
}

#[test]
fn test_leaderboard_readable_after_terminal_state() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(1), owner).unwrap();
    registry.donate(id, AccountId::new(), Amount::ether(2)).unwrap();
    registry.complete(id, owner).unwrap();

    assert_eq!(registry.campaign(id).unwrap().final_top_donors().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════
// Completion → Withdrawal
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_complete_then_withdraw_once() {
    init_tracing();
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let (a, b) = (AccountId::new(), AccountId::new());
    let mut bank = BalanceBook::new();

    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();
    registry.donate(id, a, Amount::ether(5)).unwrap();

    assert_eq!(
        registry.complete(id, owner),
        Err(CrowdfundError::State(StateError::GoalNotMet {
            raised: Amount::ether(5),
            goal: Amount::ether(10),
        }))
    );

    registry.donate(id, b, Amount::ether(5)).unwrap();
    registry.complete(id, owner).unwrap();
    assert_eq!(registry.campaign(id).unwrap().status(), CampaignStatus::Completed);

    let event = registry.withdraw(id, owner, &mut bank).unwrap();
    assert_eq!(
        event,
        ContractEvent::FundsWithdrawn(crowdfund_contracts::events::FundsWithdrawn {
            campaign_id: id,
            owner,
            amount: Amount::ether(10),
        })
    );
    assert_eq!(bank.balance_of(&owner), Amount::ether(10));

    assert_eq!(
        registry.withdraw(id, owner, &mut bank),
        Err(CrowdfundError::State(StateError::NothingToWithdraw))
    );
    assert_eq!(bank.balance_of(&owner), Amount::ether(10));
    assert_eq!(bank.receipts().len(), 1);
}

#[test]
fn test_withdraw_requires_completed() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(1), owner).unwrap();
    registry.donate(id, AccountId::new(), Amount::ether(1)).unwrap();

    assert_eq!(
        registry.withdraw(id, owner, &mut BalanceBook::new()),
        Err(CrowdfundError::State(StateError::NotCompleted {
            status: CampaignStatus::Ongoing
        }))
    );
}

#[test]
fn test_donation_after_completion_rejected() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(1), owner).unwrap();
    registry.donate(id, AccountId::new(), Amount::ether(1)).unwrap();
    registry.complete(id, owner).unwrap();

    let result = registry.donate(id, AccountId::new(), Amount::ether(1));
    assert!(matches!(
        result,
        Err(CrowdfundError::State(StateError::NotOngoing { .. }))
    ));
    assert_eq!(registry.campaign(id).unwrap().total_raised(), Amount::ether(1));
}

// ═══════════════════════════════════════════════════════════════════
// Cancellation → Refund
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_cancel_then_refund_once() {
    init_tracing();
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let a = AccountId::new();
    let mut bank = BalanceBook::new();

    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();
    registry.donate(id, a, Amount::ether(5)).unwrap();
    registry.cancel(id, owner).unwrap();

    registry.refund(id, a, &mut bank).unwrap();
    assert_eq!(bank.balance_of(&a), Amount::ether(5));
    assert!(registry.campaign(id).unwrap().donation(&a).unwrap().withdrawn);

    assert_eq!(
        registry.refund(id, a, &mut bank),
        Err(CrowdfundError::State(StateError::AlreadyRefunded { donor: a }))
    );
    assert_eq!(bank.balance_of(&a), Amount::ether(5));
}

#[test]
fn test_refunds_are_independent_per_donor() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let (a, b) = (AccountId::new(), AccountId::new());
    let mut bank = BalanceBook::new();

    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();
    registry.donate(id, a, Amount::ether(2)).unwrap();
    registry.donate(id, b, Amount::ether(3)).unwrap();
    registry.donate(id, a, Amount::ether(1)).unwrap();
    registry.cancel(id, owner).unwrap();

    registry.refund(id, b, &mut bank).unwrap();
    assert_eq!(registry.campaign(id).unwrap().escrow_balance(), Amount::ether(3));
    registry.refund(id, a, &mut bank).unwrap();

    assert_eq!(bank.balance_of(&a), Amount::ether(3));
    assert_eq!(bank.balance_of(&b), Amount::ether(3));
    let campaign = registry.campaign(id).unwrap();
    assert_eq!(campaign.escrow_balance(), Amount::ZERO);
    assert_eq!(campaign.paid_out(), Amount::ether(6));
    // total raised is frozen, not reduced by refunds
    assert_eq!(campaign.total_raised(), Amount::ether(6));
}

#[test]
fn test_refund_for_non_donor() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();
    registry.cancel(id, owner).unwrap();

    let stranger = AccountId::new();
    assert_eq!(
        registry.refund(id, stranger, &mut BalanceBook::new()),
        Err(CrowdfundError::State(StateError::NothingToRefund { donor: stranger }))
    );
}

#[test]
fn test_owner_cannot_withdraw_cancelled_campaign() {
    let mut registry = Registry::new();
    let owner = AccountId::new();
    let id = registry.create("T", "D", Amount::ether(10), owner).unwrap();
    registry.donate(id, AccountId::new(), Amount::ether(10)).unwrap();
    registry.cancel(id, owner).unwrap();

    assert_eq!(
        registry.withdraw(id, owner, &mut BalanceBook::new()),
        Err(CrowdfundError::State(StateError::NotCompleted {
            status: CampaignStatus::Cancelled
        }))
    );
    assert!(registry.complete(id, owner).is_err());
}
