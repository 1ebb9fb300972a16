//! End-to-end transfer scenarios for `stowage-bank`.
//!
//! Each test drives a [`Holdings`] through the public API only and checks
//! both the resulting state and the notifications the session would see.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc
)]

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stowage_bank::{
    ActorContext, BankConfig, Holdings, ItemRegistry, ItemStack, StarterItem, StaticItemRegistry,
};
use stowage_types::{
    ActorId, CollectionKind, ItemType, Notification, RejectionReason, SlotRequest,
    StackModified, TypeCode,
};

struct TestActor {
    id: ActorId,
    adjacent: bool,
    balance: u64,
}

impl ActorContext for TestActor {
    fn actor_id(&self) -> ActorId {
        self.id
    }

    fn is_adjacent_to_terminal(&self) -> bool {
        self.adjacent
    }

    fn currency(&self) -> u64 {
        self.balance
    }

    fn debit_currency(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }
}

fn registry() -> Arc<StaticItemRegistry> {
    Arc::new(
        StaticItemRegistry::from_types([
            ItemType::stackable("T", dec!(1), 100),
            ItemType::stackable("Ore", dec!(2), 50),
            ItemType::stackable("Feather", Decimal::ZERO, 1000),
            ItemType::unstackable("Sword", dec!(5), 40),
        ])
        .unwrap(),
    )
}

fn setup(config: BankConfig) -> (Holdings, TestActor) {
    let id = ActorId::new();
    (
        Holdings::new(id, registry(), config),
        TestActor {
            id,
            adjacent: true,
            balance: 0,
        },
    )
}

fn starter(code: &str, quantity: Option<u32>) -> StarterItem {
    StarterItem {
        type_code: TypeCode::from(code),
        quantity,
        durability: None,
    }
}

/// Put stacks into the inventory by withdrawing them from a provisioned
/// storage account.
fn stock_inventory(holdings: &mut Holdings, actor: &TestActor, items: &[StarterItem]) {
    let mut sink: Vec<Notification> = Vec::new();
    holdings.add_starter_items(items, &mut sink);
    while !holdings.storage().is_empty() {
        let quantity = holdings.storage().get(0).and_then(ItemStack::quantity);
        holdings
            .withdraw(actor, SlotRequest { slot_index: 0, quantity }, &mut sink)
            .unwrap();
    }
}

fn assert_contiguous(holdings: &Holdings) {
    for kind in [CollectionKind::Inventory, CollectionKind::Storage] {
        let collection = holdings.collection(kind);
        let slots: Vec<usize> = collection.views().iter().map(|v| v.slot_index).collect();
        let expected: Vec<usize> = (0..collection.len()).collect();
        assert_eq!(slots, expected);
    }
}

fn assert_weights_consistent(holdings: &Holdings) {
    for kind in [CollectionKind::Inventory, CollectionKind::Storage] {
        let collection = holdings.collection(kind);
        assert_eq!(collection.ledger().weight(), collection.summed_weight());
    }
}

fn quantity_of(holdings: &Holdings, code: &str) -> u32 {
    [CollectionKind::Inventory, CollectionKind::Storage]
        .iter()
        .flat_map(|kind| holdings.collection(*kind).stacks())
        .filter(|stack| stack.type_code().as_str() == code)
        .filter_map(ItemStack::quantity)
        .sum()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn deposit_tops_up_then_splits() {
    let (mut holdings, actor) = setup(BankConfig::default());
    stock_inventory(&mut holdings, &actor, &[starter("T", Some(20))]);
    let mut sink: Vec<Notification> = Vec::new();
    holdings.add_starter_items(&[starter("T", Some(90))], &mut sink);
    sink.clear();

    holdings
        .deposit(&actor, SlotRequest { slot_index: 0, quantity: Some(20) }, &mut sink)
        .unwrap();

    let storage = holdings.storage();
    assert_eq!(storage.get(0).and_then(ItemStack::quantity), Some(100));
    assert_eq!(storage.get(1).and_then(ItemStack::quantity), Some(10));

    let storage_stack_events: Vec<&Notification> = sink
        .iter()
        .filter(|n| {
            n.collection() == CollectionKind::Storage
                && matches!(n, Notification::StackAdded(_) | Notification::StackModified(_))
        })
        .collect();
    assert_eq!(storage_stack_events.len(), 2);
    assert_eq!(
        storage_stack_events[0],
        &Notification::StackModified(StackModified {
            collection: CollectionKind::Storage,
            slot_index: 0,
            quantity: 100,
            total_weight: dec!(100),
        })
    );
    assert!(matches!(storage_stack_events[1], Notification::StackAdded(a) if a.slot_index == 1 && a.quantity == Some(10)));
    assert!(holdings.inventory().is_empty());
}

#[test]
fn deposit_all_moves_exactly_what_fits() {
    let config = BankConfig {
        starting_max_weight: dec!(5),
        ..BankConfig::default()
    };
    let (mut holdings, actor) = setup(config);
    stock_inventory(&mut holdings, &actor, &[starter("Ore", Some(10))]);
    let mut sink: Vec<Notification> = Vec::new();

    let ore = holdings.registry().get(&TypeCode::from("Ore")).unwrap();
    assert_eq!(holdings.quantity_that_can_be_added(&ore, 10), 2);

    let summary = holdings.deposit_all(&actor, &mut sink).unwrap();

    assert_eq!(summary.deposited, 1);
    assert_eq!(holdings.storage().get(0).and_then(ItemStack::quantity), Some(2));
    assert_eq!(holdings.inventory().get(0).and_then(ItemStack::quantity), Some(8));
    assert_weights_consistent(&holdings);
}

#[test]
fn over_quantity_withdraw_is_a_full_noop() {
    let (mut holdings, actor) = setup(BankConfig::default());
    let mut sink: Vec<Notification> = Vec::new();
    holdings.add_starter_items(&[starter("T", Some(10))], &mut sink);
    let before = holdings.storage_snapshot();
    sink.clear();

    let result =
        holdings.withdraw(&actor, SlotRequest { slot_index: 0, quantity: Some(11) }, &mut sink);

    assert_eq!(result, Err(RejectionReason::QuantityExceedsStack));
    assert!(sink.is_empty());
    assert_eq!(holdings.storage_snapshot(), before);
    assert!(holdings.inventory().is_empty());
}

#[test]
fn removal_utility_clamps_over_requests() {
    let (mut holdings, _) = setup(BankConfig::default());
    let mut sink: Vec<Notification> = Vec::new();
    holdings.add_starter_items(&[starter("T", Some(3)), starter("Ore", Some(4))], &mut sink);

    let removed = holdings.remove_quantity_from_slot(CollectionKind::Storage, 0, 9, &mut sink);

    assert_eq!(removed, 3);
    assert_eq!(holdings.storage().len(), 1);
    assert_eq!(holdings.storage().get(0).unwrap().type_code().as_str(), "Ore");
    assert_contiguous(&holdings);
    assert_weights_consistent(&holdings);
}

#[test]
fn upgrade_requires_currency() {
    let (mut holdings, mut actor) = setup(BankConfig::default());
    actor.balance = 100;
    let mut sink: Vec<Notification> = Vec::new();

    let result = holdings.buy_max_weight_upgrade(&mut actor, &mut sink);

    assert_eq!(result, Err(RejectionReason::InsufficientCurrency));
    assert_eq!(actor.balance, 100);
    assert_eq!(holdings.storage().ledger().max_weight(), dec!(1000));
    assert!(sink.is_empty());
}

#[test]
fn upgrade_grows_capacity_and_cost() {
    let (mut holdings, mut actor) = setup(BankConfig::default());
    actor.balance = 10_000;
    let before = holdings.storage_snapshot();
    let mut sink: Vec<Notification> = Vec::new();

    let receipt = holdings.buy_max_weight_upgrade(&mut actor, &mut sink).unwrap();

    let after = holdings.storage_snapshot();
    assert_eq!(after.max_weight, before.max_weight + before.additional_capacity_per_upgrade);
    assert!(after.max_weight_upgrade_cost >= before.max_weight_upgrade_cost);
    assert_eq!(actor.balance, 10_000 - receipt.cost_paid);
    assert_eq!(sink.len(), 2);
}

#[test]
fn unstackable_round_trip_keeps_identity() {
    let (mut holdings, actor) = setup(BankConfig::default());
    let mut sink: Vec<Notification> = Vec::new();
    holdings.add_starter_items(
        &[StarterItem {
            type_code: TypeCode::from("Sword"),
            quantity: None,
            durability: Some(17),
        }],
        &mut sink,
    );
    let id = holdings.storage().get(0).unwrap().id();

    holdings
        .withdraw(&actor, SlotRequest { slot_index: 0, quantity: None }, &mut sink)
        .unwrap();
    holdings
        .deposit(&actor, SlotRequest { slot_index: 0, quantity: None }, &mut sink)
        .unwrap();

    let sword = holdings.storage().get(0).unwrap();
    assert_eq!(sword.id(), id);
    assert_eq!(sword.durability(), Some(17));
    assert_eq!(sword.max_durability(), Some(40));
}

#[test]
fn weightless_items_ignore_capacity() {
    let config = BankConfig {
        starting_max_weight: Decimal::ZERO,
        ..BankConfig::default()
    };
    let (mut holdings, actor) = setup(config);
    stock_inventory(&mut holdings, &actor, &[starter("Feather", Some(700))]);
    let mut sink: Vec<Notification> = Vec::new();

    let summary = holdings.deposit_all(&actor, &mut sink).unwrap();

    assert_eq!(summary.deposited, 1);
    assert!(holdings.inventory().is_empty());
    assert_eq!(quantity_of(&holdings, "Feather"), 700);
}

// ---------------------------------------------------------------------------
// Property sweeps
// ---------------------------------------------------------------------------

#[test]
fn transfers_conserve_quantity_and_keep_invariants() {
    let (mut holdings, actor) = setup(BankConfig::default());
    stock_inventory(
        &mut holdings,
        &actor,
        &[starter("T", Some(240)), starter("Ore", Some(130))],
    );
    let total_t = quantity_of(&holdings, "T");
    let total_ore = quantity_of(&holdings, "Ore");
    let mut sink: Vec<Notification> = Vec::new();

    // A deterministic mix of deposits and withdrawals, some of which are
    // rejected.
    for step in 0_usize..60 {
        let from_inventory = step % 3 != 0;
        let source = if from_inventory {
            holdings.inventory()
        } else {
            holdings.storage()
        };
        if source.is_empty() {
            continue;
        }
        let slot_index = (step * 7) % source.len();
        let held = source.get(slot_index).and_then(ItemStack::quantity).unwrap_or(0);
        let request = SlotRequest {
            slot_index,
            quantity: Some(u32::try_from(step * 13).unwrap() % (held + 5)),
        };
        let result = if from_inventory {
            holdings.deposit(&actor, request, &mut sink)
        } else {
            holdings.withdraw(&actor, request, &mut sink)
        };
        if result.is_err() {
            continue;
        }

        assert_eq!(quantity_of(&holdings, "T"), total_t);
        assert_eq!(quantity_of(&holdings, "Ore"), total_ore);
        assert_contiguous(&holdings);
        assert_weights_consistent(&holdings);
        for kind in [CollectionKind::Inventory, CollectionKind::Storage] {
            for stack in holdings.collection(kind).stacks() {
                let max = stack.item_type().max_quantity().unwrap_or(u32::MAX);
                assert!(stack.quantity().unwrap_or(0) <= max);
            }
        }
    }
}

#[test]
fn quantity_that_can_be_added_is_monotonic_in_free_weight() {
    let ore = registry().get(&TypeCode::from("Ore")).unwrap();
    let mut previous = 0;
    let mut levels: Vec<u32> = (0..=1000).step_by(37).collect();
    levels.reverse();
    for used in levels {
        let (mut holdings, _) = setup(BankConfig::default());
        let mut sink: Vec<Notification> = Vec::new();
        // Fill storage with `used` weight of T, leaving the rest free.
        if used > 0 {
            holdings.add_starter_items(&[starter("T", Some(used))], &mut sink);
        }
        let fits = holdings.quantity_that_can_be_added(&ore, 10_000);
        assert!(fits >= previous);
        previous = fits;
    }
    assert_eq!(previous, 500);
}
