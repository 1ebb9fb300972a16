//! Storage capacity upgrades.
//!
//! An upgrade costs `floor(max_weight * multiplier)` currency and raises
//! the storage weight limit by a fixed increment. Because the limit only
//! grows, so does the price of the next upgrade.

use rust_decimal::Decimal;
use stowage_types::{CostChanged, Notification, RejectionReason};
use tracing::info;

use crate::actor::{ActorContext, NotificationSink};
use crate::config::BankConfig;
use crate::ledger::CapacityLedger;

/// Result of a successful upgrade purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeReceipt {
    /// Currency debited from the actor.
    pub cost_paid: u64,
    /// Storage weight limit after the upgrade.
    pub new_max_weight: Decimal,
    /// Price of the upgrade after this one.
    pub next_cost: u64,
}

/// Prices and applies storage capacity upgrades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeManager {
    cost_multiplier: Decimal,
    additional_per_upgrade: Decimal,
    next_cost: u64,
}

impl UpgradeManager {
    /// Build a manager for a storage account whose limit is tracked by
    /// `ledger`.
    pub fn new(config: &BankConfig, ledger: &CapacityLedger) -> Self {
        Self {
            cost_multiplier: config.upgrade_cost_multiplier,
            additional_per_upgrade: config.additional_max_weight_per_upgrade,
            next_cost: ledger.upgrade_cost(config.upgrade_cost_multiplier),
        }
    }

    /// Price of the next upgrade.
    pub const fn next_cost(&self) -> u64 {
        self.next_cost
    }

    /// Capacity gained per upgrade.
    pub const fn additional_per_upgrade(&self) -> Decimal {
        self.additional_per_upgrade
    }

    /// Charge the actor and raise the limit in `ledger`.
    ///
    /// With an insufficient balance nothing is debited, changed or
    /// announced. Otherwise emits `capacity_changed` followed by
    /// `upgrade_cost_changed`.
    pub fn purchase(
        &mut self,
        ledger: &mut CapacityLedger,
        actor: &mut dyn ActorContext,
        sink: &mut dyn NotificationSink,
    ) -> Result<UpgradeReceipt, RejectionReason> {
        let cost = self.next_cost;
        if actor.currency() < cost || !actor.debit_currency(cost) {
            return Err(RejectionReason::InsufficientCurrency);
        }

        let new_max_weight = ledger.raise_max_weight(self.additional_per_upgrade, sink);
        self.next_cost = ledger.upgrade_cost(self.cost_multiplier);
        sink.send(Notification::UpgradeCostChanged(CostChanged {
            new: self.next_cost,
        }));

        info!(
            actor_id = %actor.actor_id(),
            cost_paid = cost,
            %new_max_weight,
            next_cost = self.next_cost,
            "Storage capacity upgraded"
        );

        Ok(UpgradeReceipt {
            cost_paid: cost,
            new_max_weight,
            next_cost: self.next_cost,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use stowage_types::{ActorId, CollectionKind, ValueChanged};

    use super::*;

    struct Wallet {
        id: ActorId,
        balance: u64,
    }

    impl ActorContext for Wallet {
        fn actor_id(&self) -> ActorId {
            self.id
        }

        fn is_adjacent_to_terminal(&self) -> bool {
            true
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

    fn setup() -> (UpgradeManager, CapacityLedger) {
        let config = BankConfig::default();
        let ledger = CapacityLedger::new(CollectionKind::Storage, config.starting_max_weight);
        (UpgradeManager::new(&config, &ledger), ledger)
    }

    #[test]
    fn initial_cost_from_config() {
        let (manager, _) = setup();
        assert_eq!(manager.next_cost(), 500);
        assert_eq!(manager.additional_per_upgrade(), dec!(250));
    }

    #[test]
    fn insufficient_currency_changes_nothing() {
        let (mut manager, mut ledger) = setup();
        let mut wallet = Wallet {
            id: ActorId::new(),
            balance: 499,
        };
        let mut sink: Vec<Notification> = Vec::new();

        let result = manager.purchase(&mut ledger, &mut wallet, &mut sink);

        assert_eq!(result, Err(RejectionReason::InsufficientCurrency));
        assert_eq!(wallet.balance, 499);
        assert_eq!(ledger.max_weight(), dec!(1000));
        assert_eq!(manager.next_cost(), 500);
        assert!(sink.is_empty());
    }

    #[test]
    fn purchase_raises_limit_and_price() {
        let (mut manager, mut ledger) = setup();
        let mut wallet = Wallet {
            id: ActorId::new(),
            balance: 2000,
        };
        let mut sink: Vec<Notification> = Vec::new();

        let receipt = manager.purchase(&mut ledger, &mut wallet, &mut sink).unwrap();

        assert_eq!(receipt.cost_paid, 500);
        assert_eq!(receipt.new_max_weight, dec!(1250));
        assert_eq!(receipt.next_cost, 625);
        assert_eq!(wallet.balance, 1500);
        assert_eq!(
            sink,
            vec![
                Notification::CapacityChanged(ValueChanged { new: dec!(1250) }),
                Notification::UpgradeCostChanged(CostChanged { new: 625 }),
            ]
        );
    }

    #[test]
    fn price_never_decreases() {
        let (mut manager, mut ledger) = setup();
        let mut wallet = Wallet {
            id: ActorId::new(),
            balance: u64::MAX,
        };
        let mut previous = manager.next_cost();
        for _ in 0..10 {
            let receipt = manager
                .purchase(&mut ledger, &mut wallet, &mut Vec::<Notification>::new())
                .unwrap();
            assert!(receipt.next_cost >= previous);
            previous = receipt.next_cost;
        }
    }
}
