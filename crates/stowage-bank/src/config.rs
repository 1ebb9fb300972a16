//! Tunable capacity settings for inventories and storage accounts.
//!
//! The host builds a [`BankConfig`] once (usually from the `bank` section
//! of `stowage-config.yaml`) and injects it into every [`Holdings`]; the
//! capacity ledger and upgrade manager read their limits from it at
//! construction.
//!
//! [`Holdings`]: crate::Holdings

use rust_decimal::Decimal;
use serde::Deserialize;

/// Capacity and upgrade settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankConfig {
    /// Weight limit of a new storage account (default: 1000).
    #[serde(default = "default_starting_max_weight")]
    pub starting_max_weight: Decimal,

    /// Upgrade price per unit of current storage capacity (default: 0.5).
    ///
    /// The price of the next upgrade is `floor(max_weight * multiplier)`.
    #[serde(default = "default_upgrade_cost_multiplier")]
    pub upgrade_cost_multiplier: Decimal,

    /// Storage capacity gained per purchased upgrade (default: 250).
    #[serde(default = "default_additional_max_weight_per_upgrade")]
    pub additional_max_weight_per_upgrade: Decimal,

    /// Weight limit of the actor's inventory (default: 1000).
    #[serde(default = "default_inventory_max_weight")]
    pub inventory_max_weight: Decimal,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            starting_max_weight: default_starting_max_weight(),
            upgrade_cost_multiplier: default_upgrade_cost_multiplier(),
            additional_max_weight_per_upgrade: default_additional_max_weight_per_upgrade(),
            inventory_max_weight: default_inventory_max_weight(),
        }
    }
}

fn default_starting_max_weight() -> Decimal {
    Decimal::new(1000, 0)
}

fn default_upgrade_cost_multiplier() -> Decimal {
    Decimal::new(5, 1)
}

fn default_additional_max_weight_per_upgrade() -> Decimal {
    Decimal::new(250, 0)
}

fn default_inventory_max_weight() -> Decimal {
    Decimal::new(1000, 0)
}
