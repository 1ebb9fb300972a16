//! Item metadata, stack views and collection snapshots.
//!
//! [`ItemType`] is the immutable per-type metadata looked up through the
//! engine's item registry. [`StackView`] and the snapshot structs are the
//! read-only shapes handed to a session on start or resync.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::StackId;

// ---------------------------------------------------------------------------
// Type codes
// ---------------------------------------------------------------------------

/// Stable code naming an item type (e.g. `"IronBar"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TypeCode(pub String);

impl TypeCode {
    /// Wrap a type code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl core::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Item types
// ---------------------------------------------------------------------------

/// How units of an item type are tracked.
///
/// A type is either stackable or unstackable. There is no third option and
/// no way to be both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Stacking {
    /// Fungible units counted by quantity.
    Stackable {
        /// Largest quantity a single stack may hold.
        max_quantity: u32,
    },
    /// A single instance carrying a durability value.
    Unstackable {
        /// Durability of a brand new instance.
        max_durability: u32,
    },
}

/// Immutable metadata for one item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemType {
    /// The code this type is registered under.
    pub type_code: TypeCode,
    /// Weight of one unit (or of the single instance, for unstackables).
    #[ts(as = "String")]
    pub unit_weight: Decimal,
    /// Whether units stack or carry durability.
    pub stacking: Stacking,
}

impl ItemType {
    /// Metadata for a stackable type.
    pub fn stackable(type_code: impl Into<String>, unit_weight: Decimal, max_quantity: u32) -> Self {
        Self {
            type_code: TypeCode::new(type_code),
            unit_weight,
            stacking: Stacking::Stackable { max_quantity },
        }
    }

    /// Metadata for an unstackable, durability-bearing type.
    pub fn unstackable(
        type_code: impl Into<String>,
        unit_weight: Decimal,
        max_durability: u32,
    ) -> Self {
        Self {
            type_code: TypeCode::new(type_code),
            unit_weight,
            stacking: Stacking::Unstackable { max_durability },
        }
    }

    /// Whether units of this type are counted by quantity.
    pub const fn is_stackable(&self) -> bool {
        matches!(self.stacking, Stacking::Stackable { .. })
    }

    /// Per-stack maximum, for stackable types.
    pub const fn max_quantity(&self) -> Option<u32> {
        match self.stacking {
            Stacking::Stackable { max_quantity } => Some(max_quantity),
            Stacking::Unstackable { .. } => None,
        }
    }

    /// Durability of a new instance, for unstackable types.
    pub const fn max_durability(&self) -> Option<u32> {
        match self.stacking {
            Stacking::Stackable { .. } => None,
            Stacking::Unstackable { max_durability } => Some(max_durability),
        }
    }

    /// Whether units of this type weigh nothing.
    pub fn is_weightless(&self) -> bool {
        self.unit_weight <= Decimal::ZERO
    }
}

// ---------------------------------------------------------------------------
// Views and snapshots
// ---------------------------------------------------------------------------

/// One stack as seen by a session, addressed by its slot index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StackView {
    /// The stack's stable id.
    pub id: StackId,
    /// Position in the owning collection.
    pub slot_index: usize,
    /// The stack's item type.
    pub type_code: TypeCode,
    /// Units held, for stackables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,
    /// Current durability, for unstackables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub durability: Option<u32>,
    /// Durability when new, for unstackables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub max_durability: Option<u32>,
    /// Weight of the whole stack.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub total_weight: Decimal,
}

/// Full state of a storage account, sent on session start or resync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StorageSnapshot {
    /// Current total weight.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub weight: Decimal,
    /// Weight limit.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub max_weight: Decimal,
    /// Currency price of the next capacity upgrade.
    pub max_weight_upgrade_cost: u64,
    /// Capacity gained per upgrade.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub additional_capacity_per_upgrade: Decimal,
    /// Every stack, in slot order.
    pub items: Vec<StackView>,
}

/// Full state of an inventory, sent on session start or resync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct InventorySnapshot {
    /// Current total weight.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub weight: Decimal,
    /// Weight limit.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub max_weight: Decimal,
    /// Every stack, in slot order.
    pub items: Vec<StackView>,
}
