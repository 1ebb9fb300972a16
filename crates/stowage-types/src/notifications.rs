//! Outbound notifications pushed to the owning actor's session.
//!
//! Only deltas that actually happened are ever sent: a stack whose quantity
//! did not change produces nothing, and a weight recomputation that lands on
//! the previous value is silent.
//!
//! On the wire every notification is `{"event": <name>, "payload": {...}}`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CollectionKind;
use crate::ids::StackId;
use crate::structs::TypeCode;

/// A change the session should apply to its local view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Notification {
    /// A new stack was appended to a collection.
    StackAdded(StackAdded),
    /// An existing stack's quantity changed.
    StackModified(StackModified),
    /// A stack was removed; later slots shifted down by one.
    StackRemoved(StackRemoved),
    /// A collection's total weight changed.
    WeightChanged(WeightChanged),
    /// The storage account's weight limit changed.
    CapacityChanged(ValueChanged),
    /// The price of the next capacity upgrade changed.
    UpgradeCostChanged(CostChanged),
}

impl Notification {
    /// The collection this notification concerns.
    ///
    /// Capacity and upgrade cost only exist for the storage account.
    pub const fn collection(&self) -> CollectionKind {
        match self {
            Self::StackAdded(p) => p.collection,
            Self::StackModified(p) => p.collection,
            Self::StackRemoved(p) => p.collection,
            Self::WeightChanged(p) => p.collection,
            Self::CapacityChanged(_) | Self::UpgradeCostChanged(_) => CollectionKind::Storage,
        }
    }
}

/// Payload of [`Notification::StackAdded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StackAdded {
    /// Collection the stack was added to.
    pub collection: CollectionKind,
    /// Slot the new stack occupies (always the previous length).
    pub slot_index: usize,
    /// The stack's item type.
    pub type_code: TypeCode,
    /// The stack's id.
    pub id: StackId,
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

/// Payload of [`Notification::StackModified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StackModified {
    /// Collection holding the stack.
    pub collection: CollectionKind,
    /// Slot of the modified stack.
    pub slot_index: usize,
    /// New quantity.
    pub quantity: u32,
    /// New weight of the whole stack.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub total_weight: Decimal,
}

/// Payload of [`Notification::StackRemoved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StackRemoved {
    /// Collection the stack was removed from.
    pub collection: CollectionKind,
    /// Slot the stack occupied before removal.
    pub slot_index: usize,
}

/// Payload of [`Notification::WeightChanged`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct WeightChanged {
    /// Collection whose weight changed.
    pub collection: CollectionKind,
    /// The recomputed weight.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub new: Decimal,
}

/// Payload carrying a new decimal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ValueChanged {
    /// The new value.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub new: Decimal,
}

/// Payload carrying a new currency cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CostChanged {
    /// The new cost.
    pub new: u64,
}
