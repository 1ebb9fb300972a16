//! Enumeration types shared by the engine and its observers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Which of the actor's two collections an operation or event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CollectionKind {
    /// The active-use collection the actor carries around.
    Inventory,
    /// The remote storage account, reachable only from a storage terminal.
    Storage,
}

impl CollectionKind {
    /// The collection on the other side of a transfer.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Inventory => Self::Storage,
            Self::Storage => Self::Inventory,
        }
    }
}

impl core::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why a request was dropped without touching any state.
///
/// Rejections are never surfaced to the end user as errors. The session
/// layer may treat the absence of notifications as an implicit denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The source slot index is out of range.
    UnknownSlot,
    /// The actor is not standing next to a storage terminal.
    NotAdjacentToTerminal,
    /// A stackable item was requested without a (non-zero) quantity.
    MissingQuantity,
    /// A quantity was supplied for an unstackable item.
    UnexpectedQuantity,
    /// The requested quantity is larger than the source stack holds.
    QuantityExceedsStack,
    /// The destination would exceed its maximum weight.
    CapacityExceeded,
    /// The operation only applies to stackable items.
    NotStackable,
    /// The actor cannot afford the capacity upgrade.
    InsufficientCurrency,
    /// Nothing of the requested kind is present.
    NothingToAdd,
}

impl core::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::UnknownSlot => "unknown slot",
            Self::NotAdjacentToTerminal => "not adjacent to a storage terminal",
            Self::MissingQuantity => "missing quantity",
            Self::UnexpectedQuantity => "unexpected quantity",
            Self::QuantityExceedsStack => "quantity exceeds stack",
            Self::CapacityExceeded => "capacity exceeded",
            Self::NotStackable => "not stackable",
            Self::InsufficientCurrency => "insufficient currency",
            Self::NothingToAdd => "nothing to add",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&CollectionKind::Inventory).ok().as_deref(),
            Some("\"inventory\"")
        );
        assert_eq!(
            serde_json::to_string(&CollectionKind::Storage).ok().as_deref(),
            Some("\"storage\"")
        );
    }

    #[test]
    fn counterpart_swaps_sides() {
        assert_eq!(CollectionKind::Inventory.counterpart(), CollectionKind::Storage);
        assert_eq!(CollectionKind::Storage.counterpart(), CollectionKind::Inventory);
    }

    #[test]
    fn rejection_reason_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&RejectionReason::NotAdjacentToTerminal).ok().as_deref(),
            Some("\"not_adjacent_to_terminal\"")
        );
    }
}
