//! Transfer validation pipeline.
//!
//! A deposit or withdrawal runs these stages in order and stops at the
//! first failure:
//! 1. Slot -- does the source slot exist?
//! 2. Adjacency -- is the actor next to a storage terminal?
//! 3. Shape -- stackables need a non-zero quantity, unstackables forbid one.
//! 4. Quantity -- is the request within what the source stack holds?
//! 5. Capacity -- does the incoming weight fit in the destination?
//!
//! Nothing here mutates state. A passing request comes back as a
//! [`PlannedTransfer`] the coordinator can execute without re-checking.

use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_types::{ItemType, RejectionReason, SlotRequest};

use crate::collection::SlotCollection;
use crate::stack::ItemStack;

/// A validated transfer, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedTransfer {
    /// Move `quantity` units out of a stackable source stack.
    Stackable {
        /// Source slot.
        slot_index: usize,
        /// Type being moved.
        item_type: Arc<ItemType>,
        /// Units to move, at most the source stack's quantity.
        quantity: u32,
    },
    /// Move the single unstackable item in the source slot.
    Unstackable {
        /// Source slot.
        slot_index: usize,
    },
}

impl PlannedTransfer {
    /// The source slot.
    pub const fn slot_index(&self) -> usize {
        match self {
            Self::Stackable { slot_index, .. } | Self::Unstackable { slot_index } => *slot_index,
        }
    }
}

/// Validate a transfer from `source` into `destination` through the full
/// pipeline.
pub fn validate_transfer(
    source: &SlotCollection,
    destination: &SlotCollection,
    request: &SlotRequest,
    adjacent_to_terminal: bool,
) -> Result<PlannedTransfer, RejectionReason> {
    // Stage 1: Slot
    let stack = validate_slot(source, request.slot_index)?;

    // Stage 2: Adjacency
    validate_adjacency(adjacent_to_terminal)?;

    // Stage 3: Shape
    let planned = validate_shape(stack, request)?;

    // Stage 4: Quantity
    validate_quantity(stack, &planned)?;

    // Stage 5: Capacity
    validate_capacity(destination, incoming_weight(stack, &planned))?;

    Ok(planned)
}

fn validate_slot(source: &SlotCollection, slot_index: usize) -> Result<&ItemStack, RejectionReason> {
    source.get(slot_index).ok_or(RejectionReason::UnknownSlot)
}

const fn validate_adjacency(adjacent_to_terminal: bool) -> Result<(), RejectionReason> {
    if adjacent_to_terminal {
        Ok(())
    } else {
        Err(RejectionReason::NotAdjacentToTerminal)
    }
}

fn validate_shape(stack: &ItemStack, request: &SlotRequest) -> Result<PlannedTransfer, RejectionReason> {
    match (stack.is_stackable(), request.quantity) {
        (true, Some(quantity)) if quantity > 0 => Ok(PlannedTransfer::Stackable {
            slot_index: request.slot_index,
            item_type: Arc::clone(stack.item_type()),
            quantity,
        }),
        (true, _) => Err(RejectionReason::MissingQuantity),
        (false, Some(_)) => Err(RejectionReason::UnexpectedQuantity),
        (false, None) => Ok(PlannedTransfer::Unstackable {
            slot_index: request.slot_index,
        }),
    }
}

fn validate_quantity(stack: &ItemStack, planned: &PlannedTransfer) -> Result<(), RejectionReason> {
    let PlannedTransfer::Stackable { quantity, .. } = planned else {
        return Ok(());
    };
    if stack.quantity().is_some_and(|held| *quantity <= held) {
        Ok(())
    } else {
        Err(RejectionReason::QuantityExceedsStack)
    }
}

fn validate_capacity(destination: &SlotCollection, incoming: Decimal) -> Result<(), RejectionReason> {
    if destination.ledger().can_fit(incoming) {
        Ok(())
    } else {
        Err(RejectionReason::CapacityExceeded)
    }
}

/// Weight the destination gains if `planned` goes through.
fn incoming_weight(stack: &ItemStack, planned: &PlannedTransfer) -> Decimal {
    match planned {
        PlannedTransfer::Stackable {
            item_type,
            quantity,
            ..
        } => item_type.unit_weight.saturating_mul(Decimal::from(*quantity)),
        PlannedTransfer::Unstackable { .. } => stack.total_weight(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use stowage_types::{ActorId, CollectionKind, Notification};

    use super::*;

    fn ore() -> Arc<ItemType> {
        Arc::new(ItemType::stackable("Ore", dec!(2), 100))
    }

    fn sword() -> Arc<ItemType> {
        Arc::new(ItemType::unstackable("Sword", dec!(5), 40))
    }

    /// Inventory with `Ore x10` in slot 0 and a sword in slot 1.
    fn inventory() -> SlotCollection {
        let mut collection =
            SlotCollection::new(ActorId::new(), CollectionKind::Inventory, dec!(1000));
        let mut sink: Vec<Notification> = Vec::new();
        collection.push(ItemStack::stackable(ore(), 10).unwrap(), &mut sink);
        collection.push(ItemStack::unstackable(sword(), 30).unwrap(), &mut sink);
        collection.update_weight(&mut sink);
        collection
    }

    fn storage(max_weight: Decimal) -> SlotCollection {
        SlotCollection::new(ActorId::new(), CollectionKind::Storage, max_weight)
    }

    fn request(slot_index: usize, quantity: Option<u32>) -> SlotRequest {
        SlotRequest {
            slot_index,
            quantity,
        }
    }

    #[test]
    fn valid_stackable_transfer() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(1000)), &request(0, Some(4)), true);
        assert!(matches!(
            planned,
            Ok(PlannedTransfer::Stackable { slot_index: 0, quantity: 4, .. })
        ));
    }

    #[test]
    fn valid_unstackable_transfer() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(1000)), &request(1, None), true);
        assert_eq!(planned, Ok(PlannedTransfer::Unstackable { slot_index: 1 }));
    }

    #[test]
    fn unknown_slot_checked_first() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(0)), &request(7, None), false);
        assert_eq!(planned, Err(RejectionReason::UnknownSlot));
    }

    #[test]
    fn adjacency_checked_before_shape() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(1000)), &request(0, None), false);
        assert_eq!(planned, Err(RejectionReason::NotAdjacentToTerminal));
    }

    #[test]
    fn stackable_needs_quantity() {
        let (inventory, storage) = (inventory(), storage(dec!(1000)));
        assert_eq!(
            validate_transfer(&inventory, &storage, &request(0, None), true),
            Err(RejectionReason::MissingQuantity)
        );
        assert_eq!(
            validate_transfer(&inventory, &storage, &request(0, Some(0)), true),
            Err(RejectionReason::MissingQuantity)
        );
    }

    #[test]
    fn unstackable_forbids_quantity() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(1000)), &request(1, Some(1)), true);
        assert_eq!(planned, Err(RejectionReason::UnexpectedQuantity));
    }

    #[test]
    fn over_quantity_rejected() {
        let planned =
            validate_transfer(&inventory(), &storage(dec!(1000)), &request(0, Some(11)), true);
        assert_eq!(planned, Err(RejectionReason::QuantityExceedsStack));
    }

    #[test]
    fn capacity_is_inclusive() {
        let inventory = inventory();
        // 5 units of weight 2 fit exactly into 10.
        assert!(validate_transfer(&inventory, &storage(dec!(10)), &request(0, Some(5)), true).is_ok());
        assert_eq!(
            validate_transfer(&inventory, &storage(dec!(10)), &request(0, Some(6)), true),
            Err(RejectionReason::CapacityExceeded)
        );
        assert_eq!(
            validate_transfer(&inventory, &storage(dec!(4)), &request(1, None), true),
            Err(RejectionReason::CapacityExceeded)
        );
    }
}
