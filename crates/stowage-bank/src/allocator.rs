//! Stack allocation for stackable items.
//!
//! Incoming units first top up existing non-full stacks of the same type,
//! lowest slot first. Whatever is left is appended as new stacks, each at
//! the per-type maximum except the last. Quantities larger than one stack
//! are split, never truncated.
//!
//! The allocator does not touch the capacity ledger. The caller has already
//! checked capacity and recomputes the weight once the whole operation is
//! done.

use std::sync::Arc;

use stowage_types::ItemType;

use crate::actor::NotificationSink;
use crate::collection::SlotCollection;
use crate::error::BankError;
use crate::stack::ItemStack;

/// What an allocation did to the destination collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Slots of existing stacks that received units, in the order filled.
    pub modified_slots: Vec<usize>,
    /// Slots of stacks appended by this allocation.
    pub created_slots: Vec<usize>,
    /// Quantity of the last stack touched, if any.
    pub last_quantity: Option<u32>,
}

impl Allocation {
    /// Whether the allocation changed nothing.
    pub fn is_empty(&self) -> bool {
        self.modified_slots.is_empty() && self.created_slots.is_empty()
    }
}

/// Place `quantity` units of a stackable `item_type` into `collection`.
///
/// Emits one `stack_modified` per topped-up stack and one `stack_added` per
/// new stack. Fails without touching the collection if the type is
/// unstackable.
pub fn allocate(
    collection: &mut SlotCollection,
    item_type: &Arc<ItemType>,
    quantity: u32,
    sink: &mut dyn NotificationSink,
) -> Result<Allocation, BankError> {
    let Some(max_quantity) = item_type.max_quantity() else {
        return Err(BankError::WrongStacking {
            type_code: item_type.type_code.clone(),
            expected: "stackable",
            actual: "unstackable",
        });
    };

    let mut allocation = Allocation::default();
    let mut remaining = quantity;

    while remaining > 0 {
        let Some(slot_index) = collection.find_non_full_stack(&item_type.type_code) else {
            break;
        };
        let room = collection.get(slot_index).map_or(0, ItemStack::room);
        let amount = remaining.min(room);
        let Some(new_quantity) = collection.grow_slot(slot_index, amount, sink) else {
            break;
        };
        remaining = remaining.saturating_sub(amount);
        allocation.modified_slots.push(slot_index);
        allocation.last_quantity = Some(new_quantity);
    }

    while remaining > 0 {
        let amount = remaining.min(max_quantity);
        let stack = ItemStack::stackable(Arc::clone(item_type), amount)?;
        let slot_index = collection.push(stack, sink);
        remaining = remaining.saturating_sub(amount);
        allocation.created_slots.push(slot_index);
        allocation.last_quantity = Some(amount);
    }

    Ok(allocation)
}
