//! Slot-contiguous collections.
//!
//! A [`SlotCollection`] is an ordered, hole-free sequence of stacks. Stacks
//! are addressed from outside by slot index; removing one shifts every
//! later stack down by one, so valid indices are always `0..len`.
//!
//! Every mutation here reports itself to the session: appends emit
//! `stack_added`, quantity changes emit `stack_modified`, removals emit
//! `stack_removed`. The removal utilities also recompute the capacity
//! ledger before returning.

use rust_decimal::Decimal;
use stowage_types::{
    ActorId, CollectionKind, Notification, StackModified, StackRemoved, StackView, TypeCode,
};
use tracing::warn;

use crate::actor::NotificationSink;
use crate::ledger::CapacityLedger;
use crate::stack::ItemStack;

/// One side of an actor's holdings: its stacks plus their capacity ledger.
#[derive(Debug, Clone)]
pub struct SlotCollection {
    owner: ActorId,
    stacks: Vec<ItemStack>,
    ledger: CapacityLedger,
}

impl SlotCollection {
    /// Create an empty collection owned by `owner`.
    pub fn new(owner: ActorId, kind: CollectionKind, max_weight: Decimal) -> Self {
        Self {
            owner,
            stacks: Vec::new(),
            ledger: CapacityLedger::new(kind, max_weight),
        }
    }

    /// The owning actor.
    pub const fn owner(&self) -> ActorId {
        self.owner
    }

    /// Which side this collection is.
    pub const fn kind(&self) -> CollectionKind {
        self.ledger.collection()
    }

    /// The capacity ledger.
    pub const fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub(crate) const fn ledger_mut(&mut self) -> &mut CapacityLedger {
        &mut self.ledger
    }

    /// Number of stacks.
    pub const fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Whether the collection holds no stacks.
    pub const fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// The stack at `slot_index`, if any.
    pub fn get(&self, slot_index: usize) -> Option<&ItemStack> {
        self.stacks.get(slot_index)
    }

    /// All stacks, in slot order.
    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Read-only views of every stack, in slot order.
    pub fn views(&self) -> Vec<StackView> {
        self.stacks
            .iter()
            .enumerate()
            .map(|(slot_index, stack)| stack.view(slot_index))
            .collect()
    }

    /// Sum of every stack's weight, computed from scratch.
    pub fn summed_weight(&self) -> Decimal {
        self.stacks
            .iter()
            .fold(Decimal::ZERO, |sum, stack| sum.saturating_add(stack.total_weight()))
    }

    /// Lowest slot holding a non-full stack of `type_code`.
    pub fn find_non_full_stack(&self, type_code: &TypeCode) -> Option<usize> {
        self.stacks
            .iter()
            .position(|stack| stack.type_code() == type_code && stack.room() > 0)
    }

    /// Append a stack at the end and announce it. Returns its slot index.
    pub fn push(&mut self, stack: ItemStack, sink: &mut dyn NotificationSink) -> usize {
        let slot_index = self.stacks.len();
        sink.send(Notification::StackAdded(
            stack.added_payload(self.kind(), slot_index),
        ));
        self.stacks.push(stack);
        slot_index
    }

    /// Add `amount` units to the stack at `slot_index` and announce its new
    /// quantity. Returns the new quantity, or `None` if nothing changed.
    pub(crate) fn grow_slot(
        &mut self,
        slot_index: usize,
        amount: u32,
        sink: &mut dyn NotificationSink,
    ) -> Option<u32> {
        let kind = self.kind();
        let stack = self.stacks.get_mut(slot_index)?;
        let quantity = stack.add_quantity(amount).ok()?;
        sink.send(Notification::StackModified(StackModified {
            collection: kind,
            slot_index,
            quantity,
            total_weight: stack.total_weight(),
        }));
        Some(quantity)
    }

    /// Recompute the capacity ledger, announcing the weight if it changed.
    pub fn update_weight(&mut self, sink: &mut dyn NotificationSink) -> bool {
        self.ledger.recompute(&self.stacks, sink)
    }

    /// Remove the stack at `slot_index`, closing the gap it leaves.
    ///
    /// Emits `stack_removed` but does not recompute the ledger; callers that
    /// are part of a larger mutation recompute once at the end.
    pub(crate) fn take_slot(
        &mut self,
        slot_index: usize,
        sink: &mut dyn NotificationSink,
    ) -> Option<ItemStack> {
        if slot_index >= self.stacks.len() {
            return None;
        }
        let stack = self.stacks.remove(slot_index);
        sink.send(Notification::StackRemoved(StackRemoved {
            collection: self.kind(),
            slot_index,
        }));
        Some(stack)
    }

    /// Remove the stack at `slot_index` and recompute the ledger.
    ///
    /// Unknown slots are ignored.
    pub fn remove_item_by_slot_index(
        &mut self,
        slot_index: usize,
        sink: &mut dyn NotificationSink,
    ) -> Option<ItemStack> {
        let removed = self.take_slot(slot_index, sink)?;
        self.update_weight(sink);
        Some(removed)
    }

    /// Reduce the stackable stack at `slot_index` by `quantity`.
    ///
    /// Asking for more than the stack holds is a caller bug: the amount is
    /// clamped to what is there and a warning is logged. A stack that
    /// reaches zero is removed. Returns the quantity actually removed;
    /// unknown or unstackable slots remove nothing.
    pub fn remove_quantity_from_slot(
        &mut self,
        slot_index: usize,
        quantity: u32,
        sink: &mut dyn NotificationSink,
    ) -> u32 {
        let Some(available) = self.get(slot_index).and_then(ItemStack::quantity) else {
            return 0;
        };
        if quantity > available {
            warn!(
                owner = %self.owner,
                collection = %self.kind(),
                slot_index,
                requested = quantity,
                available,
                "Removal exceeds slot quantity, clamping"
            );
        }
        let removed = self.shrink_slot(slot_index, quantity, sink);
        self.update_weight(sink);
        removed
    }

    /// Reduce the first stack of `type_code` by `quantity`.
    ///
    /// Used by other subsystems to consume stored items. Clamps and warns
    /// like [`remove_quantity_from_slot`]. Returns the quantity removed.
    ///
    /// [`remove_quantity_from_slot`]: SlotCollection::remove_quantity_from_slot
    pub fn remove_quantity_by_item_type(
        &mut self,
        quantity: u32,
        type_code: &TypeCode,
        sink: &mut dyn NotificationSink,
    ) -> u32 {
        let Some(slot_index) = self
            .stacks
            .iter()
            .position(|stack| stack.type_code() == type_code && stack.is_stackable())
        else {
            return 0;
        };
        self.remove_quantity_from_slot(slot_index, quantity, sink)
    }

    /// Take up to `quantity` units from a slot, removing the stack when it
    /// empties. Does not recompute the ledger.
    fn shrink_slot(
        &mut self,
        slot_index: usize,
        quantity: u32,
        sink: &mut dyn NotificationSink,
    ) -> u32 {
        let kind = self.kind();
        let Some(stack) = self.stacks.get_mut(slot_index) else {
            return 0;
        };
        let Ok(removed) = stack.take_quantity(quantity) else {
            return 0;
        };
        if removed == 0 {
            return 0;
        }

        match stack.quantity() {
            Some(remaining) if remaining > 0 => {
                sink.send(Notification::StackModified(StackModified {
                    collection: kind,
                    slot_index,
                    quantity: remaining,
                    total_weight: stack.total_weight(),
                }));
            }
            _ => {
                self.take_slot(slot_index, sink);
            }
        }
        removed
    }
}
