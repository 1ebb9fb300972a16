//! Transfer coordinator: an actor's inventory and storage account.
//!
//! [`Holdings`] owns both collections and is the only thing that moves
//! stacks between them. Every transfer is validated first and either
//! happens completely or not at all. A rejected request changes nothing
//! and emits nothing.
//!
//! Notification order for a successful transfer is fixed: destination
//! add/modify events, then source modify/remove events, then the weight
//! changes.

use std::sync::Arc;

use stowage_types::{
    ActorId, CollectionKind, InventorySnapshot, ItemType, RejectionReason, SlotRequest,
    StorageSnapshot, TypeCode,
};
use tracing::{debug, warn};

use crate::actor::{ActorContext, NotificationSink};
use crate::allocator::allocate;
use crate::collection::SlotCollection;
use crate::config::BankConfig;
use crate::registry::ItemRegistry;
use crate::stack::ItemStack;
use crate::upgrade::{UpgradeManager, UpgradeReceipt};
use crate::validation::{PlannedTransfer, validate_transfer};

/// What a successful deposit or withdrawal moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Collection the item left.
    pub source: CollectionKind,
    /// Collection the item arrived in.
    pub destination: CollectionKind,
    /// Type moved.
    pub type_code: TypeCode,
    /// Units moved, for stackables. `None` for an unstackable item.
    pub quantity: Option<u32>,
}

/// Outcome of [`Holdings::deposit_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositAllSummary {
    /// Inventory stacks deposited in whole or in part.
    pub deposited: usize,
    /// Inventory stacks left where they were because nothing fit.
    pub skipped: usize,
}

/// One actor's inventory and storage account.
pub struct Holdings {
    owner: ActorId,
    inventory: SlotCollection,
    storage: SlotCollection,
    registry: Arc<dyn ItemRegistry>,
    config: BankConfig,
    upgrades: UpgradeManager,
}

impl core::fmt::Debug for Holdings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Holdings")
            .field("owner", &self.owner)
            .field("inventory", &self.inventory)
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("upgrades", &self.upgrades)
            .finish_non_exhaustive()
    }
}

impl Holdings {
    /// Empty holdings for `owner`, with limits taken from `config`.
    pub fn new(owner: ActorId, registry: Arc<dyn ItemRegistry>, config: BankConfig) -> Self {
        let inventory =
            SlotCollection::new(owner, CollectionKind::Inventory, config.inventory_max_weight);
        let storage =
            SlotCollection::new(owner, CollectionKind::Storage, config.starting_max_weight);
        let upgrades = UpgradeManager::new(&config, storage.ledger());
        Self {
            owner,
            inventory,
            storage,
            registry,
            config,
            upgrades,
        }
    }

    /// The owning actor.
    pub const fn owner(&self) -> ActorId {
        self.owner
    }

    /// The actor's inventory.
    pub const fn inventory(&self) -> &SlotCollection {
        &self.inventory
    }

    /// The actor's storage account.
    pub const fn storage(&self) -> &SlotCollection {
        &self.storage
    }

    /// Either collection by kind.
    pub const fn collection(&self, kind: CollectionKind) -> &SlotCollection {
        match kind {
            CollectionKind::Inventory => &self.inventory,
            CollectionKind::Storage => &self.storage,
        }
    }

    pub(crate) const fn collection_mut(&mut self, kind: CollectionKind) -> &mut SlotCollection {
        match kind {
            CollectionKind::Inventory => &mut self.inventory,
            CollectionKind::Storage => &mut self.storage,
        }
    }

    /// The item registry stacks are resolved against.
    pub fn registry(&self) -> &dyn ItemRegistry {
        self.registry.as_ref()
    }

    /// The injected capacity settings.
    pub const fn config(&self) -> &BankConfig {
        &self.config
    }

    /// The storage upgrade manager.
    pub const fn upgrades(&self) -> &UpgradeManager {
        &self.upgrades
    }

    /// Move an inventory stack (or part of it) into storage.
    pub fn deposit(
        &mut self,
        actor: &dyn ActorContext,
        request: SlotRequest,
        sink: &mut dyn NotificationSink,
    ) -> Result<TransferReceipt, RejectionReason> {
        self.transfer(CollectionKind::Inventory, actor, request, sink)
    }

    /// Move a storage stack (or part of it) into the inventory.
    pub fn withdraw(
        &mut self,
        actor: &dyn ActorContext,
        request: SlotRequest,
        sink: &mut dyn NotificationSink,
    ) -> Result<TransferReceipt, RejectionReason> {
        self.transfer(CollectionKind::Storage, actor, request, sink)
    }

    /// Deposit as much of every inventory stack as storage can take.
    ///
    /// Walks the inventory from the last slot down so removals never shift
    /// a slot that is still to be visited. Stacks that do not fit at all
    /// are skipped; stackables that partly fit deposit exactly what fits.
    /// If nothing at all was deposited the call is a rejection.
    pub fn deposit_all(
        &mut self,
        actor: &dyn ActorContext,
        sink: &mut dyn NotificationSink,
    ) -> Result<DepositAllSummary, RejectionReason> {
        if !actor.is_adjacent_to_terminal() {
            debug!(actor_id = %self.owner, "Deposit all rejected: not adjacent to a terminal");
            return Err(RejectionReason::NotAdjacentToTerminal);
        }

        let mut summary = DepositAllSummary::default();
        for slot_index in (0..self.inventory.len()).rev() {
            let Some(stack) = self.inventory.get(slot_index) else {
                continue;
            };
            if !self.can_item_be_added(stack) {
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            }
            let quantity = stack
                .quantity()
                .map(|held| self.quantity_that_can_be_added(stack.item_type(), held));
            let request = SlotRequest {
                slot_index,
                quantity,
            };
            match self.transfer(CollectionKind::Inventory, actor, request, sink) {
                Ok(_) => summary.deposited = summary.deposited.saturating_add(1),
                Err(_) => summary.skipped = summary.skipped.saturating_add(1),
            }
        }

        debug!(
            actor_id = %self.owner,
            deposited = summary.deposited,
            skipped = summary.skipped,
            "Deposit all finished"
        );
        if summary.deposited == 0 {
            return Err(RejectionReason::NothingToAdd);
        }
        Ok(summary)
    }

    /// How many of `incoming` units of `item_type` storage can take.
    pub fn quantity_that_can_be_added(&self, item_type: &ItemType, incoming: u32) -> u32 {
        self.storage
            .ledger()
            .quantity_that_can_be_added(item_type, incoming)
    }

    /// Whether storage can take at least part of `stack`.
    ///
    /// Stackables need room for at least one unit; an unstackable needs
    /// room for its whole weight.
    pub fn can_item_be_added(&self, stack: &ItemStack) -> bool {
        match stack.quantity() {
            Some(held) => self.quantity_that_can_be_added(stack.item_type(), held) > 0,
            None => self.storage.ledger().can_fit(stack.item_type().unit_weight),
        }
    }

    /// Reduce the stack at `slot_index` of `kind` by `quantity`, clamping
    /// over-requests.
    pub fn remove_quantity_from_slot(
        &mut self,
        kind: CollectionKind,
        slot_index: usize,
        quantity: u32,
        sink: &mut dyn NotificationSink,
    ) -> u32 {
        self.collection_mut(kind)
            .remove_quantity_from_slot(slot_index, quantity, sink)
    }

    /// Remove the stack at `slot_index` of `kind` outright.
    pub fn remove_item_by_slot_index(
        &mut self,
        kind: CollectionKind,
        slot_index: usize,
        sink: &mut dyn NotificationSink,
    ) -> Option<ItemStack> {
        self.collection_mut(kind)
            .remove_item_by_slot_index(slot_index, sink)
    }

    /// Consume `quantity` units of `type_code` from the first matching
    /// stack of `kind`.
    pub fn remove_quantity_by_item_type(
        &mut self,
        kind: CollectionKind,
        quantity: u32,
        type_code: &TypeCode,
        sink: &mut dyn NotificationSink,
    ) -> u32 {
        self.collection_mut(kind)
            .remove_quantity_by_item_type(quantity, type_code, sink)
    }

    /// Spend the actor's currency on more storage capacity.
    pub fn buy_max_weight_upgrade(
        &mut self,
        actor: &mut dyn ActorContext,
        sink: &mut dyn NotificationSink,
    ) -> Result<UpgradeReceipt, RejectionReason> {
        let result = self
            .upgrades
            .purchase(self.storage.ledger_mut(), actor, sink);
        if let Err(reason) = result {
            debug!(
                actor_id = %self.owner,
                balance = actor.currency(),
                cost = self.upgrades.next_cost(),
                %reason,
                "Upgrade rejected"
            );
        }
        result
    }

    /// Full state of the storage account.
    pub fn storage_snapshot(&self) -> StorageSnapshot {
        let ledger = self.storage.ledger();
        StorageSnapshot {
            weight: ledger.weight(),
            max_weight: ledger.max_weight(),
            max_weight_upgrade_cost: self.upgrades.next_cost(),
            additional_capacity_per_upgrade: self.upgrades.additional_per_upgrade(),
            items: self.storage.views(),
        }
    }

    /// Full state of the inventory.
    pub fn inventory_snapshot(&self) -> InventorySnapshot {
        let ledger = self.inventory.ledger();
        InventorySnapshot {
            weight: ledger.weight(),
            max_weight: ledger.max_weight(),
            items: self.inventory.views(),
        }
    }

    /// Validate, then move, one stack between the two collections.
    fn transfer(
        &mut self,
        from: CollectionKind,
        actor: &dyn ActorContext,
        request: SlotRequest,
        sink: &mut dyn NotificationSink,
    ) -> Result<TransferReceipt, RejectionReason> {
        let to = from.counterpart();
        let planned = validate_transfer(
            self.collection(from),
            self.collection(to),
            &request,
            actor.is_adjacent_to_terminal(),
        )
        .inspect_err(|reason| {
            debug!(
                actor_id = %self.owner,
                source = %from,
                slot_index = request.slot_index,
                quantity = ?request.quantity,
                %reason,
                "Transfer rejected"
            );
        })?;

        let (source, destination) = match from {
            CollectionKind::Inventory => (&mut self.inventory, &mut self.storage),
            CollectionKind::Storage => (&mut self.storage, &mut self.inventory),
        };

        let receipt = match planned {
            PlannedTransfer::Stackable {
                slot_index,
                item_type,
                quantity,
            } => {
                if let Err(err) = allocate(destination, &item_type, quantity, sink) {
                    warn!(actor_id = %self.owner, %err, "Allocation failed after validation");
                    return Err(RejectionReason::NotStackable);
                }
                source.remove_quantity_from_slot(slot_index, quantity, sink);
                TransferReceipt {
                    source: from,
                    destination: to,
                    type_code: item_type.type_code.clone(),
                    quantity: Some(quantity),
                }
            }
            PlannedTransfer::Unstackable { slot_index } => {
                let Some(stack) = source.get(slot_index).cloned() else {
                    return Err(RejectionReason::UnknownSlot);
                };
                let type_code = stack.type_code().clone();
                destination.push(stack, sink);
                source.take_slot(slot_index, sink);
                source.update_weight(sink);
                TransferReceipt {
                    source: from,
                    destination: to,
                    type_code,
                    quantity: None,
                }
            }
        };
        destination.update_weight(sink);

        debug!(
            actor_id = %self.owner,
            source = %from,
            destination = %to,
            type_code = %receipt.type_code,
            quantity = ?receipt.quantity,
            "Transfer completed"
        );
        Ok(receipt)
    }
}
