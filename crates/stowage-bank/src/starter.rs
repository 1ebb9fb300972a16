//! Starter provisioning for fresh storage accounts.

use serde::{Deserialize, Serialize};
use stowage_types::{CollectionKind, Stacking, TypeCode};
use tracing::{info, warn};

use crate::actor::NotificationSink;
use crate::allocator::allocate;
use crate::stack::ItemStack;
use crate::transfer::Holdings;

/// One configured starter entry.
///
/// Stackable types need a `quantity`. Unstackable types take an optional
/// `durability` and default to brand new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterItem {
    /// Registered type to provision.
    pub type_code: TypeCode,
    /// Units to provision, for stackables.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Starting durability, for unstackables.
    #[serde(default)]
    pub durability: Option<u32>,
}

impl Holdings {
    /// Fill the storage account with `items`.
    ///
    /// Capacity is not checked. Entries naming an unknown type, or a
    /// stackable without a quantity, are skipped with a warning. The weight
    /// is recomputed once at the end. Returns the number of entries
    /// provisioned.
    pub fn add_starter_items(
        &mut self,
        items: &[StarterItem],
        sink: &mut dyn NotificationSink,
    ) -> usize {
        let owner = self.owner();
        let mut provisioned = 0_usize;

        for entry in items {
            let Some(item_type) = self.registry().get(&entry.type_code) else {
                warn!(actor_id = %owner, type_code = %entry.type_code, "Unknown starter item type, skipping");
                continue;
            };

            let stacking = item_type.stacking;
            let storage = self.collection_mut(CollectionKind::Storage);
            let placed = match stacking {
                Stacking::Stackable { .. } => match entry.quantity.filter(|q| *q > 0) {
                    Some(quantity) => allocate(storage, &item_type, quantity, sink).is_ok(),
                    None => {
                        warn!(actor_id = %owner, type_code = %entry.type_code, "Stackable starter item has no quantity, skipping");
                        false
                    }
                },
                Stacking::Unstackable { max_durability } => {
                    let durability = entry.durability.unwrap_or(max_durability);
                    match ItemStack::unstackable(item_type, durability) {
                        Ok(stack) => {
                            storage.push(stack, sink);
                            true
                        }
                        Err(err) => {
                            warn!(actor_id = %owner, %err, "Starter item could not be built, skipping");
                            false
                        }
                    }
                }
            };
            if placed {
                provisioned = provisioned.saturating_add(1);
            }
        }

        self.collection_mut(CollectionKind::Storage)
            .update_weight(sink);
        info!(
            actor_id = %owner,
            provisioned,
            skipped = items.len().saturating_sub(provisioned),
            "Starter items provisioned"
        );
        provisioned
    }
}
