//! Item stacks: one quantity, or one durability-bearing unit, of one type.

use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_types::{CollectionKind, ItemType, StackAdded, StackId, StackView, Stacking, TypeCode};

use crate::error::BankError;

/// What a stack holds. Stackable types carry a quantity, unstackable types
/// carry a durability, and nothing carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackContents {
    /// Units of a stackable type.
    Quantity(u32),
    /// A single unstackable instance.
    Durability {
        /// Remaining durability.
        durability: u32,
        /// Durability when new.
        max_durability: u32,
    },
}

/// A stack of one item type living in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    id: StackId,
    item_type: Arc<ItemType>,
    contents: StackContents,
}

impl ItemStack {
    /// Create a stack of a stackable type.
    ///
    /// Fails if the type is unstackable or `quantity` exceeds the type's
    /// per-stack maximum.
    pub fn stackable(item_type: Arc<ItemType>, quantity: u32) -> Result<Self, BankError> {
        let Stacking::Stackable { max_quantity } = item_type.stacking else {
            return Err(wrong_stacking(&item_type, "stackable"));
        };
        if quantity > max_quantity {
            return Err(BankError::StackOverflow {
                type_code: item_type.type_code.clone(),
                quantity,
                max_quantity,
            });
        }
        Ok(Self {
            id: StackId::new(),
            item_type,
            contents: StackContents::Quantity(quantity),
        })
    }

    /// Create an unstackable instance with the given durability.
    ///
    /// `durability` is capped at the type's maximum.
    pub fn unstackable(item_type: Arc<ItemType>, durability: u32) -> Result<Self, BankError> {
        let Stacking::Unstackable { max_durability } = item_type.stacking else {
            return Err(wrong_stacking(&item_type, "unstackable"));
        };
        Ok(Self {
            id: StackId::new(),
            item_type,
            contents: StackContents::Durability {
                durability: durability.min(max_durability),
                max_durability,
            },
        })
    }

    /// The stack's stable id.
    pub const fn id(&self) -> StackId {
        self.id
    }

    /// The stack's item type metadata.
    pub const fn item_type(&self) -> &Arc<ItemType> {
        &self.item_type
    }

    /// The stack's type code.
    pub fn type_code(&self) -> &TypeCode {
        &self.item_type.type_code
    }

    /// What the stack holds.
    pub const fn contents(&self) -> StackContents {
        self.contents
    }

    /// Units held, for stackables.
    pub const fn quantity(&self) -> Option<u32> {
        match self.contents {
            StackContents::Quantity(quantity) => Some(quantity),
            StackContents::Durability { .. } => None,
        }
    }

    /// Remaining durability, for unstackables.
    pub const fn durability(&self) -> Option<u32> {
        match self.contents {
            StackContents::Quantity(_) => None,
            StackContents::Durability { durability, .. } => Some(durability),
        }
    }

    /// Durability when new, for unstackables.
    pub const fn max_durability(&self) -> Option<u32> {
        match self.contents {
            StackContents::Quantity(_) => None,
            StackContents::Durability { max_durability, .. } => Some(max_durability),
        }
    }

    /// Whether the stack is counted by quantity.
    pub const fn is_stackable(&self) -> bool {
        matches!(self.contents, StackContents::Quantity(_))
    }

    /// How many more units fit before the stack is full (0 for unstackables).
    pub fn room(&self) -> u32 {
        match (self.contents, self.item_type.max_quantity()) {
            (StackContents::Quantity(quantity), Some(max_quantity)) => {
                max_quantity.saturating_sub(quantity)
            }
            _ => 0,
        }
    }

    /// Weight of the whole stack.
    ///
    /// Quantity times unit weight for stackables, the unit weight itself for
    /// a durability item.
    pub fn total_weight(&self) -> Decimal {
        match self.contents {
            StackContents::Quantity(quantity) => {
                self.item_type.unit_weight.saturating_mul(Decimal::from(quantity))
            }
            StackContents::Durability { .. } => self.item_type.unit_weight,
        }
    }

    /// Add units to a stackable stack, up to the type's maximum.
    pub(crate) fn add_quantity(&mut self, amount: u32) -> Result<u32, BankError> {
        let StackContents::Quantity(quantity) = self.contents else {
            return Err(wrong_stacking(&self.item_type, "stackable"));
        };
        let max_quantity = self.item_type.max_quantity().unwrap_or(0);
        let next = quantity
            .checked_add(amount)
            .filter(|next| *next <= max_quantity)
            .ok_or_else(|| BankError::StackOverflow {
                type_code: self.item_type.type_code.clone(),
                quantity: quantity.saturating_add(amount),
                max_quantity,
            })?;
        self.contents = StackContents::Quantity(next);
        Ok(next)
    }

    /// Remove up to `amount` units from a stackable stack.
    ///
    /// Returns the quantity actually removed, which is smaller than `amount`
    /// when the stack held less.
    pub(crate) fn take_quantity(&mut self, amount: u32) -> Result<u32, BankError> {
        let StackContents::Quantity(quantity) = self.contents else {
            return Err(wrong_stacking(&self.item_type, "stackable"));
        };
        let taken = amount.min(quantity);
        self.contents = StackContents::Quantity(quantity.saturating_sub(taken));
        Ok(taken)
    }

    /// Read-only view of this stack at `slot_index`.
    pub fn view(&self, slot_index: usize) -> StackView {
        StackView {
            id: self.id,
            slot_index,
            type_code: self.type_code().clone(),
            quantity: self.quantity(),
            durability: self.durability(),
            max_durability: self.max_durability(),
            total_weight: self.total_weight(),
        }
    }

    /// Payload announcing this stack as newly added at `slot_index`.
    pub(crate) fn added_payload(&self, collection: CollectionKind, slot_index: usize) -> StackAdded {
        StackAdded {
            collection,
            slot_index,
            type_code: self.type_code().clone(),
            id: self.id,
            quantity: self.quantity(),
            durability: self.durability(),
            max_durability: self.max_durability(),
            total_weight: self.total_weight(),
        }
    }
}

fn wrong_stacking(item_type: &ItemType, expected: &'static str) -> BankError {
    let actual = if item_type.is_stackable() {
        "stackable"
    } else {
        "unstackable"
    };
    BankError::WrongStacking {
        type_code: item_type.type_code.clone(),
        expected,
        actual,
    }
}
