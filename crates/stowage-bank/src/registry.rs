//! Read-only item type registry.
//!
//! Per-type constants (unit weight, stack maximum, stackability) are not
//! copied into every stack. Stacks hold an [`Arc`] to the registry's entry
//! and the engine looks types up through the [`ItemRegistry`] trait, so a
//! host can back it with whatever catalog it already has.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_types::{ItemType, Stacking, TypeCode};

use crate::error::BankError;

/// Lookup of immutable item type metadata by type code.
pub trait ItemRegistry: Send + Sync {
    /// Return the metadata registered under `type_code`, if any.
    fn get(&self, type_code: &TypeCode) -> Option<Arc<ItemType>>;
}

/// An [`ItemRegistry`] backed by a fixed, validated catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticItemRegistry {
    types: BTreeMap<TypeCode, Arc<ItemType>>,
}

impl StaticItemRegistry {
    /// Build a registry from a catalog, validating every entry.
    ///
    /// Rejects duplicate codes, negative unit weights, and zero stack or
    /// durability maxima (a zero stack maximum would make allocation loop
    /// without making progress).
    pub fn from_types(catalog: impl IntoIterator<Item = ItemType>) -> Result<Self, BankError> {
        let mut types = BTreeMap::new();
        for item_type in catalog {
            validate_item_type(&item_type)?;
            let code = item_type.type_code.clone();
            if types.insert(code.clone(), Arc::new(item_type)).is_some() {
                return Err(BankError::DuplicateTypeCode(code));
            }
        }
        Ok(Self { types })
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate registered types in type-code order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemType>> {
        self.types.values()
    }
}

impl ItemRegistry for StaticItemRegistry {
    fn get(&self, type_code: &TypeCode) -> Option<Arc<ItemType>> {
        self.types.get(type_code).cloned()
    }
}

fn validate_item_type(item_type: &ItemType) -> Result<(), BankError> {
    if item_type.unit_weight < Decimal::ZERO {
        return Err(BankError::NegativeUnitWeight(item_type.type_code.clone()));
    }
    let maximum = match item_type.stacking {
        Stacking::Stackable { max_quantity } => max_quantity,
        Stacking::Unstackable { max_durability } => max_durability,
    };
    if maximum == 0 {
        return Err(BankError::ZeroMaximum(item_type.type_code.clone()));
    }
    Ok(())
}
