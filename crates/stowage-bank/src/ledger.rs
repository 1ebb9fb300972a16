//! Capacity ledger: current and maximum weight of one collection.
//!
//! The cached `weight` is only ever set by [`CapacityLedger::recompute`],
//! which sums the collection from scratch and compares against the previous
//! value before announcing anything. Observers therefore never see a
//! weight-changed event that did not change the weight.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use stowage_types::{CollectionKind, ItemType, Notification, ValueChanged, WeightChanged};

use crate::actor::NotificationSink;
use crate::stack::ItemStack;

/// Weight tracking and limit enforcement for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLedger {
    collection: CollectionKind,
    weight: Decimal,
    max_weight: Decimal,
}

impl CapacityLedger {
    /// Create an empty ledger with the given limit, floored to an integer.
    pub fn new(collection: CollectionKind, max_weight: Decimal) -> Self {
        Self {
            collection,
            weight: Decimal::ZERO,
            max_weight: max_weight.floor(),
        }
    }

    /// The collection this ledger tracks.
    pub const fn collection(&self) -> CollectionKind {
        self.collection
    }

    /// Cached total weight.
    pub const fn weight(&self) -> Decimal {
        self.weight
    }

    /// Weight limit.
    pub const fn max_weight(&self) -> Decimal {
        self.max_weight
    }

    /// Remaining weight allowance, never negative.
    pub fn free_weight(&self) -> Decimal {
        self.max_weight
            .saturating_sub(self.weight)
            .max(Decimal::ZERO)
    }

    /// Whether `incoming` more weight fits: `weight + incoming <= max_weight`.
    pub fn can_fit(&self, incoming: Decimal) -> bool {
        self.weight
            .checked_add(incoming)
            .is_some_and(|total| total <= self.max_weight)
    }

    /// How many of `incoming` units of `item_type` fit in the free weight.
    ///
    /// Weightless types always fit entirely. Otherwise the answer is
    /// `min(incoming, floor(free_weight / unit_weight))`.
    pub fn quantity_that_can_be_added(&self, item_type: &ItemType, incoming: u32) -> u32 {
        if item_type.is_weightless() {
            return incoming;
        }
        let fitting = self
            .free_weight()
            .checked_div(item_type.unit_weight)
            .map(|units| units.floor())
            .and_then(|units| units.to_u32())
            .unwrap_or(u32::MAX);
        fitting.min(incoming)
    }

    /// Re-sum `stacks` into the cached weight.
    ///
    /// Emits [`Notification::WeightChanged`] only if the total differs from
    /// the previous value. Returns whether it changed.
    pub fn recompute<'a>(
        &mut self,
        stacks: impl IntoIterator<Item = &'a ItemStack>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        let previous = self.weight;
        self.weight = stacks
            .into_iter()
            .fold(Decimal::ZERO, |sum, stack| sum.saturating_add(stack.total_weight()));

        if self.weight == previous {
            return false;
        }
        sink.send(Notification::WeightChanged(WeightChanged {
            collection: self.collection,
            new: self.weight,
        }));
        true
    }

    /// Raise the limit by `amount` (the result is floored) and announce it.
    pub fn raise_max_weight(&mut self, amount: Decimal, sink: &mut dyn NotificationSink) -> Decimal {
        self.max_weight = self.max_weight.saturating_add(amount).floor();
        sink.send(Notification::CapacityChanged(ValueChanged {
            new: self.max_weight,
        }));
        self.max_weight
    }

    /// Price of the next upgrade: `floor(max_weight * multiplier)`.
    pub fn upgrade_cost(&self, multiplier: Decimal) -> u64 {
        self.max_weight
            .checked_mul(multiplier)
            .map(|cost| cost.floor().max(Decimal::ZERO))
            .and_then(|cost| cost.to_u64())
            .unwrap_or(u64::MAX)
    }
}
