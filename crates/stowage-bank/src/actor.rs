//! Seams to the owning actor and its session.
//!
//! The engine never holds a reference back to the actor. Spatial checks
//! and currency go through an [`ActorContext`] passed into each operation,
//! and deltas are pushed into a [`NotificationSink`]. Neither is ever
//! waited on.

use stowage_types::{ActorId, Notification};

/// The owning actor, as far as the engine needs to know it.
pub trait ActorContext {
    /// The actor's id.
    fn actor_id(&self) -> ActorId;

    /// Whether the actor stands next to a storage terminal.
    fn is_adjacent_to_terminal(&self) -> bool;

    /// The actor's spendable currency balance.
    fn currency(&self) -> u64;

    /// Deduct `amount` from the balance.
    ///
    /// Returns `false`, leaving the balance untouched, if the actor cannot
    /// afford it.
    fn debit_currency(&mut self, amount: u64) -> bool;
}

/// Receiver for notifications bound for the actor's session.
pub trait NotificationSink {
    /// Deliver one notification. Must not block.
    fn send(&mut self, notification: Notification);
}

/// Buffering sink, used by hosts that flush per request and by tests.
impl NotificationSink for Vec<Notification> {
    fn send(&mut self, notification: Notification) {
        self.push(notification);
    }
}
