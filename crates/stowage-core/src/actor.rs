//! A standalone actor for hosts without a surrounding world.

use stowage_bank::ActorContext;
use stowage_types::ActorId;

use crate::config::SessionConfig;

/// An actor whose position and wallet are plain fields.
///
/// Hosts with a real world implement [`ActorContext`] on their own player
/// type. This one backs the standalone engine binary and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleActor {
    id: ActorId,
    adjacent_to_terminal: bool,
    currency: u64,
}

impl SimpleActor {
    /// Create an actor with the given id, position flag and balance.
    pub const fn new(id: ActorId, adjacent_to_terminal: bool, currency: u64) -> Self {
        Self {
            id,
            adjacent_to_terminal,
            currency,
        }
    }

    /// Create a fresh actor from session settings.
    pub fn from_session(session: &SessionConfig) -> Self {
        Self::new(
            ActorId::new(),
            session.adjacent_to_terminal,
            session.starting_currency,
        )
    }

    /// Move the actor next to (or away from) a storage terminal.
    pub const fn set_adjacent_to_terminal(&mut self, adjacent: bool) {
        self.adjacent_to_terminal = adjacent;
    }

    /// Add currency to the actor's balance, saturating at the maximum.
    pub const fn credit_currency(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
    }
}

impl ActorContext for SimpleActor {
    fn actor_id(&self) -> ActorId {
        self.id
    }

    fn is_adjacent_to_terminal(&self) -> bool {
        self.adjacent_to_terminal
    }

    fn currency(&self) -> u64 {
        self.currency
    }

    fn debit_currency(&mut self, amount: u64) -> bool {
        match self.currency.checked_sub(amount) {
            Some(rest) => {
                self.currency = rest;
                true
            }
            None => false,
        }
    }
}
