//! Inventory and storage-account transfer engine for Stowage.
//!
//! This crate is the logic layer: it moves stacks between an actor's
//! inventory and its storage account without touching any I/O. Spatial
//! checks and currency come in through [`ActorContext`]; every state delta
//! goes out through a [`NotificationSink`].
//!
//! # Modules
//!
//! - [`actor`] -- Seams to the owning actor and its session
//! - [`allocator`] -- Filling existing stacks and splitting overflow ([`allocate`])
//! - [`collection`] -- Slot-contiguous collections ([`SlotCollection`])
//! - [`config`] -- Capacity and upgrade settings ([`BankConfig`])
//! - [`error`] -- Construction errors ([`BankError`])
//! - [`ledger`] -- Weight tracking per collection ([`CapacityLedger`])
//! - [`registry`] -- Item type lookup ([`ItemRegistry`], [`StaticItemRegistry`])
//! - [`stack`] -- Item stacks ([`ItemStack`])
//! - [`starter`] -- Provisioning fresh storage accounts ([`StarterItem`])
//! - [`transfer`] -- The transfer coordinator ([`Holdings`])
//! - [`upgrade`] -- Storage capacity upgrades ([`UpgradeManager`])
//! - [`validation`] -- The transfer validation pipeline
//!
//! # Invariants
//!
//! - Slot indices of a collection are always exactly `0..len`.
//! - A collection's cached weight equals the sum of its stacks' weights
//!   after every operation.
//! - No stack holds more than its type's maximum quantity.
//! - A rejected request mutates nothing and emits nothing.

pub mod actor;
pub mod allocator;
pub mod collection;
pub mod config;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod stack;
pub mod starter;
pub mod transfer;
pub mod upgrade;
pub mod validation;

// Re-export primary types at crate root.
pub use actor::{ActorContext, NotificationSink};
pub use allocator::{Allocation, allocate};
pub use collection::SlotCollection;
pub use config::BankConfig;
pub use error::BankError;
pub use ledger::CapacityLedger;
pub use registry::{ItemRegistry, StaticItemRegistry};
pub use stack::{ItemStack, StackContents};
pub use starter::StarterItem;
pub use transfer::{DepositAllSummary, Holdings, TransferReceipt};
pub use upgrade::{UpgradeManager, UpgradeReceipt};
pub use validation::{PlannedTransfer, validate_transfer};
