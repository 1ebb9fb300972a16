//! Shared type definitions for the Stowage engine.
//!
//! Everything that crosses the boundary between the engine and an actor's
//! session lives here. Types flow downstream to `TypeScript` via `ts-rs` so
//! the client panels can render the same shapes.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for stacks and actors
//! - [`enums`] -- Collection kinds and rejection reasons
//! - [`structs`] -- Item type metadata, stack views, snapshots
//! - [`requests`] -- Inbound operations
//! - [`notifications`] -- Outbound deltas

pub mod enums;
pub mod ids;
pub mod notifications;
pub mod requests;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CollectionKind, RejectionReason};
pub use ids::{ActorId, StackId};
pub use notifications::{
    CostChanged, Notification, StackAdded, StackModified, StackRemoved, ValueChanged,
    WeightChanged,
};
pub use requests::{BankRequest, SlotRequest};
pub use structs::{InventorySnapshot, ItemType, StackView, Stacking, StorageSnapshot, TypeCode};
