//! Configuration and request dispatch for the Stowage engine.
//!
//! This crate sits between the pure engine in `stowage-bank` and whatever
//! carries the session (the `stowage-engine` binary, or a game server).
//!
//! # Modules
//!
//! - [`actor`] -- A standalone [`ActorContext`] implementation ([`SimpleActor`])
//! - [`config`] -- YAML configuration loading ([`StowageConfig`])
//! - [`dispatch`] -- Inbound requests to engine operations ([`dispatch()`], [`dispatch_json`])
//!
//! [`ActorContext`]: stowage_bank::ActorContext

pub mod actor;
pub mod config;
pub mod dispatch;

// Re-export primary types at crate root.
pub use actor::SimpleActor;
pub use config::{ConfigError, LoggingConfig, SessionConfig, StowageConfig};
pub use dispatch::{DispatchOutcome, Resync, dispatch, dispatch_json};
