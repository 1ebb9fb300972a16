//! Standalone Stowage engine.
//!
//! Serves one actor's inventory and storage account over a JSON-lines
//! session: requests on stdin, frames on stdout, logs on stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `stowage-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the item registry from the catalog
//! 4. Provision the actor and its starter items
//! 5. Send the opening resync frame
//! 6. Serve requests until stdin closes

mod error;
mod session;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use stowage_bank::{ActorContext, Holdings};
use stowage_core::{LoggingConfig, SimpleActor, StowageConfig};
use stowage_types::Notification;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "stowage-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the session's I/O fails.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    init_tracing(&config.logging);
    info!(
        config = %config_path.display(),
        item_types = config.items.len(),
        starter_items = config.starter_items.len(),
        "stowage-engine starting"
    );

    run(&config).context("session failed")?;
    Ok(())
}

fn run(config: &StowageConfig) -> Result<(), EngineError> {
    let registry = Arc::new(config.registry()?);
    let mut actor = SimpleActor::from_session(&config.session);
    let mut holdings = Holdings::new(actor.actor_id(), registry, config.bank.clone());

    let provisioned =
        holdings.add_starter_items(&config.starter_items, &mut Vec::<Notification>::new());
    info!(
        actor_id = %actor.actor_id(),
        provisioned,
        currency = actor.currency(),
        adjacent_to_terminal = actor.is_adjacent_to_terminal(),
        "Actor provisioned"
    );

    let stdin = std::io::stdin();
    let mut stdout = BufWriter::new(std::io::stdout().lock());
    session::write_resync(&holdings, &mut stdout)?;
    stdout.flush()?;

    session::run_session(&mut holdings, &mut actor, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Load configuration from `path`, falling back to defaults if the file is
/// absent.
fn load_config(path: &Path) -> Result<StowageConfig, EngineError> {
    if path.exists() {
        Ok(StowageConfig::from_file(path)?)
    } else {
        Ok(StowageConfig::parse("")?)
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
