//! JSON-lines session loop.
//!
//! Each input line is one request. Each output line is one frame: either a
//! notification (`{"event": ..., "payload": ...}`) or a `resync` frame
//! carrying both snapshots. Rejected and malformed requests produce no
//! output at all.

use std::io::{BufRead, Write};

use serde::Serialize;
use stowage_bank::{ActorContext, Holdings};
use stowage_core::{DispatchOutcome, Resync, dispatch_json};
use stowage_types::Notification;
use tracing::{debug, info};

use crate::error::EngineError;

/// An outbound line that is not an engine notification.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
enum Frame<'a> {
    /// Both snapshots, on session start or request.
    Resync(&'a Resync),
}

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Non-blank lines read.
    pub requests: u64,
    /// Requests that changed state.
    pub mutations: u64,
    /// Requests the engine refused.
    pub rejected: u64,
    /// Lines that did not parse.
    pub malformed: u64,
    /// Frames written.
    pub frames: u64,
}

/// Write the opening `resync` frame.
pub fn write_resync(holdings: &Holdings, output: &mut impl Write) -> Result<(), EngineError> {
    let resync = Resync {
        storage: holdings.storage_snapshot(),
        inventory: holdings.inventory_snapshot(),
    };
    write_frame(output, &Frame::Resync(&resync))
}

/// Serve requests from `input` until it is exhausted.
pub fn run_session(
    holdings: &mut Holdings,
    actor: &mut dyn ActorContext,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<SessionStats, EngineError> {
    let mut stats = SessionStats::default();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.requests = stats.requests.saturating_add(1);

        let mut sink: Vec<Notification> = Vec::new();
        let outcome = dispatch_json(holdings, actor, &line, &mut sink);

        match &outcome {
            DispatchOutcome::Rejected(_) => stats.rejected = stats.rejected.saturating_add(1),
            DispatchOutcome::Malformed => stats.malformed = stats.malformed.saturating_add(1),
            DispatchOutcome::Resynced(resync) => {
                write_frame(output, &Frame::Resync(resync))?;
                stats.frames = stats.frames.saturating_add(1);
            }
            DispatchOutcome::Transferred(_)
            | DispatchOutcome::DepositedAll(_)
            | DispatchOutcome::Upgraded(_) => {
                stats.mutations = stats.mutations.saturating_add(1);
            }
        }

        for notification in &sink {
            write_frame(output, notification)?;
        }
        stats.frames = stats
            .frames
            .saturating_add(u64::try_from(sink.len()).unwrap_or(u64::MAX));
        output.flush()?;
        debug!(notifications = sink.len(), "Request handled");
    }

    info!(
        requests = stats.requests,
        mutations = stats.mutations,
        rejected = stats.rejected,
        malformed = stats.malformed,
        "Session ended"
    );
    Ok(stats)
}

fn write_frame(output: &mut impl Write, frame: &impl Serialize) -> Result<(), EngineError> {
    serde_json::to_writer(&mut *output, frame)?;
    output.write_all(b"\n")?;
    Ok(())
}
