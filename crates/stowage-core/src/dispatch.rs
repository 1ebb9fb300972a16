//! Request dispatch: inbound session requests to engine operations.
//!
//! The session layer hands over either a parsed [`BankRequest`] or a raw
//! JSON line. Either way the answer is a [`DispatchOutcome`]; nothing here
//! fails. Rejected and malformed requests are logged at `debug` and
//! otherwise ignored, since the session treats silence as a denial.

use serde::Serialize;
use stowage_bank::{
    ActorContext, DepositAllSummary, Holdings, NotificationSink, TransferReceipt, UpgradeReceipt,
};
use stowage_types::{BankRequest, InventorySnapshot, RejectionReason, StorageSnapshot};
use tracing::debug;

/// Both snapshots, sent in answer to a `resync` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resync {
    /// Full state of the storage account.
    pub storage: StorageSnapshot,
    /// Full state of the inventory.
    pub inventory: InventorySnapshot,
}

/// What happened to one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A deposit or withdrawal went through.
    Transferred(TransferReceipt),
    /// A deposit-all pass ran.
    DepositedAll(DepositAllSummary),
    /// A capacity upgrade was bought.
    Upgraded(UpgradeReceipt),
    /// Snapshots of both collections.
    Resynced(Box<Resync>),
    /// The engine refused the request. Nothing changed.
    Rejected(RejectionReason),
    /// The request could not be parsed. Nothing changed.
    Malformed,
}

impl DispatchOutcome {
    /// Whether the request changed any state.
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Transferred(_) | Self::DepositedAll(_) | Self::Upgraded(_)
        )
    }
}

/// Run one parsed request against the actor's holdings.
pub fn dispatch(
    holdings: &mut Holdings,
    actor: &mut dyn ActorContext,
    request: BankRequest,
    sink: &mut dyn NotificationSink,
) -> DispatchOutcome {
    debug!(actor_id = %actor.actor_id(), ?request, "Dispatching request");

    let outcome = match request {
        BankRequest::DepositItem(slot) => holdings
            .deposit(actor, slot, sink)
            .map(DispatchOutcome::Transferred),
        BankRequest::WithdrawItem(slot) => holdings
            .withdraw(actor, slot, sink)
            .map(DispatchOutcome::Transferred),
        BankRequest::DepositAll => holdings
            .deposit_all(actor, sink)
            .map(DispatchOutcome::DepositedAll),
        BankRequest::BuyCapacityUpgrade => holdings
            .buy_max_weight_upgrade(actor, sink)
            .map(DispatchOutcome::Upgraded),
        BankRequest::Resync => Ok(DispatchOutcome::Resynced(Box::new(Resync {
            storage: holdings.storage_snapshot(),
            inventory: holdings.inventory_snapshot(),
        }))),
    };

    outcome.unwrap_or_else(|reason| {
        debug!(actor_id = %actor.actor_id(), ?request, %reason, "Request rejected");
        DispatchOutcome::Rejected(reason)
    })
}

/// Parse one JSON request line and dispatch it.
///
/// Unknown operations and invalid payloads (negative or fractional
/// quantities, missing slot indices) are dropped.
pub fn dispatch_json(
    holdings: &mut Holdings,
    actor: &mut dyn ActorContext,
    line: &str,
    sink: &mut dyn NotificationSink,
) -> DispatchOutcome {
    match serde_json::from_str::<BankRequest>(line) {
        Ok(request) => dispatch(holdings, actor, request, sink),
        Err(err) => {
            debug!(actor_id = %actor.actor_id(), %err, "Malformed request dropped");
            DispatchOutcome::Malformed
        }
    }
}
