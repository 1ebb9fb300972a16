//! Inbound requests from the actor's session.
//!
//! On the wire a request is `{"op": <name>, "payload": {...}}`. Operations
//! without arguments may send an empty payload or none at all. Quantities
//! are unsigned integers, so negative or fractional amounts fail to parse
//! and never reach the engine.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// An operation the session asks the engine to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "op", content = "payload", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BankRequest {
    /// Move an inventory stack (or part of it) into storage.
    DepositItem(SlotRequest),
    /// Move a storage stack (or part of it) into the inventory.
    WithdrawItem(SlotRequest),
    /// Deposit as much of every inventory stack as fits.
    DepositAll,
    /// Spend currency to raise the storage weight limit.
    BuyCapacityUpgrade,
    /// Ask for full snapshots of both collections.
    Resync,
}

/// Payload addressing one slot of the source collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SlotRequest {
    /// Slot in the source collection.
    pub slot_index: usize,
    /// How many units to move. Required for stackables, forbidden otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<u32>,
}

impl<'de> Deserialize<'de> for BankRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRequest::deserialize(deserializer)?;
        Ok(match raw.op {
            Op::DepositItem => Self::DepositItem(RawPayload::slot_request(raw.payload)?),
            Op::WithdrawItem => Self::WithdrawItem(RawPayload::slot_request(raw.payload)?),
            Op::DepositAll => Self::DepositAll,
            Op::BuyCapacityUpgrade => Self::BuyCapacityUpgrade,
            Op::Resync => Self::Resync,
        })
    }
}

/// Inbound envelope before the payload is checked against the operation.
#[derive(Deserialize)]
struct RawRequest {
    op: Op,
    #[serde(default)]
    payload: Option<RawPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum Op {
    DepositItem,
    WithdrawItem,
    DepositAll,
    BuyCapacityUpgrade,
    Resync,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default)]
    slot_index: Option<usize>,
    #[serde(default)]
    quantity: Option<u32>,
}

impl RawPayload {
    fn slot_request<E: serde::de::Error>(payload: Option<Self>) -> Result<SlotRequest, E> {
        let payload = payload.ok_or_else(|| E::missing_field("payload"))?;
        let slot_index = payload
            .slot_index
            .ok_or_else(|| E::missing_field("slotIndex"))?;
        Ok(SlotRequest {
            slot_index,
            quantity: payload.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deposit_with_quantity() {
        let parsed: Result<BankRequest, _> =
            serde_json::from_str(r#"{"op":"deposit_item","payload":{"slotIndex":2,"quantity":5}}"#);
        assert_eq!(
            parsed.ok(),
            Some(BankRequest::DepositItem(SlotRequest {
                slot_index: 2,
                quantity: Some(5),
            }))
        );
    }

    #[test]
    fn parses_withdraw_without_quantity() {
        let parsed: Result<BankRequest, _> =
            serde_json::from_str(r#"{"op":"withdraw_item","payload":{"slotIndex":0}}"#);
        assert_eq!(
            parsed.ok(),
            Some(BankRequest::WithdrawItem(SlotRequest {
                slot_index: 0,
                quantity: None,
            }))
        );
    }

    #[test]
    fn parses_unit_operations() {
        let parsed: Result<BankRequest, _> = serde_json::from_str(r#"{"op":"deposit_all"}"#);
        assert_eq!(parsed.ok(), Some(BankRequest::DepositAll));
        let parsed: Result<BankRequest, _> =
            serde_json::from_str(r#"{"op":"buy_capacity_upgrade"}"#);
        assert_eq!(parsed.ok(), Some(BankRequest::BuyCapacityUpgrade));
    }

    #[test]
    fn unit_operations_accept_empty_payload() {
        for (line, expected) in [
            (r#"{"op":"deposit_all","payload":{}}"#, BankRequest::DepositAll),
            (
                r#"{"op":"buy_capacity_upgrade","payload":{}}"#,
                BankRequest::BuyCapacityUpgrade,
            ),
            (r#"{"op":"resync","payload":{}}"#, BankRequest::Resync),
            (r#"{"op":"deposit_all","payload":null}"#, BankRequest::DepositAll),
        ] {
            let parsed: Result<BankRequest, _> = serde_json::from_str(line);
            assert_eq!(parsed.ok(), Some(expected), "{line}");
        }
    }

    #[test]
    fn slot_operations_need_a_slot() {
        for line in [
            r#"{"op":"deposit_item"}"#,
            r#"{"op":"deposit_item","payload":{}}"#,
            r#"{"op":"withdraw_item","payload":{"quantity":2}}"#,
            r#"{"op":"explode","payload":{}}"#,
        ] {
            let parsed: Result<BankRequest, _> = serde_json::from_str(line);
            assert!(parsed.is_err(), "{line}");
        }
    }

    #[test]
    fn serialized_request_parses_back() {
        let request = BankRequest::WithdrawItem(SlotRequest {
            slot_index: 4,
            quantity: Some(9),
        });
        let text = serde_json::to_string(&request).unwrap_or_default();
        let parsed: Result<BankRequest, _> = serde_json::from_str(&text);
        assert_eq!(parsed.ok(), Some(request));
    }

    #[test]
    fn negative_quantity_does_not_parse() {
        let parsed: Result<BankRequest, _> =
            serde_json::from_str(r#"{"op":"deposit_item","payload":{"slotIndex":0,"quantity":-3}}"#);
        assert!(parsed.is_err());
    }
}
