//! Serializable call envelope covering every state-changing operation.

use custody_bridge_types::RequestHash;
use custody_primitives::Address;
use custody_state::StateAccessor;
use serde::{Deserialize, Serialize};

use crate::{
    context::CallContext,
    controller,
    error::BridgeResult,
    factory::{self, RequestReceipt},
    members,
    output::ExecOutput,
    token,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BridgeCall {
    // ===== Role registry =====
    SetCustodian {
        custodian: Address,
    },
    AddBroker {
        broker: Address,
    },
    RemoveBroker {
        broker: Address,
    },

    // ===== Supply controller =====
    Pause,
    Unpause,
    SetBridge {
        bridge: Address,
    },
    RenounceOwnership,

    // ===== Bridge protocol =====
    SetCustodianDepositAddress {
        broker: Address,
        deposit_address: String,
    },
    SetBrokerDepositAddress {
        deposit_address: String,
    },
    AddMintRequest {
        amount: u64,
        txid: String,
        deposit_address: String,
    },
    CancelMintRequest {
        request_hash: RequestHash,
    },
    ConfirmMintRequest {
        request_hash: RequestHash,
    },
    RejectMintRequest {
        request_hash: RequestHash,
    },
    Burn {
        amount: u64,
    },
    ConfirmBurnRequest {
        request_hash: RequestHash,
        txid: String,
    },

    // ===== Token =====
    Transfer {
        to: Address,
        amount: u64,
    },
    Approve {
        spender: Address,
        amount: u64,
    },
    TransferFrom {
        from: Address,
        to: Address,
        amount: u64,
    },
    IncreaseAllowance {
        spender: Address,
        added: u64,
    },
    DecreaseAllowance {
        spender: Address,
        subtracted: u64,
    },
}

impl BridgeCall {
    /// Name used in spans and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeCall::SetCustodian { .. } => "set_custodian",
            BridgeCall::AddBroker { .. } => "add_broker",
            BridgeCall::RemoveBroker { .. } => "remove_broker",
            BridgeCall::Pause => "pause",
            BridgeCall::Unpause => "unpause",
            BridgeCall::SetBridge { .. } => "set_bridge",
            BridgeCall::RenounceOwnership => "renounce_ownership",
            BridgeCall::SetCustodianDepositAddress { .. } => "set_custodian_deposit_address",
            BridgeCall::SetBrokerDepositAddress { .. } => "set_broker_deposit_address",
            BridgeCall::AddMintRequest { .. } => "add_mint_request",
            BridgeCall::CancelMintRequest { .. } => "cancel_mint_request",
            BridgeCall::ConfirmMintRequest { .. } => "confirm_mint_request",
            BridgeCall::RejectMintRequest { .. } => "reject_mint_request",
            BridgeCall::Burn { .. } => "burn",
            BridgeCall::ConfirmBurnRequest { .. } => "confirm_burn_request",
            BridgeCall::Transfer { .. } => "transfer",
            BridgeCall::Approve { .. } => "approve",
            BridgeCall::TransferFrom { .. } => "transfer_from",
            BridgeCall::IncreaseAllowance { .. } => "increase_allowance",
            BridgeCall::DecreaseAllowance { .. } => "decrease_allowance",
        }
    }
}

/// Value returned by a successful call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallReturn {
    Unit,
    Request {
        nonce: u64,
        request_hash: RequestHash,
    },
}

impl From<RequestReceipt> for CallReturn {
    fn from(r: RequestReceipt) -> Self {
        CallReturn::Request {
            nonce: r.nonce,
            request_hash: r.request_hash,
        }
    }
}

/// Dispatches a call against `state`.
///
/// On error `state` may hold partial writes. Run it against a
/// [`WriteTrackingState`](custody_state::WriteTrackingState) and drop the
/// batch on failure.
pub fn execute_call(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    call: BridgeCall,
    out: &mut ExecOutput,
) -> BridgeResult<CallReturn> {
    let sender = *ctx.sender();
    let unit = |r: BridgeResult<()>| r.map(|()| CallReturn::Unit);

    match call {
        BridgeCall::SetCustodian { custodian } => {
            unit(members::set_custodian(state, ctx, out, custodian))
        }
        BridgeCall::AddBroker { broker } => unit(members::add_broker(state, ctx, out, broker)),
        BridgeCall::RemoveBroker { broker } => {
            unit(members::remove_broker(state, ctx, out, broker))
        }

        BridgeCall::Pause => unit(controller::pause(state, out, &sender)),
        BridgeCall::Unpause => unit(controller::unpause(state, out, &sender)),
        BridgeCall::SetBridge { bridge } => {
            unit(controller::set_bridge(state, out, &sender, bridge))
        }
        BridgeCall::RenounceOwnership => unit(controller::renounce_ownership(state, &sender)),

        BridgeCall::SetCustodianDepositAddress {
            broker,
            deposit_address,
        } => unit(factory::set_custodian_deposit_address(
            state,
            ctx,
            out,
            broker,
            deposit_address,
        )),
        BridgeCall::SetBrokerDepositAddress { deposit_address } => unit(
            factory::set_broker_deposit_address(state, ctx, out, deposit_address),
        ),
        BridgeCall::AddMintRequest {
            amount,
            txid,
            deposit_address,
        } => factory::add_mint_request(state, ctx, out, amount, txid, deposit_address)
            .map(Into::into),
        BridgeCall::CancelMintRequest { request_hash } => {
            unit(factory::cancel_mint_request(state, ctx, out, request_hash))
        }
        BridgeCall::ConfirmMintRequest { request_hash } => {
            unit(factory::confirm_mint_request(state, ctx, out, request_hash))
        }
        BridgeCall::RejectMintRequest { request_hash } => {
            unit(factory::reject_mint_request(state, ctx, out, request_hash))
        }
        BridgeCall::Burn { amount } => factory::burn(state, ctx, out, amount).map(Into::into),
        BridgeCall::ConfirmBurnRequest { request_hash, txid } => unit(
            factory::confirm_burn_request(state, ctx, out, request_hash, txid),
        ),

        BridgeCall::Transfer { to, amount } => {
            unit(token::transfer(state, out, &sender, &to, amount))
        }
        BridgeCall::Approve { spender, amount } => {
            unit(token::approve(state, out, &sender, &spender, amount))
        }
        BridgeCall::TransferFrom { from, to, amount } => unit(token::transfer_from(
            state, out, &sender, &from, &to, amount,
        )),
        BridgeCall::IncreaseAllowance { spender, added } => unit(token::increase_allowance(
            state, out, &sender, &spender, added,
        )),
        BridgeCall::DecreaseAllowance {
            spender,
            subtracted,
        } => unit(token::decrease_allowance(
            state, out, &sender, &spender, subtracted,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_json_shape() {
        let json = r#"{"op":"add_mint_request","amount":100,"txid":"tx1","deposit_address":"D"}"#;
        let call: BridgeCall = serde_json::from_str(json).unwrap();
        assert_eq!(
            call,
            BridgeCall::AddMintRequest {
                amount: 100,
                txid: "tx1".to_owned(),
                deposit_address: "D".to_owned(),
            }
        );
        assert_eq!(call.name(), "add_mint_request");

        let pause: BridgeCall = serde_json::from_str(r#"{"op":"pause"}"#).unwrap();
        assert_eq!(pause, BridgeCall::Pause);
    }

    #[test]
    fn test_hash_field_parses_hex() {
        let json = format!(
            r#"{{"op":"confirm_mint_request","request_hash":"0x{}"}}"#,
            "ab".repeat(32)
        );
        let call: BridgeCall = serde_json::from_str(&json).unwrap();
        match call {
            BridgeCall::ConfirmMintRequest { request_hash } => {
                assert_eq!(request_hash, RequestHash::new([0xab; 32]))
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
