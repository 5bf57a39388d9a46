//! Test utilities for driving the bridge through whole calls.

#![allow(unreachable_pub, reason = "test util module")]

use custody_bridge_types::{BridgeLog, RequestHash};
use custody_primitives::Address;
pub use custody_state::test_utils::*;
use custody_state::BridgeState;

use crate::{
    call::{BridgeCall, CallReturn},
    context::CallContext,
    error::BridgeResult,
    process_call,
};

/// Deposit address the custodian assigns to broker `i` in fixtures.
pub fn custodian_deposit(i: u8) -> String {
    format!("bc1q-custodian-deposit-{i}")
}

/// Burn destination broker `i` registers in fixtures.
pub fn broker_deposit(i: u8) -> String {
    format!("bc1q-broker-redeem-{i}")
}

/// Bridge state plus the logs of every committed call, executed the way the
/// host does it: stage in a batch, apply only on success.
#[derive(Debug)]
pub struct TestHarness {
    pub state: BridgeState,
    pub logs: Vec<BridgeLog>,
    clock: u64,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            state: genesis_state(),
            logs: Vec::new(),
            clock: 1_700_000_000,
        }
    }

    /// Timestamp the next call will carry.
    pub fn now(&self) -> u64 {
        self.clock
    }

    pub fn call(&mut self, sender: Address, call: BridgeCall) -> BridgeResult<CallReturn> {
        let ctx = CallContext::new(sender, self.clock);
        self.clock += 1;
        let output = process_call(&self.state, &ctx, call)?;
        let (batch, logs, ret) = output.into_parts();
        batch.apply_to(&mut self.state);
        self.logs.extend(logs);
        Ok(ret)
    }

    /// Runs a call expected to create a request, returning its nonce and hash.
    pub fn call_request(&mut self, sender: Address, call: BridgeCall) -> (u64, RequestHash) {
        match self.call(sender, call) {
            Ok(CallReturn::Request {
                nonce,
                request_hash,
            }) => (nonce, request_hash),
            other => panic!("expected a request receipt, got {other:?}"),
        }
    }

    /// Custodian assigns the fixture deposit address to broker `i` and the
    /// broker registers its burn destination.
    pub fn setup_deposit_addresses(&mut self, i: u8) {
        self.call(
            custodian(),
            BridgeCall::SetCustodianDepositAddress {
                broker: broker(i),
                deposit_address: custodian_deposit(i),
            },
        )
        .unwrap();
        self.call(
            broker(i),
            BridgeCall::SetBrokerDepositAddress {
                deposit_address: broker_deposit(i),
            },
        )
        .unwrap();
    }

    pub fn add_mint_request(&mut self, i: u8, amount: u64, txid: &str) -> (u64, RequestHash) {
        self.call_request(
            broker(i),
            BridgeCall::AddMintRequest {
                amount,
                txid: txid.to_owned(),
                deposit_address: custodian_deposit(i),
            },
        )
    }

    /// Credits broker `i` with `amount` through a full mint round trip.
    pub fn fund_broker(&mut self, i: u8, amount: u64) {
        let (_, hash) = self.add_mint_request(i, amount, "fund-tx");
        self.call(
            custodian(),
            BridgeCall::ConfirmMintRequest { request_hash: hash },
        )
        .unwrap();
    }

    /// Broker `i` lets the bridge pull `amount` for burning.
    pub fn approve_bridge(&mut self, i: u8, amount: u64) {
        self.call(
            broker(i),
            BridgeCall::Approve {
                spender: bridge(),
                amount,
            },
        )
        .unwrap();
    }
}
