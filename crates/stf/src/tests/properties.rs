//! Property tests over random call sequences.

use custody_bridge_types::{BridgeLog, RequestAction, RequestKind};
use custody_state::StateAccessor;
use proptest::prelude::*;

use crate::{queries, test_utils::*, BridgeCall};

#[derive(Clone, Debug)]
enum Op {
    AddMint { broker: u8, amount: u64 },
    Confirm { nonce: u64 },
    Reject { nonce: u64 },
    Cancel { broker: u8, nonce: u64 },
    Burn { broker: u8, amount: u64 },
    ConfirmBurn { nonce: u64 },
    TogglePause,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..2, 1u64..1_000).prop_map(|(broker, amount)| Op::AddMint { broker, amount }),
        2 => (0u64..8).prop_map(|nonce| Op::Confirm { nonce }),
        1 => (0u64..8).prop_map(|nonce| Op::Reject { nonce }),
        1 => (0u8..2, 0u64..8).prop_map(|(broker, nonce)| Op::Cancel { broker, nonce }),
        2 => (0u8..2, 1u64..500).prop_map(|(broker, amount)| Op::Burn { broker, amount }),
        1 => (0u64..8).prop_map(|nonce| Op::ConfirmBurn { nonce }),
        1 => Just(Op::TogglePause),
    ]
}

fn current_hash(h: &TestHarness, kind: RequestKind, nonce: u64) -> Option<custody_bridge_types::RequestHash> {
    queries::get_request(&h.state, kind, nonce).map(|v| v.request_hash)
}

fn apply(h: &mut TestHarness, op: Op) {
    // Results are ignored, failures must simply leave no trace.
    let _ = match op {
        Op::AddMint { broker: b, amount } => h.call(
            broker(b),
            BridgeCall::AddMintRequest {
                amount,
                txid: format!("tx-{amount}"),
                deposit_address: custodian_deposit(b),
            },
        ),
        Op::Confirm { nonce } => match current_hash(h, RequestKind::Mint, nonce) {
            Some(request_hash) => h.call(custodian(), BridgeCall::ConfirmMintRequest { request_hash }),
            None => return,
        },
        Op::Reject { nonce } => match current_hash(h, RequestKind::Mint, nonce) {
            Some(request_hash) => h.call(custodian(), BridgeCall::RejectMintRequest { request_hash }),
            None => return,
        },
        Op::Cancel { broker: b, nonce } => match current_hash(h, RequestKind::Mint, nonce) {
            Some(request_hash) => h.call(broker(b), BridgeCall::CancelMintRequest { request_hash }),
            None => return,
        },
        Op::Burn { broker: b, amount } => h.call(broker(b), BridgeCall::Burn { amount }),
        Op::ConfirmBurn { nonce } => match current_hash(h, RequestKind::Burn, nonce) {
            Some(request_hash) => h.call(
                custodian(),
                BridgeCall::ConfirmBurnRequest {
                    request_hash,
                    txid: format!("settle-{nonce}"),
                },
            ),
            None => return,
        },
        Op::TogglePause => {
            let call = if h.state.token().paused() {
                BridgeCall::Unpause
            } else {
                BridgeCall::Pause
            };
            h.call(owner(), call)
        }
    };
}

fn setup() -> TestHarness {
    let mut h = TestHarness::new();
    for i in 0..2 {
        h.setup_deposit_addresses(i);
        h.approve_bridge(i, u64::MAX);
    }
    h
}

proptest! {
    #[test]
    fn proptest_ledgers_stay_consistent(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut h = setup();
        for op in ops {
            apply(&mut h, op);
        }

        for kind in [RequestKind::Mint, RequestKind::Burn] {
            let len = h.state.request_count(kind);
            for nonce in 0..len {
                // Nonces are dense and match positions.
                let req = h.state.get_request(kind, nonce).unwrap();
                prop_assert_eq!(req.nonce(), nonce);
                // The current hash always resolves back to its nonce.
                let hash = req.compute_hash();
                prop_assert_eq!(h.state.request_nonce_by_hash(kind, &hash), Some(nonce));
            }
        }

        // Creation logs were emitted once per request, in nonce order.
        for kind in [RequestKind::Mint, RequestKind::Burn] {
            let created: Vec<u64> = h
                .logs
                .iter()
                .filter_map(|l| match l {
                    BridgeLog::Request(r) if r.kind == kind && r.action == RequestAction::Added => {
                        Some(r.nonce)
                    }
                    _ => None,
                })
                .collect();
            let expected: Vec<u64> = (0..h.state.request_count(kind)).collect();
            prop_assert_eq!(created, expected);
        }

        // Supply equals the sum of balances.
        let sum: u64 = h.state.balances().values().sum();
        prop_assert_eq!(sum, h.state.token().total_supply());
    }

    #[test]
    fn proptest_failed_calls_leave_no_trace(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut h = setup();
        for op in ops {
            let before_state = h.state.clone();
            let before_logs = h.logs.len();
            apply(&mut h, op);
            if h.logs.len() == before_logs {
                // Every successful call here emits at least one log, so no
                // new log means the call failed or was skipped.
                prop_assert_eq!(&h.state, &before_state);
            }
        }
    }
}
