//! Burn path tests.

use custody_bridge_types::{BridgeLog, RequestAction, RequestKind, RequestStatus, TokenLog};
use custody_state::StateAccessor;

use crate::{
    queries,
    test_utils::*,
    AuthError, BridgeCall, BridgeError, StateError, TokenError, ValidationError,
};

fn funded(amount: u64) -> TestHarness {
    let mut h = TestHarness::new();
    h.setup_deposit_addresses(0);
    h.setup_deposit_addresses(1);
    h.fund_broker(0, amount);
    h
}

#[test]
fn test_burn_debits_immediately() {
    let mut h = funded(100);
    h.approve_bridge(0, 40);

    let (nonce, hash) = h.call_request(broker(0), BridgeCall::Burn { amount: 40 });
    assert_eq!(nonce, 0);

    assert_eq!(h.state.balance_of(&broker(0)), 60);
    assert_eq!(h.state.balance_of(&controller()), 0);
    assert_eq!(h.state.token().total_supply(), 60);
    assert_eq!(h.state.allowance(&broker(0), &bridge()), 0);

    let view = queries::get_burn_request(&h.state, 0).unwrap();
    assert_eq!(view.status, "pending");
    assert_eq!(view.txid, "");
    assert_eq!(view.deposit_address, broker_deposit(0));
    assert_eq!(view.request_hash, hash);
}

#[test]
fn test_burn_emits_transfer_burn_and_request_logs() {
    let mut h = funded(100);
    h.approve_bridge(0, 10);
    let before = h.logs.len();
    h.call_request(broker(0), BridgeCall::Burn { amount: 10 });

    let new_logs = &h.logs[before..];
    assert!(new_logs.contains(&BridgeLog::Token(TokenLog::Transfer {
        from: broker(0),
        to: controller(),
        amount: 10,
    })));
    assert!(new_logs.contains(&BridgeLog::Token(TokenLog::Burn {
        from: controller(),
        amount: 10,
    })));
    match new_logs.last() {
        Some(BridgeLog::Request(log)) => {
            assert_eq!(log.kind, RequestKind::Burn);
            assert_eq!(log.action, RequestAction::Added);
        }
        other => panic!("unexpected log {other:?}"),
    }
}

#[test]
fn test_burn_requires_destination() {
    let mut h = TestHarness::new();
    h.call(
        custodian(),
        BridgeCall::SetCustodianDepositAddress {
            broker: broker(0),
            deposit_address: custodian_deposit(0),
        },
    )
    .unwrap();
    h.fund_broker(0, 10);
    h.approve_bridge(0, 10);

    let err = h.call(broker(0), BridgeCall::Burn { amount: 10 }).unwrap_err();
    assert_eq!(
        err,
        BridgeError::Validation(ValidationError::BrokerDepositAddressNotSet(broker(0)))
    );
}

#[test]
fn test_burn_without_allowance_is_atomic() {
    let mut h = funded(100);
    let snapshot = h.state.clone();

    let err = h.call(broker(0), BridgeCall::Burn { amount: 10 }).unwrap_err();
    assert_eq!(
        err,
        BridgeError::dependency(BridgeError::Token(TokenError::InsufficientAllowance {
            have: 0,
            need: 10,
        }))
    );

    // No request was recorded and the balance is intact.
    assert_eq!(h.state, snapshot);
    assert_eq!(queries::get_burn_requests_length(&h.state), 0);
}

#[test]
fn test_burn_more_than_balance_fails() {
    let mut h = funded(5);
    h.approve_bridge(0, 50);
    let err = h.call(broker(0), BridgeCall::Burn { amount: 6 }).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &BridgeError::Token(TokenError::InsufficientBalance { have: 5, need: 6 })
    );
}

#[test]
fn test_burn_by_non_broker() {
    let mut h = funded(5);
    let err = h.call(custodian(), BridgeCall::Burn { amount: 1 }).unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotBroker(custodian())));
}

#[test]
fn test_confirm_burn_sets_txid_and_rehashes() {
    let mut h = funded(100);
    h.approve_bridge(0, 30);
    let (nonce, old_hash) = h.call_request(broker(0), BridgeCall::Burn { amount: 30 });
    let supply = h.state.token().total_supply();

    h.call(
        custodian(),
        BridgeCall::ConfirmBurnRequest {
            request_hash: old_hash,
            txid: "settle-1".into(),
        },
    )
    .unwrap();

    let view = queries::get_burn_request(&h.state, nonce).unwrap();
    assert_eq!(view.status, "approved");
    assert_eq!(view.txid, "settle-1");
    assert_ne!(view.request_hash, old_hash);

    // Confirmation never touches supply.
    assert_eq!(h.state.token().total_supply(), supply);
    assert_eq!(h.state.balance_of(&broker(0)), 70);

    // Both hashes resolve to the same nonce.
    assert_eq!(
        queries::get_request_nonce(&h.state, RequestKind::Burn, &view.request_hash),
        Some(nonce)
    );
    assert_eq!(
        queries::get_request_nonce(&h.state, RequestKind::Burn, &old_hash),
        Some(nonce)
    );

    // The log references the hash the custodian presented.
    match h.logs.last() {
        Some(BridgeLog::Request(log)) => {
            assert_eq!(log.action, RequestAction::Confirmed);
            assert_eq!(log.request_hash, old_hash);
            assert_eq!(log.txid, "settle-1");
        }
        other => panic!("unexpected log {other:?}"),
    }
}

#[test]
fn test_confirm_burn_requires_txid() {
    let mut h = funded(100);
    h.approve_bridge(0, 30);
    let (nonce, hash) = h.call_request(broker(0), BridgeCall::Burn { amount: 30 });

    let err = h
        .call(
            custodian(),
            BridgeCall::ConfirmBurnRequest {
                request_hash: hash,
                txid: String::new(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Validation(ValidationError::EmptyTxid));

    // Still pending under the original hash.
    let view = queries::get_burn_request(&h.state, nonce).unwrap();
    assert_eq!(view.status, "pending");
    assert_eq!(view.request_hash, hash);

    h.call(
        custodian(),
        BridgeCall::ConfirmBurnRequest {
            request_hash: hash,
            txid: "settle-1".into(),
        },
    )
    .unwrap();
    let view = queries::get_burn_request(&h.state, nonce).unwrap();
    assert_eq!(view.status, "approved");
    assert_ne!(view.request_hash, hash);
}

#[test]
fn test_zero_burn_rejected() {
    let mut h = funded(100);
    h.approve_bridge(0, 30);
    let err = h.call(broker(0), BridgeCall::Burn { amount: 0 }).unwrap_err();
    assert_eq!(err, BridgeError::Validation(ValidationError::ZeroAmount));
    assert_eq!(queries::get_burn_requests_length(&h.state), 0);
    assert_eq!(h.state.balance_of(&broker(0)), 100);
}

#[test]
fn test_stale_and_new_hash_cannot_confirm_again() {
    let mut h = funded(100);
    h.approve_bridge(0, 30);
    let (nonce, old_hash) = h.call_request(broker(0), BridgeCall::Burn { amount: 30 });
    h.call(
        custodian(),
        BridgeCall::ConfirmBurnRequest {
            request_hash: old_hash,
            txid: "settle-1".into(),
        },
    )
    .unwrap();
    let new_hash = queries::get_burn_request(&h.state, nonce)
        .unwrap()
        .request_hash;

    for hash in [old_hash, new_hash] {
        let err = h
            .call(
                custodian(),
                BridgeCall::ConfirmBurnRequest {
                    request_hash: hash,
                    txid: "settle-2".into(),
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            BridgeError::State(StateError::NotPending {
                nonce,
                status: RequestStatus::Approved,
            })
        );
    }
}

#[test]
fn test_confirm_burn_custodian_only() {
    let mut h = funded(100);
    h.approve_bridge(0, 1);
    let (_, hash) = h.call_request(broker(0), BridgeCall::Burn { amount: 1 });
    let err = h
        .call(
            broker(0),
            BridgeCall::ConfirmBurnRequest {
                request_hash: hash,
                txid: "x".into(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotCustodian(broker(0))));
}

#[test]
fn test_burn_fails_when_bridge_authority_moved() {
    let mut h = funded(100);
    h.approve_bridge(0, 10);
    h.call(
        owner(),
        BridgeCall::SetBridge {
            bridge: outsider(),
        },
    )
    .unwrap();

    let err = h.call(broker(0), BridgeCall::Burn { amount: 10 }).unwrap_err();
    assert_eq!(
        err,
        BridgeError::dependency(BridgeError::Authorization(AuthError::NotBridge(bridge())))
    );
    assert_eq!(h.state.balance_of(&broker(0)), 100);
}
