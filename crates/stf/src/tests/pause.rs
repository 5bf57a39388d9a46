//! Pause interaction with the bridge.

use custody_state::StateAccessor;

use crate::{
    queries,
    test_utils::*,
    BridgeCall, BridgeError, ErrorKind, TokenError,
};

#[test]
fn test_pause_blocks_confirm_and_burn() {
    let mut h = TestHarness::new();
    h.setup_deposit_addresses(0);
    h.fund_broker(0, 50);
    h.approve_bridge(0, 50);
    let (nonce, hash) = h.add_mint_request(0, 10, "tx-paused");

    h.call(owner(), BridgeCall::Pause).unwrap();
    assert!(h.state.token().paused());

    let err = h
        .call(custodian(), BridgeCall::ConfirmMintRequest { request_hash: hash })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Dependency);
    assert_eq!(err.root_cause(), &BridgeError::Token(TokenError::Paused));

    // Status rolled back together with the failed mint.
    let view = queries::get_mint_request(&h.state, nonce).unwrap();
    assert_eq!(view.status, "pending");
    assert_eq!(view.request_hash, hash);

    let err = h.call(broker(0), BridgeCall::Burn { amount: 5 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Dependency);
    assert_eq!(err.root_cause(), &BridgeError::Token(TokenError::Paused));
    assert_eq!(queries::get_burn_requests_length(&h.state), 0);
    assert_eq!(h.state.balance_of(&broker(0)), 50);

    // Adding requests does not touch the token and keeps working.
    h.add_mint_request(0, 1, "tx-while-paused");

    h.call(owner(), BridgeCall::Unpause).unwrap();
    h.call(custodian(), BridgeCall::ConfirmMintRequest { request_hash: hash })
        .unwrap();
    h.call_request(broker(0), BridgeCall::Burn { amount: 5 });
    assert_eq!(h.state.balance_of(&broker(0)), 55);
}

#[test]
fn test_pause_owner_only() {
    let mut h = TestHarness::new();
    let err = h.call(custodian(), BridgeCall::Pause).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    let err = h.call(owner(), BridgeCall::Unpause).unwrap_err();
    assert_eq!(err, BridgeError::Token(TokenError::NotPaused));
}

#[test]
fn test_paused_blocks_user_transfers() {
    let mut h = TestHarness::new();
    h.setup_deposit_addresses(0);
    h.fund_broker(0, 10);
    h.call(owner(), BridgeCall::Pause).unwrap();
    let err = h
        .call(
            broker(0),
            BridgeCall::Transfer {
                to: outsider(),
                amount: 1,
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Token(TokenError::Paused));
}
