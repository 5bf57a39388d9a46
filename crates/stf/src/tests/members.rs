//! Role registry and binding tests.

use custody_bridge_types::{BridgeLog, DepositAddressLog, MembersLog};
use custody_primitives::Address;
use custody_state::StateAccessor;

use crate::{
    controller, queries,
    test_utils::*,
    AuthError, BridgeCall, BridgeError, StateError, ValidationError,
};

#[test]
fn test_owner_manages_registry() {
    let mut h = TestHarness::new();
    let new_broker = Address::repeat_byte(0x30);
    let new_custodian = Address::repeat_byte(0x31);

    h.call(owner(), BridgeCall::AddBroker { broker: new_broker })
        .unwrap();
    h.call(
        owner(),
        BridgeCall::SetCustodian {
            custodian: new_custodian,
        },
    )
    .unwrap();

    assert!(controller::is_broker(&h.state, &new_broker));
    assert!(controller::is_custodian(&h.state, &new_custodian));
    assert!(!controller::is_custodian(&h.state, &custodian()));
    assert_eq!(h.state.members().broker_count(), 3);
    assert_eq!(
        &h.logs[..],
        &[
            BridgeLog::Members(MembersLog::BrokerAdded { broker: new_broker }),
            BridgeLog::Members(MembersLog::CustodianSet {
                custodian: new_custodian
            }),
        ]
    );
}

#[test]
fn test_registry_rejections() {
    let mut h = TestHarness::new();

    let err = h
        .call(custodian(), BridgeCall::AddBroker { broker: outsider() })
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotOwner(custodian())));

    for call in [
        BridgeCall::AddBroker {
            broker: Address::zero(),
        },
        BridgeCall::RemoveBroker {
            broker: Address::zero(),
        },
        BridgeCall::SetCustodian {
            custodian: Address::zero(),
        },
    ] {
        let err = h.call(owner(), call).unwrap_err();
        assert_eq!(err, BridgeError::Validation(ValidationError::ZeroAddress));
    }

    let err = h
        .call(owner(), BridgeCall::AddBroker { broker: broker(0) })
        .unwrap_err();
    assert_eq!(
        err,
        BridgeError::Validation(ValidationError::BrokerAlreadyExists(broker(0)))
    );

    let err = h
        .call(owner(), BridgeCall::RemoveBroker { broker: outsider() })
        .unwrap_err();
    assert_eq!(
        err,
        BridgeError::Validation(ValidationError::BrokerNotFound(outsider()))
    );
    assert!(h.logs.is_empty());
}

#[test]
fn test_removed_broker_keeps_requests_but_loses_rights() {
    let mut h = TestHarness::new();
    h.setup_deposit_addresses(0);
    let (nonce, hash) = h.add_mint_request(0, 10, "tx");

    h.call(owner(), BridgeCall::RemoveBroker { broker: broker(0) })
        .unwrap();

    let err = h
        .call(broker(0), BridgeCall::CancelMintRequest { request_hash: hash })
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotBroker(broker(0))));

    let err = h
        .call(
            broker(0),
            BridgeCall::AddMintRequest {
                amount: 1,
                txid: "tx2".into(),
                deposit_address: custodian_deposit(0),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotBroker(broker(0))));

    // The pending request is still there and the custodian can still act on it.
    assert_eq!(queries::get_mint_request(&h.state, nonce).unwrap().status, "pending");
    h.call(custodian(), BridgeCall::ConfirmMintRequest { request_hash: hash })
        .unwrap();
    assert_eq!(h.state.balance_of(&broker(0)), 10);
}

#[test]
fn test_broker_enumeration_after_removal() {
    let mut h = TestHarness::new();
    h.call(
        owner(),
        BridgeCall::AddBroker {
            broker: broker(2),
        },
    )
    .unwrap();
    h.call(owner(), BridgeCall::RemoveBroker { broker: broker(0) })
        .unwrap();

    let members = queries::get_members(&h.state);
    assert_eq!(members.brokers, vec![broker(2), broker(1)]);
    assert_eq!(h.state.members().broker_at(0), Some(&broker(2)));
}

#[test]
fn test_custodian_deposit_address_rules() {
    let mut h = TestHarness::new();

    let err = h
        .call(
            broker(0),
            BridgeCall::SetCustodianDepositAddress {
                broker: broker(0),
                deposit_address: "d".into(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotCustodian(broker(0))));

    let err = h
        .call(
            custodian(),
            BridgeCall::SetCustodianDepositAddress {
                broker: outsider(),
                deposit_address: "d".into(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Validation(ValidationError::NotABroker(outsider())));

    let err = h
        .call(
            custodian(),
            BridgeCall::SetCustodianDepositAddress {
                broker: broker(0),
                deposit_address: String::new(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Validation(ValidationError::EmptyDepositAddress));

    for addr in ["first", "second"] {
        h.call(
            custodian(),
            BridgeCall::SetCustodianDepositAddress {
                broker: broker(0),
                deposit_address: addr.into(),
            },
        )
        .unwrap();
    }
    assert_eq!(
        queries::custodian_deposit_address(&h.state, &broker(0)).as_deref(),
        Some("second")
    );
    assert_eq!(
        h.logs.last(),
        Some(&BridgeLog::DepositAddress(
            DepositAddressLog::CustodianDepositAddressSet {
                broker: broker(0),
                sender: custodian(),
                deposit_address: "second".into(),
            }
        ))
    );
}

#[test]
fn test_broker_deposit_address_is_self_only() {
    let mut h = TestHarness::new();
    let err = h
        .call(
            outsider(),
            BridgeCall::SetBrokerDepositAddress {
                deposit_address: "x".into(),
            },
        )
        .unwrap_err();
    assert_eq!(err, BridgeError::Authorization(AuthError::NotBroker(outsider())));

    h.call(
        broker(1),
        BridgeCall::SetBrokerDepositAddress {
            deposit_address: "redeem".into(),
        },
    )
    .unwrap();
    assert_eq!(
        queries::broker_deposit_address(&h.state, &broker(1)).as_deref(),
        Some("redeem")
    );
    assert_eq!(queries::broker_deposit_address(&h.state, &broker(0)), None);
}

#[test]
fn test_renounce_always_fails() {
    let mut h = TestHarness::new();
    for sender in [owner(), outsider()] {
        let err = h.call(sender, BridgeCall::RenounceOwnership).unwrap_err();
        assert_eq!(err, BridgeError::Authorization(AuthError::RenounceDisabled));
    }
    // Unrelated error types stay distinct.
    assert_ne!(
        BridgeError::State(StateError::HashMismatch).kind(),
        BridgeError::Authorization(AuthError::RenounceDisabled).kind()
    );
}
