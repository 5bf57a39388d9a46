//! Structured logs emitted by state-changing bridge operations.
//!
//! These are the durable audit trail. Every successful call produces zero or
//! more [`BridgeLog`]s which the host persists as [`LogEntry`] records.

use borsh::{BorshDeserialize, BorshSerialize};
use custody_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::request::{Request, RequestHash, RequestKind};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BridgeLog {
    Members(MembersLog),
    Controller(ControllerLog),
    Token(TokenLog),
    DepositAddress(DepositAddressLog),
    Request(RequestLog),
}

impl BridgeLog {
    /// Short name used in tracing output and CLI listings.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeLog::Members(MembersLog::CustodianSet { .. }) => "CustodianSet",
            BridgeLog::Members(MembersLog::BrokerAdded { .. }) => "BrokerAdded",
            BridgeLog::Members(MembersLog::BrokerRemoved { .. }) => "BrokerRemoved",
            BridgeLog::Controller(ControllerLog::BridgeSet { .. }) => "BridgeSet",
            BridgeLog::Controller(ControllerLog::Paused) => "Paused",
            BridgeLog::Controller(ControllerLog::Unpaused) => "Unpaused",
            BridgeLog::Token(TokenLog::Transfer { .. }) => "Transfer",
            BridgeLog::Token(TokenLog::Approval { .. }) => "Approval",
            BridgeLog::Token(TokenLog::Mint { .. }) => "Mint",
            BridgeLog::Token(TokenLog::Burn { .. }) => "Burn",
            BridgeLog::Token(TokenLog::Pause) => "Pause",
            BridgeLog::Token(TokenLog::Unpause) => "Unpause",
            BridgeLog::DepositAddress(DepositAddressLog::CustodianDepositAddressSet { .. }) => {
                "CustodianDepositAddressSet"
            }
            BridgeLog::DepositAddress(DepositAddressLog::BrokerDepositAddressSet { .. }) => {
                "BrokerDepositAddressSet"
            }
            BridgeLog::Request(r) => r.name(),
        }
    }
}

macro_rules! impl_into_bridge_log {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        $(
            impl From<$inner> for BridgeLog {
                fn from(value: $inner) -> Self {
                    BridgeLog::$variant(value)
                }
            }
        )*
    };
}

impl_into_bridge_log!(
    Members(MembersLog),
    Controller(ControllerLog),
    Token(TokenLog),
    DepositAddress(DepositAddressLog),
    Request(RequestLog),
);

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembersLog {
    CustodianSet { custodian: Address },
    BrokerAdded { broker: Address },
    BrokerRemoved { broker: Address },
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerLog {
    BridgeSet { bridge: Address },
    Paused,
    Unpaused,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLog {
    Transfer {
        from: Address,
        to: Address,
        amount: u64,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: u64,
    },
    Mint {
        to: Address,
        amount: u64,
    },
    Burn {
        from: Address,
        amount: u64,
    },
    Pause,
    Unpause,
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositAddressLog {
    CustodianDepositAddressSet {
        broker: Address,
        sender: Address,
        deposit_address: String,
    },
    BrokerDepositAddressSet {
        broker: Address,
        deposit_address: String,
    },
}

/// What happened to a request.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    Added,
    Canceled,
    Confirmed,
    Rejected,
}

/// Log for a request lifecycle event. Carries the full request content so
/// an auditor never has to consult state to interpret it.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct RequestLog {
    pub action: RequestAction,
    pub kind: RequestKind,
    pub nonce: u64,
    pub requester: Address,
    pub amount: u64,
    pub deposit_address: String,
    pub txid: String,
    pub timestamp: u64,
    pub request_hash: RequestHash,
}

impl RequestLog {
    /// Builds a log from the request's current fields, recording `request_hash`
    /// as the handle the action was performed with.
    pub fn from_request(
        action: RequestAction,
        kind: RequestKind,
        req: &Request,
        request_hash: RequestHash,
    ) -> Self {
        Self {
            action,
            kind,
            nonce: req.nonce(),
            requester: *req.requester(),
            amount: req.amount(),
            deposit_address: req.deposit_address().to_owned(),
            txid: req.txid().to_owned(),
            timestamp: req.timestamp(),
            request_hash,
        }
    }

    pub fn name(&self) -> &'static str {
        match (self.kind, self.action) {
            (RequestKind::Mint, RequestAction::Added) => "MintRequestAdd",
            (RequestKind::Mint, RequestAction::Canceled) => "MintRequestCancel",
            (RequestKind::Mint, RequestAction::Confirmed) => "MintConfirmed",
            (RequestKind::Mint, RequestAction::Rejected) => "MintRejected",
            (RequestKind::Burn, RequestAction::Added) => "Burned",
            (RequestKind::Burn, RequestAction::Canceled) => "BurnCanceled",
            (RequestKind::Burn, RequestAction::Confirmed) => "BurnConfirmed",
            (RequestKind::Burn, RequestAction::Rejected) => "BurnRejected",
        }
    }
}

/// A persisted log with its position in the global log sequence.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct LogEntry {
    idx: u64,
    timestamp: u64,
    sender: Address,
    log: BridgeLog,
}

impl LogEntry {
    pub fn new(idx: u64, timestamp: u64, sender: Address, log: BridgeLog) -> Self {
        Self {
            idx,
            timestamp,
            sender,
            log,
        }
    }

    pub const fn idx(&self) -> u64 {
        self.idx
    }

    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub const fn sender(&self) -> &Address {
        &self.sender
    }

    pub const fn log(&self) -> &BridgeLog {
        &self.log
    }

    pub fn into_log(self) -> BridgeLog {
        self.log
    }
}
