//! Bridge error taxonomy.

use custody_bridge_types::RequestStatus;
use custody_primitives::Address;
use thiserror::Error;

/// Caller lacks the role an operation requires.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("sender {0:?} is not the owner")]
    NotOwner(Address),

    #[error("sender {0:?} is not the custodian")]
    NotCustodian(Address),

    #[error("sender {0:?} is not a broker")]
    NotBroker(Address),

    #[error("sender {0:?} is not the bridge")]
    NotBridge(Address),

    #[error("sender {0:?} is not the requester")]
    NotRequester(Address),

    #[error("ownership cannot be renounced")]
    RenounceDisabled,
}

/// Malformed arguments.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("zero address")]
    ZeroAddress,

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("empty txid")]
    EmptyTxid,

    #[error("{field} longer than {max} bytes")]
    TooLong { field: &'static str, max: usize },

    #[error("empty deposit address")]
    EmptyDepositAddress,

    #[error("wrong deposit address")]
    DepositAddressMismatch,

    #[error("request hash is zero")]
    ZeroRequestHash,

    #[error("{0:?} is not a broker")]
    NotABroker(Address),

    #[error("broker {0:?} already registered")]
    BrokerAlreadyExists(Address),

    #[error("broker {0:?} not registered")]
    BrokerNotFound(Address),

    #[error("broker {0:?} has no burn deposit address set")]
    BrokerDepositAddressNotSet(Address),
}

/// The referenced request cannot take the requested transition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no request for the given hash")]
    RequestNotFound,

    #[error("request {nonce} is not pending (status {status})")]
    NotPending { nonce: u64, status: RequestStatus },

    #[error("given request hash does not match a pending request")]
    HashMismatch,
}

/// Wrapped token failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is paused")]
    Paused,

    #[error("token is not paused")]
    NotPaused,

    #[error("insufficient balance (have {have}, need {need})")]
    InsufficientBalance { have: u64, need: u64 },

    #[error("insufficient allowance (have {have}, need {need})")]
    InsufficientAllowance { have: u64, need: u64 },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("zero address")]
    ZeroAddress,

    #[error("sender {0:?} is not the token owner")]
    NotTokenOwner(Address),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("authorization: {0}")]
    Authorization(#[from] AuthError),

    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("state: {0}")]
    State(#[from] StateError),

    /// A collaborator rejected an action taken on behalf of a bridge operation.
    #[error("dependency: {0}")]
    Dependency(Box<BridgeError>),

    #[error("token: {0}")]
    Token(#[from] TokenError),
}

/// Coarse error category, for callers that only branch on the class.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Validation,
    State,
    Dependency,
    Token,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Authorization(_) => ErrorKind::Authorization,
            BridgeError::Validation(_) => ErrorKind::Validation,
            BridgeError::State(_) => ErrorKind::State,
            BridgeError::Dependency(_) => ErrorKind::Dependency,
            BridgeError::Token(_) => ErrorKind::Token,
        }
    }

    /// Wraps a collaborator failure.
    pub fn dependency(inner: BridgeError) -> Self {
        BridgeError::Dependency(Box::new(inner))
    }

    /// Innermost error, looking through dependency wrappers.
    pub fn root_cause(&self) -> &BridgeError {
        match self {
            BridgeError::Dependency(inner) => inner.root_cause(),
            other => other,
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
