//! Types shared by every layer of the custody bridge: requests, their content
//! hashes, and the logs emitted when state changes.

pub mod logs;
pub mod request;

pub use logs::{
    BridgeLog, ControllerLog, DepositAddressLog, LogEntry, MembersLog, RequestAction, RequestLog,
    TokenLog,
};
pub use request::{Request, RequestHash, RequestKind, RequestStatus, MAX_REQUEST_STRING_LEN};
