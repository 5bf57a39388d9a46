//! Database interfaces for the custody bridge.

pub mod errors;
pub mod traits;

pub use errors::DbError;
pub use traits::BridgeDatabase;

pub type DbResult<T> = Result<T, DbError>;
