use custody_db_types::DbError;
use custody_state::GenesisError;
use custody_stf::BridgeError;
use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    /// The call itself was rejected. Nothing was written.
    #[error("call rejected: {0}")]
    Bridge(#[from] BridgeError),

    #[error("db: {0}")]
    Db(#[from] DbError),

    #[error("genesis: {0}")]
    Genesis(#[from] GenesisError),

    #[error("bridge state not initialized")]
    NotInitialized,

    #[error("bridge state already initialized")]
    AlreadyInitialized,
}
