use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DbError {
    #[error("database already holds a genesis state")]
    AlreadyInitialized,

    #[error("database has not been initialized")]
    NotInitialized,

    #[error("missing {0} record")]
    MissingSingleton(&'static str),

    /// (table, expected, found)
    #[error("gap in {0} at index {1} (found {2})")]
    IndexGap(&'static str, u64, u64),

    #[error("tried to insert into {0} out-of-order index {1}")]
    OooInsert(&'static str, u64),

    #[error("codec error {0}")]
    CodecError(String),

    #[error("transaction error {0}")]
    TransactionError(String),

    #[error("storage error {0}")]
    Storage(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DbError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}
