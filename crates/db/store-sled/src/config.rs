use std::{fmt::Debug, sync::Arc, thread, time::Duration};

use custody_db_types::{DbError, DbResult};
use sled::{
    transaction::{ConflictableTransactionResult, TransactionError},
    Transactional,
};
use tracing::warn;

// Configuration constants
pub(crate) const DEFAULT_RETRY_COUNT: u16 = 3;
pub(crate) const DEFAULT_RETRY_DELAY_MS: u64 = 150;
pub(crate) const TEST_RETRY_DELAY_MS: u64 = 50; // Faster for tests

/// Delay schedule between transaction attempts.
pub trait Backoff: Debug + Send + Sync {
    /// Delay before the first retry.
    fn base_delay_ms(&self) -> u64;

    /// Delay before the retry following one that waited `curr` ms.
    fn next_delay_ms(&self, curr: u64) -> u64;
}

/// Waits the same amount before every retry.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBackoff {
    delay_ms: u64,
}

impl ConstantBackoff {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Backoff for ConstantBackoff {
    fn base_delay_ms(&self) -> u64 {
        self.delay_ms
    }

    fn next_delay_ms(&self, _curr: u64) -> u64 {
        self.delay_ms
    }
}

/// database operations configuration
#[derive(Debug, Clone)]
pub struct SledDbConfig {
    pub retry_count: u16,
    pub backoff: Arc<dyn Backoff>,
}

impl SledDbConfig {
    pub fn new(retry_count: u16, backoff: Arc<dyn Backoff>) -> Self {
        Self {
            retry_count,
            backoff,
        }
    }

    pub fn new_with_constant_backoff(retry_count: u16, delay: u64) -> Self {
        let const_backoff = ConstantBackoff::new(delay);
        Self {
            retry_count,
            backoff: Arc::new(const_backoff),
        }
    }

    /// Create production configuration with default values
    pub fn production() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY_MS)
    }

    /// Create test configuration with faster retry delays
    pub fn test() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, TEST_RETRY_DELAY_MS)
    }

    /// Execute a transaction with retry logic using this config's settings.
    ///
    /// Conflicts are retried by sled itself. Storage errors are retried here
    /// up to `retry_count` times. Aborts are returned as is.
    pub fn with_retry<T, F, R>(&self, trees: &T, f: F) -> DbResult<R>
    where
        T: Transactional<DbError> + ?Sized,
        F: Fn(&T::View) -> ConflictableTransactionResult<R, DbError>,
    {
        let mut delay = self.backoff.base_delay_ms();
        let mut attempt: u16 = 0;
        loop {
            match trees.transaction(&f) {
                Ok(res) => return Ok(res),
                Err(TransactionError::Abort(err)) => return Err(err),
                Err(TransactionError::Storage(err)) => {
                    if attempt >= self.retry_count {
                        return Err(DbError::Storage(err.to_string()));
                    }
                    attempt += 1;
                    warn!(%attempt, %err, "sled transaction failed, retrying");
                    thread::sleep(Duration::from_millis(delay));
                    delay = self.backoff.next_delay_ms(delay);
                }
            }
        }
    }
}
