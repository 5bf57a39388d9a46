//! Trait definitions for low level database interfaces.

use custody_bridge_types::LogEntry;
use custody_state::{BridgeState, WriteBatch};

use crate::DbResult;

/// Durable storage for bridge state and its log trail.
///
/// Operations are NOT VALIDATED at this level. Callers commit only batches
/// produced by successful calls.
pub trait BridgeDatabase: Send + Sync + 'static {
    /// Writes the initial state. Fails with
    /// [`DbError::AlreadyInitialized`](crate::DbError::AlreadyInitialized) if a
    /// state is already present.
    fn put_genesis(&self, state: &BridgeState) -> DbResult<()>;

    /// Reassembles the full state, or `None` if genesis was never written.
    fn load_state(&self) -> DbResult<Option<BridgeState>>;

    /// Persists every write in `batch` together with `logs` in a single
    /// transaction. Log indices must continue the existing sequence.
    fn commit_batch(&self, batch: &WriteBatch, logs: &[LogEntry]) -> DbResult<()>;

    fn get_log(&self, idx: u64) -> DbResult<Option<LogEntry>>;

    /// Gets up to `limit` logs starting at `start`, in index order.
    fn get_logs_from(&self, start: u64, limit: usize) -> DbResult<Vec<LogEntry>>;

    /// Number of logs stored, which is also the next log index.
    fn log_count(&self) -> DbResult<u64>;
}
