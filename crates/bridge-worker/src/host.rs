use std::sync::Arc;

use custody_bridge_types::LogEntry;
use custody_db_types::BridgeDatabase;
use custody_state::{BridgeState, GenesisParams, StateAccessor};
use custody_stf::{process_call, BridgeCall, CallContext, CallReturn};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{HostError, HostResult};

/// What a committed call returned and logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub ret: CallReturn,
    pub logs: Vec<LogEntry>,
}

#[derive(Debug)]
struct HostInner {
    state: Option<BridgeState>,
    next_log_idx: u64,
}

/// Serializes calls against one bridge instance.
#[derive(Debug)]
pub struct BridgeHost<D> {
    db: Arc<D>,
    inner: Mutex<HostInner>,
}

impl<D: BridgeDatabase> BridgeHost<D> {
    /// Loads whatever state `db` holds. The host is usable for queries right
    /// away, and for calls once genesis exists.
    pub fn open(db: Arc<D>) -> HostResult<Self> {
        let state = db.load_state()?;
        let next_log_idx = db.log_count()?;
        if state.is_some() {
            info!(%next_log_idx, "loaded bridge state");
        }
        Ok(Self {
            db,
            inner: Mutex::new(HostInner {
                state,
                next_log_idx,
            }),
        })
    }

    pub fn db(&self) -> &Arc<D> {
        &self.db
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().state.is_some()
    }

    /// Builds the genesis state from `params` and persists it.
    pub fn init_genesis(&self, params: &GenesisParams) -> HostResult<()> {
        let mut inner = self.inner.lock();
        if inner.state.is_some() {
            return Err(HostError::AlreadyInitialized);
        }

        let state = params.build_state()?;
        self.db.put_genesis(&state)?;
        info!(factory = %state.factory_address(), "initialized bridge genesis");
        inner.state = Some(state);
        Ok(())
    }

    /// Executes, persists and applies one call.
    #[instrument(skip_all, fields(op = call.name(), sender = %ctx.sender()))]
    pub fn submit(&self, ctx: &CallContext, call: BridgeCall) -> HostResult<SubmitOutcome> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let state = inner.state.as_mut().ok_or(HostError::NotInitialized)?;

        let output = match process_call(&*state, ctx, call) {
            Ok(output) => output,
            Err(err) => {
                warn!(%err, kind = ?err.kind(), "call rejected");
                return Err(err.into());
            }
        };
        let (batch, logs, ret) = output.into_parts();

        let entries = logs
            .into_iter()
            .zip(inner.next_log_idx..)
            .map(|(log, idx)| LogEntry::new(idx, ctx.timestamp(), *ctx.sender(), log))
            .collect::<Vec<_>>();

        // Memory only moves forward once the database has the batch.
        self.db.commit_batch(&batch, &entries)?;
        batch.apply_to(state);
        inner.next_log_idx += entries.len() as u64;

        debug!(logs = entries.len(), next_log_idx = inner.next_log_idx, "call committed");
        Ok(SubmitOutcome { ret, logs: entries })
    }

    /// Runs `f` against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&BridgeState) -> R) -> HostResult<R> {
        let inner = self.inner.lock();
        let state = inner.state.as_ref().ok_or(HostError::NotInitialized)?;
        Ok(f(state))
    }

    pub fn log_count(&self) -> u64 {
        self.inner.lock().next_log_idx
    }

    pub fn get_logs_from(&self, start: u64, limit: usize) -> HostResult<Vec<LogEntry>> {
        Ok(self.db.get_logs_from(start, limit)?)
    }
}
