//! Atomic call execution.

use custody_bridge_types::BridgeLog;
use custody_state::{StateAccessor, WriteBatch, WriteTrackingState};

use crate::{
    call::{execute_call, BridgeCall, CallReturn},
    context::CallContext,
    error::BridgeResult,
    output::ExecOutput,
};

/// Everything a successful call produced.
#[derive(Debug)]
pub struct CallOutput {
    batch: WriteBatch,
    logs: Vec<BridgeLog>,
    ret: CallReturn,
}

impl CallOutput {
    pub fn batch(&self) -> &WriteBatch {
        &self.batch
    }

    pub fn logs(&self) -> &[BridgeLog] {
        &self.logs
    }

    pub fn ret(&self) -> CallReturn {
        self.ret
    }

    pub fn into_parts(self) -> (WriteBatch, Vec<BridgeLog>, CallReturn) {
        (self.batch, self.logs, self.ret)
    }
}

/// Executes `call` over a write-tracking layer on `base`.
///
/// `base` is never modified. On success the caller persists and applies the
/// returned batch. On failure there is nothing to undo.
pub fn process_call<S: StateAccessor>(
    base: &S,
    ctx: &CallContext,
    call: BridgeCall,
) -> BridgeResult<CallOutput> {
    let mut layer = WriteTrackingState::new(base);
    let mut out = ExecOutput::new_empty();
    let ret = execute_call(&mut layer, ctx, call, &mut out)?;
    Ok(CallOutput {
        batch: layer.into_batch(),
        logs: out.into_logs(),
        ret,
    })
}
