//! Output tracking structures.

use custody_bridge_types::BridgeLog;

/// Collects the logs a call emits.
///
/// Logs are only meaningful if the call succeeds, the host discards the buffer
/// together with the write batch otherwise.
#[derive(Clone, Debug, Default)]
pub struct ExecOutput {
    logs: Vec<BridgeLog>,
}

impl ExecOutput {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn emit_log(&mut self, log: impl Into<BridgeLog>) {
        self.logs.push(log.into());
    }

    pub fn logs(&self) -> &[BridgeLog] {
        &self.logs
    }

    pub fn into_logs(self) -> Vec<BridgeLog> {
        self.logs
    }
}
