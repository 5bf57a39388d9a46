//! Log trail formatting implementations

use custody_bridge_types::LogEntry;
use serde::Serialize;

use super::{
    helpers::{full_hex, porcelain_field},
    traits::Formattable,
};

#[derive(Serialize)]
pub(crate) struct LogsInfo {
    pub(crate) total: u64,
    pub(crate) entries: Vec<LogEntry>,
}

/// `name sender=<hex> timestamp=<secs>`, shared with submit output.
pub(crate) fn format_log_line(entry: &LogEntry) -> String {
    format!(
        "{} sender={} timestamp={}",
        entry.log().name(),
        full_hex(entry.sender()),
        entry.timestamp()
    )
}

impl Formattable for LogsInfo {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("logs.total", self.total)];
        for entry in &self.entries {
            output.push(porcelain_field(
                &format!("logs.{}", entry.idx()),
                format_log_line(entry),
            ));
        }
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use custody_bridge_types::{BridgeLog, ControllerLog, TokenLog};
    use custody_primitives::Address;

    use super::*;

    #[test]
    fn test_logs_porcelain() {
        let owner = Address::repeat_byte(1);
        let info = LogsInfo {
            total: 9,
            entries: vec![
                LogEntry::new(7, 100, owner, BridgeLog::Token(TokenLog::Pause)),
                LogEntry::new(8, 100, owner, BridgeLog::Controller(ControllerLog::Paused)),
            ],
        };
        let out = info.format_porcelain();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "logs.total: 9");
        assert_eq!(
            lines[1],
            format!("logs.7: Pause sender={} timestamp=100", "01".repeat(20))
        );
        assert!(lines[2].starts_with("logs.8: Paused "));
    }
}
