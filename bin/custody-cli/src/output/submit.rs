//! Call result formatting implementations

use custody_bridge_types::LogEntry;
use custody_stf::CallReturn;
use serde::Serialize;

use super::{helpers::porcelain_field, logs::format_log_line, traits::Formattable};

#[derive(Serialize)]
pub(crate) struct SubmitInfo {
    pub(crate) op: &'static str,
    pub(crate) ret: CallReturn,
    pub(crate) logs: Vec<LogEntry>,
}

impl Formattable for SubmitInfo {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("submit.op", self.op)];
        if let CallReturn::Request {
            nonce,
            request_hash,
        } = self.ret
        {
            output.push(porcelain_field("submit.nonce", nonce));
            output.push(porcelain_field(
                "submit.request_hash",
                format!("{request_hash:?}"),
            ));
        }
        for entry in &self.logs {
            output.push(porcelain_field(
                &format!("submit.logs.{}", entry.idx()),
                format_log_line(entry),
            ));
        }
        output.join("\n")
    }
}
