//! Request ledger formatting implementations

use custody_bridge_types::{RequestHash, RequestKind};
use custody_stf::queries::RequestView;
use serde::Serialize;

use super::{
    helpers::{full_hex, porcelain_field, porcelain_optional},
    traits::Formattable,
};

/// A single request as displayed to the user
#[derive(Serialize)]
pub(crate) struct RequestInfo {
    #[serde(flatten)]
    pub(crate) request: RequestView,
}

impl Formattable for RequestInfo {
    fn format_porcelain(&self) -> String {
        let r = &self.request;
        let p = format!("{}_request", r.kind);
        [
            porcelain_field(&format!("{p}.nonce"), r.nonce),
            porcelain_field(&format!("{p}.requester"), full_hex(&r.requester)),
            porcelain_field(&format!("{p}.amount"), r.amount),
            porcelain_field(&format!("{p}.deposit_address"), &r.deposit_address),
            porcelain_field(&format!("{p}.txid"), &r.txid),
            porcelain_field(&format!("{p}.timestamp"), r.timestamp),
            porcelain_field(&format!("{p}.status"), &r.status),
            porcelain_field(&format!("{p}.request_hash"), format!("{:?}", r.request_hash)),
        ]
        .join("\n")
    }
}

/// Result of a hash lookup
#[derive(Serialize)]
pub(crate) struct RequestNonceInfo {
    pub(crate) kind: RequestKind,
    pub(crate) request_hash: RequestHash,
    pub(crate) nonce: Option<u64>,
}

impl Formattable for RequestNonceInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("request_nonce.kind", self.kind),
            porcelain_field(
                "request_nonce.request_hash",
                format!("{:?}", self.request_hash),
            ),
            porcelain_optional("request_nonce.nonce", self.nonce),
        ]
        .join("\n")
    }
}

/// Per-ledger counts
#[derive(Serialize)]
pub(crate) struct LedgerSummary {
    pub(crate) length: u64,
    pub(crate) pending: u64,
    pub(crate) approved: u64,
    pub(crate) rejected: u64,
    pub(crate) canceled: u64,
}

/// Summary of both request ledgers
#[derive(Serialize)]
pub(crate) struct RequestsSummaryInfo {
    pub(crate) mint: LedgerSummary,
    pub(crate) burn: LedgerSummary,
}

fn format_ledger(prefix: &str, s: &LedgerSummary) -> Vec<String> {
    vec![
        porcelain_field(&format!("{prefix}.length"), s.length),
        porcelain_field(&format!("{prefix}.pending"), s.pending),
        porcelain_field(&format!("{prefix}.approved"), s.approved),
        porcelain_field(&format!("{prefix}.rejected"), s.rejected),
        porcelain_field(&format!("{prefix}.canceled"), s.canceled),
    ]
}

impl Formattable for RequestsSummaryInfo {
    fn format_porcelain(&self) -> String {
        let mut output = format_ledger("requests_summary.mint", &self.mint);
        output.extend(format_ledger("requests_summary.burn", &self.burn));
        output.join("\n")
    }
}
