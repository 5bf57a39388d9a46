//! Mint and burn requests.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use custody_primitives::{hash, impl_buf_wrapper, Address, Buf32};
use serde::{Deserialize, Serialize};

/// Longest deposit address or txid a request may carry, in bytes.
pub const MAX_REQUEST_STRING_LEN: usize = 256;

/// Content digest of a [`Request`], used as its external handle.
#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RequestHash(Buf32);

impl_buf_wrapper!(RequestHash, Buf32, 32);

/// Which of the two ledgers a request lives in.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Mint,
    Burn,
}

impl RequestKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Mint => "mint",
            RequestKind::Burn => "burn",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a request. Every status other than `Pending` is
/// terminal.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Canceled,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Human-readable status string exposed by the read accessors.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Canceled => "canceled",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mint or burn request as stored in its ledger.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Request {
    /// Broker that created the request.
    requester: Address,

    /// Quantity of the asset/token.
    amount: u64,

    /// Address on the foreign network. The custodian's per-broker address for
    /// mints, the broker's redemption address for burns.
    deposit_address: String,

    /// Foreign-chain transaction id. Empty for burns until confirmed.
    txid: String,

    /// Position in the ledger.
    nonce: u64,

    /// Creation time in seconds. Advisory only.
    timestamp: u64,

    status: RequestStatus,
}

impl Request {
    /// Creates a fresh pending request.
    pub fn new_pending(
        requester: Address,
        amount: u64,
        deposit_address: String,
        txid: String,
        nonce: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            requester,
            amount,
            deposit_address,
            txid,
            nonce,
            timestamp,
            status: RequestStatus::Pending,
        }
    }

    pub const fn requester(&self) -> &Address {
        &self.requester
    }

    pub const fn amount(&self) -> u64 {
        self.amount
    }

    pub fn deposit_address(&self) -> &str {
        &self.deposit_address
    }

    pub fn txid(&self) -> &str {
        &self.txid
    }

    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    pub fn set_txid(&mut self, txid: String) {
        self.txid = txid;
    }

    /// Computes the content hash over the request's fixed fields.
    ///
    /// The status is not part of the preimage.
    pub fn compute_hash(&self) -> RequestHash {
        let preimage = encode_hash_preimage(
            &self.requester,
            self.amount,
            &self.deposit_address,
            &self.txid,
            self.nonce,
            self.timestamp,
        );
        RequestHash::from(hash::raw(&preimage))
    }
}

/// Canonical preimage: the Borsh encoding of
/// `(requester, amount, deposit_address, txid, nonce, timestamp)`.
fn encode_hash_preimage(
    requester: &Address,
    amount: u64,
    deposit_address: &str,
    txid: &str,
    nonce: u64,
    timestamp: u64,
) -> Vec<u8> {
    borsh::to_vec(&(requester, amount, deposit_address, txid, nonce, timestamp))
        .expect("request strings are capped at MAX_REQUEST_STRING_LEN bytes")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample_request() -> Request {
        Request::new_pending(
            Address::repeat_byte(1),
            100,
            "bc1qdeposit".to_owned(),
            "tx1".to_owned(),
            0,
            1_700_000_000,
        )
    }

    #[test]
    fn test_preimage_matches_borsh_tuple() {
        let req = sample_request();
        let preimage = encode_hash_preimage(
            req.requester(),
            req.amount(),
            req.deposit_address(),
            req.txid(),
            req.nonce(),
            req.timestamp(),
        );
        let expected = borsh::to_vec(&(
            *req.requester(),
            req.amount(),
            req.deposit_address().to_owned(),
            req.txid().to_owned(),
            req.nonce(),
            req.timestamp(),
        ))
        .unwrap();
        assert_eq!(preimage, expected);
    }

    #[test]
    fn test_hash_ignores_status() {
        let mut req = sample_request();
        let before = req.compute_hash();
        req.set_status(RequestStatus::Approved);
        assert_eq!(req.compute_hash(), before);
    }

    #[test]
    fn test_hash_changes_with_txid() {
        let mut req = sample_request();
        let before = req.compute_hash();
        req.set_txid("tx2".to_owned());
        assert_ne!(req.compute_hash(), before);
    }

    #[test]
    fn test_string_boundaries_are_unambiguous() {
        // Moving a character between the two string fields must change the hash.
        let a = Request::new_pending(Address::repeat_byte(1), 1, "ab".into(), "c".into(), 0, 0);
        let b = Request::new_pending(Address::repeat_byte(1), 1, "a".into(), "bc".into(), 0, 0);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(RequestStatus::Pending.as_str(), "pending");
        assert_eq!(RequestStatus::Canceled.as_str(), "canceled");
        assert_eq!(RequestStatus::Approved.as_str(), "approved");
        assert_eq!(RequestStatus::Rejected.as_str(), "rejected");
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    proptest! {
        #[test]
        fn proptest_hash_binds_every_field(
            amount in any::<u64>(),
            nonce in any::<u64>(),
            timestamp in any::<u64>(),
            deposit in "[a-z0-9]{1,40}",
            txid in "[a-f0-9]{0,64}",
        ) {
            let base = Request::new_pending(
                Address::repeat_byte(9), amount, deposit.clone(), txid.clone(), nonce, timestamp,
            );
            let h = base.compute_hash();

            let other_requester = Request::new_pending(
                Address::repeat_byte(8), amount, deposit.clone(), txid.clone(), nonce, timestamp,
            );
            prop_assert_ne!(other_requester.compute_hash(), h);

            let other_amount = Request::new_pending(
                Address::repeat_byte(9), amount.wrapping_add(1), deposit.clone(), txid.clone(),
                nonce, timestamp,
            );
            prop_assert_ne!(other_amount.compute_hash(), h);

            let other_nonce = Request::new_pending(
                Address::repeat_byte(9), amount, deposit.clone(), txid.clone(),
                nonce.wrapping_add(1), timestamp,
            );
            prop_assert_ne!(other_nonce.compute_hash(), h);

            let other_ts = Request::new_pending(
                Address::repeat_byte(9), amount, deposit, txid, nonce, timestamp.wrapping_add(1),
            );
            prop_assert_ne!(other_ts.compute_hash(), h);
        }
    }
}
