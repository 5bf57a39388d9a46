//! Uniform read/write interface over bridge state.

use custody_bridge_types::{Request, RequestHash, RequestKind};
use custody_primitives::Address;

use crate::{controller::ControllerState, members::MembersState, token::TokenState};

/// Access to every piece of bridge state a call may touch.
///
/// Implemented by the in-memory [`BridgeState`](crate::BridgeState) and by
/// [`WriteTrackingState`](crate::WriteTrackingState), which layers a
/// [`WriteBatch`](crate::WriteBatch) over a base.
pub trait StateAccessor {
    // ===== Singletons =====

    /// Address the bridge protocol acts as toward the controller and token.
    fn factory_address(&self) -> &Address;

    fn members(&self) -> &MembersState;

    fn members_mut(&mut self) -> &mut MembersState;

    fn controller(&self) -> &ControllerState;

    fn controller_mut(&mut self) -> &mut ControllerState;

    fn token(&self) -> &TokenState;

    fn token_mut(&mut self) -> &mut TokenState;

    // ===== Token balances =====

    fn balance_of(&self, holder: &Address) -> u64;

    fn set_balance(&mut self, holder: Address, amount: u64);

    fn allowance(&self, owner: &Address, spender: &Address) -> u64;

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: u64);

    // ===== Deposit address bindings =====

    fn custodian_deposit_address(&self, broker: &Address) -> Option<&str>;

    fn set_custodian_deposit_address(&mut self, broker: Address, deposit_address: String);

    fn broker_deposit_address(&self, broker: &Address) -> Option<&str>;

    fn set_broker_deposit_address(&mut self, broker: Address, deposit_address: String);

    // ===== Request ledgers =====

    /// Number of requests in a ledger, which is also the next nonce.
    fn request_count(&self, kind: RequestKind) -> u64;

    fn get_request(&self, kind: RequestKind, nonce: u64) -> Option<&Request>;

    /// Appends a request whose nonce must equal [`Self::request_count`].
    fn append_request(&mut self, kind: RequestKind, req: Request);

    /// Overwrites the request at `req.nonce()`.
    fn update_request(&mut self, kind: RequestKind, req: Request);

    fn request_nonce_by_hash(&self, kind: RequestKind, hash: &RequestHash) -> Option<u64>;

    fn index_request_hash(&mut self, kind: RequestKind, hash: RequestHash, nonce: u64);
}
