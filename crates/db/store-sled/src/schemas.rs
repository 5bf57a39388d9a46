use custody_bridge_types::{LogEntry, Request, RequestHash};
use custody_primitives::Address;
use custody_state::{ControllerState, MembersState, TokenState};

use crate::define_table;

define_table!(
    /// Identity the bridge protocol acts as.
    (FactoryAddressSchema) () => Address
);

define_table!(
    /// Owner, custodian and broker set.
    (MembersSchema) () => MembersState
);

define_table!(
    /// Supply controller record.
    (ControllerSchema) () => ControllerState
);

define_table!(
    /// Token metadata, supply and pause flag.
    (TokenSchema) () => TokenState
);

define_table!(
    /// Token balances by holder.
    (BalanceSchema) Address => u64
);

define_table!(
    /// Allowances by (owner, spender).
    (AllowanceSchema) (Address, Address) => u64
);

define_table!(
    /// Deposit address the custodian assigned to each broker.
    (CustodianDepositAddressSchema) Address => String
);

define_table!(
    /// Redemption address each broker registered for itself.
    (BrokerDepositAddressSchema) Address => String
);

define_table!(
    /// Mint requests by nonce.
    (MintRequestSchema) u64 => Request
);

define_table!(
    /// Burn requests by nonce.
    (BurnRequestSchema) u64 => Request
);

define_table!(
    /// Mint request hash index.
    (MintRequestHashSchema) RequestHash => u64
);

define_table!(
    /// Burn request hash index.
    (BurnRequestHashSchema) RequestHash => u64
);

define_table!(
    /// Log entries by index.
    (LogSchema) u64 => LogEntry
);
