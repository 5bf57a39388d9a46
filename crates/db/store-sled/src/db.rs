use std::collections::BTreeMap;

use custody_bridge_types::{LogEntry, Request, RequestHash, RequestKind};
use custody_db_types::{traits::BridgeDatabase, DbError, DbResult};
use custody_primitives::Address;
use custody_state::{BridgeState, LedgerDelta, RequestLedger, StateAccessor, WriteBatch};
use sled::transaction::TransactionalTree;
use tracing::debug;

use crate::{
    schema::Schema,
    schemas::*,
    tree::{tx_abort, SledTree, TxResult, TxTree},
    SledDbConfig,
};

/// Bridge state persisted across one sled tree per table.
#[derive(Debug)]
pub struct BridgeDBSled {
    factory_tree: SledTree<FactoryAddressSchema>,
    members_tree: SledTree<MembersSchema>,
    controller_tree: SledTree<ControllerSchema>,
    token_tree: SledTree<TokenSchema>,
    balance_tree: SledTree<BalanceSchema>,
    allowance_tree: SledTree<AllowanceSchema>,
    custodian_deposit_tree: SledTree<CustodianDepositAddressSchema>,
    broker_deposit_tree: SledTree<BrokerDepositAddressSchema>,
    mint_request_tree: SledTree<MintRequestSchema>,
    burn_request_tree: SledTree<BurnRequestSchema>,
    mint_hash_tree: SledTree<MintRequestHashSchema>,
    burn_hash_tree: SledTree<BurnRequestHashSchema>,
    log_tree: SledTree<LogSchema>,

    /// Every tree above, in [`BridgeTx::new`] order.
    all_trees: Vec<sled::Tree>,
    config: SledDbConfig,
}

impl BridgeDBSled {
    pub fn new(db: &sled::Db, config: SledDbConfig) -> DbResult<Self> {
        let factory_tree = SledTree::open(db)?;
        let members_tree = SledTree::open(db)?;
        let controller_tree = SledTree::open(db)?;
        let token_tree = SledTree::open(db)?;
        let balance_tree = SledTree::open(db)?;
        let allowance_tree = SledTree::open(db)?;
        let custodian_deposit_tree = SledTree::open(db)?;
        let broker_deposit_tree = SledTree::open(db)?;
        let mint_request_tree = SledTree::open(db)?;
        let burn_request_tree = SledTree::open(db)?;
        let mint_hash_tree = SledTree::open(db)?;
        let burn_hash_tree = SledTree::open(db)?;
        let log_tree = SledTree::open(db)?;

        let all_trees = vec![
            factory_tree.raw().clone(),
            members_tree.raw().clone(),
            controller_tree.raw().clone(),
            token_tree.raw().clone(),
            balance_tree.raw().clone(),
            allowance_tree.raw().clone(),
            custodian_deposit_tree.raw().clone(),
            broker_deposit_tree.raw().clone(),
            mint_request_tree.raw().clone(),
            burn_request_tree.raw().clone(),
            mint_hash_tree.raw().clone(),
            burn_hash_tree.raw().clone(),
            log_tree.raw().clone(),
        ];

        Ok(Self {
            factory_tree,
            members_tree,
            controller_tree,
            token_tree,
            balance_tree,
            allowance_tree,
            custodian_deposit_tree,
            broker_deposit_tree,
            mint_request_tree,
            burn_request_tree,
            mint_hash_tree,
            burn_hash_tree,
            log_tree,
            all_trees,
            config,
        })
    }
}

/// Typed handles to every table within one transaction.
struct BridgeTx<'a> {
    factory: TxTree<'a, FactoryAddressSchema>,
    members: TxTree<'a, MembersSchema>,
    controller: TxTree<'a, ControllerSchema>,
    token: TxTree<'a, TokenSchema>,
    balances: TxTree<'a, BalanceSchema>,
    allowances: TxTree<'a, AllowanceSchema>,
    custodian_deposit: TxTree<'a, CustodianDepositAddressSchema>,
    broker_deposit: TxTree<'a, BrokerDepositAddressSchema>,
    mint_requests: TxTree<'a, MintRequestSchema>,
    burn_requests: TxTree<'a, BurnRequestSchema>,
    mint_hashes: TxTree<'a, MintRequestHashSchema>,
    burn_hashes: TxTree<'a, BurnRequestHashSchema>,
    logs: TxTree<'a, LogSchema>,
}

impl<'a> BridgeTx<'a> {
    fn new(views: &'a [TransactionalTree]) -> TxResult<Self> {
        let [f, m, c, t, b, a, cd, bd, mr, br, mh, bh, l] = views else {
            return Err(tx_abort(DbError::TransactionError(format!(
                "expected 13 trees, got {}",
                views.len()
            ))));
        };
        Ok(Self {
            factory: TxTree::new(f),
            members: TxTree::new(m),
            controller: TxTree::new(c),
            token: TxTree::new(t),
            balances: TxTree::new(b),
            allowances: TxTree::new(a),
            custodian_deposit: TxTree::new(cd),
            broker_deposit: TxTree::new(bd),
            mint_requests: TxTree::new(mr),
            burn_requests: TxTree::new(br),
            mint_hashes: TxTree::new(mh),
            burn_hashes: TxTree::new(bh),
            logs: TxTree::new(l),
        })
    }

    fn put_balances(&self, balances: &BTreeMap<Address, u64>) -> TxResult<()> {
        for (holder, amount) in balances {
            self.balances.insert(holder, amount)?;
        }
        Ok(())
    }

    fn put_allowances(
        &self,
        allowances: &BTreeMap<(Address, Address), u64>,
    ) -> TxResult<()> {
        for (key, amount) in allowances {
            self.allowances.insert(key, amount)?;
        }
        Ok(())
    }

    fn put_deposit_addresses(
        &self,
        custodian: &BTreeMap<Address, String>,
        broker: &BTreeMap<Address, String>,
    ) -> TxResult<()> {
        for (b, addr) in custodian {
            self.custodian_deposit.insert(b, addr)?;
        }
        for (b, addr) in broker {
            self.broker_deposit.insert(b, addr)?;
        }
        Ok(())
    }

    fn put_ledger_delta(&self, kind: RequestKind, delta: &LedgerDelta) -> TxResult<()> {
        match kind {
            RequestKind::Mint => write_ledger_delta(&self.mint_requests, &self.mint_hashes, delta),
            RequestKind::Burn => write_ledger_delta(&self.burn_requests, &self.burn_hashes, delta),
        }
    }

    fn put_ledger(&self, kind: RequestKind, ledger: &RequestLedger) -> TxResult<()> {
        match kind {
            RequestKind::Mint => write_ledger(&self.mint_requests, &self.mint_hashes, ledger),
            RequestKind::Burn => write_ledger(&self.burn_requests, &self.burn_hashes, ledger),
        }
    }
}

/// Checks that `idx` extends a dense sequence of `u64` keys.
fn check_append<S: Schema<Key = u64>>(tree: &TxTree<'_, S>, idx: u64) -> TxResult<()> {
    let occupied = tree.contains_key(&idx)?;
    let prev_missing = idx > 0 && !tree.contains_key(&(idx - 1))?;
    if occupied || prev_missing {
        return Err(tx_abort(DbError::OooInsert(S::TREE_NAME, idx)));
    }
    Ok(())
}

fn write_ledger_delta<R, H>(
    requests: &TxTree<'_, R>,
    hashes: &TxTree<'_, H>,
    delta: &LedgerDelta,
) -> TxResult<()>
where
    R: Schema<Key = u64, Value = Request>,
    H: Schema<Key = RequestHash, Value = u64>,
{
    for (nonce, req) in delta.updated() {
        if !requests.contains_key(nonce)? {
            return Err(tx_abort(DbError::OooInsert(R::TREE_NAME, *nonce)));
        }
        requests.insert(nonce, req)?;
    }
    for req in delta.appended() {
        check_append(requests, req.nonce())?;
        requests.insert(&req.nonce(), req)?;
    }
    for (hash, nonce) in delta.hash_index() {
        hashes.insert(hash, nonce)?;
    }
    Ok(())
}

fn write_ledger<R, H>(
    requests: &TxTree<'_, R>,
    hashes: &TxTree<'_, H>,
    ledger: &RequestLedger,
) -> TxResult<()>
where
    R: Schema<Key = u64, Value = Request>,
    H: Schema<Key = RequestHash, Value = u64>,
{
    for req in ledger.requests() {
        requests.insert(&req.nonce(), req)?;
    }
    for (hash, nonce) in ledger.hash_index() {
        hashes.insert(hash, nonce)?;
    }
    Ok(())
}

/// Reads a ledger back, checking nonces are dense from zero.
fn load_ledger<R, H>(requests: &SledTree<R>, hashes: &SledTree<H>) -> DbResult<RequestLedger>
where
    R: Schema<Key = u64, Value = Request>,
    H: Schema<Key = RequestHash, Value = u64>,
{
    let mut reqs = Vec::new();
    for (expected, entry) in (0u64..).zip(requests.iter()) {
        let (nonce, req) = entry?;
        if nonce != expected || req.nonce() != expected {
            return Err(DbError::IndexGap(R::TREE_NAME, expected, nonce));
        }
        reqs.push(req);
    }
    let hash_index = hashes.iter().collect::<DbResult<BTreeMap<_, _>>>()?;
    Ok(RequestLedger::from_parts(reqs, hash_index))
}

impl BridgeDatabase for BridgeDBSled {
    fn put_genesis(&self, state: &BridgeState) -> DbResult<()> {
        self.config.with_retry(&self.all_trees[..], |views| {
            let tx = BridgeTx::new(views)?;
            if tx.factory.contains_key(&())? {
                return Err(tx_abort(DbError::AlreadyInitialized));
            }

            tx.factory.insert(&(), state.factory_address())?;
            tx.members.insert(&(), state.members())?;
            tx.controller.insert(&(), state.controller())?;
            tx.token.insert(&(), state.token())?;
            tx.put_balances(state.balances())?;
            tx.put_allowances(state.allowances())?;
            tx.put_deposit_addresses(
                state.custodian_deposit_addresses(),
                state.broker_deposit_addresses(),
            )?;
            tx.put_ledger(RequestKind::Mint, state.ledger(RequestKind::Mint))?;
            tx.put_ledger(RequestKind::Burn, state.ledger(RequestKind::Burn))?;
            Ok(())
        })?;

        debug!(factory = %state.factory_address(), "wrote genesis state");
        Ok(())
    }

    fn load_state(&self) -> DbResult<Option<BridgeState>> {
        let Some(factory_address) = self.factory_tree.get(&())? else {
            return Ok(None);
        };

        let members = self
            .members_tree
            .get(&())?
            .ok_or(DbError::MissingSingleton(MembersSchema::TREE_NAME))?;
        let controller = self
            .controller_tree
            .get(&())?
            .ok_or(DbError::MissingSingleton(ControllerSchema::TREE_NAME))?;
        let token = self
            .token_tree
            .get(&())?
            .ok_or(DbError::MissingSingleton(TokenSchema::TREE_NAME))?;

        let balances = self.balance_tree.iter().collect::<DbResult<_>>()?;
        let allowances = self.allowance_tree.iter().collect::<DbResult<_>>()?;
        let custodian_deposits = self.custodian_deposit_tree.iter().collect::<DbResult<_>>()?;
        let broker_deposits = self.broker_deposit_tree.iter().collect::<DbResult<_>>()?;
        let mint_requests = load_ledger(&self.mint_request_tree, &self.mint_hash_tree)?;
        let burn_requests = load_ledger(&self.burn_request_tree, &self.burn_hash_tree)?;

        Ok(Some(BridgeState::from_parts(
            factory_address,
            members,
            controller,
            token,
            balances,
            allowances,
            custodian_deposits,
            broker_deposits,
            mint_requests,
            burn_requests,
        )))
    }

    fn commit_batch(&self, batch: &WriteBatch, logs: &[LogEntry]) -> DbResult<()> {
        self.config.with_retry(&self.all_trees[..], |views| {
            let tx = BridgeTx::new(views)?;
            if !tx.factory.contains_key(&())? {
                return Err(tx_abort(DbError::NotInitialized));
            }

            if let Some(members) = batch.members() {
                tx.members.insert(&(), members)?;
            }
            if let Some(controller) = batch.controller() {
                tx.controller.insert(&(), controller)?;
            }
            if let Some(token) = batch.token() {
                tx.token.insert(&(), token)?;
            }
            tx.put_balances(batch.balances())?;
            tx.put_allowances(batch.allowances())?;
            tx.put_deposit_addresses(
                batch.custodian_deposit_addresses(),
                batch.broker_deposit_addresses(),
            )?;
            tx.put_ledger_delta(RequestKind::Mint, batch.ledger(RequestKind::Mint))?;
            tx.put_ledger_delta(RequestKind::Burn, batch.ledger(RequestKind::Burn))?;

            for entry in logs {
                check_append(&tx.logs, entry.idx())?;
                tx.logs.insert(&entry.idx(), entry)?;
            }
            Ok(())
        })?;

        debug!(logs = logs.len(), "committed write batch");
        Ok(())
    }

    fn get_log(&self, idx: u64) -> DbResult<Option<LogEntry>> {
        self.log_tree.get(&idx)
    }

    fn get_logs_from(&self, start: u64, limit: usize) -> DbResult<Vec<LogEntry>> {
        self.log_tree
            .iter_from(&start)?
            .take(limit)
            .map(|entry| entry.map(|(_, log)| log))
            .collect()
    }

    fn log_count(&self) -> DbResult<u64> {
        Ok(self.log_tree.last_key()?.map(|idx| idx + 1).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use custody_bridge_types::{BridgeLog, MembersLog, RequestStatus};
    use custody_state::{test_utils::*, WriteTrackingState};

    use super::*;

    fn setup_db() -> BridgeDBSled {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let config = SledDbConfig::new_with_constant_backoff(3, 10);
        BridgeDBSled::new(&db, config).unwrap()
    }

    fn pending(nonce: u64) -> Request {
        Request::new_pending(
            broker(0),
            100 + nonce,
            "bc1q-deposit".to_owned(),
            format!("tx-{nonce}"),
            nonce,
            1_700_000_000 + nonce,
        )
    }

    /// Builds a batch over `base` that appends the next mint request and
    /// credits `outsider()`.
    fn append_batch(base: &BridgeState) -> WriteBatch {
        let mut ws = WriteTrackingState::new(base);
        let req = pending(ws.request_count(RequestKind::Mint));
        let hash = req.compute_hash();
        ws.index_request_hash(RequestKind::Mint, hash, req.nonce());
        ws.append_request(RequestKind::Mint, req);
        let bal = ws.balance_of(&outsider());
        ws.set_balance(outsider(), bal + 7);
        ws.into_batch()
    }

    fn log(idx: u64) -> LogEntry {
        LogEntry::new(
            idx,
            1_700_000_000,
            owner(),
            BridgeLog::Members(MembersLog::BrokerAdded { broker: broker(2) }),
        )
    }

    #[test]
    fn test_load_before_genesis() {
        let db = setup_db();
        assert_eq!(db.load_state().unwrap(), None);
        assert_eq!(db.log_count().unwrap(), 0);
    }

    #[test]
    fn test_genesis_roundtrip() {
        let db = setup_db();
        let state = genesis_state();
        db.put_genesis(&state).unwrap();
        assert_eq!(db.load_state().unwrap(), Some(state));
    }

    #[test]
    fn test_genesis_refuses_reinit() {
        let db = setup_db();
        db.put_genesis(&genesis_state()).unwrap();
        let res = db.put_genesis(&genesis_state());
        assert!(matches!(res, Err(DbError::AlreadyInitialized)));
    }

    #[test]
    fn test_commit_requires_genesis() {
        let db = setup_db();
        let res = db.commit_batch(&WriteBatch::new(), &[]);
        assert!(matches!(res, Err(DbError::NotInitialized)));
    }

    #[test]
    fn test_commit_matches_in_memory_apply() {
        let db = setup_db();
        let mut state = genesis_state();
        db.put_genesis(&state).unwrap();

        for _ in 0..3 {
            let batch = append_batch(&state);
            db.commit_batch(&batch, &[]).unwrap();
            batch.apply_to(&mut state);
        }

        // Update an existing request in place.
        let mut ws = WriteTrackingState::new(&state);
        let mut req = ws.get_request(RequestKind::Mint, 1).cloned().unwrap();
        req.set_status(RequestStatus::Canceled);
        ws.update_request(RequestKind::Mint, req);
        let batch = ws.into_batch();
        db.commit_batch(&batch, &[]).unwrap();
        batch.apply_to(&mut state);

        let loaded = db.load_state().unwrap().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.request_count(RequestKind::Mint), 3);
        assert_eq!(loaded.balance_of(&outsider()), 21);
    }

    #[test]
    fn test_out_of_order_append_writes_nothing() {
        let db = setup_db();
        let genesis = genesis_state();
        db.put_genesis(&genesis).unwrap();

        // Advance a private copy so the next batch appends nonce 1 while the
        // database still has no nonce 0.
        let mut ahead = genesis.clone();
        append_batch(&ahead).apply_to(&mut ahead);
        let batch = append_batch(&ahead);

        let res = db.commit_batch(&batch, &[log(0)]);
        assert!(matches!(res, Err(DbError::OooInsert(_, 1))));
        assert_eq!(db.load_state().unwrap(), Some(genesis));
        assert_eq!(db.log_count().unwrap(), 0);
    }

    #[test]
    fn test_log_ranges() {
        let db = setup_db();
        db.put_genesis(&genesis_state()).unwrap();

        let logs: Vec<_> = (0..5).map(log).collect();
        db.commit_batch(&WriteBatch::new(), &logs[..2]).unwrap();
        db.commit_batch(&WriteBatch::new(), &logs[2..]).unwrap();

        assert_eq!(db.log_count().unwrap(), 5);
        assert_eq!(db.get_log(3).unwrap(), Some(logs[3].clone()));
        assert_eq!(db.get_log(5).unwrap(), None);
        assert_eq!(db.get_logs_from(1, 2).unwrap(), logs[1..3].to_vec());
        assert_eq!(db.get_logs_from(4, 10).unwrap(), logs[4..].to_vec());
        assert!(db.get_logs_from(9, 10).unwrap().is_empty());
    }

    #[test]
    fn test_log_gap_rejected() {
        let db = setup_db();
        db.put_genesis(&genesis_state()).unwrap();
        db.commit_batch(&WriteBatch::new(), &[log(0)]).unwrap();

        let res = db.commit_batch(&WriteBatch::new(), &[log(2)]);
        assert!(matches!(res, Err(DbError::OooInsert(_, 2))));
        let res = db.commit_batch(&WriteBatch::new(), &[log(0)]);
        assert!(matches!(res, Err(DbError::OooInsert(_, 0))));
    }
}
