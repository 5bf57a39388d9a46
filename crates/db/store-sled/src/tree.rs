//! Typed views over sled trees, inside and outside transactions.

use std::marker::PhantomData;

use custody_db_types::{DbError, DbResult};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionalTree,
};

use crate::schema::{CodecError, KeyCodec, Schema, ValueCodec};

pub(crate) type TxResult<T> = ConflictableTransactionResult<T, DbError>;

pub(crate) fn codec_err(e: CodecError) -> DbError {
    DbError::CodecError(e.to_string())
}

pub(crate) fn sled_err(e: sled::Error) -> DbError {
    DbError::Storage(e.to_string())
}

pub(crate) fn tx_abort(e: DbError) -> ConflictableTransactionError<DbError> {
    ConflictableTransactionError::Abort(e)
}

fn codec_abort(e: CodecError) -> ConflictableTransactionError<DbError> {
    tx_abort(codec_err(e))
}

#[derive(Debug, Clone)]
pub(crate) struct SledTree<S: Schema> {
    inner: sled::Tree,
    _pd: PhantomData<S>,
}

impl<S: Schema> SledTree<S> {
    pub(crate) fn open(db: &sled::Db) -> DbResult<Self> {
        Ok(Self {
            inner: db.open_tree(S::TREE_NAME).map_err(sled_err)?,
            _pd: PhantomData,
        })
    }

    pub(crate) fn raw(&self) -> &sled::Tree {
        &self.inner
    }

    pub(crate) fn get(&self, key: &S::Key) -> DbResult<Option<S::Value>> {
        let k = key.encode_key().map_err(codec_err)?;
        self.inner
            .get(k)
            .map_err(sled_err)?
            .map(|v| <S::Value as ValueCodec<S>>::decode_value(&v).map_err(codec_err))
            .transpose()
    }

    /// Key of the last entry in byte order.
    pub(crate) fn last_key(&self) -> DbResult<Option<S::Key>> {
        self.inner
            .last()
            .map_err(sled_err)?
            .map(|(k, _)| S::Key::decode_key(&k).map_err(codec_err))
            .transpose()
    }

    /// All entries in key order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = DbResult<(S::Key, S::Value)>> + '_ {
        self.inner.iter().map(decode_entry::<S>)
    }

    /// Entries with keys at or after `start`, in key order.
    pub(crate) fn iter_from(
        &self,
        start: &S::Key,
    ) -> DbResult<impl Iterator<Item = DbResult<(S::Key, S::Value)>> + '_> {
        let k = start.encode_key().map_err(codec_err)?;
        Ok(self.inner.range(k..).map(decode_entry::<S>))
    }
}

fn decode_entry<S: Schema>(
    item: sled::Result<(sled::IVec, sled::IVec)>,
) -> DbResult<(S::Key, S::Value)> {
    let (k, v) = item.map_err(sled_err)?;
    let key = S::Key::decode_key(&k).map_err(codec_err)?;
    let value = <S::Value as ValueCodec<S>>::decode_value(&v).map_err(codec_err)?;
    Ok((key, value))
}

/// A tree as seen from inside a sled transaction.
pub(crate) struct TxTree<'a, S: Schema> {
    inner: &'a TransactionalTree,
    _pd: PhantomData<S>,
}

impl<'a, S: Schema> TxTree<'a, S> {
    pub(crate) fn new(inner: &'a TransactionalTree) -> Self {
        Self {
            inner,
            _pd: PhantomData,
        }
    }

    pub(crate) fn contains_key(&self, key: &S::Key) -> TxResult<bool> {
        let k = key.encode_key().map_err(codec_abort)?;
        Ok(self.inner.get(k)?.is_some())
    }

    pub(crate) fn insert(&self, key: &S::Key, value: &S::Value) -> TxResult<()> {
        let k = key.encode_key().map_err(codec_abort)?;
        let v = <S::Value as ValueCodec<S>>::encode_value(value).map_err(codec_abort)?;
        self.inner.insert(k, v)?;
        Ok(())
    }
}
