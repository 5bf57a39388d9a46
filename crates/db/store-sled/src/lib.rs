//! Sled store for the custody bridge.

mod config;
pub mod db;
mod init;
pub mod macros;
mod schema;
mod schemas;
#[cfg(feature = "test_utils")]
pub mod test_utils;
mod tree;

use std::{path::Path, sync::Arc};

// Re-exports
pub use config::{Backoff, ConstantBackoff, SledDbConfig};
pub use db::BridgeDBSled;
pub use schema::CodecError;

pub use crate::init::open_sled_database;

pub const SLED_NAME: &str = "custody-bridge";

/// Opens the bridge database from datadir.
pub fn open_sled_bridge_db(
    datadir: &Path,
    dbname: &str,
    ops_config: SledDbConfig,
) -> anyhow::Result<Arc<BridgeDBSled>> {
    let sled_db = open_sled_database(datadir, dbname)?;
    BridgeDBSled::new(&sled_db, ops_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize sled bridge db: {}", e))
        .map(Arc::new)
}
