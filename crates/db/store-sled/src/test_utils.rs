use std::sync::Arc;

use crate::{BridgeDBSled, SledDbConfig};

pub fn get_test_sled_db() -> sled::Db {
    sled::Config::new().temporary(true).open().unwrap()
}

pub fn get_test_sled_config() -> SledDbConfig {
    SledDbConfig::test()
}

pub fn get_test_bridge_db() -> Arc<BridgeDBSled> {
    let sdb = get_test_sled_db();
    let cnf = get_test_sled_config();
    BridgeDBSled::new(&sdb, cnf).map(Arc::new).unwrap()
}
