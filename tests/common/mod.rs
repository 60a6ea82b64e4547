#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use saver_tracker::{ConfigManager, JsonKeyValueStorage, LedgerStore, PersistenceBridge};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated base directory for one test.
pub fn test_base_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store and config manager backed by a fresh directory.
pub fn setup_test_env() -> (LedgerStore<JsonKeyValueStorage>, ConfigManager) {
    let base = test_base_dir();
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    let storage = JsonKeyValueStorage::in_dir(config_manager.data_dir(&Default::default()))
        .expect("create json storage");
    (LedgerStore::open(PersistenceBridge::new(storage)), config_manager)
}

pub fn reopen(store: &LedgerStore<JsonKeyValueStorage>) -> LedgerStore<JsonKeyValueStorage> {
    let storage = store.bridge().storage().clone();
    LedgerStore::open(PersistenceBridge::new(storage))
}
