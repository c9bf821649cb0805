//! Loading and saving [`BadgeState`] through a [`Storage`] backend.

use log::{debug, error, info, warn};
use thiserror_no_std::Error;

use super::BadgeState;
use crate::config::BadgeConfig;
use crate::storage::{STATE_DIR, Storage, StorageError, join, state_path};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("Failed to serialize badge state")]
    Serialize,
    #[error("Failed to create state directory: {0}")]
    CreateDir(StorageError),
    #[error("Failed to write state file: {0}")]
    Write(StorageError),
}

/// Owns the storage backend and maps profiles to state files.
pub struct StateStore<S: Storage> {
    storage: S,
}

impl<S: Storage> StateStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the state for `config.profile`, reconciled against `config`.
    ///
    /// A missing or unreadable file is not an error: the badge starts from
    /// page 0 with every counter at zero.
    pub fn load(&mut self, config: &BadgeConfig) -> BadgeState {
        let path = state_path(config.profile());

        let mut state = match self.storage.read_file(&path) {
            Ok(bytes) => match serde_json::from_slice::<BadgeState>(&bytes) {
                Ok(state) => {
                    debug!("Loaded state from {}: {:?}", path, state);
                    state
                }
                Err(e) => {
                    warn!("Discarding unparsable state file {}: {}", path, e);
                    BadgeState::default()
                }
            },
            Err(StorageError::NotFound) => {
                info!("No state file at {}, starting fresh", path);
                BadgeState::default()
            }
            Err(e) => {
                warn!("Failed to read state file {}: {}", path, e);
                BadgeState::default()
            }
        };

        state.reconcile(config.counters(), config.page_count());
        state
    }

    /// Write `state` to the profile's file.
    ///
    /// If the write fails because `/state` is missing, the directory is
    /// created and the write retried once. Any further failure is returned.
    pub fn persist(&mut self, config: &BadgeConfig, state: &BadgeState) -> Result<(), PersistError> {
        let path = state_path(config.profile());
        let bytes = serde_json::to_vec(state).map_err(|_| PersistError::Serialize)?;

        let mut created_dir = false;
        loop {
            match self.storage.write_file(&path, &bytes) {
                Ok(()) => {
                    info!("Persisted state to {}", path);
                    return Ok(());
                }
                Err(e) if !created_dir && !self.storage.dir_exists(STATE_DIR) => {
                    warn!("Write to {} failed ({}), creating {}", path, e, STATE_DIR);
                    self.storage
                        .create_dir(STATE_DIR)
                        .map_err(PersistError::CreateDir)?;
                    created_dir = true;
                }
                Err(e) => {
                    error!("Failed to persist state to {}: {}", path, e);
                    return Err(PersistError::Write(e));
                }
            }
        }
    }

    /// Delete every file under `/state`, returning how many were removed.
    pub fn reset(&mut self) -> Result<usize, StorageError> {
        let names = match self.storage.list_dir(STATE_DIR) {
            Ok(names) => names,
            Err(StorageError::NotFound) => return Ok(0),
            Err(e) => return Err(e),
        };

        for name in &names {
            self.storage.remove_file(&join(STATE_DIR, name))?;
        }

        info!("Removed {} state file(s) from {}", names.len(), STATE_DIR);
        Ok(names.len())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CounterSpec;
    use crate::pages::{Page, StatusPage};
    use crate::storage::MemoryStorage;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    const FILE: &str = "/state/furry.json";

    fn config(pages: usize) -> BadgeConfig {
        BadgeConfig::new(
            "furry",
            "Noah",
            vec![
                CounterSpec::new("drinks", "Drinks"),
                CounterSpec::new("twinks", "Boys"),
                CounterSpec::new("boops", "Boops"),
            ],
            (0..pages).map(|_| Page::Status(StatusPage::new())).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_load_missing_file_gives_reconciled_default() {
        let mut store = StateStore::new(MemoryStorage::new());
        let state = store.load(&config(2));

        assert_eq!(state.page, 0);
        let entries: Vec<_> = state.counters.iter().collect();
        assert_eq!(entries, [("drinks", 0), ("twinks", 0), ("boops", 0)]);
    }

    #[test]
    fn test_load_corrupt_file_falls_back() {
        let storage = MemoryStorage::new().with_file(FILE, b"{not json");
        let mut store = StateStore::new(storage);
        let state = store.load(&config(2));
        assert_eq!(state.page, 0);
        assert_eq!(state.count("drinks"), 0);
    }

    #[test]
    fn test_load_clamps_stale_page() {
        let storage = MemoryStorage::new().with_file(FILE, br#"{"page":5,"counters":{}}"#);
        let mut store = StateStore::new(storage);
        assert_eq!(store.load(&config(2)).page, 1);
    }

    #[test]
    fn test_load_fills_new_counters() {
        let storage =
            MemoryStorage::new().with_file(FILE, br#"{"page":0,"counters":{"drinks":3}}"#);
        let mut store = StateStore::new(storage);
        let state = store.load(&config(2));

        let entries: Vec<_> = state.counters.iter().collect();
        assert_eq!(entries, [("drinks", 3), ("twinks", 0), ("boops", 0)]);
    }

    #[test]
    fn test_persist_creates_missing_directory() {
        let config = config(2);
        let mut store = StateStore::new(MemoryStorage::new());
        let mut state = store.load(&config);
        state.increment("drinks");

        store.persist(&config, &state).unwrap();

        assert_eq!(
            store.storage().file(FILE),
            Some(&br#"{"page":0,"counters":{"drinks":1,"twinks":0,"boops":0}}"#[..])
        );
    }

    #[test]
    fn test_persist_fails_once_directory_exists() {
        let config = config(1);
        let mut storage = MemoryStorage::new().with_file(FILE, b"{}");
        storage.set_read_only(true);
        let mut store = StateStore::new(storage);

        let result = store.persist(&config, &BadgeState::default());
        assert!(matches!(result, Err(PersistError::Write(StorageError::Io(_)))));
    }

    #[test]
    fn test_persist_reports_directory_creation_failure() {
        let config = config(1);
        let mut storage = MemoryStorage::new();
        storage.set_read_only(true);
        let mut store = StateStore::new(storage);

        let result = store.persist(&config, &BadgeState::default());
        assert!(matches!(result, Err(PersistError::CreateDir(_))));
    }

    /// Backend whose directory creation works but whose writes never do.
    #[derive(Default)]
    struct BrokenWrites {
        dir: bool,
        writes: usize,
        creates: usize,
    }

    impl Storage for BrokenWrites {
        fn read_file(&mut self, _path: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound)
        }

        fn write_file(&mut self, _path: &str, _contents: &[u8]) -> Result<(), StorageError> {
            self.writes += 1;
            Err(StorageError::NotFound)
        }

        fn dir_exists(&mut self, _path: &str) -> bool {
            self.dir
        }

        fn create_dir(&mut self, _path: &str) -> Result<(), StorageError> {
            self.creates += 1;
            self.dir = true;
            Ok(())
        }

        fn list_dir(&mut self, _path: &str) -> Result<Vec<String>, StorageError> {
            Ok(Vec::new())
        }

        fn remove_file(&mut self, _path: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_persist_retries_once_after_creating_directory() {
        let config = config(1);
        let mut store = StateStore::new(BrokenWrites::default());

        let result = store.persist(&config, &BadgeState::default());

        assert_eq!(result, Err(PersistError::Write(StorageError::NotFound)));
        assert_eq!(store.storage().writes, 2);
        assert_eq!(store.storage().creates, 1);
    }

    #[test]
    fn test_load_keeps_counts_above_u32() {
        let storage = MemoryStorage::new().with_file(
            FILE,
            br#"{"page":0,"counters":{"drinks":4294967296,"twinks":9,"boops":2}}"#,
        );
        let mut store = StateStore::new(storage);
        let state = store.load(&config(2));

        let entries: Vec<_> = state.counters.iter().collect();
        assert_eq!(entries, [("drinks", 4_294_967_296), ("twinks", 9), ("boops", 2)]);
    }

    #[test]
    fn test_reset_removes_all_state_files() {
        let storage = MemoryStorage::new()
            .with_file("/state/a.json", b"{}")
            .with_file("/state/b.json", b"{}")
            .with_file("/pfp.bin", b"keep");
        let mut store = StateStore::new(storage);

        assert_eq!(store.reset().unwrap(), 2);
        assert_eq!(store.storage().file("/state/a.json"), None);
        assert!(store.storage().file("/pfp.bin").is_some());
    }

    #[test]
    fn test_reset_without_state_dir() {
        let mut store = StateStore::new(MemoryStorage::new());
        assert_eq!(store.reset().unwrap(), 0);
    }

    proptest! {
        #[test]
        fn prop_persist_then_load_round_trips(
            page in 0usize..10,
            counts in proptest::collection::vec(any::<u64>(), 0..5),
        ) {
            let config = config(3);
            let mut state = BadgeState { page, ..Default::default() };
            let keys = ["drinks", "twinks", "boops", "old1", "old2"];
            for (key, count) in keys.iter().zip(&counts) {
                state.counters.set(key, *count);
            }

            let mut store = StateStore::new(MemoryStorage::new());
            store.persist(&config, &state).unwrap();
            let loaded = store.load(&config);

            let mut expected = state.clone();
            expected.reconcile(config.counters(), config.page_count());
            prop_assert_eq!(loaded, expected);
        }
    }
}
