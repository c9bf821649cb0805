//! [`Storage`] over the host filesystem, rooted at a data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use badge_core::storage::{Storage, StorageError};

/// Maps badge paths such as `/state/furry.json` to `<root>/state/furry.json`.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

fn storage_error(e: io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::io(e),
    }
}

impl Storage for FsStorage {
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        fs::read(self.resolve(path)).map_err(storage_error)
    }

    fn write_file(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        fs::write(self.resolve(path), contents).map_err(storage_error)
    }

    fn dir_exists(&mut self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn create_dir(&mut self, path: &str) -> Result<(), StorageError> {
        fs::create_dir(self.resolve(path)).map_err(storage_error)
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve(path)).map_err(storage_error)? {
            let entry = entry.map_err(storage_error)?;
            if entry.file_type().map_err(storage_error)?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn remove_file(&mut self, path: &str) -> Result<(), StorageError> {
        fs::remove_file(self.resolve(path)).map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badge_core::storage::STATE_DIR;

    fn scratch(name: &str) -> FsStorage {
        let root = std::env::temp_dir().join(format!("badge-sim-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        FsStorage::new(root)
    }

    #[test]
    fn test_write_needs_parent_dir() {
        let mut storage = scratch("parent");
        assert_eq!(
            storage.write_file("/state/a.json", b"{}"),
            Err(StorageError::NotFound)
        );
        assert!(!storage.dir_exists(STATE_DIR));

        storage.create_dir(STATE_DIR).unwrap();
        storage.write_file("/state/a.json", b"{}").unwrap();
        assert_eq!(storage.read_file("/state/a.json").unwrap(), b"{}");

        fs::remove_dir_all(storage.root()).unwrap();
    }

    #[test]
    fn test_list_and_remove() {
        let mut storage = scratch("list");
        storage.create_dir(STATE_DIR).unwrap();
        storage.write_file("/state/b.json", b"1").unwrap();
        storage.write_file("/state/a.json", b"2").unwrap();

        assert_eq!(storage.list_dir(STATE_DIR).unwrap(), ["a.json", "b.json"]);
        storage.remove_file("/state/a.json").unwrap();
        assert_eq!(storage.list_dir(STATE_DIR).unwrap(), ["b.json"]);
        assert_eq!(storage.read_file("/state/a.json"), Err(StorageError::NotFound));

        fs::remove_dir_all(storage.root()).unwrap();
    }
}
