//! RAM-backed [`Storage`] used by tests and by hosts without a filesystem.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{Storage, StorageError, parent_dir};

/// In-memory file tree.
///
/// Mirrors the semantics the badge relies on from a real filesystem: writes
/// fail when the parent directory is missing, and directories must be
/// created one level at a time. The root directory always exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (creating its parent chain) without going through the
    /// [`Storage`] checks. Handy for seeding assets.
    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        let mut dir = parent_dir(path);
        while dir != "/" {
            self.dirs.insert(dir.to_string());
            dir = parent_dir(dir);
        }
        self.files.insert(path.to_string(), contents.to_vec());
        self
    }

    /// Make every mutating operation fail, simulating a write-protected or
    /// full medium.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Raw file contents, if present.
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    fn has_dir(&self, path: &str) -> bool {
        path == "/" || self.dirs.contains(path)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.read_only {
            Err(StorageError::io("read-only medium"))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files.get(path).cloned().ok_or(StorageError::NotFound)
    }

    fn write_file(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        self.check_writable()?;
        if !self.has_dir(parent_dir(path)) {
            return Err(StorageError::NotFound);
        }
        self.files.insert(path.to_string(), contents.to_vec());
        Ok(())
    }

    fn dir_exists(&mut self, path: &str) -> bool {
        self.has_dir(path)
    }

    fn create_dir(&mut self, path: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        if !self.has_dir(parent_dir(path)) {
            return Err(StorageError::NotFound);
        }
        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, StorageError> {
        if !self.has_dir(path) {
            return Err(StorageError::NotFound);
        }
        Ok(self
            .files
            .keys()
            .filter(|file| parent_dir(file) == path)
            .filter_map(|file| file.rsplit('/').next())
            .map(ToString::to_string)
            .collect())
    }

    fn remove_file(&mut self, path: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_requires_parent_dir() {
        let mut storage = MemoryStorage::new();
        assert_eq!(
            storage.write_file("/state/a.json", b"{}"),
            Err(StorageError::NotFound)
        );

        storage.create_dir("/state").unwrap();
        storage.write_file("/state/a.json", b"{}").unwrap();
        assert_eq!(storage.read_file("/state/a.json").unwrap(), b"{}");
    }

    #[test]
    fn test_write_truncates() {
        let mut storage = MemoryStorage::new().with_file("/state/a.json", b"long contents");
        storage.write_file("/state/a.json", b"x").unwrap();
        assert_eq!(storage.file("/state/a.json"), Some(&b"x"[..]));
    }

    #[test]
    fn test_top_level_files_need_no_dir() {
        let mut storage = MemoryStorage::new();
        storage.write_file("/pfp.bin", &[1, 2, 3]).unwrap();
        assert!(storage.dir_exists("/"));
    }

    #[test]
    fn test_list_dir_only_direct_children() {
        let mut storage = MemoryStorage::new()
            .with_file("/state/a.json", b"1")
            .with_file("/state/b.json", b"2")
            .with_file("/pfp.bin", b"3");

        let names = storage.list_dir("/state").unwrap();
        assert_eq!(names, ["a.json", "b.json"]);
        assert_eq!(storage.list_dir("/missing"), Err(StorageError::NotFound));
    }

    #[test]
    fn test_read_only_rejects_mutation() {
        let mut storage = MemoryStorage::new().with_file("/state/a.json", b"1");
        storage.set_read_only(true);

        assert!(matches!(
            storage.write_file("/state/a.json", b"2"),
            Err(StorageError::Io(_))
        ));
        assert!(storage.create_dir("/other").is_err());
        assert!(storage.remove_file("/state/a.json").is_err());
        assert_eq!(storage.read_file("/state/a.json").unwrap(), b"1");
    }
}
