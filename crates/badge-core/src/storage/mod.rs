//! Byte-oriented file storage used by the state store and picture loader.
//!
//! The badge only ever needs a handful of whole-file operations, so the
//! [`Storage`] trait is deliberately small. Paths are absolute, `/`-separated
//! strings such as `/state/furry.json`.

pub mod memory;

pub use memory::MemoryStorage;

use core::fmt::Write;

use alloc::string::String;
use alloc::vec::Vec;
use thiserror_no_std::Error;

/// Directory holding one state file per profile.
pub const STATE_DIR: &str = "/state";

/// Backend error message, kept short so it fits on the stack.
pub type ErrorMessage = heapless::String<64>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("File or directory not found")]
    NotFound,
    #[error("Storage I/O error: {0}")]
    Io(ErrorMessage),
}

impl StorageError {
    /// Build an [`StorageError::Io`] from anything printable, truncating long
    /// messages instead of failing.
    pub fn io(message: impl core::fmt::Display) -> Self {
        StorageError::Io(truncated(message))
    }
}

/// Format `message` into an [`ErrorMessage`], cutting it at capacity.
pub(crate) fn truncated(message: impl core::fmt::Display) -> ErrorMessage {
    let mut text = ErrorMessage::new();
    write!(Truncating(&mut text), "{}", message).ok();
    text
}

/// Writer that drops whatever does not fit instead of failing the whole write.
struct Truncating<'a>(&'a mut ErrorMessage);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Whole-file storage operations consumed by the badge core.
pub trait Storage {
    /// Read the entire contents of a file.
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or truncate a file and write `contents` to it.
    ///
    /// Fails when the parent directory does not exist.
    fn write_file(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Whether a directory exists at `path`.
    fn dir_exists(&mut self, path: &str) -> bool;

    /// Create a single directory. The parent must already exist.
    fn create_dir(&mut self, path: &str) -> Result<(), StorageError>;

    /// Names (not full paths) of the files directly inside a directory.
    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, StorageError>;

    /// Delete a single file.
    fn remove_file(&mut self, path: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        (**self).read_file(path)
    }

    fn write_file(&mut self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        (**self).write_file(path, contents)
    }

    fn dir_exists(&mut self, path: &str) -> bool {
        (**self).dir_exists(path)
    }

    fn create_dir(&mut self, path: &str) -> Result<(), StorageError> {
        (**self).create_dir(path)
    }

    fn list_dir(&mut self, path: &str) -> Result<Vec<String>, StorageError> {
        (**self).list_dir(path)
    }

    fn remove_file(&mut self, path: &str) -> Result<(), StorageError> {
        (**self).remove_file(path)
    }
}

/// Path of the state file for a profile: `/state/<profile>.json`.
pub fn state_path(profile: &str) -> String {
    alloc::format!("{}/{}.json", STATE_DIR, profile)
}

/// Parent directory of an absolute path (`/` for top-level entries).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Join a directory and a file name with a single separator.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        alloc::format!("{}{}", dir, name)
    } else {
        alloc::format!("{}/{}", dir, name)
    }
}
