use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw key/value storage.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::TrackerStore`] handles the "what" (envelopes, migration, the
/// hydrate-before-persist guard).
pub trait StorageBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Where the value for `key` lives.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self, key: &str) -> PathBuf;
}
