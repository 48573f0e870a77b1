//! # Storage Layer
//!
//! The ownership ledger is persisted as a single versioned envelope under
//! [`STORAGE_KEY`]. Raw I/O lives behind [`backend::StorageBackend`] so the
//! tracker can be exercised against memory in tests and against disk in the CLI.
//!
//! ## Failure Policy
//!
//! Storage is a convenience, never a requirement:
//! - A missing value loads as an empty ledger with no warning.
//! - An unreadable or malformed value loads as an empty ledger and reports a
//!   `StorageRead` warning.
//! - A failed write reports `StorageWrite`; the in-memory ledger is untouched.
//!
//! ## Hydrate Before Persist
//!
//! A store starts with its write guard armed. The first call to
//! [`TrackerStore::save`] is suppressed exactly once and every later call
//! writes. The guard exists so that an empty, not-yet-hydrated ledger can never
//! overwrite data that is still on its way into memory. [`TrackerStore::disarm_guard`]
//! drops a still-armed guard; import uses it so imported state is always written.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! └── nebula-collection-tracker.json   # { "version": 2, "owned": {...} }
//! ```

use crate::envelope::{self, SchemaVersion, STORAGE_KEY};
use crate::error::{NebulaError, Result};
use crate::ledger::Ledger;
use crate::sanitize::OwnershipMap;
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;

/// Result of reading persisted state.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Sanitized ownership payload (empty when nothing usable was stored).
    pub owned: OwnershipMap,
    pub version: Option<SchemaVersion>,
    /// Non-fatal `StorageRead` failure to surface as a warning.
    pub warning: Option<NebulaError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Swallowed by the hydrate-before-persist guard.
    Suppressed,
}

pub struct TrackerStore<B: StorageBackend> {
    backend: B,
    hydrated: bool,
    skip_next_write: bool,
}

impl<B: StorageBackend> TrackerStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            hydrated: false,
            skip_next_write: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location(STORAGE_KEY)
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn guard_armed(&self) -> bool {
        self.skip_next_write
    }

    pub fn load(&mut self) -> LoadReport {
        self.hydrated = true;
        let raw = match self.backend.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no saved tracker state");
                return LoadReport::default();
            }
            Err(e) => return Self::read_failure(e.to_string()),
        };

        match envelope::decode(&raw) {
            Ok(decoded) => {
                tracing::debug!(
                    entries = decoded.owned.len(),
                    version = ?decoded.version,
                    "loaded tracker state"
                );
                LoadReport {
                    owned: decoded.owned,
                    version: decoded.version,
                    warning: None,
                }
            }
            Err(e) => Self::read_failure(e.to_string()),
        }
    }

    fn read_failure(reason: String) -> LoadReport {
        tracing::warn!("failed to read tracker state: {reason}");
        LoadReport {
            warning: Some(NebulaError::StorageRead(reason)),
            ..Default::default()
        }
    }

    /// Writes the ledger as the latest envelope version.
    pub fn save(&mut self, ledger: &Ledger) -> Result<SaveOutcome> {
        self.save_mapping(&ledger.to_mapping())
    }

    /// Writes a sanitized mapping verbatim, for state not yet reconciled.
    pub fn save_mapping(&mut self, owned: &OwnershipMap) -> Result<SaveOutcome> {
        if self.skip_next_write {
            self.skip_next_write = false;
            tracing::debug!(hydrated = self.hydrated, "skipping first persist");
            return Ok(SaveOutcome::Suppressed);
        }

        let text = envelope::encode_mapping(owned)?;
        self.backend.write(STORAGE_KEY, &text).map_err(|e| {
            tracing::warn!("failed to persist tracker state: {e}");
            match e {
                NebulaError::StorageWrite(reason) => NebulaError::StorageWrite(reason),
                other => NebulaError::StorageWrite(other.to_string()),
            }
        })?;
        tracing::debug!(entries = owned.len(), "persisted tracker state");
        Ok(SaveOutcome::Written)
    }

    pub fn disarm_guard(&mut self) {
        self.skip_next_write = false;
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::Card;

    fn card(number: &str) -> Card {
        Card {
            number: Some(number.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn load_missing_is_empty_without_warning() {
        let mut store = TrackerStore::new(MemBackend::new());
        let report = store.load();
        assert!(report.owned.is_empty());
        assert!(report.warning.is_none());
        assert!(store.is_hydrated());
    }

    #[test]
    fn load_migrates_v1_payload() {
        let backend =
            MemBackend::with_value(STORAGE_KEY, r#"{"version":1,"owned":{"bp01-001":true}}"#);
        let mut store = TrackerStore::new(backend);
        let report = store.load();
        assert_eq!(report.version, Some(SchemaVersion::V1));
        assert_eq!(report.owned.get("BP01-001"), Some(&1));
    }

    #[test]
    fn load_garbage_reports_read_warning() {
        let backend = MemBackend::with_value(STORAGE_KEY, "{not json");
        let mut store = TrackerStore::new(backend);
        let report = store.load();
        assert!(report.owned.is_empty());
        assert!(matches!(report.warning, Some(NebulaError::StorageRead(_))));
    }

    #[test]
    fn load_without_owned_reports_read_warning() {
        let backend = MemBackend::with_value(STORAGE_KEY, r#"{"version":2}"#);
        let mut store = TrackerStore::new(backend);
        assert!(store.load().warning.is_some());
    }

    #[test]
    fn load_backend_failure_reports_read_warning() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let mut store = TrackerStore::new(backend);
        let report = store.load();
        assert!(matches!(report.warning, Some(NebulaError::StorageRead(_))));
    }

    #[test]
    fn first_save_is_suppressed_exactly_once() {
        let mut store = TrackerStore::new(MemBackend::new());
        let mut ledger = Ledger::new();
        ledger.set_count(&card("BP01-001"), 1);

        assert_eq!(store.save(&ledger).unwrap(), SaveOutcome::Suppressed);
        assert_eq!(store.backend().write_count(), 0);

        assert_eq!(store.save(&ledger).unwrap(), SaveOutcome::Written);
        assert_eq!(store.save(&ledger).unwrap(), SaveOutcome::Written);
        assert_eq!(store.backend().write_count(), 2);
    }

    #[test]
    fn suppressed_save_does_not_clobber_unhydrated_data() {
        let backend =
            MemBackend::with_value(STORAGE_KEY, r#"{"version":2,"owned":{"BP01-001":3}}"#);
        let mut store = TrackerStore::new(backend);

        store.save(&Ledger::new()).unwrap();
        let report = store.load();
        assert_eq!(report.owned.get("BP01-001"), Some(&3));
    }

    #[test]
    fn disarmed_guard_writes_immediately() {
        let mut store = TrackerStore::new(MemBackend::new());
        store.disarm_guard();
        assert_eq!(store.save(&Ledger::new()).unwrap(), SaveOutcome::Written);
    }

    #[test]
    fn save_writes_latest_version() {
        let mut store = TrackerStore::new(MemBackend::new());
        store.disarm_guard();
        let mut ledger = Ledger::new();
        ledger.set_count(&card("PR-107"), 3);
        store.save(&ledger).unwrap();

        let raw = store.backend().raw(STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["owned"]["PR-107"], 3);
    }

    #[test]
    fn save_mapping_keeps_uncapped_counts() {
        let mut store = TrackerStore::new(MemBackend::new());
        store.disarm_guard();
        store
            .save_mapping(&OwnershipMap::from([("5".to_string(), 30)]))
            .unwrap();

        let raw = store.backend().raw(STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["owned"]["5"], 30);
    }

    #[test]
    fn save_failure_is_storage_write() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut store = TrackerStore::new(backend);
        store.disarm_guard();
        let err = store.save(&Ledger::new()).unwrap_err();
        assert!(matches!(err, NebulaError::StorageWrite(_)));
    }
}
