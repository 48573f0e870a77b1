//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all nebula operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Fetches the catalog lazily**, once per session, for commands that need it
//! - **Collects storage warnings** from the tracker into the returned messages
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Terminal I/O**: no stdout, stderr, or formatting
//!
//! ## The Catalog Fetch
//!
//! Commands that work on the checklist (`checklist`, `mark`, `group`,
//! `export_image`) fetch the full catalog the first time they run and attach it to
//! the tracker, which reconciles the ledger against it. A failed fetch is
//! remembered for the rest of the session: catalog views fail with the same
//! `Remote` error and the ledger keeps its hydrated state.
//!
//! `status` and `import` use the catalog when they can get it and carry on
//! without it otherwise. `export` never needs it. Browsing (`cards`, `card`,
//! `stats`) queries the catalog directly.
//!
//! ## Generic Over Storage and Catalog
//!
//! `NebulaApi<B: StorageBackend, C: CardCatalog>`:
//! - Production: `NebulaApi<FsBackend, CatalogSource>`
//! - Testing: `NebulaApi<MemBackend, StaticCatalog>`

use crate::catalog::{CardCatalog, CardFilter};
use crate::checklist::OwnershipFilter;
use crate::commands::{self, helpers, CmdMessage, CmdResult, NebulaPaths};
use crate::config::NebulaConfig;
use crate::error::{NebulaError, Result};
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;
use std::path::Path;

pub use crate::commands::cards::CardQuery;
pub use crate::commands::mark::MarkAction;

enum CatalogState {
    NotFetched,
    Loaded,
    Failed(String),
}

pub struct NebulaApi<B: StorageBackend, C: CardCatalog> {
    tracker: Tracker<B>,
    catalog: C,
    catalog_state: CatalogState,
    paths: NebulaPaths,
    config: NebulaConfig,
}

impl<B: StorageBackend, C: CardCatalog> NebulaApi<B, C> {
    pub fn new(tracker: Tracker<B>, catalog: C, paths: NebulaPaths, config: NebulaConfig) -> Self {
        Self {
            tracker,
            catalog,
            catalog_state: CatalogState::NotFetched,
            paths,
            config,
        }
    }

    pub fn tracker(&self) -> &Tracker<B> {
        &self.tracker
    }

    pub fn paths(&self) -> &NebulaPaths {
        &self.paths
    }

    fn ensure_catalog(&mut self) -> Result<()> {
        match &self.catalog_state {
            CatalogState::Loaded => return Ok(()),
            CatalogState::Failed(message) => return Err(NebulaError::Remote(message.clone())),
            CatalogState::NotFetched => {}
        }
        match self.catalog.fetch_all(&CardFilter::new()) {
            Ok(cards) => {
                tracing::debug!(cards = cards.len(), source = %self.catalog.describe(), "catalog loaded");
                self.tracker.attach_catalog(cards);
                self.catalog_state = CatalogState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("catalog fetch failed: {e}");
                self.catalog_state = CatalogState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Like `ensure_catalog`, but a failure only becomes a warning.
    fn try_catalog(&mut self, result_notes: &mut Vec<CmdMessage>, consequence: &str) {
        if let Err(e) = self.ensure_catalog() {
            result_notes.push(CmdMessage::warning(format!(
                "Catalog unavailable ({e}); {consequence}"
            )));
        }
    }

    fn finish(&mut self, mut result: CmdResult, mut notes: Vec<CmdMessage>) -> CmdResult {
        notes.append(&mut result.messages);
        result.messages = notes;
        helpers::drain_warnings(&mut self.tracker, &mut result);
        result
    }

    pub fn status(&mut self) -> Result<CmdResult> {
        let mut notes = Vec::new();
        self.try_catalog(&mut notes, "showing saved progress only");
        let result = commands::status::run(&self.tracker)?;
        Ok(self.finish(result, notes))
    }

    pub fn checklist(&mut self, set: Option<&str>, filter: OwnershipFilter) -> Result<CmdResult> {
        self.ensure_catalog()?;
        let result = commands::checklist::run(&self.tracker, set, filter)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn mark(&mut self, number: &str, action: MarkAction) -> Result<CmdResult> {
        self.ensure_catalog()?;
        let result = commands::mark::run(&mut self.tracker, number, action)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn mark_set(&mut self, label: &str) -> Result<CmdResult> {
        self.ensure_catalog()?;
        let result = commands::group::run(&mut self.tracker, label, true)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn clear_set(&mut self, label: &str) -> Result<CmdResult> {
        self.ensure_catalog()?;
        let result = commands::group::run(&mut self.tracker, label, false)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn reset(&mut self) -> Result<CmdResult> {
        let result = commands::reset::run(&mut self.tracker)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn export(&mut self, output: &Path) -> Result<CmdResult> {
        let result = commands::export::run(&self.tracker, output)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn export_image(&mut self, output: &Path) -> Result<CmdResult> {
        self.ensure_catalog()?;
        let result = commands::export::run_image(&self.tracker, output)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult> {
        let mut notes = Vec::new();
        self.try_catalog(&mut notes, "importing without matching against it");
        let result = commands::import::run(&mut self.tracker, path)?;
        Ok(self.finish(result, notes))
    }

    pub fn cards(&mut self, query: &CardQuery) -> Result<CmdResult> {
        let result = commands::cards::run(&self.catalog, self.tracker.ledger(), query)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn card(&mut self, number: &str) -> Result<CmdResult> {
        let result = commands::cards::view(&self.catalog, self.tracker.ledger(), number)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn stats(&mut self) -> Result<CmdResult> {
        let result = commands::stats::run(&self.catalog)?;
        Ok(self.finish(result, Vec::new()))
    }

    pub fn config(&mut self) -> Result<CmdResult> {
        let result = commands::config::run(&self.config, &self.paths, &self.catalog.describe())?;
        Ok(self.finish(result, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::envelope::STORAGE_KEY;
    use crate::model::{Card, Stats};
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::{mem_api, test_paths};
    use std::cell::Cell;

    /// Catalog that always fails and counts how often it was asked.
    struct DownCatalog {
        calls: Cell<usize>,
    }

    impl CardCatalog for DownCatalog {
        fn fetch_all(&self, _: &CardFilter) -> Result<Vec<Card>> {
            self.calls.set(self.calls.get() + 1);
            Err(NebulaError::Remote("Request failed with 503".into()))
        }
        fn search(&self, _: &str) -> Result<Vec<Card>> {
            Err(NebulaError::Remote("down".into()))
        }
        fn fetch_by_number(&self, _: &str) -> Result<Card> {
            Err(NebulaError::Remote("down".into()))
        }
        fn fetch_stats(&self) -> Result<Stats> {
            Err(NebulaError::Remote("down".into()))
        }
        fn describe(&self) -> String {
            "down".into()
        }
    }

    fn down_api(backend: MemBackend) -> NebulaApi<MemBackend, DownCatalog> {
        NebulaApi::new(
            Tracker::open(backend),
            DownCatalog {
                calls: Cell::new(0),
            },
            test_paths(),
            NebulaConfig::default(),
        )
    }

    #[test]
    fn marks_accumulate_across_calls() {
        let mut api = mem_api();
        api.mark("BP01-001", MarkAction::Add(1)).unwrap();
        api.mark("BP01-001", MarkAction::Add(1)).unwrap();
        assert_eq!(api.tracker().ledger().total_copies(), 2);
    }

    #[test]
    fn catalog_failure_is_remembered() {
        let mut api = down_api(MemBackend::new());
        assert!(matches!(
            api.checklist(None, OwnershipFilter::All),
            Err(NebulaError::Remote(_))
        ));
        assert!(api.mark("BP01-001", MarkAction::Add(1)).is_err());
        assert_eq!(api.catalog.calls.get(), 1);
    }

    #[test]
    fn status_degrades_without_catalog() {
        let backend =
            MemBackend::with_value(STORAGE_KEY, r#"{"version":2,"owned":{"BP01-001":2}}"#);
        let mut api = down_api(backend);
        let result = api.status().unwrap();
        assert_eq!(result.summary.unwrap().owned_copies, 2);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("Request failed with 503"));
    }

    #[test]
    fn import_without_catalog_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(&path, r#"{"version":2,"owned":{"OLD-1":2}}"#).unwrap();

        let mut api = down_api(MemBackend::new());
        let result = api.import(&path).unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert!(result.has_level(MessageLevel::Success));
        assert_eq!(api.tracker().ledger().len(), 1);
    }

    #[test]
    fn storage_warnings_reach_the_caller() {
        let mut api = mem_api();
        api.tracker.backend().set_simulate_write_error(true);
        let result = api.mark("PR-107", MarkAction::Set(2)).unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn browsing_does_not_touch_the_ledger() {
        let mut api = mem_api();
        let result = api.cards(&CardQuery::default()).unwrap();
        assert_eq!(result.cards.len(), 7);
        assert_eq!(api.card("bp02-010").unwrap().cards.len(), 1);
        assert_eq!(api.stats().unwrap().stats.unwrap().total_cards, 7);
        assert_eq!(api.tracker().backend().write_count(), 0);
    }

    #[test]
    fn config_reports_catalog_origin() {
        let mut api = mem_api();
        let result = api.config().unwrap();
        assert!(result
            .config
            .iter()
            .any(|(k, v)| k == "catalog" && v == "in-memory catalog"));
    }
}
