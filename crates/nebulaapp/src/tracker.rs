//! # Tracker Session
//!
//! A [`Tracker`] is one session over the ownership ledger. It owns the
//! [`TrackerStore`], the in-memory [`Ledger`] and the catalog snapshot it was
//! last reconciled against.
//!
//! ## Startup
//!
//! [`Tracker::open`] loads and sanitizes whatever the store holds, hydrates the
//! ledger from it and spends the store's suppressed first write right away. By
//! the time `open` returns, hydration is complete and every later mutation is
//! persisted.
//!
//! The sanitized payload is also kept as-is until the first catalog is attached,
//! so that reconciliation sees the stored keys and counts before any cap of the
//! ledger's own identity scheme is applied to them (legacy id keys in particular).
//! While it is kept, saves and exports write that payload rather than the ledger.
//!
//! ## Mutations
//!
//! Every mutation updates the ledger first and then writes the whole ledger back.
//! A failed write never rolls back the ledger: the error is kept as a warning and
//! the session switches to [`PersistenceMode::InMemoryOnly`], skipping further
//! writes. Saved state that cannot be read puts the session in the same mode
//! from the start. A successful import or a reset switches back to
//! [`PersistenceMode::Durable`], since both replace whatever was stored.
//!
//! Warnings accumulate until the caller drains them with [`Tracker::take_warnings`].

use crate::checklist::{cards_in_set, Checklist, Summary};
use crate::envelope;
use crate::envelope::SchemaVersion;
use crate::error::{NebulaError, Result};
use crate::ledger::Ledger;
use crate::model::{Card, CardKey};
use crate::png;
use crate::reconcile::reconcile;
use crate::sanitize::OwnershipMap;
use crate::store::backend::StorageBackend;
use crate::store::TrackerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    Durable,
    /// Storage failed; the ledger lives in memory until an import or reset.
    InMemoryOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub version: Option<SchemaVersion>,
    /// Entries kept after sanitizing (and reconciling, when a catalog is loaded).
    pub kept: usize,
    pub dropped: usize,
}

pub struct Tracker<B: StorageBackend> {
    store: TrackerStore<B>,
    ledger: Ledger,
    pending: Option<OwnershipMap>,
    catalog: Option<Vec<Card>>,
    mode: PersistenceMode,
    unreadable_state: bool,
    warnings: Vec<NebulaError>,
}

impl<B: StorageBackend> Tracker<B> {
    pub fn open(backend: B) -> Self {
        let mut store = TrackerStore::new(backend);
        let report = store.load();
        let ledger = Ledger::from_mapping(&report.owned);
        // Never overwrite state that could not be read.
        let unreadable_state = report.warning.is_some();
        let mode = if unreadable_state {
            PersistenceMode::InMemoryOnly
        } else {
            PersistenceMode::Durable
        };

        let mut tracker = Self {
            store,
            ledger,
            pending: (!report.owned.is_empty()).then_some(report.owned),
            catalog: None,
            mode,
            unreadable_state,
            warnings: report.warning.into_iter().collect(),
        };
        tracker.persist();
        tracker
    }

    pub fn backend(&self) -> &B {
        self.store.backend()
    }

    pub fn store(&self) -> &TrackerStore<B> {
        &self.store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn catalog(&self) -> Option<&[Card]> {
        self.catalog.as_deref()
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn take_warnings(&mut self) -> Vec<NebulaError> {
        std::mem::take(&mut self.warnings)
    }

    /// Installs a new catalog snapshot and reconciles the ledger against it.
    pub fn attach_catalog(&mut self, cards: Vec<Card>) {
        let mapping = self
            .pending
            .take()
            .unwrap_or_else(|| self.ledger.to_mapping());
        self.ledger = reconcile(&mapping, &cards);
        self.catalog = Some(cards);
        self.persist();
    }

    fn persist(&mut self) {
        if self.mode == PersistenceMode::InMemoryOnly {
            tracing::debug!("persistence disabled for this session");
            return;
        }
        let saved = match &self.pending {
            Some(owned) => self.store.save_mapping(owned),
            None => self.store.save(&self.ledger),
        };
        if let Err(e) = saved {
            tracing::warn!("switching to in-memory only: {e}");
            self.mode = PersistenceMode::InMemoryOnly;
            self.warnings.push(e);
        }
    }

    /// The raw hydrated payload only matters until the user edits the ledger.
    fn mutated(&mut self) {
        self.pending = None;
        self.persist();
    }

    pub fn find_card(&self, number: &str) -> Result<&Card> {
        let catalog = self.catalog.as_ref().ok_or(NebulaError::CatalogNotLoaded)?;
        let wanted = CardKey::normalize(number.trim());
        catalog
            .iter()
            .find(|c| c.key().as_ref() == Some(&wanted))
            .ok_or_else(|| NebulaError::NotFound(number.trim().to_string()))
    }

    pub fn set_count(&mut self, card: &Card, value: i64) -> u32 {
        let count = self.ledger.set_count(card, value);
        self.mutated();
        count
    }

    pub fn adjust(&mut self, card: &Card, delta: i64) -> u32 {
        let count = self.ledger.adjust(card, delta);
        self.mutated();
        count
    }

    pub fn toggle(&mut self, card: &Card) -> u32 {
        let count = self.ledger.toggle(card);
        self.mutated();
        count
    }

    pub fn set_group<'a, I>(&mut self, cards: I, to_max: bool)
    where
        I: IntoIterator<Item = &'a Card>,
    {
        self.ledger.set_group(cards, to_max);
        self.mutated();
    }

    /// Marks or clears every card of a set. Returns the number of cards in it.
    pub fn set_group_by_label(&mut self, label: &str, to_max: bool) -> Result<usize> {
        let catalog = self.catalog.as_ref().ok_or(NebulaError::CatalogNotLoaded)?;
        let cards = cards_in_set(catalog, label);
        let count = cards.len();
        if count > 0 {
            self.ledger.set_group(cards, to_max);
            self.mutated();
        }
        Ok(count)
    }

    /// Clears the ledger and writes the empty state, even over saved state that
    /// could not be read. Returns true when such state was replaced.
    pub fn reset(&mut self) -> bool {
        self.ledger.reset();
        tracing::info!("tracker reset");
        self.resume_persistence();
        self.mutated();

        let replaced = self.unreadable_state && self.mode == PersistenceMode::Durable;
        if replaced {
            self.unreadable_state = false;
        }
        replaced
    }

    fn resume_persistence(&mut self) {
        self.store.disarm_guard();
        self.mode = PersistenceMode::Durable;
    }

    pub fn export_json(&self) -> Result<Vec<u8>> {
        match &self.pending {
            Some(owned) => envelope::export_mapping(owned),
            None => envelope::export_json(&self.ledger),
        }
    }

    /// Replaces the ledger with the contents of a tracker file.
    ///
    /// A rejected file leaves the ledger as it was.
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<ImportReport> {
        let decoded = envelope::import_json(bytes)?;
        let total = decoded.owned.values().filter(|v| **v > 0).count();

        match &self.catalog {
            Some(catalog) => {
                self.ledger = reconcile(&decoded.owned, catalog);
                self.pending = None;
            }
            None => {
                self.ledger = Ledger::from_mapping(&decoded.owned);
                self.pending = Some(decoded.owned);
            }
        }

        self.resume_persistence();
        self.persist();
        if self.mode == PersistenceMode::Durable {
            self.unreadable_state = false;
        }

        let report = ImportReport {
            version: decoded.version,
            kept: self.ledger.len(),
            dropped: total.saturating_sub(self.ledger.len()),
        };
        tracing::info!(
            kept = report.kept,
            dropped = report.dropped,
            "imported tracker file"
        );
        Ok(report)
    }

    pub fn checklist(&self) -> Result<Checklist> {
        let catalog = self.catalog.as_ref().ok_or(NebulaError::CatalogNotLoaded)?;
        Ok(Checklist::build(&self.ledger, catalog))
    }

    pub fn export_png(&self) -> Result<Vec<u8>> {
        png::export_checklist_png(&self.checklist()?)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_ledger(&self.ledger, self.catalog())
    }
}
