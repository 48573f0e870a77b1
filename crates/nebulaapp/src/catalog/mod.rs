//! # Card Catalog
//!
//! The catalog is a read-only data source owned by the server. The tracker only
//! consumes it, through the [`CardCatalog`] trait:
//!
//! - [`http::HttpCatalog`]: the remote API (`GET /cards`, `/search`, `/stats`).
//! - [`static_catalog::StaticCatalog`]: an in-memory card list, usually loaded
//!   from a JSON snapshot. Used for offline operation and for tests.
//!
//! [`CatalogSource`] picks one of them at runtime.
//!
//! Every call is exactly one request: no caching, no retries. Failures surface as
//! [`NebulaError::Remote`](crate::error::NebulaError::Remote) and only block views
//! that need the catalog; the ledger is never touched by a catalog failure.

use crate::error::Result;
use crate::model::{Card, Stats};
use std::collections::BTreeMap;

pub mod http;
pub mod static_catalog;

pub use http::HttpCatalog;
pub use static_catalog::StaticCatalog;

/// Query filters for [`CardCatalog::fetch_all`].
///
/// Parameters with empty values are never sent. The `set` filter is not a server
/// parameter: it is applied to the returned cards (see [`Card::in_set`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    params: BTreeMap<String, String>,
    set: Option<String>,
}

impl CardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.params.insert(key.to_string(), value);
        }
        self
    }

    pub fn with_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn set(mut self, set: Option<impl Into<String>>) -> Self {
        let set: Option<String> = set.map(Into::into);
        self.set = set.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn set_filter(&self) -> Option<&str> {
        self.set.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.set.is_none()
    }

    pub(crate) fn retain_set(&self, mut cards: Vec<Card>) -> Vec<Card> {
        if let Some(set) = &self.set {
            cards.retain(|c| c.in_set(set));
        }
        cards
    }
}

pub trait CardCatalog {
    fn fetch_all(&self, filter: &CardFilter) -> Result<Vec<Card>>;

    fn search(&self, term: &str) -> Result<Vec<Card>>;

    /// Fails with `NotFound` when no card carries the (trimmed) number.
    fn fetch_by_number(&self, number: &str) -> Result<Card>;

    fn fetch_stats(&self) -> Result<Stats>;

    /// Human readable origin, for `config` and log lines.
    fn describe(&self) -> String;
}

pub enum CatalogSource {
    Http(HttpCatalog),
    Static(StaticCatalog),
}

impl CardCatalog for CatalogSource {
    fn fetch_all(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        match self {
            CatalogSource::Http(c) => c.fetch_all(filter),
            CatalogSource::Static(c) => c.fetch_all(filter),
        }
    }

    fn search(&self, term: &str) -> Result<Vec<Card>> {
        match self {
            CatalogSource::Http(c) => c.search(term),
            CatalogSource::Static(c) => c.search(term),
        }
    }

    fn fetch_by_number(&self, number: &str) -> Result<Card> {
        match self {
            CatalogSource::Http(c) => c.fetch_by_number(number),
            CatalogSource::Static(c) => c.fetch_by_number(number),
        }
    }

    fn fetch_stats(&self) -> Result<Stats> {
        match self {
            CatalogSource::Http(c) => c.fetch_stats(),
            CatalogSource::Static(c) => c.fetch_stats(),
        }
    }

    fn describe(&self) -> String {
        match self {
            CatalogSource::Http(c) => c.describe(),
            CatalogSource::Static(c) => c.describe(),
        }
    }
}
