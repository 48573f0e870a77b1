//! # Browsing the Catalog
//!
//! Listing, searching and single-card lookup. These go straight to the catalog
//! and never reconcile or write the ledger; the owned count next to each card
//! is read from the ledger as it stands.

use crate::catalog::{CardCatalog, CardFilter};
use crate::commands::helpers::{owned_card, owned_cards};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ledger::Ledger;

#[derive(Debug, Clone, Default)]
pub struct CardQuery {
    /// Free-text search over name and effect. Other filters except `set` are
    /// ignored while searching.
    pub search: Option<String>,
    pub filter: CardFilter,
}

pub fn run<C: CardCatalog>(catalog: &C, ledger: &Ledger, query: &CardQuery) -> Result<CmdResult> {
    let term = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let cards = match term {
        Some(term) => {
            if !query.filter.params().is_empty() {
                tracing::debug!("search ignores field filters");
            }
            query.filter.retain_set(catalog.search(term)?)
        }
        None => catalog.fetch_all(&query.filter)?,
    };

    let mut result = CmdResult::default().with_cards(owned_cards(ledger, &cards));
    if cards.is_empty() {
        result.add_message(CmdMessage::info(
            "No cards found. Try relaxing your filters.",
        ));
    }
    Ok(result)
}

pub fn view<C: CardCatalog>(catalog: &C, ledger: &Ledger, number: &str) -> Result<CmdResult> {
    let card = catalog.fetch_by_number(number)?;
    Ok(CmdResult::default().with_cards(vec![owned_card(ledger, &card)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::error::NebulaError;
    use crate::test_utils::{card, sample_catalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(sample_catalog())
    }

    #[test]
    fn lists_with_filters_and_ownership() {
        let mut ledger = Ledger::new();
        ledger.set_count(&card("BP01-022"), 2);
        let query = CardQuery {
            search: None,
            filter: CardFilter::new().with("feature", "ULTRA HERO").set(Some("BP01")),
        };
        let result = run(&catalog(), &ledger, &query).unwrap();
        let numbers: Vec<_> = result
            .cards
            .iter()
            .map(|c| c.card.display_number().to_string())
            .collect();
        assert_eq!(numbers, ["BP01-001", "BP01-022"]);
        assert_eq!(result.cards[1].owned, 2);
    }

    #[test]
    fn search_keeps_set_filter() {
        let query = CardQuery {
            search: Some("ultraman".to_string()),
            filter: CardFilter::new().set(Some("PR")),
        };
        let result = run(&catalog(), &Ledger::new(), &query).unwrap();
        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.cards[0].card.number.as_deref(), Some("PR-107"));
    }

    #[test]
    fn empty_listing_is_explained() {
        let query = CardQuery {
            search: Some("no such card".to_string()),
            ..Default::default()
        };
        let result = run(&catalog(), &Ledger::new(), &query).unwrap();
        assert!(result.cards.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn view_by_number() {
        let result = view(&catalog(), &Ledger::new(), "pr-036").unwrap();
        assert_eq!(result.cards[0].cap, 50);
        assert!(matches!(
            view(&catalog(), &Ledger::new(), "PR-999"),
            Err(NebulaError::NotFound(_))
        ));
    }
}
