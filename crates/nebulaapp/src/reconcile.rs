//! # Reconciliation
//!
//! A persisted ledger may have been written against an older catalog: keys can
//! be stale, keyed by a legacy identity, or over the cap. Reconciliation rebuilds
//! the ledger from the catalog's point of view.
//!
//! For every card in the catalog the resolvers in [`CANDIDATE_RESOLVERS`] are
//! tried in order and the first hit supplies the count:
//!
//! 1. the current identity key (upper-cased number, else id);
//! 2. the raw `id`, as older trackers keyed ownership by id;
//! 3. the raw `id` upper-cased.
//!
//! The order is a compatibility contract with files written by older versions
//! and must not change.
//!
//! Counts are clamped to the card's cap and only positive counts are kept. Keys
//! that match no catalog card are dropped. Running reconciliation on its own
//! output against the same catalog changes nothing.

use crate::ledger::Ledger;
use crate::model::Card;
use crate::sanitize::OwnershipMap;

type Resolver = fn(&Card) -> Option<String>;

pub const CANDIDATE_RESOLVERS: [(&str, Resolver); 3] = [
    ("identity", current_key),
    ("legacy-id", legacy_id),
    ("legacy-id-upper", legacy_id_upper),
];

fn current_key(card: &Card) -> Option<String> {
    card.key().map(|k| k.as_str().to_string())
}

fn legacy_id(card: &Card) -> Option<String> {
    card.id.map(|id| id.to_string())
}

fn legacy_id_upper(card: &Card) -> Option<String> {
    legacy_id(card).map(|id| id.to_uppercase())
}

/// Finds the stored count for `card`, walking the resolver chain.
pub fn resolve_count(mapping: &OwnershipMap, card: &Card) -> u32 {
    CANDIDATE_RESOLVERS
        .iter()
        .filter_map(|(_, resolve)| resolve(card))
        .find_map(|candidate| mapping.get(&candidate).copied())
        .unwrap_or(0)
}

pub fn reconcile(mapping: &OwnershipMap, catalog: &[Card]) -> Ledger {
    let mut ledger = Ledger::new();
    for card in catalog {
        let Some(key) = card.key() else {
            continue;
        };
        let count = resolve_count(mapping, card);
        if count > 0 {
            ledger.store(key, i64::from(count));
        }
    }
    let dropped = mapping
        .values()
        .filter(|v| **v > 0)
        .count()
        .saturating_sub(ledger.len());
    tracing::debug!(
        kept = ledger.len(),
        dropped,
        catalog = catalog.len(),
        "reconciled ownership against catalog"
    );
    ledger
}
