//! # Ownership Ledger
//!
//! The ledger maps a [`CardKey`] to the number of copies the user owns.
//!
//! ## Invariants
//!
//! - Counts are clamped into `[0, cap]`; out of range input is never rejected.
//! - A count of zero is never stored. Absent and zero are the same thing, so the
//!   persisted form never carries explicit zeros.
//!
//! Every edit is a plain in-memory map operation. Batch edits ([`Ledger::set_group`])
//! have no partial failure mode.

use crate::caps::{cap, cap_for_key};
use crate::model::{Card, CardKey};
use crate::sanitize::OwnershipMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<CardKey, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a ledger from a sanitized mapping without a catalog.
    ///
    /// Caps are a function of the key alone, so they can be enforced before the
    /// catalog arrives. Orphans are only dropped by reconciliation.
    pub fn from_mapping(mapping: &OwnershipMap) -> Self {
        let mut ledger = Self::new();
        for (key, count) in mapping {
            ledger.store(CardKey::normalize(key), i64::from(*count));
        }
        ledger
    }

    pub fn get(&self, card: &Card) -> u32 {
        card.key().map(|k| self.get_key(&k)).unwrap_or(0)
    }

    pub fn get_key(&self, key: &CardKey) -> u32 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Sets the owned count, clamped to `[0, cap(card)]`. Returns the stored value.
    pub fn set_count(&mut self, card: &Card, value: i64) -> u32 {
        match card.key() {
            Some(key) => self.store(key, value),
            None => 0,
        }
    }

    pub fn adjust(&mut self, card: &Card, delta: i64) -> u32 {
        let current = i64::from(self.get(card));
        self.set_count(card, current.saturating_add(delta))
    }

    /// Owned cards drop to zero, missing cards become a single copy.
    pub fn toggle(&mut self, card: &Card) -> u32 {
        let next = if self.get(card) > 0 { 0 } else { 1 };
        self.set_count(card, next)
    }

    /// Fills every card to its cap, or clears every card.
    pub fn set_group<'a, I>(&mut self, cards: I, to_max: bool)
    where
        I: IntoIterator<Item = &'a Card>,
    {
        for card in cards {
            let value = if to_max { i64::from(cap(card)) } else { 0 };
            self.set_count(card, value);
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn total_copies(&self) -> u64 {
        self.entries.values().map(|&c| u64::from(c)).sum()
    }

    pub fn unique_owned(&self) -> usize {
        self.entries.len()
    }

    /// Sum of the caps of `cards`: the most copies that list could hold.
    pub fn max_copies(cards: &[Card]) -> u64 {
        cards.iter().map(|c| u64::from(cap(c))).sum()
    }

    /// How many of `cards` have at least one copy.
    pub fn owned_in(&self, cards: &[Card]) -> usize {
        cards.iter().filter(|c| self.get(c) > 0).count()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&CardKey, u32)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_mapping(&self) -> OwnershipMap {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), *v))
            .collect()
    }

    pub(crate) fn store(&mut self, key: CardKey, value: i64) -> u32 {
        let limit = i64::from(cap_for_key(&key));
        let clamped = value.clamp(0, limit) as u32;
        if clamped == 0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, clamped);
        }
        clamped
    }
}
