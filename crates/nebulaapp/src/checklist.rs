//! Checklist view: the catalog grouped by set, annotated with ownership.
//!
//! Cards are ordered by number, grouped by [`Card::set_label`], and groups are
//! ordered by label. The same view feeds the terminal listing and the PNG export.

use crate::caps::cap;
use crate::ledger::Ledger;
use crate::model::Card;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistEntry {
    pub number: String,
    pub name: String,
    pub rarity: Option<String>,
    pub owned: u32,
    pub cap: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetGroup {
    pub label: String,
    pub entries: Vec<ChecklistEntry>,
    pub owned_cards: usize,
    pub card_count: usize,
    pub owned_copies: u64,
    pub max_copies: u64,
}

impl SetGroup {
    pub fn complete(&self) -> bool {
        self.card_count > 0 && self.owned_cards == self.card_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipFilter {
    #[default]
    All,
    Owned,
    Missing,
}

/// Collection-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub owned_cards: usize,
    pub card_count: usize,
    pub owned_copies: u64,
    pub max_copies: u64,
}

impl Summary {
    /// Without a catalog only the ledger side is known.
    pub fn from_ledger(ledger: &Ledger, catalog: Option<&[Card]>) -> Self {
        match catalog {
            Some(cards) => Summary {
                owned_cards: ledger.owned_in(cards),
                card_count: cards.len(),
                owned_copies: cards.iter().map(|c| u64::from(ledger.get(c))).sum(),
                max_copies: Ledger::max_copies(cards),
            },
            None => Summary {
                owned_cards: ledger.unique_owned(),
                owned_copies: ledger.total_copies(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Checklist {
    pub groups: Vec<SetGroup>,
}

/// Catalog cards grouped by set label, both levels sorted.
pub fn group_cards(catalog: &[Card]) -> Vec<(String, Vec<&Card>)> {
    let mut sorted: Vec<&Card> = catalog.iter().collect();
    sorted.sort_by(|a, b| sort_number(a).cmp(sort_number(b)));

    let mut groups: BTreeMap<String, Vec<&Card>> = BTreeMap::new();
    for card in sorted {
        groups.entry(card.set_label()).or_default().push(card);
    }
    groups.into_iter().collect()
}

fn sort_number(card: &Card) -> &str {
    card.number.as_deref().unwrap_or("")
}

/// Cards of the set whose label matches case-insensitively.
pub fn cards_in_set<'a>(catalog: &'a [Card], label: &str) -> Vec<&'a Card> {
    let wanted = label.trim().to_lowercase();
    group_cards(catalog)
        .into_iter()
        .find(|(l, _)| l.to_lowercase() == wanted)
        .map(|(_, cards)| cards)
        .unwrap_or_default()
}

impl Checklist {
    pub fn build(ledger: &Ledger, catalog: &[Card]) -> Self {
        let groups = group_cards(catalog)
            .into_iter()
            .map(|(label, cards)| {
                let entries: Vec<ChecklistEntry> = cards
                    .iter()
                    .map(|card| ChecklistEntry {
                        number: card.display_number().to_string(),
                        name: card.display_name().to_string(),
                        rarity: card.rarity.clone(),
                        owned: ledger.get(card),
                        cap: cap(card),
                    })
                    .collect();
                SetGroup {
                    label,
                    owned_cards: entries.iter().filter(|e| e.owned > 0).count(),
                    card_count: entries.len(),
                    owned_copies: entries.iter().map(|e| u64::from(e.owned)).sum(),
                    max_copies: entries.iter().map(|e| u64::from(e.cap)).sum(),
                    entries,
                }
            })
            .collect();
        Checklist { groups }
    }

    pub fn group(&self, label: &str) -> Option<&SetGroup> {
        let wanted = label.trim().to_lowercase();
        self.groups.iter().find(|g| g.label.to_lowercase() == wanted)
    }

    /// Keeps only the matching entries. Totals stay those of the full set.
    pub fn filtered(mut self, filter: OwnershipFilter) -> Self {
        if filter == OwnershipFilter::All {
            return self;
        }
        for group in &mut self.groups {
            group.entries.retain(|e| match filter {
                OwnershipFilter::Owned => e.owned > 0,
                OwnershipFilter::Missing => e.owned == 0,
                OwnershipFilter::All => true,
            });
        }
        self.groups.retain(|g| !g.entries.is_empty());
        self
    }

    pub fn only_set(mut self, label: &str) -> Self {
        let wanted = label.trim().to_lowercase();
        self.groups.retain(|g| g.label.to_lowercase() == wanted);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
