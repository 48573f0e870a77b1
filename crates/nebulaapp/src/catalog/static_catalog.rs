use super::{CardCatalog, CardFilter};
use crate::error::{NebulaError, Result};
use crate::model::{Card, Stats};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Catalog served from memory, typically a JSON snapshot of `GET /cards`.
pub struct StaticCatalog {
    cards: Vec<Card>,
    origin: Option<PathBuf>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            origin: None,
        }
    }

    /// Loads a JSON array of card records.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            NebulaError::Remote(format!("Cannot read catalog {}: {e}", path.display()))
        })?;
        let cards: Vec<Card> = serde_json::from_str(&text).map_err(|e| {
            NebulaError::Remote(format!("Invalid catalog {}: {e}", path.display()))
        })?;
        tracing::debug!(cards = cards.len(), path = %path.display(), "loaded catalog snapshot");
        Ok(Self {
            cards,
            origin: Some(path.to_path_buf()),
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Compares a filter parameter against the card's JSON field of the same name.
/// Numbers compare case-insensitively; everything else must match exactly.
fn param_matches(card: &Value, key: &str, wanted: &str) -> bool {
    match card.get(key) {
        Some(Value::String(s)) if key == "number" => s.eq_ignore_ascii_case(wanted.trim()),
        Some(Value::String(s)) => s == wanted,
        Some(Value::Number(n)) => n.to_string() == wanted,
        Some(Value::Bool(b)) => b.to_string() == wanted,
        _ => false,
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

impl CardCatalog for StaticCatalog {
    fn fetch_all(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        let mut out = Vec::new();
        for card in &self.cards {
            let value = serde_json::to_value(card)?;
            if filter
                .params()
                .iter()
                .all(|(k, v)| param_matches(&value, k, v))
            {
                out.push(card.clone());
            }
        }
        Ok(filter.retain_set(out))
    }

    fn search(&self, term: &str) -> Result<Vec<Card>> {
        let needle = term.trim().to_lowercase();
        Ok(self
            .cards
            .iter()
            .filter(|c| {
                contains_ci(c.name.as_deref(), &needle) || contains_ci(c.effect.as_deref(), &needle)
            })
            .cloned()
            .collect())
    }

    fn fetch_by_number(&self, number: &str) -> Result<Card> {
        let trimmed = number.trim();
        self.cards
            .iter()
            .find(|c| {
                c.number
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(trimmed))
            })
            .cloned()
            .ok_or_else(|| NebulaError::NotFound(trimmed.to_string()))
    }

    fn fetch_stats(&self) -> Result<Stats> {
        let mut rarity: BTreeMap<String, u64> = BTreeMap::new();
        let mut feature: BTreeMap<String, u64> = BTreeMap::new();
        for card in &self.cards {
            if let Some(r) = &card.rarity {
                *rarity.entry(r.clone()).or_default() += 1;
            }
            if let Some(f) = &card.feature {
                *feature.entry(f.clone()).or_default() += 1;
            }
        }
        Ok(Stats {
            total_cards: self.cards.len() as u64,
            rarity_distribution: rarity,
            feature_distribution: feature,
            ..Default::default()
        })
    }

    fn describe(&self) -> String {
        match &self.origin {
            Some(path) => path.display().to_string(),
            None => "in-memory catalog".to_string(),
        }
    }
}
