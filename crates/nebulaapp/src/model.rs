//! # Domain Model: Cards and Card Identity
//!
//! Cards come from the remote catalog and are read-only. Only two fields matter to
//! ownership tracking: `number` (a human readable code such as `BP01-001`) and the
//! numeric `id`. Everything else is display data.
//!
//! ## Card Identity Key
//!
//! Ownership is indexed by a [`CardKey`]:
//!
//! 1. The upper-cased `number`, when the card has a non-empty one.
//! 2. Otherwise the decimal string of `id`.
//! 3. Otherwise the card has no identity and cannot be owned.
//!
//! Derivation is a pure function of the card, so the same card always maps to the
//! same key across reloads regardless of how the server cases its number.
//!
//! ## Set Labels
//!
//! Checklist views group cards by set. The label is the first entry of
//! `display_card_bundle_names` (unless it is blank or `-`), then the leading
//! letters+digits prefix of the number (`BP01-001` → `BP01`), then `Unsorted`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const UNSORTED_SET: &str = "Unsorted";

const TRANSCENDENT_NUMBERS: [&str; 3] = ["BP01-022", "AP(06/20) BP01-022", "BP01-026"];
const SEMI_TRANSCENDENT_NUMBERS: [&str; 1] = ["PR-107"];

/// Deck-building restriction shown next to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Transcendent,
    SemiTranscendent,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Transcendent => "Transcendent",
            Badge::SemiTranscendent => "Semi-Transcendent",
        }
    }
}

/// A card record as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub errata_url: Option<String>,
    #[serde(default)]
    pub display_card_bundle_names: Option<String>,
    #[serde(default)]
    pub thumbnail_image_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Card {
    pub fn key(&self) -> Option<CardKey> {
        CardKey::for_card(self)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed card")
    }

    pub fn display_number(&self) -> &str {
        self.number
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("No number")
    }

    pub fn badges(&self) -> Vec<Badge> {
        let Some(number) = self.number.as_deref().map(str::to_uppercase) else {
            return Vec::new();
        };
        let mut badges = Vec::new();
        if TRANSCENDENT_NUMBERS.contains(&number.as_str()) {
            badges.push(Badge::Transcendent);
        }
        if SEMI_TRANSCENDENT_NUMBERS.contains(&number.as_str()) {
            badges.push(Badge::SemiTranscendent);
        }
        badges
    }

    /// Set filter used by card listings: the set label or a fragment of the number.
    pub fn in_set(&self, set: &str) -> bool {
        let wanted = set.trim().to_uppercase();
        if wanted.is_empty() {
            return true;
        }
        self.set_label().to_uppercase() == wanted
            || self
                .number
                .as_deref()
                .is_some_and(|n| n.to_uppercase().contains(&wanted))
    }

    pub fn set_label(&self) -> String {
        if let Some(bundles) = &self.display_card_bundle_names {
            let first = bundles.split(',').next().unwrap_or("").trim();
            if !first.is_empty() && first != "-" {
                return first.to_string();
            }
        }
        self.number
            .as_deref()
            .and_then(set_code)
            .map(str::to_string)
            .unwrap_or_else(|| UNSORTED_SET.to_string())
    }
}

/// Leading `[A-Za-z]+[0-9]+` run of a card number.
pub fn set_code(number: &str) -> Option<&str> {
    let letters = number
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if letters == 0 {
        return None;
    }
    let digits = number[letters..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    Some(&number[..letters + digits])
}

/// Canonical, upper-cased identity used to index ownership.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardKey(String);

impl CardKey {
    /// Normalizes any stored or user supplied key.
    pub fn normalize(raw: &str) -> Self {
        CardKey(raw.to_uppercase())
    }

    pub fn for_card(card: &Card) -> Option<Self> {
        match card.number.as_deref() {
            Some(number) if !number.is_empty() => Some(Self::normalize(number)),
            _ => card.id.map(|id| CardKey(id.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate statistics served by `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_cards: u64,
    #[serde(default)]
    pub rarity_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub feature_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub publication_year_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_25_ultras: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_25_kaiju: BTreeMap<String, u64>,
}
