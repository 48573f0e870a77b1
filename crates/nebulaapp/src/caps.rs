//! Per-card ownership caps.
//!
//! Most cards may be owned up to [`DEFAULT_CAP`] copies. A handful of high
//! print-run promos carry their own limit. The table is policy, not configuration.

use crate::model::{Card, CardKey};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_CAP: u32 = 4;

static CAP_OVERRIDES: Lazy<HashMap<&'static str, u32>> =
    Lazy::new(|| HashMap::from([("PR-036", 50), ("PR-107", 8)]));

pub fn cap_for_key(key: &CardKey) -> u32 {
    CAP_OVERRIDES
        .get(key.as_str())
        .copied()
        .unwrap_or(DEFAULT_CAP)
}

/// Cards without an identity can never be owned.
pub fn cap(card: &Card) -> u32 {
    card.key().map(|k| cap_for_key(&k)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_and_default() {
        assert_eq!(cap_for_key(&CardKey::normalize("PR-036")), 50);
        assert_eq!(cap_for_key(&CardKey::normalize("pr-107")), 8);
        assert_eq!(cap_for_key(&CardKey::normalize("BP01-001")), DEFAULT_CAP);
    }

    #[test]
    fn cap_follows_card_identity() {
        let promo = Card {
            number: Some("pr-036".into()),
            ..Default::default()
        };
        assert_eq!(cap(&promo), 50);
        assert_eq!(cap(&Card::default()), 0);
    }
}
