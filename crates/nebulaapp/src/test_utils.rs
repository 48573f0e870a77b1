//! Fixtures shared by unit tests (and by downstream crates with the
//! `test_utils` feature).

use crate::api::NebulaApi;
use crate::catalog::StaticCatalog;
use crate::commands::NebulaPaths;
use crate::config::NebulaConfig;
use crate::model::Card;
use crate::store::mem_backend::MemBackend;
use crate::tracker::Tracker;
use std::path::PathBuf;

/// A card known only by its number.
pub fn card(number: &str) -> Card {
    Card {
        number: Some(number.to_string()),
        ..Default::default()
    }
}

fn full_card(
    id: u64,
    number: Option<&str>,
    name: &str,
    rarity: Option<&str>,
    feature: Option<&str>,
    card_type: &str,
) -> Card {
    Card {
        id: Some(id),
        number: number.map(str::to_string),
        name: Some(name.to_string()),
        rarity: rarity.map(str::to_string),
        feature: feature.map(str::to_string),
        card_type: Some(card_type.to_string()),
        ..Default::default()
    }
}

/// Seven cards over four sets: `BP01` (3), `BP02` (1), `Promo Cards` (2, both
/// with cap overrides) and `Unsorted` (1 card without a number).
pub fn sample_catalog() -> Vec<Card> {
    let mut tiga = full_card(
        1,
        Some("BP01-001"),
        "Ultraman Tiga, Multi Type",
        Some("RRR"),
        Some("ULTRA HERO"),
        "BASIC",
    );
    tiga.effect = Some("When this card enters the battlefield, draw 1 card.".to_string());

    let gomora = full_card(2, Some("BP01-002"), "Gomora", Some("C"), Some("KAIJU"), "BASIC");

    let mut zero = full_card(
        3,
        Some("BP01-022"),
        "Ultraman Zero",
        Some("RRR"),
        Some("ULTRA HERO"),
        "BASIC",
    );
    zero.effect = Some("Draw 2 cards.".to_string());

    let red_king = full_card(4, Some("BP02-010"), "Red King", Some("U"), Some("KAIJU"), "BASIC");

    let mut patrol = full_card(5, Some("PR-036"), "Science Patrol", Some("PR"), None, "SCENE");
    patrol.display_card_bundle_names = Some("Promo Cards".to_string());

    let mut belial = full_card(
        6,
        Some("PR-107"),
        "Ultraman Belial",
        Some("PR"),
        Some("ULTRA HERO"),
        "BASIC",
    );
    belial.display_card_bundle_names = Some("Promo Cards, Event Pack".to_string());

    let mystery = Card {
        id: Some(7),
        name: Some("Mystery Card".to_string()),
        ..Default::default()
    };

    vec![tiga, gomora, zero, red_king, patrol, belial, mystery]
}

pub fn test_paths() -> NebulaPaths {
    NebulaPaths {
        data_dir: PathBuf::from("/nonexistent/nebula"),
        storage_file: PathBuf::from("memory://nebula-collection-tracker"),
        config_file: None,
    }
}

/// API over an empty in-memory store and [`sample_catalog`].
pub fn mem_api() -> NebulaApi<MemBackend, StaticCatalog> {
    NebulaApi::new(
        Tracker::open(MemBackend::new()),
        StaticCatalog::new(sample_catalog()),
        test_paths(),
        NebulaConfig::default(),
    )
}
