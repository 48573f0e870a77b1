use crate::caps::cap;
use crate::commands::{CmdMessage, CmdResult, OwnedCard};
use crate::error::NebulaError;
use crate::ledger::Ledger;
use crate::model::Card;
use crate::store::backend::StorageBackend;
use crate::tracker::{PersistenceMode, Tracker};

pub fn owned_card(ledger: &Ledger, card: &Card) -> OwnedCard {
    OwnedCard {
        card: card.clone(),
        owned: ledger.get(card),
        cap: cap(card),
    }
}

pub fn owned_cards(ledger: &Ledger, cards: &[Card]) -> Vec<OwnedCard> {
    cards.iter().map(|c| owned_card(ledger, c)).collect()
}

/// `BP01-001 Ultraman Tiga`
pub fn card_label(card: &Card) -> String {
    format!("{} {}", card.display_number(), card.display_name())
}

/// Moves the tracker's pending storage warnings into the result.
pub fn drain_warnings<B: StorageBackend>(tracker: &mut Tracker<B>, result: &mut CmdResult) {
    let warnings = tracker.take_warnings();
    let storage_failed = warnings.iter().any(NebulaError::is_storage);
    for warning in warnings {
        result.add_message(CmdMessage::warning(warning.to_string()));
    }
    if storage_failed && tracker.mode() == PersistenceMode::InMemoryOnly {
        result.add_message(CmdMessage::warning(
            "Changes are kept in memory only for this session.",
        ));
    }
}
