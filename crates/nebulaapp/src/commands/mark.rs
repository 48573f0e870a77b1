//! # Marking Cards
//!
//! One card, one edit: set an exact count, add or remove copies, or toggle
//! between owned and not owned. Counts outside `[0, cap]` are clamped by the
//! ledger; the command only reports when that happened.

use crate::commands::helpers::{card_label, owned_card};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    Set(i64),
    Add(i64),
    Remove(i64),
    Toggle,
}

pub fn run<B: StorageBackend>(
    tracker: &mut Tracker<B>,
    number: &str,
    action: MarkAction,
) -> Result<CmdResult> {
    let card = tracker.find_card(number)?.clone();
    let before = tracker.ledger().get(&card);

    let (requested, after) = match action {
        MarkAction::Set(value) => (value, tracker.set_count(&card, value)),
        MarkAction::Add(delta) => (
            i64::from(before).saturating_add(delta),
            tracker.adjust(&card, delta),
        ),
        MarkAction::Remove(delta) => (
            i64::from(before).saturating_sub(delta),
            tracker.adjust(&card, delta.saturating_neg()),
        ),
        MarkAction::Toggle => (i64::from(before == 0), tracker.toggle(&card)),
    };

    let owned = owned_card(tracker.ledger(), &card);
    let mut result = CmdResult::default();
    if requested > i64::from(owned.cap) {
        result.add_message(CmdMessage::info(format!(
            "{} is capped at {} copies",
            card.display_number(),
            owned.cap
        )));
    }
    if after == before {
        result.add_message(CmdMessage::info(format!(
            "{} unchanged at {}/{}",
            card_label(&card),
            after,
            owned.cap
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "{}: {}/{}",
            card_label(&card),
            after,
            owned.cap
        )));
    }
    Ok(result.with_cards(vec![owned]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::NebulaError;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::sample_catalog;

    fn tracker() -> Tracker<MemBackend> {
        let mut tracker = Tracker::open(MemBackend::new());
        tracker.attach_catalog(sample_catalog());
        tracker
    }

    #[test]
    fn add_is_capped_and_reported() {
        let mut tracker = tracker();
        let result = run(&mut tracker, "bp01-001", MarkAction::Add(5)).unwrap();
        assert_eq!(result.cards[0].owned, 4);
        assert_eq!(result.messages[0].content, "BP01-001 is capped at 4 copies");
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn remove_floors_at_zero() {
        let mut tracker = tracker();
        run(&mut tracker, "PR-107", MarkAction::Set(3)).unwrap();
        let result = run(&mut tracker, "PR-107", MarkAction::Remove(10)).unwrap();
        assert_eq!(result.cards[0].owned, 0);
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn set_respects_override_caps() {
        let mut tracker = tracker();
        let result = run(&mut tracker, "PR-036", MarkAction::Set(75)).unwrap();
        assert_eq!(result.cards[0].owned, 50);
        assert_eq!(result.cards[0].cap, 50);
    }

    #[test]
    fn toggle_flips_ownership() {
        let mut tracker = tracker();
        assert_eq!(
            run(&mut tracker, "BP02-010", MarkAction::Toggle).unwrap().cards[0].owned,
            1
        );
        run(&mut tracker, "BP02-010", MarkAction::Set(3)).unwrap();
        assert_eq!(
            run(&mut tracker, "BP02-010", MarkAction::Toggle).unwrap().cards[0].owned,
            0
        );
    }

    #[test]
    fn no_op_is_info_only() {
        let mut tracker = tracker();
        let result = run(&mut tracker, "BP01-002", MarkAction::Remove(1)).unwrap();
        assert!(!result.has_level(MessageLevel::Success));
        assert!(result.messages[0].content.contains("unchanged at 0/4"));
    }

    #[test]
    fn unknown_number_is_not_found() {
        let mut tracker = tracker();
        assert!(matches!(
            run(&mut tracker, "XX00-000", MarkAction::Add(1)),
            Err(NebulaError::NotFound(_))
        ));
    }

    #[test]
    fn id_only_cards_are_addressed_by_id() {
        let mut tracker = tracker();
        let result = run(&mut tracker, "7", MarkAction::Add(1)).unwrap();
        assert_eq!(result.cards[0].owned, 1);
    }
}
