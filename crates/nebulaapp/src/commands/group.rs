use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;

/// Sets every card of a set to its cap (`to_max`) or clears them all.
pub fn run<B: StorageBackend>(
    tracker: &mut Tracker<B>,
    label: &str,
    to_max: bool,
) -> Result<CmdResult> {
    let count = tracker.set_group_by_label(label, to_max)?;
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::warning(format!(
            "No cards found in set \"{label}\""
        )));
        return Ok(result);
    }

    let checklist = tracker.checklist()?.only_set(label);
    let shown = checklist
        .groups
        .first()
        .map(|g| g.label.clone())
        .unwrap_or_else(|| label.to_string());
    let verb = if to_max { "Marked" } else { "Cleared" };
    result.add_message(CmdMessage::success(format!(
        "{verb} {count} cards in {shown}"
    )));
    Ok(result
        .with_summary(tracker.summary())
        .with_checklist(checklist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::sample_catalog;

    fn tracker() -> Tracker<MemBackend> {
        let mut tracker = Tracker::open(MemBackend::new());
        tracker.attach_catalog(sample_catalog());
        tracker
    }

    #[test]
    fn mark_set_fills_every_card_to_cap() {
        let mut tracker = tracker();
        let result = run(&mut tracker, "bp01", true).unwrap();
        assert_eq!(result.messages[0].content, "Marked 3 cards in BP01");
        let group = &result.checklist.unwrap().groups[0];
        assert!(group.complete());
        assert_eq!(group.owned_copies, 12);
    }

    #[test]
    fn clear_set_removes_entries() {
        let mut tracker = tracker();
        run(&mut tracker, "Promo Cards", true).unwrap();
        run(&mut tracker, "promo cards", false).unwrap();
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn unknown_set_warns_without_writing() {
        let mut tracker = tracker();
        let writes = tracker.backend().write_count();
        let result = run(&mut tracker, "EXD01", true).unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(tracker.backend().write_count(), writes);
    }
}
