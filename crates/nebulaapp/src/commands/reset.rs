use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;

/// Clears the ledger. Confirmation is the caller's business.
pub fn run<B: StorageBackend>(tracker: &mut Tracker<B>) -> Result<CmdResult> {
    let had = tracker.ledger().len();
    let replaced = tracker.reset();
    let mut result = CmdResult::default().with_summary(tracker.summary());
    result.add_message(CmdMessage::success(format!(
        "Tracker reset ({had} cards cleared)"
    )));
    if replaced {
        result.add_message(CmdMessage::info(
            "Unreadable saved progress was replaced.",
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::STORAGE_KEY;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::card;

    #[test]
    fn reset_clears_and_saves() {
        let mut tracker = Tracker::open(MemBackend::new());
        tracker.set_count(&card("BP01-001"), 2);
        tracker.set_count(&card("BP01-002"), 1);

        let result = run(&mut tracker).unwrap();
        assert_eq!(result.messages[0].content, "Tracker reset (2 cards cleared)");
        let raw = tracker.backend().raw(STORAGE_KEY).unwrap();
        assert!(raw.contains("\"owned\": {}"));
    }

    #[test]
    fn reset_reports_replaced_unreadable_state() {
        let mut tracker = Tracker::open(MemBackend::with_value(STORAGE_KEY, "{oops"));
        let result = run(&mut tracker).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(
            result.messages[1].content,
            "Unreadable saved progress was replaced."
        );
        assert!(tracker.backend().raw(STORAGE_KEY).unwrap().contains("\"owned\": {}"));
    }
}
