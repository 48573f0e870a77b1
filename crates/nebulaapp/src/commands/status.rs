//! # Status
//!
//! Collection-wide totals. With a catalog the summary covers every card of it;
//! without one (catalog unreachable) only the ledger side is known.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;

pub fn run<B: StorageBackend>(tracker: &Tracker<B>) -> Result<CmdResult> {
    let summary = tracker.summary();
    let mut result = CmdResult::default().with_summary(summary);

    if tracker.ledger().is_empty() {
        result.add_message(CmdMessage::info(
            "No cards tracked yet. Use `nebula add <NUMBER>` to record a copy.",
        ));
    }
    if let Ok(checklist) = tracker.checklist() {
        let complete = checklist.groups.iter().filter(|g| g.complete()).count();
        if complete > 0 {
            result.add_message(CmdMessage::success(format!(
                "{complete} of {} sets have every card",
                checklist.groups.len()
            )));
        }
    }
    Ok(result)
}
