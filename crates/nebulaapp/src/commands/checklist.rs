use crate::checklist::OwnershipFilter;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;

/// Checklist of the whole catalog, or of one set, optionally narrowed to owned
/// or missing cards.
pub fn run<B: StorageBackend>(
    tracker: &Tracker<B>,
    set: Option<&str>,
    filter: OwnershipFilter,
) -> Result<CmdResult> {
    let mut checklist = tracker.checklist()?;
    let mut result = CmdResult::default().with_summary(tracker.summary());

    if checklist.is_empty() {
        result.add_message(CmdMessage::info("No cards available to track."));
        return Ok(result.with_checklist(checklist));
    }

    if let Some(label) = set {
        if checklist.group(label).is_none() {
            result.add_message(CmdMessage::warning(format!("No set named \"{label}\"")));
        }
        checklist = checklist.only_set(label);
    }

    checklist = checklist.filtered(filter);
    if checklist.is_empty() && result.messages.is_empty() {
        let note = match filter {
            OwnershipFilter::Owned => "No owned cards to show.",
            OwnershipFilter::Missing => "Nothing missing here.",
            OwnershipFilter::All => "No cards to show.",
        };
        result.add_message(CmdMessage::info(note));
    }
    Ok(result.with_checklist(checklist))
}
