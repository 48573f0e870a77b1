use crate::commands::{CmdMessage, CmdResult};
use crate::envelope::SchemaVersion;
use crate::error::{NebulaError, Result};
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;
use std::fs;
use std::path::Path;

/// Replaces the ledger with a tracker file. Rejected files change nothing.
pub fn run<B: StorageBackend>(tracker: &mut Tracker<B>, path: &Path) -> Result<CmdResult> {
    let bytes = fs::read(path).map_err(|e| {
        NebulaError::Import(format!("Cannot read {}: {e}", path.display()))
    })?;
    let report = tracker.import_json(&bytes)?;

    let mut result = CmdResult::default().with_summary(tracker.summary());
    if report.version == Some(SchemaVersion::V1) {
        result.add_message(CmdMessage::info(
            "Converted a version 1 tracker file (owned flags become single copies).",
        ));
    }
    if report.dropped > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} entries did not match any card and were dropped",
            report.dropped
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} cards from {}",
        report.kept,
        path.display()
    )));
    Ok(result)
}
