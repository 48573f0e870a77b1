//! # Export
//!
//! Two artifacts, both written to the path the caller picks:
//!
//! - the tracker file (`nebula-collection.json`): the versioned envelope, which
//!   `import` reads back losslessly;
//! - the checklist image (`nebula-collection.png`): a picture of the checklist,
//!   which nothing reads back.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::tracker::Tracker;
use std::fs;
use std::path::Path;

pub fn run<B: StorageBackend>(tracker: &Tracker<B>, output: &Path) -> Result<CmdResult> {
    let bytes = tracker.export_json()?;
    write_artifact(output, &bytes)?;

    let mut result = CmdResult::default().with_output_path(output.to_path_buf());
    result.add_message(CmdMessage::success(format!(
        "Exported {} cards to {}",
        tracker.ledger().len(),
        output.display()
    )));
    Ok(result)
}

pub fn run_image<B: StorageBackend>(tracker: &Tracker<B>, output: &Path) -> Result<CmdResult> {
    let bytes = tracker.export_png()?;
    write_artifact(output, &bytes)?;

    let mut result = CmdResult::default().with_output_path(output.to_path_buf());
    result.add_message(CmdMessage::success(format!(
        "Saved checklist image to {}",
        output.display()
    )));
    Ok(result)
}

fn write_artifact(output: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, bytes)?;
    tracing::debug!(path = %output.display(), bytes = bytes.len(), "wrote export");
    Ok(())
}
