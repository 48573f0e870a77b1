//! # Command Layer
//!
//! This module contains the **core business logic** of nebula. Each command lives in
//! its own submodule and implements plain Rust functions over the
//! [`Tracker`](crate::tracker::Tracker) and a
//! [`CardCatalog`](crate::catalog::CardCatalog).
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//! - **Prompts**: confirmations belong to the UI (`reset --yes`)
//!
//! Export and import do touch the filesystem, but only at the path they are given.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `cards`: cards with their owned count and cap
//! - `checklist`: the set-grouped checklist view
//! - `summary`: collection-wide totals
//! - `stats`: catalog statistics
//! - `output_path`: where an export was written
//! - `config`: effective configuration, as key/value pairs
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! Storage warnings raised by the tracker during a command are appended as
//! warning messages by the API facade; they never turn a command into an error.
//!
//! ## Command Modules
//!
//! - [`status`]: collection totals
//! - [`checklist`]: set-grouped ownership view
//! - [`mark`]: set/add/remove/toggle one card
//! - [`group`]: mark or clear a whole set
//! - [`reset`]: clear the ledger
//! - [`export`]: tracker file and checklist image
//! - [`import`]: load a tracker file
//! - [`cards`]: browse and look up catalog cards
//! - [`stats`]: catalog statistics
//! - [`config`]: effective configuration
//! - [`helpers`]: shared utilities

use crate::checklist::{Checklist, Summary};
use crate::model::{Card, Stats};
use serde::Serialize;
use std::path::PathBuf;

pub mod cards;
pub mod checklist;
pub mod config;
pub mod export;
pub mod group;
pub mod helpers;
pub mod import;
pub mod mark;
pub mod reset;
pub mod stats;
pub mod status;

/// Where this session reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NebulaPaths {
    pub data_dir: PathBuf,
    pub storage_file: PathBuf,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A catalog card paired with the user's count for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedCard {
    pub card: Card,
    pub owned: u32,
    pub cap: u32,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub cards: Vec<OwnedCard>,
    pub checklist: Option<Checklist>,
    pub summary: Option<Summary>,
    pub stats: Option<Stats>,
    pub output_path: Option<PathBuf>,
    pub config: Vec<(String, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_cards(mut self, cards: Vec<OwnedCard>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist = Some(checklist);
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
