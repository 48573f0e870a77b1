//! # Nebula Architecture
//!
//! Nebula tracks which cards of the Nebula trading-card game a collector owns. It is a
//! **UI-agnostic library** with a command line client on top; nothing below the CLI
//! knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (nebula crate)                                   │
//! │  - Parses arguments, renders results, sets exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Fetches the catalog once per session                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns `CmdResult`                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tracker (tracker.rs)                                       │
//! │  - Ownership ledger + hydrate-before-persist storage        │
//! │  - Reconciles saved keys against the catalog                │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                          │
//!                   ▼                          ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Storage (store/)            │ │  Catalog (catalog/)        │
//! │  FsBackend, MemBackend       │ │  HTTP API or JSON snapshot │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Ownership Keys
//!
//! A card is keyed by its printed number (`BP01-001`) when it has one and by its
//! numeric catalog id otherwise. Older saves keyed everything by id; [`reconcile`]
//! moves those entries onto number keys once the catalog is known, and
//! [`sanitize`] drops anything that is not a positive integer.
//!
//! ## Copy Caps
//!
//! Every card has a maximum number of copies ([`caps`]); a few promos carry their
//! own limit. Counts are clamped on every write.
//!
//! ## Testing
//!
//! - **Core types** (`ledger`, `sanitize`, `reconcile`, `envelope`, `png`): unit tests
//!   next to the code.
//! - **Commands and tracker**: run against `MemBackend` and a `StaticCatalog`.
//! - **CLI**: end-to-end tests drive the binary with `assert_cmd` against a temporary
//!   data directory and an offline catalog file.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`tracker`]: Ledger plus persistence plus catalog
//! - [`ledger`]: Owned copy counts
//! - [`caps`]: Per-card copy limits
//! - [`sanitize`], [`reconcile`]: Cleaning and migrating saved mappings
//! - [`envelope`]: The versioned tracker file format
//! - [`checklist`]: Set grouping, filters and totals
//! - [`png`]: Checklist image export
//! - [`catalog`]: Card catalog clients
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Catalog data types (`Card`, `Stats`)
//! - [`config`]: Configuration management
//! - [`init`]: Filesystem wiring for the CLI
//! - [`error`]: Error types

pub mod api;
pub mod caps;
pub mod catalog;
pub mod checklist;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod init;
pub mod ledger;
pub mod model;
pub mod png;
pub mod reconcile;
pub mod sanitize;
pub mod store;
pub mod tracker;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
