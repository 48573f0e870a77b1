//! # CLI Behavior
//!
//! This is **one possible UI client** for nebula, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ### Naked Execution (`nebula`)
//!
//! Running `nebula` with no arguments defaults to `nebula status`.
//!
//! ### The Catalog
//!
//! Checklist commands (`list`, `add`, `remove`, `set`, `toggle`, `mark-set`,
//! `clear-set`, `export-image`) need the card catalog and fail when it cannot be
//! fetched. `status` and `import` fall back to the saved ledger with a warning.
//! `export` never contacts the catalog. Pass `--catalog-file` to work offline
//! from a JSON snapshot of the card list.
//!
//! ### Confirmation
//!
//! `nebula reset` refuses to run without `--yes`.
//!
//! ## Module Structure
//!
//! - `commands`: Logging setup, context wiring and dispatch
//! - `render`: Output formatting (checklists, card tables, messages)
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
