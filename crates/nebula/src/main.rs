//! # Nebula CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/nebulaapp/`: Core library (ledger, persistence, catalog client)
//! - `crates/nebula/`: This CLI tool, depends on `nebulaapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/nebula/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging + context wiring + dispatch (commands.rs)        │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/nebulaapp/src/api.rs)                    │
//! │  - Fetches the catalog once per run                         │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, context initialization, dispatch, error reporting, and rendering.
//!
//! ## Testing Approach
//!
//! - **Library**: command, tracker and API tests run against in-memory storage and
//!   a static catalog.
//! - **CLI (`src/cli/`)**: parsing and dispatch tests over the in-memory API;
//!   rendering tests feed canned values and compare plain text.
//! - **End to end (`tests/`)**: the real binary against a temporary data
//!   directory and an offline catalog file.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
