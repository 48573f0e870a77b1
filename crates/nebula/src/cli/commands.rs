//! # CLI Layer
//!
//! This module is **one possible UI client** for nebula, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Asks for confirmation (`reset --yes`)
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Logging**: Install the `tracing` subscriber (stderr, `NEBULA_LOG`)
//! 3. **Context Setup**: Build the `NebulaApi` through `nebulaapp::init`
//! 4. **API Dispatch**: Call the matching `NebulaApi` method
//! 5. **Output Formatting**: Render the `CmdResult` to stdout
//!
//! Errors bubble up as `anyhow::Error`; `main` prints them and exits 1. Warnings
//! are plain messages and never change the exit code.

use super::render::{render_result, CardView};
use super::setup::{
    CardsArgs, CatalogCommands, Cli, CollectionCommands, Commands, CoreCommands, DataCommands,
    MiscCommands,
};
use anyhow::{bail, Result};
use clap::Parser;
use nebulaapp::api::{CardQuery, MarkAction, NebulaApi};
use nebulaapp::catalog::{CardCatalog, CardFilter};
use nebulaapp::checklist::OwnershipFilter;
use nebulaapp::commands::CmdResult;
use nebulaapp::envelope::{EXPORT_FILE_NAME, IMAGE_FILE_NAME};
use nebulaapp::init::{initialize, InitOptions};
use nebulaapp::store::backend::StorageBackend;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NEBULA_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = initialize(InitOptions {
        data_dir: cli.data_dir,
        catalog_file: cli.catalog_file,
        config_file: None,
    })?;
    let mut api = ctx.api;

    let command = cli.command.unwrap_or(Commands::Core(CoreCommands::Status));
    let (result, view) = dispatch(&mut api, command)?;
    print!("{}", render_result(&result, view));
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch<B: StorageBackend, C: CardCatalog>(
    api: &mut NebulaApi<B, C>,
    command: Commands,
) -> Result<(CmdResult, CardView)> {
    let result = match command {
        Commands::Core(cmd) => match cmd {
            CoreCommands::Status => api.status()?,
            CoreCommands::List {
                set,
                owned,
                missing,
            } => api.checklist(set.as_deref(), ownership_filter(owned, missing))?,
        },
        Commands::Collection(cmd) => match cmd {
            CollectionCommands::Add(args) => {
                api.mark(&args.number, MarkAction::Add(i64::from(args.count)))?
            }
            CollectionCommands::Remove(args) => {
                api.mark(&args.number, MarkAction::Remove(i64::from(args.count)))?
            }
            CollectionCommands::Set { number, count } => {
                api.mark(&number, MarkAction::Set(i64::from(count)))?
            }
            CollectionCommands::Toggle { number } => api.mark(&number, MarkAction::Toggle)?,
            CollectionCommands::MarkSet { set } => api.mark_set(&set)?,
            CollectionCommands::ClearSet { set } => api.clear_set(&set)?,
            CollectionCommands::Reset { yes } => {
                if !yes {
                    bail!("reset forgets every owned card; run `nebula reset --yes` to confirm");
                }
                api.reset()?
            }
        },
        Commands::Data(cmd) => match cmd {
            DataCommands::Export { output } => {
                api.export(&output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME)))?
            }
            DataCommands::ExportImage { output } => {
                api.export_image(&output.unwrap_or_else(|| PathBuf::from(IMAGE_FILE_NAME)))?
            }
            DataCommands::Import { path } => api.import(&path)?,
        },
        Commands::Catalog(cmd) => match cmd {
            CatalogCommands::Cards(args) => api.cards(&card_query(args))?,
            CatalogCommands::Card { number } => {
                return Ok((api.card(&number)?, CardView::Detail));
            }
            CatalogCommands::Stats => api.stats()?,
        },
        Commands::Misc(MiscCommands::Config) => api.config()?,
    };
    Ok((result, CardView::List))
}

fn ownership_filter(owned: bool, missing: bool) -> OwnershipFilter {
    match (owned, missing) {
        (true, _) => OwnershipFilter::Owned,
        (_, true) => OwnershipFilter::Missing,
        _ => OwnershipFilter::All,
    }
}

fn card_query(args: CardsArgs) -> CardQuery {
    let filter = CardFilter::new()
        .with_opt("rarity", args.rarity)
        .with_opt("feature", args.feature)
        .with_opt("type", args.card_type)
        .with_opt("character_name", args.character)
        .with_opt("number", args.number)
        .set(args.set);
    CardQuery {
        search: args.search,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebulaapp::commands::MessageLevel;
    use nebulaapp::test_utils::mem_api;

    fn exec(args: &[&str]) -> Result<(CmdResult, CardView)> {
        let cli = Cli::try_parse_from(std::iter::once("nebula").chain(args.iter().copied()))?;
        let mut api = mem_api();
        dispatch(
            &mut api,
            cli.command.unwrap_or(Commands::Core(CoreCommands::Status)),
        )
    }

    #[test]
    fn naked_runs_status() {
        let (result, _) = exec(&[]).unwrap();
        assert!(result.summary.is_some());
    }

    #[test]
    fn reset_requires_confirmation() {
        assert!(exec(&["reset"]).is_err());
        let (result, _) = exec(&["reset", "--yes"]).unwrap();
        assert!(result.has_level(MessageLevel::Success));
    }

    #[test]
    fn card_uses_detail_view() {
        let (result, view) = exec(&["card", "BP01-001"]).unwrap();
        assert_eq!(view, CardView::Detail);
        assert_eq!(result.cards.len(), 1);
    }

    #[test]
    fn unknown_card_is_an_error() {
        assert!(exec(&["add", "XX-999"]).is_err());
    }

    #[test]
    fn cards_flags_become_filters() {
        let query = card_query(CardsArgs {
            rarity: Some("RRR".into()),
            card_type: Some("".into()),
            set: Some("BP01".into()),
            ..Default::default()
        });
        assert_eq!(query.filter.params().len(), 1);
        assert_eq!(query.filter.params()["rarity"], "RRR");
        assert_eq!(query.filter.set_filter(), Some("BP01"));
    }

    #[test]
    fn list_filters() {
        assert_eq!(ownership_filter(true, false), OwnershipFilter::Owned);
        assert_eq!(ownership_filter(false, true), OwnershipFilter::Missing);
        assert_eq!(ownership_filter(false, false), OwnershipFilter::All);
    }
}
