use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2026-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "nebula",
    bin_name = "nebula",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Running `nebula` with no command shows your collection status."
)]
#[command(about = "Track your Nebula card collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Use a JSON card list instead of the catalog API
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub catalog_file: Option<PathBuf>,

    /// Where the tracker file is kept
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Collection(CollectionCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Catalog(CatalogCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Show collection totals (default)
    #[command(alias = "st", display_order = 1)]
    Status,

    /// Show the checklist, grouped by set
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only this set (e.g. "BP01" or "Promo Cards")
        #[arg(short, long)]
        set: Option<String>,

        /// Only cards you own
        #[arg(long, conflicts_with = "missing")]
        owned: bool,

        /// Only cards you do not own
        #[arg(long, conflicts_with = "owned")]
        missing: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// Add copies of a card
    #[command(display_order = 10)]
    Add(CountArgs),

    /// Remove copies of a card
    #[command(alias = "rm", display_order = 11)]
    Remove(CountArgs),

    /// Set the owned count of a card
    #[command(display_order = 12)]
    Set {
        /// Card number (e.g. BP01-001)
        number: String,

        /// Copies owned; clamped to the card's cap
        count: u32,
    },

    /// Switch a card between not owned and one copy
    #[command(display_order = 13)]
    Toggle {
        /// Card number (e.g. BP01-001)
        number: String,
    },

    /// Own the maximum number of copies of every card in a set
    #[command(display_order = 14)]
    MarkSet {
        /// Set label as shown by `nebula list`
        set: String,
    },

    /// Clear every card in a set
    #[command(display_order = 15)]
    ClearSet {
        /// Set label as shown by `nebula list`
        set: String,
    },

    /// Forget every owned card
    #[command(display_order = 16)]
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Card number (e.g. BP01-001)
    pub number: String,

    /// Number of copies
    #[arg(default_value_t = 1)]
    pub count: u32,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Write the tracker file (nebula-collection.json)
    #[command(display_order = 20)]
    Export {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write the checklist as an image (nebula-collection.png)
    #[command(display_order = 21)]
    ExportImage {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Replace the collection with a tracker file
    #[command(display_order = 22)]
    Import {
        /// Path to a tracker file (version 1 or 2)
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Browse catalog cards
    #[command(display_order = 30)]
    Cards(CardsArgs),

    /// Show one card by number
    #[command(display_order = 31)]
    Card {
        /// Card number (e.g. BP01-001)
        number: String,
    },

    /// Catalog statistics
    #[command(display_order = 32)]
    Stats,
}

#[derive(Args, Debug, Default)]
pub struct CardsArgs {
    /// Search names and effects (other filters except --set are ignored)
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long)]
    pub rarity: Option<String>,

    #[arg(long)]
    pub feature: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub card_type: Option<String>,

    /// Set label, or part of the card number
    #[arg(long)]
    pub set: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub character: Option<String>,

    #[arg(long)]
    pub number: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show the effective configuration
    #[command(display_order = 40)]
    Config,
}
