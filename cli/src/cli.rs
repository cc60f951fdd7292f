use clap::{Args, Parser, Subcommand};
use navigator::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(
    author,
    version,
    about = "Validate, filter and outline product release notes"
)]
pub struct Cli {
    /// Configuration file path (defaults are used when it does not exist)
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a release data file against the schema
    Validate {
        /// Release data file (defaults to data.path from the configuration)
        file: Option<String>,
    },

    /// List releases newest first, optionally filtered
    List {
        /// Release data file (defaults to data.path from the configuration)
        file: Option<String>,

        #[clap(flatten)]
        filters: FilterArgs,

        /// Print every note under each section
        #[clap(short, long, default_value_t = false)]
        notes: bool,
    },

    /// Print the navigation outline as rendered for a viewport width
    Outline {
        /// Release data file (defaults to data.path from the configuration)
        file: Option<String>,

        /// Viewport width in pixels used to pick the layout
        #[clap(short, long, default_value_t = 1280)]
        width: u32,
    },

    /// Build a shareable URL for a filter selection
    Link {
        /// Release data file (defaults to data.path from the configuration)
        file: Option<String>,

        #[clap(flatten)]
        filters: FilterArgs,

        /// Base URL (defaults to url.base from the configuration)
        #[clap(long)]
        base: Option<String>,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only the release with this exact version
    #[clap(short, long = "release")]
    pub release: Option<String>,

    /// Release type: initial, major, minor, patch or hotfix
    #[clap(short = 't', long = "type")]
    pub release_type: Option<String>,

    /// Date range: thisYear, lastYear or older
    #[clap(short, long)]
    pub date: Option<String>,

    /// Reference date for date ranges (defaults to today)
    #[clap(long)]
    pub now: Option<String>,
}
