//! CLI commands for iconfont-picker.
//!
//! Drives the config screen, picker dialog and field renderer from a
//! terminal: configure, detect, list, pick, libraries, preview.

pub mod browse;
pub mod configure;
pub mod preview;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "iconfont-picker")]
#[command(about = "Detect icon font libraries and pick icon classes from their CSS", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the icon font CSS URL
    Configure {
        /// URL of the stylesheet that defines the icon font
        url: String,
    },

    /// Show which icon library a stylesheet belongs to
    Detect {
        /// Stylesheet URL (default: configured URL)
        url: Option<String>,

        /// Also fetch the stylesheet and test its body
        #[arg(long)]
        fetch: bool,
    },

    /// List selectable icon classes
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// Only icons whose name contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Only icons in this style (e.g. solid, regular, bold)
        #[arg(long)]
        style: Option<String>,

        /// Rank by fuzzy match instead of substring filtering
        #[arg(long)]
        fuzzy: bool,
    },

    /// Pick an icon and store it as the field value
    Pick {
        /// Full icon class, e.g. "fa-solid fa-star"
        icon: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the supported icon libraries
    Libraries,

    /// Write an HTML page previewing every icon
    Preview {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file
        #[arg(long, short, default_value = "icons.html")]
        out: PathBuf,
    },
}

/// Where to load icons from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Stylesheet URL or local path (default: configured URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Offline icons.json manifest for libraries that support one
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Configure { url } => configure::run_configure(&url),
        Commands::Detect { url, fetch } => browse::run_detect(url.as_deref(), fetch).await,
        Commands::List {
            source,
            search,
            style,
            fuzzy,
        } => browse::run_list(&source, search.as_deref(), style.as_deref(), fuzzy).await,
        Commands::Pick { icon, source } => browse::run_pick(&icon, &source).await,
        Commands::Libraries => {
            configure::run_libraries();
            Ok(())
        }
        Commands::Preview { source, out } => preview::run_preview(&source, &out).await,
    }
}
