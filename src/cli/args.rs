//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Canonry URL discovery CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: canonry.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "canonry.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Collect canonical URLs from every enabled source
    #[command(visible_alias = "c")]
    Collect {
        #[command(flatten)]
        args: CollectArgs,
    },

    /// List the host route table with its public/protected status
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },
}

/// Output format of `collect`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One URL per line with its SEO hints
    #[default]
    Text,
    /// JSON array of entries
    Json,
    /// sitemaps.org XML
    Xml,
}

/// Collect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CollectArgs {
    /// Language to collect for (falls back to the default language)
    #[arg(short, long, conflicts_with = "all_languages")]
    pub lang: Option<String>,

    /// Collect every enabled language and attach hreflang alternates
    #[arg(short = 'a', long)]
    pub all_languages: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Minify XML output
    #[arg(short, long)]
    pub minify: bool,

    /// Run sources one after another (no per-source timeout)
    #[arg(short, long)]
    pub sequential: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Include non-GET routes and duplicate paths
    #[arg(short, long)]
    pub all: bool,

    /// Only show protected routes
    #[arg(short, long)]
    pub protected: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_collect(&self) -> bool {
        matches!(self.command, Commands::Collect { .. })
    }
    pub const fn is_routes(&self) -> bool {
        matches!(self.command, Commands::Routes { .. })
    }
}
