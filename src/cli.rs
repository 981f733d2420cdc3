//! Command-line interface definitions.
//!
//! Running `plinth` with no arguments builds the site in the current
//! directory. Every flag only overrides a value from `site.toml`.

use clap::Parser;
use std::path::PathBuf;

/// Plinth static site generator CLI
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: site.toml)
    #[arg(short = 'C', long, default_value = "site.toml")]
    pub config: PathBuf,

    /// Output directory path (relative to site root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to site root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Layouts directory path (relative to site root)
    #[arg(short, long)]
    pub layouts: Option<PathBuf>,

    /// Static assets directory path (relative to site root)
    #[arg(short = 's', long = "static")]
    pub static_dir: Option<PathBuf>,

    /// Data directory path (relative to site root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Annotate documents with their last git commit date
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub history: Option<bool>,
}
