//! Plinth - a small static site generator for markdown and Jinja-style templates.

mod build;
mod cli;
mod compiler;
mod config;
mod data;
mod document;
mod error;
mod logger;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    if config.config_path.is_file() {
        log!("build"; "using `{}`", config.config_path.display());
    }
    log!("build"; "building `{}`", config.get_root().display());
    if let Err(err) = build_site(&config) {
        log!("error"; "build failed: {err:#}");
        return Err(err);
    }
    Ok(())
}
