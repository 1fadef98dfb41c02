//! quill - a static site generator for markdown blogs.

mod build;
mod cli;
mod config;
mod content;
mod error;
mod generator;
mod logger;
mod minify;
mod paginate;
mod permalink;
mod render;
mod taxonomy;

use anyhow::{Context, Result};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli).context("failed to load site configuration")?;

    match &cli.command {
        Commands::Build { .. } => {
            build_site(&config).map_err(|err| {
                let file = err.path().display().to_string();
                anyhow::Error::new(err).context(format!("build stopped at `{file}`"))
            })?;
        }
    }

    Ok(())
}
