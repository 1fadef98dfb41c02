//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quill static blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site source directory (default: current directory)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Output directory (relative to the source directory)
    #[arg(short, long, global = true)]
    pub destination: Option<PathBuf>,

    /// Config file name (default: _config.yml)
    #[arg(short = 'C', long, global = true, default_value = "_config.yml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the build command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Publish drafts from `_drafts/` as posts (preview mode)
    #[arg(long)]
    pub drafts: bool,

    /// Minify the generated html and xml
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Override the site url from the config file.
    ///
    /// Example:
    ///   quill build --base-url "https://alice.github.io"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Clears the destination directory and builds the site
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::try_parse_from(["quill", "build"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("_config.yml"));
        assert!(cli.source.is_none());
        assert!(cli.destination.is_none());
        let Commands::Build { build_args } = cli.command;
        assert!(!build_args.drafts);
        assert_eq!(build_args.minify, None);
    }

    #[test]
    fn test_parse_build_overrides() {
        let cli = Cli::try_parse_from([
            "quill",
            "build",
            "--source",
            "blog",
            "-d",
            "public",
            "--drafts",
            "--minify",
            "--base-url",
            "https://example.com",
        ])
        .unwrap();

        assert_eq!(cli.source, Some(PathBuf::from("blog")));
        assert_eq!(cli.destination, Some(PathBuf::from("public")));
        let Commands::Build { build_args } = cli.command;
        assert!(build_args.drafts);
        assert_eq!(build_args.minify, Some(true));
        assert_eq!(build_args.base_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_parse_minify_explicit_false() {
        let cli = Cli::try_parse_from(["quill", "build", "--minify", "false"]).unwrap();
        let Commands::Build { build_args } = cli.command;
        assert_eq!(build_args.minify, Some(false));
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(Cli::try_parse_from(["quill"]).is_err());
    }
}
