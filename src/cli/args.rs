//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Locale exports and minified asset bundles for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: press.toml)
    #[arg(short = 'C', long, default_value = "press.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site once
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Active locale for this build
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Build every configured locale into the export directory
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Export directory path (relative to project root)
        #[arg(short = 'o', long = "export", value_hint = clap::ValueHint::DirPath)]
        export: Option<PathBuf>,
    },
}

/// Shared build arguments for Build and Export commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Source directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Destination directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Bundle library and custom CSS/JS into single minified files
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Commands {
    pub const fn build_args(&self) -> &BuildArgs {
        match self {
            Self::Build { build_args, .. } | Self::Export { build_args, .. } => build_args,
        }
    }
}
