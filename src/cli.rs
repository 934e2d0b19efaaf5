//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--color`, `-v`) are inherited by every
//! subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// capconf - capacity scheduler configuration parser and validator
#[derive(Parser, Debug)]
#[command(name = "capconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of rendered text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a flat configuration and print the queue tree
    Parse {
        /// Flat configuration (.json object or key=value properties)
        file: PathBuf,
    },

    /// Parse a flat configuration and run the validation rules
    Validate {
        /// Flat configuration (.json object or key=value properties)
        file: PathBuf,

        /// Runtime context (node labels, queue metrics, staged changes)
        #[arg(long, value_name = "JSON")]
        context: Option<PathBuf>,

        /// Force legacy queue mode
        #[arg(long, conflicts_with = "flexible")]
        legacy: bool,

        /// Force flexible (non-legacy) queue mode
        #[arg(long)]
        flexible: bool,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict_warnings: bool,
    },

    /// Write the normalized flat configuration
    Export {
        /// Flat configuration (.json object or key=value properties)
        file: PathBuf,

        /// Leave the configured key prefix off the written keys
        #[arg(long)]
        no_prefix: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Parse { .. } => "parse",
            Commands::Validate { .. } => "validate",
            Commands::Export { .. } => "export",
        }
    }
}
