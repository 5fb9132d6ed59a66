//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// skillmatrix - Browse, filter and classify a skills matrix
#[derive(Parser, Debug)]
#[command(name = "skillmatrix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// [DEPRECATED] Enable JSON output for machine consumption.
    /// Use --output-format=json or -m instead.
    #[arg(long, global = true, hide = true)]
    pub robot: bool,

    /// Output format (human, json, jsonl, plain, tsv)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Color mode: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillmatrix/config.toml + ./skillmatrix.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file to use instead of the builtin one (.toml, .json, .yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl Cli {
    /// Get the effective output format from flags alone.
    ///
    /// Priority order:
    /// 1. `--plain` → Plain format
    /// 2. `--output-format` → Explicit format
    /// 3. `--machine` → JSON format (shorthand)
    /// 4. `--robot` → JSON format (deprecated)
    /// 5. Default → Human format
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.plain {
            return OutputFormat::Plain;
        }

        if let Some(fmt) = self.output_format {
            return fmt;
        }

        if self.machine || self.robot {
            return OutputFormat::Json;
        }

        OutputFormat::Human
    }

    /// Whether log lines should be JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.output_format().is_json()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the matrix by search term and category tag
    Search(commands::search::SearchArgs),

    /// Show every skill grouped by category
    List(commands::list::ListArgs),

    /// Label proficiency percentages with their level
    Classify(commands::classify::ClassifyArgs),

    /// Per-category statistics and level distribution
    Stats(commands::stats::StatsArgs),

    /// List categories and filter tags
    Categories(commands::categories::CategoriesArgs),

    /// Show the active proficiency bands
    Bands(commands::bands::BandsArgs),

    /// Validate a catalog file
    Validate(commands::validate::ValidateArgs),
}
