use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::OutputFormat;

/// Defines the top-level interface for the Sift CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about = "Sift CLI: Drive a filter bar from the terminal.")]
pub struct SiftCli {
    /// Path to the query-parameter JSON file (the URL stand-in).
    #[arg(short, long, global = true)]
    pub params: Option<PathBuf>,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SiftCliCommand,
}

/// Defines the available subcommands of the Sift CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SiftCliCommand {
    /// Show the pill bar for the current query parameters.
    Pills,
    /// List the configured filters with their selection counts.
    Filters,
    /// Set a filter's selection.
    Set {
        /// Filter key (e.g. status, tags, admitted)
        key: String,
        /// Selected values; a date filter takes one range like 2024-06-03..2024-06-10
        values: Vec<String>,
    },
    /// Choose a filter's comparison operation.
    Op {
        /// Filter key
        key: String,
        /// Operation token (e.g. b/w, has_any_of)
        operation: String,
    },
    /// Clear one filter, or every filter when no key is given.
    Clear {
        /// Filter key
        key: Option<String>,
    },
    /// Walk the filter bar interactively.
    Browse,
}
