//! Command-line arguments for the JobSafe CLI.
//!
//! Declared with `clap`'s derive API. Flags left unset fall back to the
//! configuration file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ColorMode, OutputFormat};
use crate::validator::StackPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "jobsafe",
    version,
    about = "A structural integrity verifier for employment contracts using a pushdown automaton."
)]
pub struct JobsafeArgs {
    /// Configuration file (defaults to ./jobsafe.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// When to color output.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by commands that produce a verdict.
#[derive(Debug, Args)]
pub struct VerdictOptions {
    /// What to do when a section closer finds no pending opener.
    #[arg(long, value_enum)]
    pub policy: Option<StackPolicy>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the full trace log.
    #[arg(long)]
    pub log: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a contract and validate its section structure.
    Check {
        /// Plain-text contract to check.
        #[arg(required = true)]
        file: PathBuf,
        #[command(flatten)]
        options: VerdictOptions,
    },
    /// Print every line that maps to a section symbol.
    Classify {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Validate a literal symbol sequence such as "HRDSCBFTX".
    Tokens {
        #[arg(required = true)]
        symbols: String,
        #[command(flatten)]
        options: VerdictOptions,
    },
    /// Run YAML fixture suites.
    Test {
        /// Directory containing fixture suites.
        #[arg(default_value = "tests/suites")]
        path: PathBuf,
        /// Only run cases whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
    },
}
