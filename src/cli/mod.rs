//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Self-test and demonstrate the stfu isolated unit-test engine
#[derive(Parser, Debug)]
#[command(name = "stfu")]
#[command(version)]
#[command(about = "Run the stfu engine's self-tests or its demonstration group")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Print group headers and test descriptions
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print only result lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Summary printed after the report (text, json, json-pretty)
    #[arg(short, long, global = true)]
    pub summary: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the engine's own unit tests (default)
    SelfTest,

    /// Run the demonstration group of passing, failing and crashing tests
    Examples,

    /// List the tests of a group
    List(ListArgs),

    /// Describe the environment variables read at startup
    Env,
}

/// Arguments for list command
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// List the demonstration group instead of the self-tests
    #[arg(short, long)]
    pub examples: bool,

    /// Show test descriptions
    #[arg(short, long)]
    pub detailed: bool,
}

impl Args {
    /// Verbosity forced from the command line, if any
    pub fn verbosity(&self) -> Option<bool> {
        match (self.verbose, self.quiet) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
