//! stfu - isolated unit-test engine, self-test binary
//!
//! Runs the engine's own unit tests or a demonstration group through the
//! engine itself.
//!
//! ## Usage
//!
//! ```bash
//! # Run the self-tests; the exit code is failed + crashed
//! stfu
//!
//! # Show how each outcome appears in the report
//! stfu examples
//!
//! # List the self-tests with their descriptions
//! stfu list --detailed
//!
//! # Print a JSON summary after the report
//! stfu --summary json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

mod cli;
mod suites;

use cli::{Args, Command, ListArgs};
use stfu::config::{print_env_help, AppConfig};
use stfu::utils::{init_logger, LogLevel};
use stfu::{SummaryFormat, TestGroup};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    init_logger(config.log_level);

    let code = match args.command.clone().unwrap_or(Command::SelfTest) {
        Command::SelfTest => run_group(suites::unit_tests(), &config)?,
        Command::Examples => {
            run_group(suites::examples(), &config)?;
            0
        }
        Command::List(list_args) => {
            list_tests(&list_args);
            0
        }
        Command::Env => {
            print_env_help();
            0
        }
    };

    std::process::exit(code)
}

/// Layer command-line flags over file and environment configuration
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::resolve(args.config.as_deref())?;

    if let Some(level) = &args.log_level {
        config.log_level =
            LogLevel::from_str(level).with_context(|| format!("Unknown log level: {level}"))?;
    }
    if let Some(verbose) = args.verbosity() {
        config.verbose = Some(verbose);
    }
    if let Some(format) = &args.summary {
        config.summary = Some(
            SummaryFormat::from_str(format)
                .with_context(|| format!("Unknown summary format: {format}"))?,
        );
    }

    Ok(config)
}

/// Run a group against stdout and return the process exit code
fn run_group(mut group: TestGroup, config: &AppConfig) -> Result<i32> {
    if let Some(verbose) = config.verbose {
        group.set_verbose(verbose);
    }
    group.set_layout(config.layout);

    let mut out = io::stdout();
    let summary = group.invoke(&mut out);

    if let Some(format) = config.summary {
        writeln!(out, "{}", format.format(&summary)).context("Failed to write summary")?;
    }
    out.flush().context("Failed to flush report")?;

    info!("{summary}");
    Ok(summary.exit_code())
}

fn list_tests(args: &ListArgs) {
    let group = if args.examples {
        suites::examples()
    } else {
        suites::unit_tests()
    };

    println!("\n{} ({} tests)", group.name(), group.len());
    println!("# {}\n", group.description());

    for (index, test) in group.tests().iter().enumerate() {
        let state = if test.is_enabled() { "" } else { " [disabled]" };
        println!("  {:2}. {}{}", index + 1, test.name(), state);

        if args.detailed && !test.description().is_empty() {
            println!("      {}", test.description());
        }
    }

    println!();
}
