//! The JobSafe Command-Line Interface.
//!
//! Entry point for all CLI commands. Resolves configuration, installs
//! logging and dispatches to the library.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use termcolor::StandardStream;

use crate::alphabet::parse_symbols;
use crate::classifier::Classifier;
use crate::cli::args::{Command, JobsafeArgs, VerdictOptions};
use crate::cli::output::ReportStyle;
use crate::config::{JobsafeConfig, OutputFormat};
use crate::diagnostics::JobsafeError;
use crate::ingest::Document;
use crate::pipeline::{Pipeline, ValidationReport};
use crate::test_harness::{self, HarnessConfig};

pub mod args;
pub mod diagnostics;
pub mod logging;
pub mod output;

/// Exit status for a rejected contract or a failing fixture.
const EXIT_REJECTED: i32 = 1;
/// Exit status for I/O, configuration and other host errors.
const EXIT_ERROR: i32 = 2;

/// The main entry point for the CLI.
pub fn run() {
    let args = JobsafeArgs::parse();

    match dispatch(args) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_REJECTED),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(EXIT_ERROR);
        }
    }
}

/// Runs a parsed command. `Ok(false)` means the command completed but the
/// contract was rejected or a fixture failed.
fn dispatch(args: JobsafeArgs) -> Result<bool, JobsafeError> {
    let mut config = JobsafeConfig::discover(args.config.as_deref())?;
    if let Some(color) = args.color {
        config.color = color;
    }
    logging::init(&config.log_level, args.verbose, config.color.stderr_colors())?;
    tracing::debug!(?config, "configuration resolved");

    match args.command {
        Command::Check { file, options } => handle_check(&file, &options, config),
        Command::Classify { file } => handle_classify(&file, &config),
        Command::Tokens { symbols, options } => handle_tokens(&symbols, &options, config),
        Command::Test { path, filter } => handle_test(path, filter.as_deref(), &config),
    }
}

fn apply_options(config: &mut JobsafeConfig, options: &VerdictOptions) {
    if let Some(policy) = options.policy {
        config.policy = policy;
    }
    if let Some(format) = options.format {
        config.format = format;
    }
}

fn handle_check(
    path: &Path,
    options: &VerdictOptions,
    mut config: JobsafeConfig,
) -> Result<bool, JobsafeError> {
    apply_options(&mut config, options);
    let document = Document::from_path(path)?;
    let report = Pipeline::new(config.policy).check_document(&document);
    emit_report(&report, Some(&document), options, &config)?;
    Ok(report.accepted())
}

fn handle_classify(path: &Path, config: &JobsafeConfig) -> Result<bool, JobsafeError> {
    let document = Document::from_path(path)?;
    let lines = Classifier::standard().classify_lines(document.lines());
    let mut stdout = StandardStream::stdout(config.color.color_choice());
    output::print_classified(&mut stdout, &lines, config.preview_width)?;
    Ok(true)
}

fn handle_tokens(
    symbols: &str,
    options: &VerdictOptions,
    mut config: JobsafeConfig,
) -> Result<bool, JobsafeError> {
    apply_options(&mut config, options);
    let tokens = parse_symbols(symbols)?;
    let report = Pipeline::new(config.policy).check_tokens(tokens);
    emit_report(&report, None, options, &config)?;
    Ok(report.accepted())
}

fn handle_test(
    root: PathBuf,
    filter: Option<&str>,
    config: &JobsafeConfig,
) -> Result<bool, JobsafeError> {
    let harness = HarnessConfig {
        suite_root: root,
        use_colors: config.color.color_choice() != termcolor::ColorChoice::Never,
    };
    let summary = test_harness::run_all_tests(filter, &harness)?;
    Ok(summary.failed == 0)
}

fn emit_report(
    report: &ValidationReport,
    document: Option<&Document>,
    options: &VerdictOptions,
    config: &JobsafeConfig,
) -> Result<(), JobsafeError> {
    match config.format {
        OutputFormat::Json => output::write_json(&mut io::stdout().lock(), report),
        OutputFormat::Text => {
            let mut stdout = StandardStream::stdout(config.color.color_choice());
            let style = ReportStyle {
                preview_width: config.preview_width,
                show_log: options.log,
            };
            output::print_report(&mut stdout, report, document, style)?;
            Ok(())
        }
    }
}
