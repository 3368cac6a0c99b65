//! JobSafe Fixture Harness
//!
//! Runs YAML fixture suites through the full pipeline so validated contracts
//! stay validated as the rule table and automaton evolve.
//!
//! # Fixture Format
//!
//! ```yaml
//! - name: "canonical order"
//!   symbols: "HRDSCBFTX"              # either symbols...
//!   expect_accept: true
//! - name: "compensation before scope"
//!   text: |                           # ...or raw contract text
//!     Employment Agreement
//!     Position: Analyst
//!     Salary: 30,000
//!   policy: strict                    # optional, defaults to strict
//!   expect_tokens: "HRC"              # optional
//!   expect_error_code: "UnexpectedSymbol"
//!   expect_log:                       # optional, full trace log
//!     - "Transition: Start -> Header (Input: H)"
//!   skip: false
//!   only: false
//! ```
//!
//! # Public API
//!
//! - [`discover_yaml_files`] - find suites under a directory
//! - [`load_test_cases`] - parse one suite
//! - [`run_test_case`] - run one case
//! - [`run_all_tests`] - discover, filter, run and report

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use difference::{Changeset, Difference};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::alphabet::parse_symbols;
use crate::diagnostics::JobsafeError;
use crate::ingest::Document;
use crate::pipeline::{Pipeline, ValidationReport};
use crate::validator::StackPolicy;

// =============================================================================
// CORE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Pass {
        file: String,
        name: String,
    },
    Fail {
        file: String,
        name: String,
        error: String,
        tokens: Option<String>,
        /// Expected and actual trace logs, when the failure is a log mismatch.
        log_diff: Option<LogDiff>,
    },
    Skipped {
        file: String,
        name: String,
        reason: String,
    },
}

/// One fixture case.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,
    pub text: Option<String>,
    pub symbols: Option<String>,
    #[serde(default)]
    pub policy: StackPolicy,
    pub expect_accept: Option<bool>,
    pub expect_error_code: Option<String>,
    pub expect_tokens: Option<String>,
    pub expect_log: Option<Vec<String>>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

pub struct HarnessConfig {
    pub suite_root: PathBuf,
    pub use_colors: bool,
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

impl HarnessConfig {
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Pass / fail / skip counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

// =============================================================================
// DISCOVERY AND LOADING
// =============================================================================

/// Finds `*.yaml` / `*.yml` files under `root`, sorted for a stable run order.
pub fn discover_yaml_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>, JobsafeError> {
    let content = fs::read_to_string(path).map_err(|source| JobsafeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str::<Vec<TestCase>>(&content).map_err(|e| JobsafeError::Fixture {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn skip_reason(case: &TestCase, has_only: bool, filter: Option<&str>) -> Option<String> {
    if has_only && !case.only {
        return Some("Not marked 'only' in 'only' mode".to_string());
    }
    if case.skip {
        return Some("Marked 'skip'".to_string());
    }
    if let Some(f) = filter {
        if !case.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(format!("Filtered out by substring: {}", f));
        }
    }
    None
}

// =============================================================================
// EXECUTION
// =============================================================================

fn run_phase(case: &TestCase) -> Result<ValidationReport, String> {
    let pipeline = Pipeline::new(case.policy);
    match (&case.text, &case.symbols) {
        (Some(text), None) => {
            let document = Document::from_text(&case.name, text.as_str());
            Ok(pipeline.check_document(&document))
        }
        (None, Some(symbols)) => {
            let tokens = parse_symbols(symbols).map_err(|e| e.to_string())?;
            Ok(pipeline.check_tokens(tokens))
        }
        (Some(_), Some(_)) => Err("case sets both 'text' and 'symbols'".to_string()),
        (None, None) => Err("case sets neither 'text' nor 'symbols'".to_string()),
    }
}

/// Expected and actual trace logs, one entry per line.
type LogDiff = (String, String);

/// A failed comparison: the message and, for log mismatches, the diff.
type Mismatch = (String, Option<LogDiff>);

fn compare_phase(case: &TestCase, report: &ValidationReport) -> Result<(), Mismatch> {
    if let Some(expected) = &case.expect_tokens {
        let expected: String = expected.chars().filter(|c| !c.is_whitespace()).collect();
        let actual = report.token_stream();
        if expected.to_uppercase() != actual {
            return Err((
                format!("Token stream did not match\nExpected: {}\nActual: {}", expected, actual),
                None,
            ));
        }
    }

    if let Some(expected) = case.expect_accept {
        if expected != report.accepted() {
            return Err((
                format!(
                    "Expected {}, got {}: {}",
                    verdict_word(expected),
                    verdict_word(report.accepted()),
                    report.verdict.reason().unwrap_or_default()
                ),
                None,
            ));
        }
    }

    if let Some(code) = &case.expect_error_code {
        let actual = report.verdict.rejection().map(|r| r.kind().as_str());
        if actual != Some(code.as_str()) {
            return Err((
                format!(
                    "Expected rejection {}, got {}",
                    code,
                    actual.unwrap_or("none")
                ),
                None,
            ));
        }
    }

    if let Some(expected) = &case.expect_log {
        let actual = report.verdict.log_lines();
        if *expected != actual {
            return Err((
                "Trace log did not match".to_string(),
                Some((expected.join("\n"), actual.join("\n"))),
            ));
        }
    }

    Ok(())
}

fn verdict_word(accepted: bool) -> &'static str {
    if accepted {
        "ACCEPT"
    } else {
        "REJECT"
    }
}

pub fn run_test_case(file: &str, case: &TestCase) -> TestResult {
    let fail = |error: String, tokens: Option<String>, log_diff: Option<LogDiff>| {
        TestResult::Fail {
            file: file.to_string(),
            name: case.name.clone(),
            error,
            tokens,
            log_diff,
        }
    };

    let report = match run_phase(case) {
        Ok(report) => report,
        Err(error) => return fail(error, None, None),
    };

    match compare_phase(case, &report) {
        Ok(()) => TestResult::Pass {
            file: file.to_string(),
            name: case.name.clone(),
        },
        Err((error, log_diff)) => fail(error, Some(report.token_stream()), log_diff),
    }
}

/// Discovers, filters and runs every case under the configured root.
/// Suites that fail to load count as failures.
pub fn collect_results(filter: Option<&str>, config: &HarnessConfig) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut cases = Vec::new();

    for path in discover_yaml_files(&config.suite_root) {
        let file = path.display().to_string();
        match load_test_cases(&path) {
            Ok(loaded) => cases.extend(loaded.into_iter().map(|case| (file.clone(), case))),
            Err(e) => results.push(TestResult::Fail {
                file: file.clone(),
                name: "<suite>".to_string(),
                error: e.to_string(),
                tokens: None,
                log_diff: None,
            }),
        }
    }

    let has_only = cases.iter().any(|(_, case)| case.only);
    for (file, case) in &cases {
        let result = match skip_reason(case, has_only, filter) {
            Some(reason) => TestResult::Skipped {
                file: file.clone(),
                name: case.name.clone(),
                reason,
            },
            None => run_test_case(file, case),
        };
        results.push(result);
    }
    results
}

// =============================================================================
// REPORTING
// =============================================================================

pub fn partition_results(results: &[TestResult]) -> Summary {
    let mut summary = Summary::default();
    for r in results {
        match r {
            TestResult::Pass { .. } => summary.passed += 1,
            TestResult::Fail { .. } => summary.failed += 1,
            TestResult::Skipped { .. } => summary.skipped += 1,
        }
    }
    summary
}

pub fn report_results<W: Write>(
    out: &mut W,
    results: &[TestResult],
    config: &HarnessConfig,
) -> io::Result<Summary> {
    for r in results {
        match r {
            TestResult::Pass { file, name } => {
                writeln!(out, "{}: {} [{}]", config.colorize("PASS", GREEN), name, file)?
            }
            TestResult::Fail { .. } => print_failure(out, r, config)?,
            TestResult::Skipped { file, name, reason } => writeln!(
                out,
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                name,
                file,
                reason
            )?,
        }
    }

    let summary = partition_results(results);
    writeln!(
        out,
        "\nFixture summary: total {}, {} {}, {} {}, {} {}",
        results.len(),
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    )?;
    Ok(summary)
}

fn print_failure<W: Write>(out: &mut W, r: &TestResult, config: &HarnessConfig) -> io::Result<()> {
    if let TestResult::Fail {
        file,
        name,
        error,
        tokens,
        log_diff,
    } = r
    {
        writeln!(out, "{}: {} [{}]", config.colorize("FAIL", RED), name, file)?;
        for line in error.lines() {
            writeln!(out, "  {}", line)?;
        }
        if let Some(tokens) = tokens {
            writeln!(out, "  Tokens: {}", tokens)?;
        }
        if let Some((expected, actual)) = log_diff {
            writeln!(out, "  Diff:")?;
            print_diff(out, expected, actual, config)?;
        }
    }
    Ok(())
}

/// Line diff of two trace logs.
pub fn print_diff<W: Write>(
    out: &mut W,
    expected: &str,
    actual: &str,
    config: &HarnessConfig,
) -> io::Result<()> {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                for line in x.lines() {
                    writeln!(out, "    {}", line)?;
                }
            }
            Difference::Rem(x) => {
                for line in x.lines() {
                    writeln!(out, "  - {}", config.colorize(line, GREEN))?;
                }
            }
            Difference::Add(x) => {
                for line in x.lines() {
                    writeln!(out, "  + {}", config.colorize(line, RED))?;
                }
            }
        }
    }
    Ok(())
}

pub fn run_all_tests(filter: Option<&str>, config: &HarnessConfig) -> io::Result<Summary> {
    let results = collect_results(filter, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report_results(&mut out, &results, config)
}
