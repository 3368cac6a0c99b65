//! Error taxonomy for JobSafe.
//!
//! Two families live here:
//!
//! - [`Rejection`] is a structural verdict produced by the validator. It is a
//!   value, never a panic, and its `Display` text is exactly the `REJECT:` line
//!   appended to the trace log.
//! - [`JobsafeError`] covers host-level failures around the core: reading
//!   documents, loading configuration, parsing fixture suites.
//!
//! Both implement `miette::Diagnostic` so the CLI can render them with codes
//! and help text.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::alphabet::{Marker, State, Symbol};

/// Stable classification of a rejection, used by fixtures and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    EmptyInput,
    UnexpectedSymbol,
    StackViolation,
    IncompleteDocument,
    UnresolvedDependency,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::EmptyInput => "EmptyInput",
            RejectionKind::UnexpectedSymbol => "UnexpectedSymbol",
            RejectionKind::StackViolation => "StackViolation",
            RejectionKind::IncompleteDocument => "IncompleteDocument",
            RejectionKind::UnresolvedDependency => "UnresolvedDependency",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a symbol sequence was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Rejection {
    #[error("REJECT: Empty token stream.")]
    EmptyInput,

    #[error("REJECT: Unexpected token '{symbol}' in state '{state}'.")]
    UnexpectedSymbol {
        symbol: Symbol,
        state: State,
        /// Zero-based index into the symbol sequence.
        position: usize,
    },

    #[error(
        "REJECT: Stack Violation. Expected to POP '{expected}', found {}",
        format_stack(.stack)
    )]
    StackViolation {
        expected: Marker,
        stack: Vec<Marker>,
        symbol: Symbol,
        position: usize,
    },

    #[error("REJECT: Contract incomplete. Ended in state '{state}'.")]
    IncompleteDocument { state: State },

    #[error("REJECT: Unresolved dependencies. Stack: {}", format_stack(.stack))]
    UnresolvedDependency { stack: Vec<Marker> },
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::EmptyInput => RejectionKind::EmptyInput,
            Rejection::UnexpectedSymbol { .. } => RejectionKind::UnexpectedSymbol,
            Rejection::StackViolation { .. } => RejectionKind::StackViolation,
            Rejection::IncompleteDocument { .. } => RejectionKind::IncompleteDocument,
            Rejection::UnresolvedDependency { .. } => RejectionKind::UnresolvedDependency,
        }
    }

    /// Index of the offending symbol, for rejections raised mid-sequence.
    pub fn position(&self) -> Option<usize> {
        match self {
            Rejection::UnexpectedSymbol { position, .. }
            | Rejection::StackViolation { position, .. } => Some(*position),
            _ => None,
        }
    }

    fn help_text(&self) -> String {
        match self {
            Rejection::EmptyInput => {
                "no line of the document matched any contract section".to_string()
            }
            Rejection::UnexpectedSymbol { symbol, state, .. } => format!(
                "a {} section cannot follow the {} section; sections must appear in the order \
                 Header, Role, Duration, Scope, Compensation, Benefits, Confidentiality, \
                 Termination, Signatures",
                symbol.section(),
                state
            ),
            Rejection::StackViolation { expected, .. } => format!(
                "the section closing '{}' appeared without its opening section still pending",
                expected
            ),
            Rejection::IncompleteDocument { .. } => {
                "the document ends before its Signatures section".to_string()
            }
            Rejection::UnresolvedDependency { .. } => {
                "an opened Role or Compensation section was never followed by its closing section"
                    .to_string()
            }
        }
    }
}

impl Diagnostic for Rejection {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind() {
            RejectionKind::EmptyInput => "jobsafe::reject::empty_input",
            RejectionKind::UnexpectedSymbol => "jobsafe::reject::unexpected_symbol",
            RejectionKind::StackViolation => "jobsafe::reject::stack_violation",
            RejectionKind::IncompleteDocument => "jobsafe::reject::incomplete_document",
            RejectionKind::UnresolvedDependency => "jobsafe::reject::unresolved_dependency",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.help_text()))
    }
}

/// Renders a stack bottom-to-top, e.g. `[role_marker, pay_marker]`.
pub fn format_stack(stack: &[Marker]) -> String {
    let names: Vec<&str> = stack.iter().map(|m| m.name()).collect();
    format!("[{}]", names.join(", "))
}

/// Failures outside the validation core.
#[derive(Debug, Error, Diagnostic)]
pub enum JobsafeError {
    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(jobsafe::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}", .path.display())]
    #[diagnostic(
        code(jobsafe::config),
        help("expected keys: policy, format, color, log_level, preview_width")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid fixture suite {}: {message}", .path.display())]
    #[diagnostic(code(jobsafe::fixture))]
    Fixture { path: PathBuf, message: String },

    #[error("'{input}' is not a contract section symbol")]
    #[diagnostic(
        code(jobsafe::symbol),
        help("valid symbols are H, R, D, S, C, B, F, T, X")
    )]
    InvalidSymbol { input: String },

    #[error("failed to write output")]
    #[diagnostic(code(jobsafe::output))]
    Output(#[from] std::io::Error),

    #[error("failed to serialize report")]
    #[diagnostic(code(jobsafe::report))]
    Report(#[from] serde_json::Error),

    #[error("failed to install log subscriber: {0}")]
    #[diagnostic(code(jobsafe::logging))]
    Logging(String),
}
