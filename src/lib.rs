//! # jobsafe
//!
//! Structural validation of employment contracts.
//!
//! Two independent stages, consumed in sequence:
//!
//! 1. [`classifier`] maps each line of text to at most one section
//!    [`Symbol`].
//! 2. [`validator`] runs the symbol sequence through a deterministic
//!    pushdown automaton that enforces section order and checks that
//!    Role/Scope and Compensation/Benefits are opened and closed in nested
//!    order.
//!
//! ```
//! use jobsafe::{Pipeline, StackPolicy};
//!
//! let report = Pipeline::new(StackPolicy::Strict).check_text(
//!     "Employment Agreement\nPosition: Analyst\nDuties: reporting\n\
//!      Basic Pay: 30,000\nHMO coverage\nConfidentiality\nTermination\nSigned",
//! );
//! assert!(report.accepted());
//! assert_eq!(report.token_stream(), "HRSCBFTX");
//! ```

pub mod alphabet;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod ingest;
pub mod pipeline;
pub mod test_harness;
pub mod validator;

pub use alphabet::{parse_symbols, Marker, State, Symbol, SymbolRole};
pub use classifier::{ClassifiedLine, Classifier};
pub use config::JobsafeConfig;
pub use diagnostics::{JobsafeError, Rejection, RejectionKind};
pub use ingest::Document;
pub use pipeline::{Pipeline, ValidationReport};
pub use validator::{StackPolicy, TraceEntry, Validator, Verdict};
