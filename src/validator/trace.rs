//! Trace log entries.
//!
//! Entries are typed so callers can inspect a run without string matching;
//! their `Display` form is the human-readable log line.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::alphabet::{Marker, State, Symbol};
use crate::diagnostics::Rejection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEntry {
    Push(Marker),
    SkipPush(Marker),
    Pop(Marker),
    /// A failed pop tolerated under the lenient policy.
    IgnoredCloser { symbol: Symbol, marker: Marker },
    Transition { from: State, to: State, symbol: Symbol },
    Reject(Rejection),
    Accept,
}

impl TraceEntry {
    pub fn is_rejection(&self) -> bool {
        matches!(self, TraceEntry::Reject(_))
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Push(marker) => write!(f, "Action: PUSH '{}'", marker),
            TraceEntry::SkipPush(marker) => write!(
                f,
                "Action: SKIP PUSH (Requirement '{}' already active)",
                marker
            ),
            TraceEntry::Pop(marker) => write!(f, "Action: POP '{}'", marker),
            TraceEntry::IgnoredCloser { symbol, marker } => write!(
                f,
                "INFO: Ignored redundant/unmatched closer '{}' for '{}'",
                symbol, marker
            ),
            TraceEntry::Transition { from, to, symbol } => {
                write!(f, "Transition: {} -> {} (Input: {})", from, to, symbol)
            }
            TraceEntry::Reject(rejection) => write!(f, "{}", rejection),
            TraceEntry::Accept => f.write_str("ACCEPT: Contract structure valid."),
        }
    }
}

impl Serialize for TraceEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
