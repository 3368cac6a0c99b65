//! # Validator
//!
//! A deterministic pushdown automaton over the contract alphabet.
//!
//! The finite control enforces the section order
//! Header, Role, Duration, Scope, Compensation, Benefits, Confidentiality,
//! Termination, Signatures. Self-loops absorb repeated mentions of the
//! current section. The auxiliary stack tracks two open/close pairs:
//! Role is closed by Scope, Compensation is closed by Benefits.
//!
//! A sequence is accepted iff the run ends in [`State::Accept`] with an
//! empty stack.
//!
//! ## Invariants
//! - The transition relation is immutable and total over `(State, Symbol)`:
//!   every pair not listed in [`transition`] rejects.
//! - Run state is allocated per [`Validator::validate`] call, so one
//!   validator can be shared freely.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::alphabet::{Marker, State, Symbol};
use crate::diagnostics::Rejection;

pub mod stack;
pub mod trace;

pub use stack::{PushOutcome, Stack, StackMismatch};
pub use trace::TraceEntry;

/// Stack effect attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Push(Marker),
    Pop(Marker),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: State,
    pub op: Option<StackOp>,
}

const fn go(to: State) -> Option<Transition> {
    Some(Transition { to, op: None })
}

const fn push(to: State, marker: Marker) -> Option<Transition> {
    Some(Transition {
        to,
        op: Some(StackOp::Push(marker)),
    })
}

const fn pop(to: State, marker: Marker) -> Option<Transition> {
    Some(Transition {
        to,
        op: Some(StackOp::Pop(marker)),
    })
}

/// The transition relation. `None` means the symbol is not allowed in `state`.
pub fn transition(state: State, symbol: Symbol) -> Option<Transition> {
    use Marker::{PayMarker, RoleMarker};
    use State::*;
    use Symbol::*;

    match (state, symbol) {
        (Start, H) => go(Header),

        (Header, H) => go(Header),
        (Header, R) => push(Role, RoleMarker),

        (Role, R) => go(Role),
        (Role, D) => go(Duration),
        (Role, S) => pop(Scope, RoleMarker),

        (Duration, D) => go(Duration),
        (Duration, S) => pop(Scope, RoleMarker),

        (Scope, S) => go(Scope),
        (Scope, C) => push(Pay, PayMarker),

        (Pay, C) => go(Pay),
        (Pay, B) => pop(Benefits, PayMarker),

        (Benefits, B) => go(Benefits),
        (Benefits, F) => go(Legal),

        (Legal, F) => go(Legal),
        (Legal, T) => go(TerminationClause),

        (TerminationClause, T) => go(TerminationClause),
        (TerminationClause, X) => go(Accept),

        (Accept, X) => go(Accept),

        _ => None,
    }
}

/// What to do when a pop does not find its marker on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StackPolicy {
    /// Reject the document immediately.
    #[default]
    Strict,
    /// Log the unmatched closer, leave the stack alone and keep going.
    Lenient,
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    pub final_state: State,
    /// Markers still pending when the run stopped, bottom to top.
    pub stack: Vec<Marker>,
    pub log: Vec<TraceEntry>,
    /// The structured form of the closing `REJECT` entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl Verdict {
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// The last `REJECT` line, if any.
    pub fn reason(&self) -> Option<String> {
        self.rejection().map(|r| r.to_string())
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().map(|e| e.to_string()).collect()
    }
}

/// Per-call run state.
struct Run {
    state: State,
    stack: Stack,
    log: Vec<TraceEntry>,
}

impl Run {
    fn new() -> Self {
        Self {
            state: State::Start,
            stack: Stack::new(),
            log: Vec::new(),
        }
    }

    fn finish(self, rejection: Option<Rejection>) -> Verdict {
        Verdict {
            accepted: rejection.is_none(),
            final_state: self.state,
            stack: self.stack.into_vec(),
            log: self.log,
            rejection,
        }
    }

    fn reject(mut self, rejection: Rejection) -> Verdict {
        info!(reason = %rejection, "contract rejected");
        self.log.push(TraceEntry::Reject(rejection.clone()));
        self.finish(Some(rejection))
    }
}

/// The pushdown automaton. Holds only its policy; cheap to copy and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: StackPolicy,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: StackPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> StackPolicy {
        self.policy
    }

    pub fn validate(&self, symbols: &[Symbol]) -> Verdict {
        self.drive(symbols, transition)
    }

    fn drive<F>(&self, symbols: &[Symbol], table: F) -> Verdict
    where
        F: Fn(State, Symbol) -> Option<Transition>,
    {
        let _span = tracing::debug_span!("validate", symbols = symbols.len(), policy = ?self.policy)
            .entered();
        let mut run = Run::new();

        if symbols.is_empty() {
            return run.reject(Rejection::EmptyInput);
        }

        for (position, &symbol) in symbols.iter().enumerate() {
            let Some(step) = table(run.state, symbol) else {
                let state = run.state;
                return run.reject(Rejection::UnexpectedSymbol {
                    symbol,
                    state,
                    position,
                });
            };

            match step.op {
                Some(StackOp::Push(marker)) => match run.stack.push(marker) {
                    PushOutcome::Pushed => {
                        debug!(%marker, "push");
                        run.log.push(TraceEntry::Push(marker));
                    }
                    PushOutcome::AlreadyActive => {
                        debug!(%marker, "push skipped, already active");
                        run.log.push(TraceEntry::SkipPush(marker));
                    }
                },
                Some(StackOp::Pop(marker)) => match run.stack.pop(marker) {
                    Ok(_) => {
                        debug!(%marker, "pop");
                        run.log.push(TraceEntry::Pop(marker));
                    }
                    Err(mismatch) => match self.policy {
                        StackPolicy::Strict => {
                            return run.reject(Rejection::StackViolation {
                                expected: mismatch.expected,
                                stack: mismatch.found,
                                symbol,
                                position,
                            });
                        }
                        StackPolicy::Lenient => {
                            warn!(%symbol, %marker, "ignoring unmatched closer");
                            run.log.push(TraceEntry::IgnoredCloser { symbol, marker });
                        }
                    },
                },
                None => {}
            }

            debug!(from = %run.state, to = %step.to, %symbol, "transition");
            run.log.push(TraceEntry::Transition {
                from: run.state,
                to: step.to,
                symbol,
            });
            run.state = step.to;
        }

        if !run.state.is_accepting() {
            let state = run.state;
            return run.reject(Rejection::IncompleteDocument { state });
        }
        if !run.stack.is_empty() {
            let stack = run.stack.as_slice().to_vec();
            return run.reject(Rejection::UnresolvedDependency { stack });
        }

        info!("contract accepted");
        run.log.push(TraceEntry::Accept);
        run.finish(None)
    }
}
