//! The shared alphabet between the classifier and the validator.
//!
//! `Symbol` is the only contract the two stages share: the classifier emits
//! symbols, the validator consumes them. States and markers belong to the
//! automaton but live here so reports and diagnostics can name them without
//! depending on validator internals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::diagnostics::JobsafeError;

/// One contract-section category assigned to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    /// Header
    H,
    /// Role
    R,
    /// Duration
    D,
    /// Scope / duties
    S,
    /// Compensation
    C,
    /// Benefits
    B,
    /// Confidentiality
    F,
    /// Termination
    T,
    /// Signatures
    X,
}

/// How a symbol participates in the open/close discipline of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolRole {
    /// Opens an obligation (pushes a marker).
    Opener,
    /// Closes an obligation (pops a marker).
    Closer,
    Plain,
}

impl Symbol {
    /// Every symbol, in the mandated document order.
    pub const ALL: [Symbol; 9] = [
        Symbol::H,
        Symbol::R,
        Symbol::D,
        Symbol::S,
        Symbol::C,
        Symbol::B,
        Symbol::F,
        Symbol::T,
        Symbol::X,
    ];

    pub fn letter(self) -> char {
        match self {
            Symbol::H => 'H',
            Symbol::R => 'R',
            Symbol::D => 'D',
            Symbol::S => 'S',
            Symbol::C => 'C',
            Symbol::B => 'B',
            Symbol::F => 'F',
            Symbol::T => 'T',
            Symbol::X => 'X',
        }
    }

    pub fn from_letter(letter: char) -> Option<Symbol> {
        match letter.to_ascii_uppercase() {
            'H' => Some(Symbol::H),
            'R' => Some(Symbol::R),
            'D' => Some(Symbol::D),
            'S' => Some(Symbol::S),
            'C' => Some(Symbol::C),
            'B' => Some(Symbol::B),
            'F' => Some(Symbol::F),
            'T' => Some(Symbol::T),
            'X' => Some(Symbol::X),
            _ => None,
        }
    }

    /// Human-readable section name.
    pub fn section(self) -> &'static str {
        match self {
            Symbol::H => "Header",
            Symbol::R => "Role",
            Symbol::D => "Duration",
            Symbol::S => "Scope/Duties",
            Symbol::C => "Compensation",
            Symbol::B => "Benefits",
            Symbol::F => "Confidentiality",
            Symbol::T => "Termination",
            Symbol::X => "Signatures",
        }
    }

    pub fn role(self) -> SymbolRole {
        match self {
            Symbol::R | Symbol::C => SymbolRole::Opener,
            Symbol::S | Symbol::B => SymbolRole::Closer,
            _ => SymbolRole::Plain,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Parses a symbol stream such as `"HRDSCBFTX"`, `"H R D"` or `"H, R, D"`.
///
/// Whitespace, commas and brackets are separators; any other character must
/// be a symbol letter.
pub fn parse_symbols(input: &str) -> Result<Vec<Symbol>, JobsafeError> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '[' | ']' | '\'' | '"'))
        .map(|c| {
            Symbol::from_letter(c).ok_or_else(|| JobsafeError::InvalidSymbol {
                input: c.to_string(),
            })
        })
        .collect()
}

impl FromStr for Symbol {
    type Err = JobsafeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => Symbol::from_letter(c),
            _ => None,
        };
        symbol.ok_or_else(|| JobsafeError::InvalidSymbol {
            input: s.to_string(),
        })
    }
}

/// Automaton states. `Start` is initial, `Accept` the sole accepting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Start,
    Header,
    Role,
    Duration,
    Scope,
    Pay,
    Benefits,
    Legal,
    TerminationClause,
    Accept,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Start => "Start",
            State::Header => "Header",
            State::Role => "Role",
            State::Duration => "Duration",
            State::Scope => "Scope",
            State::Pay => "Pay",
            State::Benefits => "Benefits",
            State::Legal => "Legal",
            State::TerminationClause => "TerminationClause",
            State::Accept => "Accept",
        }
    }

    pub fn is_accepting(self) -> bool {
        self == State::Accept
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An outstanding structural obligation on the auxiliary stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Opened by Role, closed by Scope.
    RoleMarker,
    /// Opened by Compensation, closed by Benefits.
    PayMarker,
}

impl Marker {
    pub fn name(self) -> &'static str {
        match self {
            Marker::RoleMarker => "role_marker",
            Marker::PayMarker => "pay_marker",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
