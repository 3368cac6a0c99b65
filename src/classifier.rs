//! Line classifier.
//!
//! Maps one line of raw contract text to at most one [`Symbol`]. The
//! classifier is a pure function of its compiled rule table and is safe to
//! share across threads.
//!
//! Matching steps:
//! 1. Trim and lowercase the line. Empty lines have no symbol.
//! 2. Lines of [`LONG_LINE_WORDS`] or more words are cut to their first
//!    [`WORD_WINDOW`] words; shorter lines are searched whole.
//! 3. Rule groups are tried in table order; the first group with a
//!    word-bounded trigger in the search text wins.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::alphabet::Symbol;

pub mod rules;

pub use rules::{RuleGroup, RULE_TABLE};

/// Lines with at least this many words are truncated before searching.
pub const LONG_LINE_WORDS: usize = 20;

/// Number of leading words searched on long lines.
pub const WORD_WINDOW: usize = 15;

static STANDARD: Lazy<Classifier> = Lazy::new(|| {
    Classifier::from_rules(RULE_TABLE).expect("built-in trigger table must compile")
});

#[derive(Debug, Clone)]
struct CompiledGroup {
    symbol: Symbol,
    pattern: Regex,
}

/// A compiled, ordered rule table.
#[derive(Debug, Clone)]
pub struct Classifier {
    groups: Vec<CompiledGroup>,
}

/// A line that produced a symbol, with its position in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    /// One-based line number.
    pub line_number: usize,
    pub symbol: Symbol,
    /// The line with surrounding whitespace removed.
    pub text: String,
}

impl Classifier {
    /// The classifier built from [`RULE_TABLE`], compiled once per process.
    pub fn standard() -> &'static Classifier {
        &STANDARD
    }

    /// Compiles an ordered table. Each group becomes one alternation anchored
    /// on word boundaries.
    pub fn from_rules(rules: &[RuleGroup]) -> Result<Self, regex::Error> {
        let groups = rules
            .iter()
            .map(|group| {
                let alternation = group
                    .triggers
                    .iter()
                    .map(|t| regex::escape(t))
                    .collect::<Vec<_>>()
                    .join("|");
                let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?;
                Ok(CompiledGroup {
                    symbol: group.symbol,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { groups })
    }

    pub fn classify(&self, line: &str) -> Option<Symbol> {
        let normalized = line.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        let text = search_window(&normalized);
        self.groups
            .iter()
            .find(|group| group.pattern.is_match(&text))
            .map(|group| group.symbol)
    }

    /// Classifies lines in order, dropping those without a symbol.
    pub fn classify_lines<'a, I>(&self, lines: I) -> Vec<ClassifiedLine>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let symbol = self.classify(line)?;
                tracing::trace!(line = index + 1, %symbol, "classified line");
                Some(ClassifiedLine {
                    line_number: index + 1,
                    symbol,
                    text: line.trim().to_string(),
                })
            })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        STANDARD.clone()
    }
}

/// The part of a normalized line that is searched for triggers.
pub fn search_window(normalized: &str) -> Cow<'_, str> {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() >= LONG_LINE_WORDS {
        Cow::Owned(words[..WORD_WINDOW].join(" "))
    } else {
        Cow::Borrowed(normalized)
    }
}

/// Projects classified lines onto the symbol sequence the validator consumes.
pub fn symbols(lines: &[ClassifiedLine]) -> Vec<Symbol> {
    lines.iter().map(|l| l.symbol).collect()
}
