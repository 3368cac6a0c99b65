//! Source snippets for rejections.
//!
//! Points at the document line whose symbol stopped the automaton, with a
//! little surrounding context.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::ingest::Document;

/// Lines of context shown before and after the offending line.
const SNIPPET_CONTEXT_LINES: usize = 2;

pub struct RejectionSnippet<'a> {
    document: &'a Document,
    /// One-based line number.
    line_number: usize,
}

impl<'a> RejectionSnippet<'a> {
    pub fn new(document: &'a Document, line_number: usize) -> Self {
        Self {
            document,
            line_number,
        }
    }
}

impl Display for RejectionSnippet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let first = self.line_number.saturating_sub(SNIPPET_CONTEXT_LINES).max(1);
        let last = self.line_number + SNIPPET_CONTEXT_LINES;

        writeln!(f, "  --> {}:{}", self.document.name, self.line_number)?;
        for (index, line) in self.document.lines().enumerate() {
            let number = index + 1;
            if number < first {
                continue;
            }
            if number > last {
                break;
            }
            let marker = if number == self.line_number { '>' } else { ' ' };
            writeln!(f, "{} {:>4} | {}", marker, number, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_marks_line_with_context() {
        let doc = Document::from_text("c.txt", "a\nb\nc\nd\ne\nf\ng");
        let text = RejectionSnippet::new(&doc, 4).to_string();
        assert_eq!(
            text,
            "  --> c.txt:4\n     2 | b\n     3 | c\n>    4 | d\n     5 | e\n     6 | f\n"
        );
    }

    #[test]
    fn snippet_clamps_at_document_start() {
        let doc = Document::from_text("c.txt", "a\nb\nc");
        let text = RejectionSnippet::new(&doc, 1).to_string();
        assert!(text.contains(">    1 | a"));
        assert!(text.contains("     3 | c"));
    }
}
