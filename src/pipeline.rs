//! Lines in, verdict out.
//!
//! Classification and validation stay independent; this module only wires
//! the classifier's output into the validator and keeps enough of the
//! intermediate state to explain the verdict.

use serde::Serialize;

use crate::alphabet::Symbol;
use crate::classifier::{self, ClassifiedLine, Classifier};
use crate::ingest::Document;
use crate::validator::{StackPolicy, Validator, Verdict};

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    classifier: Classifier,
    validator: Validator,
}

/// Everything one check produced.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Document name, when the input came from a document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Hex SHA-256 of the document text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub policy: StackPolicy,
    pub lines: Vec<ClassifiedLine>,
    pub tokens: Vec<Symbol>,
    pub verdict: Verdict,
}

impl ValidationReport {
    pub fn accepted(&self) -> bool {
        self.verdict.accepted
    }

    /// The token stream as letters, e.g. `HRDSCBFTX`.
    pub fn token_stream(&self) -> String {
        self.tokens.iter().map(|s| s.letter()).collect()
    }
}

impl Pipeline {
    pub fn new(policy: StackPolicy) -> Self {
        Self::from_parts(Classifier::default(), Validator::with_policy(policy))
    }

    pub fn from_parts(classifier: Classifier, validator: Validator) -> Self {
        Self {
            classifier,
            validator,
        }
    }

    pub fn check_lines<'a, I>(&self, lines: I) -> ValidationReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines = self.classifier.classify_lines(lines);
        let tokens = classifier::symbols(&lines);
        tracing::debug!(tokens = tokens.len(), "token stream built");
        self.check_tokens_with_lines(tokens, lines)
    }

    pub fn check_text(&self, text: &str) -> ValidationReport {
        self.check_document(&Document::from_text("<text>", text))
    }

    pub fn check_document(&self, document: &Document) -> ValidationReport {
        let _span = tracing::info_span!("check", document = %document.name).entered();
        let mut report = self.check_lines(document.lines());
        report.source = Some(document.name.clone());
        report.digest = Some(document.digest());
        report
    }

    /// Validates a symbol sequence directly, bypassing classification.
    pub fn check_tokens(&self, tokens: Vec<Symbol>) -> ValidationReport {
        self.check_tokens_with_lines(tokens, Vec::new())
    }

    fn check_tokens_with_lines(
        &self,
        tokens: Vec<Symbol>,
        lines: Vec<ClassifiedLine>,
    ) -> ValidationReport {
        let verdict = self.validator.validate(&tokens);
        ValidationReport {
            source: None,
            digest: None,
            policy: self.validator.policy(),
            lines,
            tokens,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclassified_lines_leave_no_placeholder() {
        let lines = ["Employment Agreement", "hello", "", "Signed"];
        let report = Pipeline::default().check_lines(lines);
        assert_eq!(report.tokens, vec![Symbol::H, Symbol::X]);
        assert_eq!(report.token_stream(), "HX");
        assert!(!report.accepted());
    }

    #[test]
    fn documents_carry_name_and_digest() {
        let doc = Document::from_text("offer.txt", "Letter of Offer");
        let report = Pipeline::default().check_document(&doc);
        assert_eq!(report.source.as_deref(), Some("offer.txt"));
        assert_eq!(report.digest, Some(doc.digest()));
    }

    #[test]
    fn token_checks_skip_classification() {
        let tokens = crate::alphabet::parse_symbols("HRDSCBFTX").unwrap();
        let report = Pipeline::new(StackPolicy::Lenient).check_tokens(tokens);
        assert!(report.accepted());
        assert!(report.lines.is_empty());
        assert_eq!(report.policy, StackPolicy::Lenient);
    }
}
