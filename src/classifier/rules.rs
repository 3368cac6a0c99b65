//! The built-in trigger table.
//!
//! Groups are evaluated top to bottom and the first group with a match wins,
//! so the order of [`RULE_TABLE`] is part of the classifier's contract.
//! Triggers are plain lowercase phrases; the classifier escapes them and
//! anchors both ends on word boundaries.

use crate::alphabet::Symbol;

/// Trigger phrases for one symbol.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub symbol: Symbol,
    pub triggers: &'static [&'static str],
}

/// Precedence order: H, R, D, S, C, B, F, T, X.
pub const RULE_TABLE: &[RuleGroup] = &[
    RuleGroup {
        symbol: Symbol::H,
        triggers: &[
            "employment agreement",
            "contract of employment",
            "know all men",
            "service agreement",
            "letter of offer",
        ],
    },
    RuleGroup {
        symbol: Symbol::R,
        triggers: &["position", "job title", "designation", "hired as", "rank"],
    },
    RuleGroup {
        symbol: Symbol::D,
        // "term" is bounded, so it never fires on "termination".
        triggers: &[
            "term",
            "effective date",
            "probationary",
            "start date",
            "period of employment",
            "duration",
        ],
    },
    RuleGroup {
        symbol: Symbol::S,
        triggers: &[
            "duties",
            "responsibilities",
            "functions",
            "deliverables",
            "scope of work",
            "obligations",
            "job description",
        ],
    },
    RuleGroup {
        symbol: Symbol::C,
        triggers: &[
            "basic pay",
            "monthly rate",
            "gross salary",
            "remuneration",
            "hourly rate",
            "compensation",
            "salary",
        ],
    },
    RuleGroup {
        symbol: Symbol::B,
        triggers: &[
            "allowance",
            "13th month",
            "hmo",
            "incentives",
            "sss",
            "philhealth",
            "pag-ibig",
            "insurance",
            "benefits",
        ],
    },
    RuleGroup {
        symbol: Symbol::F,
        triggers: &[
            "confidentiality",
            "non-disclosure",
            "data privacy",
            "proprietary",
            "intellectual property",
        ],
    },
    RuleGroup {
        symbol: Symbol::T,
        triggers: &[
            "resignation",
            "termination",
            "notice period",
            "breach",
            "separation",
            "end of contract",
        ],
    },
    RuleGroup {
        symbol: Symbol::X,
        triggers: &["signed", "witness", "conforme", "accepted by", "signature"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_document_order() {
        let order: Vec<Symbol> = RULE_TABLE.iter().map(|g| g.symbol).collect();
        assert_eq!(order, Symbol::ALL.to_vec());
    }

    #[test]
    fn triggers_are_normalized() {
        for group in RULE_TABLE {
            assert!(!group.triggers.is_empty());
            for trigger in group.triggers {
                assert_eq!(*trigger, trigger.trim().to_lowercase());
            }
        }
    }
}
