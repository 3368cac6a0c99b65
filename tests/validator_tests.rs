//! Properties of the contract pushdown automaton, driven through the public API.

use std::thread;

use jobsafe::{parse_symbols, RejectionKind, State, StackPolicy, Symbol, TraceEntry, Validator};

fn symbols(s: &str) -> Vec<Symbol> {
    parse_symbols(s).unwrap()
}

fn kind(s: &str) -> Option<RejectionKind> {
    Validator::new()
        .validate(&symbols(s))
        .rejection()
        .map(|r| r.kind())
}

#[test]
fn one_of_each_section_in_order_accepts() {
    let verdict = Validator::new().validate(&Symbol::ALL);
    assert!(verdict.accepted, "{:#?}", verdict.log_lines());
    assert_eq!(
        verdict.log_lines(),
        vec![
            "Transition: Start -> Header (Input: H)",
            "Action: PUSH 'role_marker'",
            "Transition: Header -> Role (Input: R)",
            "Transition: Role -> Duration (Input: D)",
            "Action: POP 'role_marker'",
            "Transition: Duration -> Scope (Input: S)",
            "Action: PUSH 'pay_marker'",
            "Transition: Scope -> Pay (Input: C)",
            "Action: POP 'pay_marker'",
            "Transition: Pay -> Benefits (Input: B)",
            "Transition: Benefits -> Legal (Input: F)",
            "Transition: Legal -> TerminationClause (Input: T)",
            "Transition: TerminationClause -> Accept (Input: X)",
            "ACCEPT: Contract structure valid.",
        ]
    );
}

#[test]
fn every_proper_prefix_is_incomplete() {
    for len in 1..Symbol::ALL.len() {
        let verdict = Validator::new().validate(&Symbol::ALL[..len]);
        assert!(!verdict.accepted);
        assert_eq!(
            verdict.rejection().map(|r| r.kind()),
            Some(RejectionKind::IncompleteDocument),
            "prefix of length {}",
            len
        );
        assert_eq!(
            verdict.reason(),
            Some(format!(
                "REJECT: Contract incomplete. Ended in state '{}'.",
                verdict.final_state
            ))
        );
    }
}

#[test]
fn missing_role_is_rejected() {
    assert_eq!(kind("HSCBFTX"), Some(RejectionKind::UnexpectedSymbol));
}

#[test]
fn compensation_cannot_skip_scope() {
    let verdict = Validator::new().validate(&symbols("HRCBFTX"));
    assert_eq!(
        verdict.reason().as_deref(),
        Some("REJECT: Unexpected token 'C' in state 'Role'.")
    );
    assert_eq!(kind("HRDCBFTX"), Some(RejectionKind::UnexpectedSymbol));
}

#[test]
fn going_back_to_an_earlier_section_is_rejected() {
    assert_eq!(kind("HRDSCBFTR"), Some(RejectionKind::UnexpectedSymbol));
    assert_eq!(kind("HRDSCBFTXH"), Some(RejectionKind::UnexpectedSymbol));
}

#[test]
fn repeated_sections_are_absorbed() {
    let minimal = Validator::new().validate(&symbols("HRDSCBFTX"));
    let verbose = Validator::new().validate(&symbols("HHRRDSCCBFTTXX"));
    assert!(verbose.accepted, "{:#?}", verbose.log_lines());
    assert_eq!(verbose.accepted, minimal.accepted);
    assert_eq!(verbose.final_state, minimal.final_state);
    assert!(verbose.stack.is_empty());
    let pushes = verbose
        .log
        .iter()
        .filter(|e| matches!(e, TraceEntry::Push(_)))
        .count();
    assert_eq!(pushes, 2);
}

#[test]
fn empty_sequence_always_rejects() {
    for policy in [StackPolicy::Strict, StackPolicy::Lenient] {
        let verdict = Validator::with_policy(policy).validate(&[]);
        assert!(!verdict.accepted);
        assert_eq!(verdict.log_lines(), vec!["REJECT: Empty token stream."]);
        assert_eq!(verdict.final_state, State::Start);
    }
}

#[test]
fn first_symbol_must_be_header() {
    for symbol in Symbol::ALL.iter().copied().filter(|s| *s != Symbol::H) {
        let verdict = Validator::new().validate(&[symbol]);
        assert_eq!(
            verdict.rejection().map(|r| r.kind()),
            Some(RejectionKind::UnexpectedSymbol)
        );
        assert_eq!(verdict.log.len(), 1);
    }
}

#[test]
fn runs_are_independent_and_repeatable() {
    let validator = Validator::new();
    let input = symbols("HRDSCBFT");
    let first = validator.validate(&input);
    let accepted = validator.validate(&Symbol::ALL);
    let second = validator.validate(&input);
    assert_eq!(first, second);
    assert!(accepted.accepted);
    assert_eq!(Validator::new().validate(&input), first);
}

#[test]
fn one_validator_is_shareable_across_threads() {
    let validator = Validator::new();
    let inputs = ["HRDSCBFTX", "HRCBFTX", "HRDS", "HHRRSSCCBBFFTTXX"];
    let expected: Vec<_> = inputs.iter().map(|s| validator.validate(&symbols(s))).collect();

    let actual: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|s| {
                let validator = &validator;
                scope.spawn(move || validator.validate(&symbols(s)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(actual, expected);
}

#[test]
fn lenient_policy_matches_strict_on_balanced_contracts() {
    for input in ["HRDSCBFTX", "HRSCBFTX", "HRCB", ""] {
        let strict = Validator::with_policy(StackPolicy::Strict).validate(&symbols(input));
        let lenient = Validator::with_policy(StackPolicy::Lenient).validate(&symbols(input));
        assert_eq!(strict, lenient, "input {:?}", input);
    }
}
