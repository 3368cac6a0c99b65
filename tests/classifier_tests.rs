//! Line classification against realistic contract text.

mod common;

use jobsafe::classifier::{search_window, WORD_WINDOW};
use jobsafe::{Classifier, Symbol};

fn classify(line: &str) -> Option<Symbol> {
    Classifier::standard().classify(line)
}

fn filler(words: usize) -> Vec<&'static str> {
    vec!["lorem"; words]
}

#[test]
fn compensation_line() {
    assert_eq!(
        classify("The Basic Pay shall be 25,000 PHP per month."),
        Some(Symbol::C)
    );
}

#[test]
fn partial_words_do_not_match() {
    assert_eq!(classify("Frankly, I think this is a good idea."), None);
    assert_eq!(classify("We need strictly confidential treatment."), None);
    assert_eq!(classify("Either party may terminate this agreement."), None);
}

#[test]
fn each_section_has_a_recognisable_heading() {
    let headings = [
        ("EMPLOYMENT AGREEMENT", Symbol::H),
        ("Job Title: Accountant", Symbol::R),
        ("Probationary Period", Symbol::D),
        ("Duties and Responsibilities", Symbol::S),
        ("Remuneration", Symbol::C),
        ("SSS, PhilHealth and Pag-IBIG contributions", Symbol::B),
        ("Non-Disclosure", Symbol::F),
        ("Notice Period", Symbol::T),
        ("Conforme:", Symbol::X),
    ];
    for (line, symbol) in headings {
        assert_eq!(classify(line), Some(symbol), "{}", line);
    }
}

#[test]
fn long_line_trigger_past_window_is_ignored() {
    let mut words = filler(18);
    words.push("confidentiality");
    words.extend(filler(6));
    assert_eq!(words.len(), 25);
    assert_eq!(classify(&words.join(" ")), None);
}

#[test]
fn long_line_trigger_inside_window_matches() {
    let mut words = filler(10);
    words.push("confidentiality");
    words.extend(filler(14));
    assert_eq!(words.len(), 25);
    assert_eq!(classify(&words.join(" ")), Some(Symbol::F));
}

#[test]
fn nineteen_word_lines_are_searched_whole() {
    let mut words = filler(18);
    words.push("confidentiality");
    assert_eq!(classify(&words.join(" ")), Some(Symbol::F));
}

#[test]
fn window_boundary_is_exactly_fifteen_words() {
    let mut words = filler(WORD_WINDOW - 1);
    words.push("signed");
    words.extend(filler(10));
    assert_eq!(classify(&words.join(" ")), Some(Symbol::X));

    let mut words = filler(WORD_WINDOW);
    words.push("signed");
    words.extend(filler(10));
    assert_eq!(classify(&words.join(" ")), None);
    assert!(!search_window(&words.join(" ")).contains("signed"));
}

#[test]
fn sample_contract_tokens() {
    let lines: Vec<&str> = common::COMPENSATION_FIRST.trim().split('\n').collect();
    let classified = Classifier::standard().classify_lines(lines);
    let tokens: String = classified.iter().map(|l| l.symbol.letter()).collect();
    assert_eq!(tokens, "HHRRDDCCSBBFTX");
    assert_eq!(classified[0].line_number, 1);
    assert_eq!(classified.last().map(|l| l.text.as_str()), Some("Signed: ____________________"));
}

#[test]
fn classifier_is_shareable_across_threads() {
    let classifier = Classifier::default();
    std::thread::scope(|scope| {
        let a = scope.spawn(|| classifier.classify("Salary"));
        let b = scope.spawn(|| classifier.classify("Witness"));
        assert_eq!(a.join().unwrap(), Some(Symbol::C));
        assert_eq!(b.join().unwrap(), Some(Symbol::X));
    });
}
