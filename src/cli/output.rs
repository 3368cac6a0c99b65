//! Handles all user-facing output for the CLI.
//!
//! Text reports are written through `termcolor` so color handling follows the
//! configured [`ColorMode`](crate::config::ColorMode); JSON reports go through
//! `serde_json`.

use std::io::{self, Write};

use miette::Diagnostic;
use termcolor::{Color, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthChar;

use crate::alphabet::{Symbol, SymbolRole};
use crate::classifier::ClassifiedLine;
use crate::cli::diagnostics::RejectionSnippet;
use crate::diagnostics::JobsafeError;
use crate::ingest::Document;
use crate::pipeline::ValidationReport;

const RULE: &str = "==============================";

/// Options for text reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    pub preview_width: usize,
    pub show_log: bool,
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints one line per classified line, colored by the symbol's stack role.
pub fn print_classified<W: WriteColor>(
    out: &mut W,
    lines: &[ClassifiedLine],
    preview_width: usize,
) -> io::Result<()> {
    for line in lines {
        write!(out, "Found ")?;
        write_symbol(out, line.symbol)?;
        writeln!(
            out,
            " | line {:>4} | {}",
            line.line_number,
            preview(&line.text, preview_width)
        )?;
    }
    Ok(())
}

pub fn print_report<W: WriteColor>(
    out: &mut W,
    report: &ValidationReport,
    document: Option<&Document>,
    style: ReportStyle,
) -> io::Result<()> {
    if !report.lines.is_empty() || document.is_some() {
        writeln!(out, "--- STEP 1: SYMBOL MAPPING ---")?;
        print_classified(out, &report.lines, style.preview_width)?;
        writeln!(out)?;
    }
    writeln!(out, "Token Stream: [{}]", join_tokens(&report.tokens))?;
    writeln!(out)?;
    writeln!(out, "--- STEP 2: PDA VALIDATION ---")?;
    writeln!(out, "{}", RULE)?;
    if report.accepted() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        writeln!(out, "RESULT: CONTRACT ACCEPTED (Valid Structure)")?;
    } else {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(out, "RESULT: CONTRACT REJECTED (Invalid Structure)")?;
    }
    out.reset()?;
    writeln!(out, "{}", RULE)?;

    if let Some(rejection) = report.verdict.rejection() {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "Reason for Rejection: {}", rejection)?;
        out.reset()?;
        if let Some(code) = rejection.code() {
            writeln!(out, "  code: {}", code)?;
        }
        if let Some(help) = rejection.help() {
            writeln!(out, "  help: {}", help)?;
        }

        let offending = rejection
            .position()
            .and_then(|p| report.lines.get(p))
            .map(|l| l.line_number);
        if let (Some(document), Some(line_number)) = (document, offending) {
            write!(out, "{}", RejectionSnippet::new(document, line_number))?;
        }
    }

    if style.show_log {
        writeln!(out)?;
        writeln!(out, "--- SYSTEM LOG ---")?;
        for entry in &report.verdict.log {
            if entry.is_rejection() {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "{}", entry)?;
                out.reset()?;
            } else {
                writeln!(out, "{}", entry)?;
            }
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, report: &ValidationReport) -> Result<(), JobsafeError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_symbol<W: WriteColor>(out: &mut W, symbol: Symbol) -> io::Result<()> {
    let color = match symbol.role() {
        SymbolRole::Opener => Color::Yellow,
        SymbolRole::Closer => Color::Green,
        SymbolRole::Plain => Color::Blue,
    };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", symbol)?;
    out.reset()
}

fn join_tokens(tokens: &[Symbol]) -> String {
    tokens
        .iter()
        .map(|s| s.letter().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cuts `text` to at most `width` display columns, marking the cut with `...`.
pub fn preview(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            out.push_str("...");
            return out;
        }
        used += w;
        out.push(ch);
    }
    out
}
