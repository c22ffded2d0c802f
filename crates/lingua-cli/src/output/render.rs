//! Human-readable rendering.

use std::io::{self, Write};

use lingua_syntax::{DetectionStage, HarnessReport};

use super::models::{
    ClassificationReport, DefinitionsReport, DetectionReport, LanguagesReport, Report, ScanReport,
    ValidationReport,
};

/// Writes `report` to `out` as newline-terminated lines.
pub(crate) fn human<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    match report {
        Report::Scan(scan) => render_scan(out, scan),
        Report::Validation(validation) => render_validation(out, validation),
        Report::Classification(classification) => render_classification(out, classification),
        Report::Detection(detection) => render_detection(out, detection),
        Report::Definitions(definitions) => render_definitions(out, definitions),
        Report::Fixtures(fixtures) => render_fixtures(out, fixtures),
        Report::Languages(languages) => render_languages(out, languages),
    }
}

fn render_scan<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    for token in &report.tokens {
        writeln!(
            out,
            "{}:{} {} {:?}",
            token.line, token.column, token.kind, token.text
        )?;
    }
    Ok(())
}

fn render_validation<W: Write>(out: &mut W, report: &ValidationReport) -> io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(
            out,
            "{}:{}:{}: {} [{}]",
            report.path, diagnostic.line, diagnostic.column, diagnostic.message, diagnostic.code
        )?;
    }
    if report.pass {
        writeln!(out, "{}: ok ({})", report.path, report.language)
    } else {
        writeln!(
            out,
            "{}: {} problem(s) ({})",
            report.path,
            report.diagnostics.len(),
            report.language
        )
    }
}

fn render_classification<W: Write>(out: &mut W, report: &ClassificationReport) -> io::Result<()> {
    for (rank, candidate) in report.candidates.candidates().iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<12} {} keywords={} tokens={} diagnostics={}",
            rank + 1,
            candidate.language(),
            candidate.confidence(),
            candidate.keywords(),
            candidate.significant_tokens(),
            candidate.diagnostics()
        )?;
    }
    Ok(())
}

fn render_detection<W: Write>(out: &mut W, report: &DetectionReport) -> io::Result<()> {
    let Some(detection) = &report.detection else {
        return writeln!(out, "{}: no language detected", report.path);
    };
    match (detection.stage(), detection.confidence()) {
        (DetectionStage::Classifier, Some(confidence)) => writeln!(
            out,
            "{}: {} (classifier, confidence {confidence})",
            report.path,
            detection.language()
        ),
        (stage, _) => writeln!(
            out,
            "{}: {} ({stage})",
            report.path,
            detection.language()
        ),
    }
}

fn render_definitions<W: Write>(out: &mut W, report: &DefinitionsReport) -> io::Result<()> {
    if report.definitions.is_empty() {
        return writeln!(out, "{}: no definitions ({})", report.path, report.language);
    }
    for definition in &report.definitions {
        writeln!(
            out,
            "{}:{}:{}: {} {}",
            report.path, definition.line, definition.column, definition.kind, definition.name
        )?;
    }
    Ok(())
}

fn render_fixtures<W: Write>(out: &mut W, report: &HarnessReport) -> io::Result<()> {
    for failure in report.failures() {
        let reason = failure.failure_reason().unwrap_or_default();
        writeln!(out, "FAIL {}: {reason}", failure.path().display())?;
    }
    writeln!(
        out,
        "{} fixtures: {} passed, {} failed",
        report.total(),
        report.passed(),
        report.failed()
    )
}

fn render_languages<W: Write>(out: &mut W, report: &LanguagesReport) -> io::Result<()> {
    for language in &report.languages {
        let extensions = language
            .extensions
            .iter()
            .map(|extension| format!(".{extension}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{:<12} {:>4}  {extensions}",
            language.name, language.precedence
        )?;
    }
    Ok(())
}
