//! Unit tests for the structural validator.

use rstest::{fixture, rstest};

use super::*;
use crate::scanner::scan;
use crate::tests::support::rust_profile;

#[fixture]
fn rust() -> LanguageProfile {
    rust_profile()
}

fn check(source: &str, profile: &LanguageProfile) -> Verdict {
    validate(scan(source, profile), profile)
}

fn kinds_and_offsets(verdict: &Verdict) -> Vec<(DiagnosticKind, usize)> {
    verdict
        .diagnostics()
        .iter()
        .map(|diagnostic| (diagnostic.kind(), diagnostic.offset()))
        .collect()
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n\t")]
#[case::balanced("fn main() { let v = [1, 2]; }")]
#[case::brackets_in_strings(r#"let s = "{ ( [";"#)]
#[case::brackets_in_comments("// }\n/* ) */ let x = 1;")]
#[case::lifetimes("fn f<'a>(x: &'a str) -> &'a str { x }")]
fn well_formed_sources_pass(rust: LanguageProfile, #[case] source: &str) {
    let verdict = check(source, &rust);
    assert!(verdict.pass(), "unexpected diagnostics: {:?}", verdict.diagnostics());
    assert!(verdict.diagnostics().is_empty());
}

#[rstest]
fn lone_close_brace_yields_one_diagnostic(rust: LanguageProfile) {
    let verdict = check("  }", &rust);
    assert!(!verdict.pass());
    assert_eq!(
        kinds_and_offsets(&verdict),
        vec![(DiagnosticKind::UnmatchedClose, 2)]
    );
}

#[rstest]
fn unclosed_opens_are_reported_at_their_offsets(rust: LanguageProfile) {
    let verdict = check("fn broken() {\n    let x = (1", &rust);
    assert_eq!(
        kinds_and_offsets(&verdict),
        vec![
            (DiagnosticKind::UnclosedOpen, 12),
            (DiagnosticKind::UnclosedOpen, 26),
        ]
    );
}

#[rstest]
fn mismatch_with_deeper_opener_reports_brackets_above_it(rust: LanguageProfile) {
    // `)` closes `(` at 0 and leaves `{` at 1 unclosed.
    let verdict = check("({ )", &rust);
    assert_eq!(
        kinds_and_offsets(&verdict),
        vec![(DiagnosticKind::UnclosedOpen, 1)]
    );
}

#[rstest]
fn mismatch_without_opener_is_reported_and_stack_kept(rust: LanguageProfile) {
    let verdict = check("{ ) }", &rust);
    assert_eq!(
        kinds_and_offsets(&verdict),
        vec![(DiagnosticKind::MismatchedClose, 2)]
    );
    let message = verdict
        .diagnostics()
        .first()
        .map(Diagnostic::message)
        .expect("one diagnostic");
    assert_eq!(message, "')' does not close '{'");
}

#[rstest]
#[case::unknown("let a = `b`;", vec![(DiagnosticKind::UnknownCharacter, 8), (DiagnosticKind::UnknownCharacter, 10)])]
#[case::literal("let s = \"open", vec![(DiagnosticKind::UnterminatedLiteral, 8)])]
#[case::comment("x /* open", vec![(DiagnosticKind::UnterminatedComment, 2)])]
#[case::adjacency("fn fn main() {}", vec![(DiagnosticKind::IllegalAdjacency, 3)])]
#[case::adjacency_across_comment("let /* c */ let x = 1;", vec![(DiagnosticKind::IllegalAdjacency, 12)])]
fn lexical_problems_are_diagnosed(
    rust: LanguageProfile,
    #[case] source: &str,
    #[case] expected: Vec<(DiagnosticKind, usize)>,
) {
    let verdict = check(source, &rust);
    assert_eq!(kinds_and_offsets(&verdict), expected);
}

#[rstest]
fn adjacency_requires_consecutive_keywords(rust: LanguageProfile) {
    assert!(check("let x = 1; let y = 2;", &rust).pass());
    assert!(check("fn a() {} fn b() {}", &rust).pass());
}

#[rstest]
fn diagnostics_are_sorted_by_offset(rust: LanguageProfile) {
    // The unclosed `{` is found last but sits first in the source.
    let verdict = check("{ ` ]", &rust);
    assert_eq!(
        kinds_and_offsets(&verdict),
        vec![
            (DiagnosticKind::UnclosedOpen, 0),
            (DiagnosticKind::UnknownCharacter, 2),
            (DiagnosticKind::MismatchedClose, 4),
        ]
    );
}

#[rstest]
fn validation_is_deterministic(rust: LanguageProfile) {
    let source = "fn main() { ( ] `";
    assert_eq!(check(source, &rust), check(source, &rust));
}

#[test]
fn diagnostic_display_includes_offset_and_code() {
    let diagnostic = Diagnostic::new(DiagnosticKind::UnmatchedClose, 7, "'}' is stray");
    assert_eq!(diagnostic.to_string(), "7: '}' is stray [unmatched-close]");
}
