//! Behaviour-driven development (BDD) step definitions for lingua-syntax
//! scenarios.

mod scenarios;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{Classification, Confidence, Engine, EngineError, Verdict};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Engine under test.
    engine: Option<Engine>,
    /// Source text under inspection.
    source: String,
    /// Texts of the scanned tokens.
    token_texts: Option<Vec<String>>,
    /// Result of the last validation.
    verdict: Option<Verdict>,
    /// Result of the last classification.
    classification: Option<Classification>,
    /// Definitions rendered as `kind name`.
    definitions: Option<Vec<String>>,
    /// Result of the last registration attempt.
    registration: Option<Result<(), EngineError>>,
}

impl TestWorld {
    fn engine(&self) -> &Engine {
        self.engine.as_ref().expect("engine should be set")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes and expands `\n` escapes.
fn unquote(s: &str) -> String {
    s.trim_matches('"').replace("\\n", "\n")
}

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("the built-in engine")]
fn given_builtin_engine(world: &RefCell<TestWorld>) {
    let engine = Engine::with_builtin_profiles().expect("catalogue should load");
    world.borrow_mut().engine = Some(engine);
}

#[given("the source {source}")]
fn given_source(world: &RefCell<TestWorld>, source: String) {
    world.borrow_mut().source = unquote(&source);
}

#[given("the fixture file {path}")]
fn given_fixture_file(world: &RefCell<TestWorld>, path: String) {
    let full_path = fixture_path(&unquote(&path));
    let contents = fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("read {}: {err}", full_path.display()));
    world.borrow_mut().source = contents;
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the source is scanned as {language}")]
fn when_scanned(world: &RefCell<TestWorld>, language: String) {
    let mut w = world.borrow_mut();
    let texts: Vec<String> = w
        .engine()
        .scan(&w.source, &unquote(&language))
        .expect("language should be registered")
        .map(|token| token.text().to_owned())
        .collect();
    w.token_texts = Some(texts);
}

#[when("the source is validated as {language}")]
fn when_validated(world: &RefCell<TestWorld>, language: String) {
    let mut w = world.borrow_mut();
    let verdict = w
        .engine()
        .validate(&w.source, &unquote(&language))
        .expect("language should be registered");
    w.verdict = Some(verdict);
}

#[when("the source is classified")]
fn when_classified(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let classification = w.engine().classify(&w.source);
    w.classification = Some(classification);
}

#[when("the definitions are listed as {language}")]
fn when_definitions_listed(world: &RefCell<TestWorld>, language: String) {
    let mut w = world.borrow_mut();
    let found: Vec<String> = w
        .engine()
        .definitions(&w.source, &unquote(&language))
        .expect("language should be registered")
        .iter()
        .map(|definition| format!("{} {}", definition.kind(), definition.name()))
        .collect();
    w.definitions = Some(found);
}

#[when("the built-in catalogue is registered twice")]
fn when_registered_twice(world: &RefCell<TestWorld>) {
    let mut builder = Engine::builder();
    builder
        .with_builtin_profiles()
        .expect("first registration succeeds");
    let second = builder.with_builtin_profiles();
    world.borrow_mut().registration = Some(second);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("validation passes")]
fn then_validation_passes(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let verdict = w.verdict.as_ref().expect("verdict");
    assert!(
        verdict.pass(),
        "Expected no diagnostics, got {:?}",
        verdict.diagnostics()
    );
}

#[then("validation fails with {count} diagnostic")]
fn then_validation_fails(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let verdict = w.verdict.as_ref().expect("verdict");
    assert!(!verdict.pass(), "Expected failures, but validation passed");
    assert_eq!(verdict.diagnostics().len(), count);
}

#[then("the first diagnostic is {code} at offset {offset}")]
fn then_first_diagnostic(world: &RefCell<TestWorld>, code: String, offset: usize) {
    let w = world.borrow();
    let first = w
        .verdict
        .as_ref()
        .and_then(|verdict| verdict.diagnostics().first())
        .expect("at least one diagnostic");
    assert_eq!(first.kind().code(), unquote(&code));
    assert_eq!(first.offset(), offset);
}

#[then("the top language is {language}")]
fn then_top_language(world: &RefCell<TestWorld>, language: String) {
    let w = world.borrow();
    let top = w
        .classification
        .as_ref()
        .and_then(Classification::top)
        .expect("at least one candidate");
    assert_eq!(top.language(), unquote(&language));
}

#[then("every language scores zero in precedence order")]
fn then_all_zero(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let classification = w.classification.as_ref().expect("classification");
    let ranked: Vec<&str> = classification
        .candidates()
        .iter()
        .map(|candidate| candidate.language())
        .collect();
    let registered: Vec<&str> = w.engine().registry().names().collect();
    assert_eq!(ranked, registered);
    assert!(
        classification
            .candidates()
            .iter()
            .all(|candidate| candidate.confidence() == Confidence::ZERO)
    );
}

#[then("the scan yields {count} tokens")]
fn then_token_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let texts = w.token_texts.as_ref().expect("scanned tokens");
    assert_eq!(texts.len(), count);
}

#[then("the tokens reconstruct the source")]
fn then_lossless(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let texts = w.token_texts.as_ref().expect("scanned tokens");
    assert_eq!(texts.concat(), w.source);
}

#[then("the definitions are {list}")]
fn then_definitions(world: &RefCell<TestWorld>, list: String) {
    let w = world.borrow();
    let found = w.definitions.as_ref().expect("definitions listed");
    let expected: Vec<String> = unquote(&list).split(", ").map(str::to_owned).collect();
    assert_eq!(*found, expected);
}

#[then("registration fails with a duplicate language error")]
fn then_duplicate(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let result = w.registration.as_ref().expect("registration attempted");
    assert!(
        matches!(result, Err(EngineError::DuplicateLanguage { .. })),
        "Expected a duplicate language error, got {result:?}"
    );
}
