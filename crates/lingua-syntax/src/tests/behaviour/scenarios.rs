//! Scenario bindings for the `lingua-syntax` BDD feature file.
//!
//! These functions bind Gherkin scenario names to the step definitions in the
//! parent module.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Valid Rust fixture passes validation"
)]
fn valid_rust_fixture(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Invalid Rust fixture fails validation"
)]
fn invalid_rust_fixture(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Rust fixture is classified as Rust"
)]
fn rust_fixture_classified(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "A lone closing brace is reported at its offset"
)]
fn lone_closing_brace(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Empty input scans to nothing"
)]
fn empty_input_scan(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Empty input validates and scores zero everywhere"
)]
fn empty_input_validate_classify(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Scanning a fixture is lossless"
)]
fn fixture_scan_lossless(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Registering the catalogue twice is rejected"
)]
fn duplicate_catalogue(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/lingua_syntax.feature",
    name = "Definitions are listed in source order"
)]
fn definitions_in_order(world: RefCell<TestWorld>) {
    drop(world);
}
