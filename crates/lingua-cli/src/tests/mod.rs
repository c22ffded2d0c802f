//! Runner tests with injected configuration and captured output.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use lingua_config::Config;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{AppError, ConfigLoader, IoStreams, OrthoConfigLoader, run_with_loader};

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct Outcome {
    exit_code: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli<L: ConfigLoader>(loader: &L, args: &[&str], terminal: bool) -> Outcome {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let mut io = IoStreams::with_terminal_status(&mut stdout, &mut stderr, terminal);
    let arguments = std::iter::once("lingua")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit_code = run_with_loader(arguments, &mut io, loader);
    Outcome {
        exit_code,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

fn run_default(args: &[&str]) -> Outcome {
    let loader = StaticConfigLoader {
        config: Config::default(),
    };
    run_cli(&loader, args, true)
}

/// A scratch directory holding a few source files.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn write(&self, relative: &str, contents: &str) -> String {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write source file");
        Utf8PathBuf::from_path_buf(path)
            .expect("utf-8 temp path")
            .into_string()
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: TempDir::new().expect("temp dir"),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[rstest]
fn clean_files_validate_successfully(workspace: Workspace) {
    let path = workspace.write("main.rs", "fn main() {\n    let x = [1, 2];\n}\n");
    let outcome = run_default(&["validate", &path]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, format!("{path}: ok (rust)\n"));
    assert!(outcome.stderr.is_empty());
}

#[rstest]
fn failing_verdicts_exit_with_one(workspace: Workspace) {
    let path = workspace.write("broken.py", "def f(:\n    return [1, 2\n");
    let outcome = run_default(&["validate", &path, "--language", "python"]);

    assert_eq!(outcome.exit_code, ExitCode::from(1));
    assert!(outcome.stdout.contains("[unclosed-open]"), "{}", outcome.stdout);
    assert!(outcome.stdout.ends_with("(python)\n"));
}

#[rstest]
fn validation_json_carries_positions(workspace: Workspace) {
    let path = workspace.write("lone.go", "}");
    let outcome = run_default(&["--output", "json", "validate", &path]);

    assert_eq!(outcome.exit_code, ExitCode::from(1));
    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json report");
    assert_eq!(value["language"], "go");
    assert_eq!(value["pass"], false);
    assert_eq!(value["diagnostics"][0]["code"], "unmatched-close");
    assert_eq!(value["diagnostics"][0]["line"], 1);
    assert_eq!(value["diagnostics"][0]["column"], 1);
}

#[rstest]
fn undetectable_files_need_an_explicit_language(workspace: Workspace) {
    let path = workspace.write("notes", "   \n");
    let outcome = run_default(&["validate", &path]);

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("pass --language"));
}

#[rstest]
fn unknown_languages_are_reported(workspace: Workspace) {
    let path = workspace.write("x.cob", "DISPLAY 'HI'.");
    let outcome = run_default(&["scan", &path, "--language", "cobol"]);

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert_eq!(outcome.stderr, "unknown language: cobol\n");
    assert!(outcome.stdout.is_empty());
}

#[test]
fn missing_files_are_reported() {
    let outcome = run_default(&["classify", "/definitely/not/here.rs"]);
    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(
        outcome
            .stderr
            .starts_with("failed to read /definitely/not/here.rs")
    );
}

// ---------------------------------------------------------------------------
// Other subcommands
// ---------------------------------------------------------------------------

#[rstest]
fn scan_prints_one_line_per_token(workspace: Workspace) {
    let path = workspace.write("a.rs", "let x;");
    let outcome = run_default(&["scan", &path, "-l", "Rust"]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    insta::assert_snapshot!(outcome.stdout, @r#"
    1:1 keyword "let"
    1:4 whitespace " "
    1:5 identifier "x"
    1:6 punctuation ";"
    "#);
}

#[rstest]
fn classify_ranks_every_language(workspace: Workspace) {
    let path = workspace.write(
        "sample",
        "fn main() {\n    let mut total = 0;\n    for i in 0..3 { total += i; }\n}\n",
    );
    let outcome = run_default(&["--output", "json", "classify", &path]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json report");
    let candidates = value["candidates"].as_array().expect("candidate list");
    assert_eq!(candidates.len(), 24);
    assert_eq!(candidates[0]["language"], "rust");
}

#[rstest]
#[case::extension("script.py", "", "script.py: python (extension)\n")]
#[case::signature("Makefile.in", "#!/bin/bash\necho hi\n", "Makefile.in: shell (signature)\n")]
fn detect_reports_the_deciding_stage(
    workspace: Workspace,
    #[case] name: &str,
    #[case] source: &str,
    #[case] expected: &str,
) {
    let path = workspace.write(name, source);
    let outcome = run_default(&["detect", &path]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    let file_name = outcome
        .stdout
        .rsplit('/')
        .next()
        .expect("detection line");
    assert_eq!(file_name, expected);
}

const SHOP: &str = "class Cart:\n    def total(self):\n        return 0\n\ndef main():\n    pass\n";

#[rstest]
fn definitions_list_positions_in_source_order(workspace: Workspace) {
    let path = workspace.write("shop.py", SHOP);
    let outcome = run_default(&["definitions", &path]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS, "{}", outcome.stderr);
    assert_eq!(
        outcome.stdout,
        format!("{path}:1:1: class Cart\n{path}:2:5: function total\n{path}:5:1: function main\n")
    );
}

#[rstest]
fn definitions_filter_by_kind_and_name(workspace: Workspace) {
    let path = workspace.write("shop.py", SHOP);
    let outcome = run_default(&[
        "--output",
        "json",
        "definitions",
        &path,
        "--kind",
        "Function",
        "--name",
        "ma",
    ]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    let value: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json report");
    assert_eq!(value["language"], "python");
    let definitions = value["definitions"].as_array().expect("definition list");
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0]["kind"], "function");
    assert_eq!(definitions[0]["name"], "main");
    assert_eq!(definitions[0]["offset"], 51);
}

#[rstest]
fn definitions_reject_unknown_kinds(workspace: Workspace) {
    let path = workspace.write("shop.py", SHOP);
    let outcome = run_default(&["definitions", &path, "--kind", "gadget"]);

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("gadget"), "{}", outcome.stderr);
}

#[rstest]
fn definitions_report_files_without_any(workspace: Workspace) {
    let path = workspace.write("notes.txt", "just words\n");
    let outcome = run_default(&["definitions", &path, "-l", "sql"]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, format!("{path}: no definitions (sql)\n"));
}

#[rstest]
fn fixtures_summarise_failures(workspace: Workspace) {
    workspace.write("languages/rust/valid.rs", "fn main() {}\n");
    workspace.write("languages/rust/invalid.rs", "fn main() {}\n");
    workspace.write("languages/python/valid.py", "def f():\n    pass\n");
    let root = workspace.dir.path().to_str().expect("utf-8 root").to_owned();

    let outcome = run_default(&["--output", "human", "fixtures", &root]);

    assert_eq!(outcome.exit_code, ExitCode::from(1));
    assert!(outcome.stdout.contains("invalid.rs: expected invalid but validation passed"));
    assert!(outcome.stdout.ends_with("3 fixtures: 2 passed, 1 failed\n"));
}

#[test]
fn languages_lists_the_catalogue_in_precedence_order() {
    let outcome = run_default(&["languages"]);

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    let names: Vec<&str> = outcome
        .stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names.len(), 24);
    assert_eq!(names.first(), Some(&"java"));
    assert_eq!(names.last(), Some(&"groovy"));
}

// ---------------------------------------------------------------------------
// Output selection and usage
// ---------------------------------------------------------------------------

#[rstest]
#[case::terminal(true, false)]
#[case::redirected(false, true)]
fn auto_output_follows_the_terminal(#[case] terminal: bool, #[case] expect_json: bool) {
    let loader = StaticConfigLoader {
        config: Config::default(),
    };
    let outcome = run_cli(&loader, &["languages"], terminal);
    assert_eq!(outcome.stdout.starts_with('{'), expect_json);
}

#[test]
fn help_goes_to_stdout() {
    let outcome = run_default(&["--help"]);
    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage: lingua"));
    assert!(outcome.stderr.is_empty());
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let outcome = run_default(&[]);
    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("Usage: lingua"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const INI_PROFILE: &str = "\
profiles:
  - name: ini
    precedence: 500
    extensions: [ini]
    keywords: [include]
    line_comments: [';']
    literals:
      - { open: '\"', close: '\"' }
    brackets: ['[]']
    punctuation: '=.'
";

#[rstest]
fn extra_profiles_are_loaded_from_configuration(workspace: Workspace) {
    let profiles = workspace.write("profiles.yaml", INI_PROFILE);
    let source = workspace.write("settings.ini", "[server\nport = 80\n");

    let outcome = run_cli(
        &OrthoConfigLoader,
        &["--profiles-path", &profiles, "validate", &source],
        true,
    );

    assert_eq!(outcome.exit_code, ExitCode::from(1), "{}", outcome.stderr);
    assert!(outcome.stdout.ends_with("1 problem(s) (ini)\n"));
}

#[rstest]
fn unreadable_profile_documents_are_reported(workspace: Workspace) {
    let missing = workspace
        .dir
        .path()
        .join("absent.yaml")
        .to_str()
        .expect("utf-8 path")
        .to_owned();

    let outcome = run_cli(&OrthoConfigLoader, &["--profiles-path", &missing, "languages"], true);

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("failed to read profile document"));
}

#[rstest]
fn duplicate_profile_names_are_rejected(workspace: Workspace) {
    let profiles = workspace.write("dupe.yaml", "profiles:\n  - name: rust\n");

    let outcome = run_cli(&OrthoConfigLoader, &["--profiles-path", &profiles, "languages"], true);

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("rust"), "{}", outcome.stderr);
}
