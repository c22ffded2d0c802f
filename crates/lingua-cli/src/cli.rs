//! Command-line argument definitions for `lingua`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use lingua_syntax::DefinitionKind;

use crate::output::OutputFormat;

/// Rule-driven language identification and structural validation.
#[derive(Parser, Debug)]
#[command(name = "lingua", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Controls how reports are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto, global = true)]
    pub(crate) output: OutputFormat,
    /// The operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations exposed by the binary.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Prints the tokens of a file.
    Scan {
        /// File to scan.
        file: Utf8PathBuf,
        /// Profile to scan with.
        #[arg(long, short)]
        language: String,
    },
    /// Checks bracket balance, literals and comments; exits 1 on problems.
    Validate {
        /// File to validate.
        file: Utf8PathBuf,
        /// Profile to validate against; detected when omitted.
        #[arg(long, short)]
        language: Option<String>,
    },
    /// Ranks every registered language against a file.
    Classify {
        /// File to classify.
        file: Utf8PathBuf,
    },
    /// Prints the detected language of a file; exits 1 if none is found.
    Detect {
        /// File to inspect.
        file: Utf8PathBuf,
    },
    /// Lists the classes, functions and other named items a file defines.
    Definitions {
        /// File to inspect.
        file: Utf8PathBuf,
        /// Profile to read the file with; detected when omitted.
        #[arg(long, short)]
        language: Option<String>,
        /// Keeps only definitions of this kind, such as `function`.
        #[arg(long)]
        kind: Option<DefinitionKind>,
        /// Keeps only definitions whose name contains this text.
        #[arg(long)]
        name: Option<String>,
    },
    /// Runs a fixture corpus; exits 1 if any fixture fails.
    Fixtures {
        /// Corpus directory containing `languages/<name>/` folders.
        root: Utf8PathBuf,
    },
    /// Lists the registered language profiles.
    Languages,
}
