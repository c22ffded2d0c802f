//! CLI entrypoint for the `lingua` language inspection tool.
//!
//! The binary delegates to [`lingua_cli::run`], which loads configuration,
//! parses the subcommand and writes its report to standard output.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // The handles stay unlocked: fixture runs log from rayon workers.
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    lingua_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
