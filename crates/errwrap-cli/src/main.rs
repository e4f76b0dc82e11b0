//! CLI entrypoint for `errwrap`.
//!
//! The binary delegates to [`errwrap_cli::run`], which parses arguments,
//! installs telemetry, and walks the requested Go source tree.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    errwrap_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
