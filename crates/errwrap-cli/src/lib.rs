//! Command-line runtime for `errwrap`.
//!
//! `errwrap` walks a Go source tree and wraps errors returned from functions
//! with `errors.Wrap`, using [`errwrap_engine`] for the line-level rewrite.
//! Around the engine this crate provides:
//!
//! - [`tools`]: adapters for the external `gofmt -r` rule rewriter and the
//!   `goimports` import fixer,
//! - [`driver`]: the per-file read, rewrite, and atomic write-back,
//! - [`walker`]: the recursive, fail-fast traversal,
//! - [`telemetry`]: `tracing` subscriber installation.
//!
//! Work is strictly sequential: each file is normalised, rewritten, written,
//! and import-fixed before the next one is visited. Two concurrent runs over
//! the same tree race on every file and must be avoided by the caller.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use errwrap_engine::Engine;

mod cli;
pub mod driver;
mod errors;
pub mod telemetry;
pub mod tools;
pub mod walker;

use cli::Cli;
pub use driver::{FileDriver, FileReport};
use errors::AppError;
pub use errors::RunError;
pub use telemetry::LogFormat;
pub use tools::{
    GofmtRewriter, GoimportsFixer, ImportFixer, RewriteRule, RuleRewriter, ToolError,
    default_rewrite_rules,
};
pub use walker::{TreeWalker, WalkSummary};

/// Runs the CLI using the provided arguments and IO handles.
///
/// Progress lines go to `stdout`. Any failure is reported as a single
/// `ERROR: <message>` line on `stderr` and yields [`ExitCode::FAILURE`].
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage(&error, stdout, stderr),
    };

    match execute(&cli, stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "ERROR: {error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W: Write>(cli: &Cli, stdout: &mut W) -> Result<WalkSummary, AppError> {
    telemetry::initialise(&cli.log_filter, cli.log_format)?;

    let driver = FileDriver::new(Engine::standard()?, GoimportsFixer::new(&cli.goimports));
    let walker = TreeWalker::new(
        default_rewrite_rules(),
        GofmtRewriter::new(&cli.gofmt),
        driver,
    );

    Ok(walker.walk(&cli.root, stdout)?)
}

/// Prints clap's rendering of help, version, or usage errors.
fn report_usage<W: Write, E: Write>(
    error: &clap::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    let rendered = error.render();
    if error.use_stderr() {
        let _ = write!(stderr, "{rendered}");
    } else {
        let _ = write!(stdout, "{rendered}");
    }
    u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}
