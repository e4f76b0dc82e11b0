//! Command-line argument definitions for `errwrap`.

use std::path::PathBuf;

use clap::Parser;

use crate::telemetry::LogFormat;
use crate::tools::{DEFAULT_GOFMT, DEFAULT_GOIMPORTS};

/// Wraps errors returned from Go functions with `errors.Wrap`.
///
/// Every `.go` file below ROOT (except the top-level `vendor` tree) is
/// normalised with `gofmt -r`, has its `return` statements rewritten, and is
/// passed through `goimports`.
#[derive(Parser, Debug)]
#[command(name = "errwrap", version)]
pub(crate) struct Cli {
    /// Root of the source tree to rewrite.
    #[arg(value_name = "ROOT", default_value = ".")]
    pub(crate) root: PathBuf,
    /// Executable used to apply rewrite rules.
    #[arg(
        long,
        value_name = "PATH",
        env = "ERRWRAP_GOFMT",
        default_value = DEFAULT_GOFMT
    )]
    pub(crate) gofmt: PathBuf,
    /// Executable used to fix imports after rewriting.
    #[arg(
        long,
        value_name = "PATH",
        env = "ERRWRAP_GOIMPORTS",
        default_value = DEFAULT_GOIMPORTS
    )]
    pub(crate) goimports: PathBuf,
    /// Tracing filter directives for diagnostics on stderr.
    #[arg(long, value_name = "FILTER", env = "ERRWRAP_LOG", default_value = "warn")]
    pub(crate) log_filter: String,
    /// Format of diagnostics on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}
