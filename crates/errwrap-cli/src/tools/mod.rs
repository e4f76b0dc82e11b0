//! External formatting collaborators.
//!
//! Two tools run against each file: `gofmt -r` applies whole-file
//! [`RewriteRule`]s before wrapping, and `goimports` normalises import
//! declarations afterwards. Both sit behind traits ([`RuleRewriter`],
//! [`ImportFixer`]) so the driver and walker can be exercised without the Go
//! toolchain installed.
//!
//! Invocations are synchronous. A failing tool's combined stdout and stderr
//! are carried verbatim in [`ToolError::Failed`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Tracing target for external tool invocations.
const TOOLS_TARGET: &str = "errwrap_cli::tools";

/// Default executable used for rule rewriting.
pub const DEFAULT_GOFMT: &str = "gofmt";

/// Default executable used for import fixing.
pub const DEFAULT_GOIMPORTS: &str = "goimports";

/// A whole-file `pattern -> replacement` rewrite handed to `gofmt -r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pattern: String,
    replacement: String,
}

impl RewriteRule {
    /// Creates a rule replacing `pattern` with `replacement`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Returns the expression to match.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the expression substituted for each match.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

/// Normalisations applied, in order, before wrapping.
///
/// Imports of the standard library and `pkg/errors` are redirected to the
/// stack-carrying errors package, and calls are renamed so the classifier's
/// prefixes and the collapse pass line up with what the file contains.
#[must_use]
pub fn default_rewrite_rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::new(r#""errors""#, r#""github.com/ddollar/errors""#),
        RewriteRule::new(r#""github.com/pkg/errors""#, r#""github.com/ddollar/errors""#),
        RewriteRule::new("errors.WithStack", "errors.Wrap"),
        RewriteRule::new("fmt.Errorf", "errors.Errorf"),
    ]
}

/// Errors raised by external tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool could not be started.
    #[error("failed to run {}: {source}", tool.display())]
    Spawn {
        /// Executable that was invoked.
        tool: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The tool exited unsuccessfully.
    #[error("{} failed on {}: {}", tool.display(), path.display(), output.trim_end())]
    Failed {
        /// Executable that was invoked.
        tool: PathBuf,
        /// File the tool was run against.
        path: PathBuf,
        /// Exit code, when the process was not killed by a signal.
        status: Option<i32>,
        /// Combined stdout and stderr, verbatim.
        output: String,
    },
}

/// Applies a whole-file rewrite rule in place.
pub trait RuleRewriter {
    /// Rewrites `path` in place according to `rule`.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the rewrite cannot be applied.
    fn rewrite(&self, path: &Path, rule: &RewriteRule) -> Result<(), ToolError>;
}

/// Normalises a file's import declarations in place.
pub trait ImportFixer {
    /// Fixes the imports of `path` in place.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the imports cannot be fixed.
    fn fix_imports(&self, path: &Path) -> Result<(), ToolError>;
}

/// [`RuleRewriter`] backed by `gofmt -w -r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GofmtRewriter {
    binary: PathBuf,
}

impl GofmtRewriter {
    /// Creates a rewriter invoking `binary`.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Returns the executable invoked for each rule.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for GofmtRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_GOFMT)
    }
}

impl RuleRewriter for GofmtRewriter {
    fn rewrite(&self, path: &Path, rule: &RewriteRule) -> Result<(), ToolError> {
        let mut command = Command::new(&self.binary);
        command.arg("-w");
        command.arg("-r");
        command.arg(rule.to_string());
        command.arg(path);
        run_tool(&mut command, &self.binary, path)
    }
}

/// [`ImportFixer`] backed by `goimports -w`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoimportsFixer {
    binary: PathBuf,
}

impl GoimportsFixer {
    /// Creates a fixer invoking `binary`.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Returns the executable invoked for each file.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for GoimportsFixer {
    fn default() -> Self {
        Self::new(DEFAULT_GOIMPORTS)
    }
}

impl ImportFixer for GoimportsFixer {
    fn fix_imports(&self, path: &Path) -> Result<(), ToolError> {
        let mut command = Command::new(&self.binary);
        command.arg("-w");
        command.arg(path);
        run_tool(&mut command, &self.binary, path)
    }
}

/// Runs `command` to completion, turning failure into a [`ToolError`].
fn run_tool(command: &mut Command, tool: &Path, path: &Path) -> Result<(), ToolError> {
    debug!(
        target: TOOLS_TARGET,
        tool = %tool.display(),
        path = %path.display(),
        "invoking external tool"
    );

    let output = command.output().map_err(|source| ToolError::Spawn {
        tool: tool.to_path_buf(),
        source: Arc::new(source),
    })?;

    if output.status.success() {
        return Ok(());
    }

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    debug!(
        target: TOOLS_TARGET,
        tool = %tool.display(),
        status = ?output.status,
        "external tool failed"
    );

    Err(ToolError::Failed {
        tool: tool.to_path_buf(),
        path: path.to_path_buf(),
        status: output.status.code(),
        output: combined,
    })
}
