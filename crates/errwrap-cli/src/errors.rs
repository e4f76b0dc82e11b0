//! Error types for the tree walk and the CLI runtime.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use errwrap_engine::EngineError;
use thiserror::Error;

use crate::telemetry::TelemetryError;
use crate::tools::ToolError;

/// Errors that abort a rewrite run.
///
/// I/O errors are wrapped in `Arc` to keep the enum small.
#[derive(Debug, Error)]
pub enum RunError {
    /// Directory traversal failed.
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        /// Root of the traversal.
        root: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: Arc<walkdir::Error>,
    },

    /// File metadata could not be read.
    #[error("failed to stat {}: {source}", path.display())]
    Metadata {
        /// File being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// File contents could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Rewritten contents could not be written back.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A rewrite rule failed to apply.
    #[error("rewrite rule `{rule}` failed: {source}")]
    Rule {
        /// Rendered rule.
        rule: String,
        /// Tool failure.
        #[source]
        source: ToolError,
    },

    /// Import fixing failed after the rewrite.
    #[error("import fixing failed: {source}")]
    Imports {
        /// Tool failure.
        #[source]
        source: ToolError,
    },

    /// A progress line could not be written.
    #[error("failed to report progress: {0}")]
    Progress(#[source] Arc<io::Error>),
}

impl RunError {
    pub(crate) fn metadata(path: &Path, source: io::Error) -> Self {
        Self::Metadata {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn progress(source: io::Error) -> Self {
        Self::Progress(Arc::new(source))
    }
}

/// Top-level failures reported as `ERROR: <message>`.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Run(#[from] RunError),
}
