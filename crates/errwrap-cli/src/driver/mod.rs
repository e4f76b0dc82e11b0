//! Per-file read, rewrite, and write-back.
//!
//! The [`FileDriver`] owns a file for the duration of one pass: it reads the
//! text and permission bits, runs every line through the [`Engine`], writes
//! the whole result back in one atomic step under the original permissions,
//! and then hands the file to the [`ImportFixer`].

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use errwrap_engine::Engine;
use tempfile::Builder;
use tracing::debug;

use crate::errors::RunError;
use crate::tools::ImportFixer;

/// Tracing target for file processing.
const DRIVER_TARGET: &str = "errwrap_cli::driver";

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    path: PathBuf,
    changed_lines: usize,
}

impl FileReport {
    /// Returns the processed file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns how many lines the engine changed.
    #[must_use]
    pub const fn changed_lines(&self) -> usize {
        self.changed_lines
    }
}

/// Rewrites a single source file in place.
#[derive(Debug)]
pub struct FileDriver<F> {
    engine: Engine,
    fixer: F,
}

impl<F> FileDriver<F> {
    /// Creates a driver using `engine` for rewriting and `fixer` afterwards.
    #[must_use]
    pub const fn new(engine: Engine, fixer: F) -> Self {
        Self { engine, fixer }
    }

    /// Returns the rewrite engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl<F: ImportFixer> FileDriver<F> {
    /// Rewrites `path` and fixes its imports.
    ///
    /// The file is written back even when no line changed, so the import
    /// fixer always sees the current contents.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if the file cannot be read or written, or if
    /// the import fixer fails. Nothing is written when reading fails.
    pub fn process(&self, path: &Path) -> Result<FileReport, RunError> {
        let metadata = fs::metadata(path).map_err(|source| RunError::metadata(path, source))?;
        let source = fs::read_to_string(path).map_err(|error| RunError::read(path, error))?;

        let rewrite = self.engine.rewrite_source(&source);
        debug!(
            target: DRIVER_TARGET,
            path = %path.display(),
            changed_lines = rewrite.changed_lines(),
            "rewrote source"
        );

        write_preserving_permissions(path, rewrite.output(), metadata.permissions())
            .map_err(|error| RunError::write(path, error))?;

        self.fixer
            .fix_imports(path)
            .map_err(|error| RunError::Imports { source: error })?;

        Ok(FileReport {
            path: path.to_path_buf(),
            changed_lines: rewrite.changed_lines(),
        })
    }
}

/// Replaces the file behind `path` with `contents` through a temporary file
/// in the same directory, carrying `permissions` over to the new file.
///
/// Symbolic links are resolved first, so the link survives and its target
/// receives the new contents.
fn write_preserving_permissions(
    path: &Path,
    contents: &str,
    permissions: Permissions,
) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let directory = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = Builder::new();
    builder.prefix(".errwrap");

    let mut file = builder.tempfile_in(directory)?;
    file.write_all(contents.as_bytes())?;
    // Set on the open handle so the process umask cannot narrow the mode.
    file.as_file().set_permissions(permissions)?;
    file.as_file().sync_all()?;
    file.persist(&target).map_err(|error| error.error)?;
    Ok(())
}
