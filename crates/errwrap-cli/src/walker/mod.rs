//! Recursive traversal of a Go source tree.
//!
//! [`TreeWalker::walk`] visits entries in lexical order per directory, skips
//! directories, non-`.go` files, and the top-level `vendor` tree, and for
//! each remaining file applies the rewrite rules followed by the
//! [`FileDriver`]. The first failure stops the walk; files already processed
//! keep their new contents.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::driver::{FileDriver, FileReport};
use crate::errors::RunError;
use crate::tools::{ImportFixer, RewriteRule, RuleRewriter};

/// Tracing target for tree traversal.
const WALKER_TARGET: &str = "errwrap_cli::walker";

/// Extension of files eligible for rewriting.
pub const SOURCE_EXTENSION: &str = "go";

/// Top-level directory holding vendored dependencies.
pub const VENDOR_DIR: &str = "vendor";

/// Totals for a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    files: usize,
    changed_lines: usize,
}

impl WalkSummary {
    /// Returns the number of files processed.
    #[must_use]
    pub const fn files(&self) -> usize {
        self.files
    }

    /// Returns the number of lines changed across all files.
    #[must_use]
    pub const fn changed_lines(&self) -> usize {
        self.changed_lines
    }

    fn record(&mut self, report: &FileReport) {
        self.files = self.files.saturating_add(1);
        self.changed_lines = self.changed_lines.saturating_add(report.changed_lines());
    }
}

/// Walks a tree, normalising and rewriting every eligible file.
#[derive(Debug)]
pub struct TreeWalker<R, F> {
    rules: Vec<RewriteRule>,
    rewriter: R,
    driver: FileDriver<F>,
}

impl<R, F> TreeWalker<R, F> {
    /// Creates a walker applying `rules` through `rewriter` before `driver`.
    #[must_use]
    pub const fn new(rules: Vec<RewriteRule>, rewriter: R, driver: FileDriver<F>) -> Self {
        Self {
            rules,
            rewriter,
            driver,
        }
    }

    /// Returns the rewrite rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}

impl<R: RuleRewriter, F: ImportFixer> TreeWalker<R, F> {
    /// Processes every eligible file below `root`.
    ///
    /// A `processing: <path>` line, relative to `root`, is written to
    /// `progress` before each file is touched.
    ///
    /// # Errors
    ///
    /// Returns the first [`RunError`] raised by traversal, progress
    /// reporting, a rewrite rule, or the file driver.
    pub fn walk(&self, root: &Path, progress: &mut impl Write) -> Result<WalkSummary, RunError> {
        let mut summary = WalkSummary::default();
        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_vendor_tree(entry));

        for item in entries {
            let entry = item.map_err(|error| RunError::Walk {
                root: root.to_path_buf(),
                source: Arc::new(error),
            })?;
            if !is_source_file(&entry) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .ok()
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or(entry.path());
            writeln!(progress, "processing: {}", relative.display()).map_err(RunError::progress)?;

            let report = self.process_file(entry.path())?;
            summary.record(&report);
        }

        info!(
            target: WALKER_TARGET,
            root = %root.display(),
            files = summary.files(),
            changed_lines = summary.changed_lines(),
            "walk complete"
        );
        Ok(summary)
    }

    /// Applies every rule to `path` in order, then runs the file driver.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Rule`] for the first failing rule, or any error
    /// from [`FileDriver::process`].
    pub fn process_file(&self, path: &Path) -> Result<FileReport, RunError> {
        for rule in &self.rules {
            debug!(
                target: WALKER_TARGET,
                path = %path.display(),
                %rule,
                "applying rewrite rule"
            );
            self.rewriter
                .rewrite(path, rule)
                .map_err(|error| RunError::Rule {
                    rule: rule.to_string(),
                    source: error,
                })?;
        }

        self.driver.process(path)
    }
}

fn is_vendor_tree(entry: &DirEntry) -> bool {
    entry.depth() == 1 && entry.file_type().is_dir() && entry.file_name() == VENDOR_DIR
}

fn is_source_file(entry: &DirEntry) -> bool {
    !entry.file_type().is_dir()
        && entry
            .path()
            .extension()
            .is_some_and(|extension| extension == SOURCE_EXTENSION)
}
