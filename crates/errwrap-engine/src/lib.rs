//! Line-level rewrite engine for wrapping returned Go errors.
//!
//! The engine inserts the canonical wrap call around error-producing
//! arguments of `return` statements without ever leaving a wrap around an
//! already-wrapped `errors.*` construction. It works on raw text lines and
//! parenthesis depth rather than a syntax tree.
//!
//! The pieces, leaf first:
//!
//! - [`tokenize`] splits a return statement's arguments at top-level commas.
//! - [`WrapClassifier`] decides which arguments denote errors.
//! - [`LineRewriter`] recognises `return` lines and wraps eligible
//!   arguments.
//! - [`CollapsePass`] flattens `errors.Wrap(errors.X(...))` back to
//!   `errors.X(...)`.
//!
//! [`Engine`] chains the line rewriter and the collapse pass over whole
//! source files.
//!
//! # Example
//!
//! ```
//! use errwrap_engine::Engine;
//!
//! let engine = Engine::standard()?;
//! assert_eq!(engine.rewrite_line("\treturn nil, err"), "\treturn nil, errors.Wrap(err)");
//! assert_eq!(engine.rewrite_line("return errors.Wrap(errors.Wrap(err))"), "return errors.Wrap(err)");
//! # Ok::<(), errwrap_engine::EngineError>(())
//! ```

mod classifier;
mod collapse;
mod error;
mod line;
mod tokenizer;

pub use classifier::{DEFAULT_WRAP_RULES, TokenMatcher, WrapCategory, WrapClassifier, WrapRule};
pub use collapse::{CollapsePass, DEFAULT_FAMILY_PREFIX};
pub use error::EngineError;
pub use line::{DEFAULT_WRAP_CALL, LineRewriter, RETURN_KEYWORD, is_suppressed};
pub use tokenizer::{ArgumentList, tokenize};

/// Line rewriter followed by the collapse pass.
#[derive(Debug, Clone)]
pub struct Engine {
    rewriter: LineRewriter,
    collapse: CollapsePass,
}

impl Engine {
    /// Creates an engine from explicit components.
    #[must_use]
    pub const fn new(rewriter: LineRewriter, collapse: CollapsePass) -> Self {
        Self { rewriter, collapse }
    }

    /// Creates the engine for `errors.Wrap` with the default rule table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] if the collapse expression
    /// cannot be compiled.
    pub fn standard() -> Result<Self, EngineError> {
        Ok(Self::new(LineRewriter::default(), CollapsePass::standard()?))
    }

    /// Returns the line rewriter.
    #[must_use]
    pub const fn rewriter(&self) -> &LineRewriter {
        &self.rewriter
    }

    /// Rewrites one line, then collapses nested wraps on the result.
    #[must_use]
    pub fn rewrite_line(&self, line: &str) -> String {
        let rewritten = self.rewriter.rewrite(line);
        self.collapse.apply(&rewritten).into_owned()
    }

    /// Rewrites every `\n`-separated line of `source` independently.
    ///
    /// A trailing carriage return is held back from each line and restored
    /// afterwards, so CRLF files keep their line endings.
    #[must_use]
    pub fn rewrite_source(&self, source: &str) -> SourceRewrite {
        let mut changed_lines: usize = 0;
        let lines: Vec<String> = source
            .split('\n')
            .map(|raw| {
                let (line, ending) = raw
                    .strip_suffix('\r')
                    .map_or((raw, ""), |stripped| (stripped, "\r"));
                let rewritten = self.rewrite_line(line);
                if rewritten != line {
                    changed_lines = changed_lines.saturating_add(1);
                }
                format!("{rewritten}{ending}")
            })
            .collect();

        SourceRewrite {
            output: lines.join("\n"),
            changed_lines,
        }
    }
}

/// Result of rewriting a whole source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRewrite {
    output: String,
    changed_lines: usize,
}

impl SourceRewrite {
    /// Returns the rewritten text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns how many lines differ from the input.
    #[must_use]
    pub const fn changed_lines(&self) -> usize {
        self.changed_lines
    }

    /// Returns `true` when at least one line changed.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.changed_lines > 0
    }

    /// Consumes the result, returning the rewritten text.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests;
