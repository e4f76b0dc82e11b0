//! Flattening of wraps applied to already-wrapped constructions.
//!
//! The line rewriter wraps `errors.New(...)` and friends, and repeated runs
//! may wrap an existing `errors.Wrap(...)`. Both leave a wrap whose sole
//! argument is another call from the same `errors.` family. The collapse pass
//! rewrites `errors.Wrap(errors.X(...))` to `errors.X(...)`.
//!
//! Matching is textual and only fires on the adjacent `))` shape: the body is
//! taken lazily up to the first pair of closing parentheses.

use std::borrow::Cow;

use regex::Regex;

use crate::error::EngineError;
use crate::line::DEFAULT_WRAP_CALL;

/// Package prefix shared by the wrap call and the calls it may swallow.
pub const DEFAULT_FAMILY_PREFIX: &str = "errors.";

/// Textual idempotence repair for nested wrap calls.
#[derive(Debug, Clone)]
pub struct CollapsePass {
    pattern: Regex,
    replacement: String,
}

impl CollapsePass {
    /// Builds a pass flattening `wrap_call(family_prefix...))`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] if the derived expression
    /// cannot be compiled.
    pub fn new(wrap_call: &str, family_prefix: &str) -> Result<Self, EngineError> {
        let source = format!(
            r"{}\({}(?P<body>.*?)\)\)",
            regex::escape(wrap_call),
            regex::escape(family_prefix)
        );
        let pattern =
            Regex::new(&source).map_err(|error| EngineError::invalid_pattern(&source, error))?;
        let replacement = format!("{}${{body}})", family_prefix.replace('$', "$$"));

        Ok(Self {
            pattern,
            replacement,
        })
    }

    /// Builds the pass for `errors.Wrap` over the `errors.` family.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] if the expression cannot be
    /// compiled.
    pub fn standard() -> Result<Self, EngineError> {
        Self::new(DEFAULT_WRAP_CALL, DEFAULT_FAMILY_PREFIX)
    }

    /// Returns the compiled expression.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Flattens every non-overlapping nested wrap in `line`.
    #[must_use]
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(line, self.replacement.as_str())
    }
}

#[cfg(test)]
mod tests;
