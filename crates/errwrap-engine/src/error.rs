//! Error types for the rewrite engine.
//!
//! Tokenizing, classifying, and line rewriting are total and never fail.
//! Only building a pattern-based pass can.

use thiserror::Error;

/// Errors raised while assembling the rewrite engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A derived regular expression failed to compile.
    #[error("invalid rewrite pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The expression that was rejected.
        pattern: String,
        /// Underlying compilation error.
        #[source]
        source: regex::Error,
    },
}

impl EngineError {
    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
