//! Line-level rewriting of `return` statements.
//!
//! [`LineRewriter::rewrite`] is a per-line state machine with no memory of
//! neighbouring lines:
//!
//! 1. Lines whose trimmed text does not start with `return ` pass through.
//! 2. Lines carrying a `// ... nowrap` suppression marker pass through.
//! 3. The argument text is tokenized; unbalanced argument lists pass through.
//! 4. Every wrappable token becomes `<wrap_call>(<token>)`, and the line is
//!    re-emitted with its original indentation.
//!
//! Lines with nothing to wrap are returned untouched, so the result borrows
//! from the input unless a rewrite actually happened.

use std::borrow::Cow;

use tracing::debug;

use crate::classifier::WrapClassifier;
use crate::tokenizer::tokenize;

/// Tracing target for line rewriting.
const LINE_TARGET: &str = "errwrap_engine::line";

/// Keyword (with its separating space) that opens a candidate statement.
pub const RETURN_KEYWORD: &str = "return ";

/// Canonical call used to attach context to a returned error.
pub const DEFAULT_WRAP_CALL: &str = "errors.Wrap";

const COMMENT_OPENER: &str = "//";
const SUPPRESSION_WORD: &str = "nowrap";

/// Returns `true` when `text` holds a `//` comment followed, anywhere later,
/// by the word `nowrap`.
#[must_use]
pub fn is_suppressed(text: &str) -> bool {
    text.find(COMMENT_OPENER)
        .and_then(|offset| text.get(offset..))
        .is_some_and(|comment| comment.contains(SUPPRESSION_WORD))
}

/// Rewrites `return` statements so eligible arguments are wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRewriter {
    classifier: WrapClassifier,
    wrap_call: &'static str,
}

impl LineRewriter {
    /// Creates a rewriter using `classifier` and emitting `wrap_call`.
    #[must_use]
    pub const fn new(classifier: WrapClassifier, wrap_call: &'static str) -> Self {
        Self {
            classifier,
            wrap_call,
        }
    }

    /// Returns the classifier consulted for each argument.
    #[must_use]
    pub const fn classifier(&self) -> &WrapClassifier {
        &self.classifier
    }

    /// Returns the call wrapped around eligible arguments.
    #[must_use]
    pub const fn wrap_call(&self) -> &'static str {
        self.wrap_call
    }

    /// Rewrites one line, returning it unchanged when nothing applies.
    #[must_use]
    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let trimmed = line.trim();
        let Some(args) = trimmed.strip_prefix(RETURN_KEYWORD) else {
            return Cow::Borrowed(line);
        };

        if is_suppressed(trimmed) {
            debug!(target: LINE_TARGET, line, "suppression marker present");
            return Cow::Borrowed(line);
        }

        let arguments = tokenize(args);
        if !arguments.is_balanced() {
            debug!(target: LINE_TARGET, line, "unbalanced return arguments left untouched");
            return Cow::Borrowed(line);
        }

        if !arguments
            .tokens()
            .iter()
            .any(|token| self.classifier.is_wrappable(token))
        {
            return Cow::Borrowed(line);
        }

        let wrapped: Vec<String> = arguments
            .tokens()
            .iter()
            .map(|token| self.wrap_token(token))
            .collect();

        let indent = line
            .find(RETURN_KEYWORD)
            .and_then(|offset| line.get(..offset))
            .unwrap_or_default();

        let mut rewritten = format!("{indent}{RETURN_KEYWORD}{}", wrapped.join(", "));
        if let Some(comment) = arguments.comment() {
            rewritten.push(' ');
            rewritten.push_str(comment);
        }

        Cow::Owned(rewritten)
    }

    fn wrap_token(&self, token: &str) -> String {
        if self.classifier.is_wrappable(token) {
            format!("{}({token})", self.wrap_call)
        } else {
            token.to_owned()
        }
    }
}

impl Default for LineRewriter {
    fn default() -> Self {
        Self::new(WrapClassifier::default(), DEFAULT_WRAP_CALL)
    }
}
