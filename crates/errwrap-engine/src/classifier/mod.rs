//! Wrap eligibility for individual return arguments.
//!
//! A [`WrapClassifier`] consults a static table of [`WrapRule`] entries and
//! reports the [`WrapCategory`] of the first rule whose matcher accepts the
//! token. The default table recognises exactly four forms: the current error
//! variable, new errors, formatted errors, and logged errors.
//!
//! The canonical wrap call is intentionally absent from the table, so an
//! argument that is already `errors.Wrap(...)` is never wrapped again here.

/// Why a token is considered an error worth wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapCategory {
    /// The conventional in-scope error variable.
    CurrentError,
    /// A freshly constructed error.
    NewError,
    /// An error built from a format string.
    FormattedError,
    /// An error produced by a logging helper.
    LoggedError,
}

/// Textual predicate applied to a trimmed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatcher {
    /// The token must equal the text exactly.
    Exact(&'static str),
    /// The token must start with the text.
    Prefix(&'static str),
}

impl TokenMatcher {
    /// Returns `true` when `token` satisfies the matcher.
    #[must_use]
    pub fn matches(self, token: &str) -> bool {
        match self {
            Self::Exact(text) => token == text,
            Self::Prefix(text) => token.starts_with(text),
        }
    }
}

/// One entry of a classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapRule {
    matcher: TokenMatcher,
    category: WrapCategory,
}

impl WrapRule {
    /// Creates a rule assigning `category` to tokens accepted by `matcher`.
    #[must_use]
    pub const fn new(matcher: TokenMatcher, category: WrapCategory) -> Self {
        Self { matcher, category }
    }

    /// Returns the matcher for this rule.
    #[must_use]
    pub const fn matcher(&self) -> TokenMatcher {
        self.matcher
    }

    /// Returns the category assigned by this rule.
    #[must_use]
    pub const fn category(&self) -> WrapCategory {
        self.category
    }
}

/// The recognised error-producing forms.
pub const DEFAULT_WRAP_RULES: &[WrapRule] = &[
    WrapRule::new(TokenMatcher::Exact("err"), WrapCategory::CurrentError),
    WrapRule::new(TokenMatcher::Prefix("errors.New"), WrapCategory::NewError),
    WrapRule::new(TokenMatcher::Prefix("fmt.Errorf"), WrapCategory::FormattedError),
    WrapRule::new(TokenMatcher::Prefix("log.Error"), WrapCategory::LoggedError),
];

/// Decides whether a return argument should be wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapClassifier {
    rules: &'static [WrapRule],
}

impl WrapClassifier {
    /// Creates a classifier over an explicit rule table.
    #[must_use]
    pub const fn new(rules: &'static [WrapRule]) -> Self {
        Self { rules }
    }

    /// Returns the rule table in evaluation order.
    #[must_use]
    pub const fn rules(&self) -> &'static [WrapRule] {
        self.rules
    }

    /// Returns the category of the first rule matching `token`.
    #[must_use]
    pub fn classify(&self, token: &str) -> Option<WrapCategory> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(token))
            .map(WrapRule::category)
    }

    /// Returns `true` when `token` should be wrapped.
    #[must_use]
    pub fn is_wrappable(&self, token: &str) -> bool {
        self.classify(token).is_some()
    }
}

impl Default for WrapClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_RULES)
    }
}

#[cfg(test)]
mod tests;
