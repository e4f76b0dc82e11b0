//! Unit tests for the wrap classifier.

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn classifier() -> WrapClassifier {
    WrapClassifier::default()
}

#[rstest]
#[case::current_error("err", Some(WrapCategory::CurrentError))]
#[case::new_error(r#"errors.New("x")"#, Some(WrapCategory::NewError))]
#[case::formatted(r#"fmt.Errorf("x")"#, Some(WrapCategory::FormattedError))]
#[case::logged("log.Error(x)", Some(WrapCategory::LoggedError))]
#[case::logged_variant("log.Errorf(\"%s\", x)", Some(WrapCategory::LoggedError))]
#[case::nil("nil", None)]
#[case::number("42", None)]
#[case::string_literal(r#""err""#, None)]
#[case::longer_identifier("errs", None)]
#[case::field_access("err.Error()", None)]
#[case::already_wrapped("errors.Wrap(err)", None)]
#[case::formatted_via_errors_package(r#"errors.Errorf("x")"#, None)]
fn classifies_tokens(
    classifier: WrapClassifier,
    #[case] token: &str,
    #[case] expected: Option<WrapCategory>,
) {
    assert_eq!(classifier.classify(token), expected);
    assert_eq!(classifier.is_wrappable(token), expected.is_some());
}

#[rstest]
fn default_table_has_four_entries(classifier: WrapClassifier) {
    let categories: Vec<_> = classifier.rules().iter().map(WrapRule::category).collect();
    assert_eq!(
        categories,
        vec![
            WrapCategory::CurrentError,
            WrapCategory::NewError,
            WrapCategory::FormattedError,
            WrapCategory::LoggedError,
        ]
    );
}

#[rstest]
fn default_table_matchers(classifier: WrapClassifier) {
    let matchers: Vec<_> = classifier.rules().iter().map(WrapRule::matcher).collect();
    assert_eq!(
        matchers,
        vec![
            TokenMatcher::Exact("err"),
            TokenMatcher::Prefix("errors.New"),
            TokenMatcher::Prefix("fmt.Errorf"),
            TokenMatcher::Prefix("log.Error"),
        ]
    );
}

static CUSTOM_RULES: &[WrapRule] = &[
    WrapRule::new(TokenMatcher::Exact("e"), WrapCategory::CurrentError),
    WrapRule::new(TokenMatcher::Prefix("status.Error"), WrapCategory::NewError),
];

#[test]
fn injected_table_replaces_defaults() {
    let classifier = WrapClassifier::new(CUSTOM_RULES);
    assert!(classifier.is_wrappable("e"));
    assert!(classifier.is_wrappable("status.Errorf(codes.Internal, msg)"));
    assert!(!classifier.is_wrappable("err"));
}

#[test]
fn empty_table_wraps_nothing() {
    let classifier = WrapClassifier::new(&[]);
    assert_eq!(classifier.classify("err"), None);
}

#[rstest]
#[case(TokenMatcher::Exact("err"), "err", true)]
#[case(TokenMatcher::Exact("err"), "err2", false)]
#[case(TokenMatcher::Prefix("errors.New"), "errors.NewFoo()", true)]
#[case(TokenMatcher::Prefix("errors.New"), " errors.New()", false)]
fn matcher_semantics(#[case] matcher: TokenMatcher, #[case] token: &str, #[case] expected: bool) {
    assert_eq!(matcher.matches(token), expected);
}
