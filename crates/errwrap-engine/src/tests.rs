//! End-to-end tests for the engine facade.

use proptest::prelude::*;
use rstest::{fixture, rstest};

use crate::{DEFAULT_WRAP_CALL, Engine, EngineError, LineRewriter};

#[fixture]
fn engine() -> Engine {
    Engine::standard().expect("standard engine builds")
}

// ---------------------------------------------------------------------------
// Line scenarios
// ---------------------------------------------------------------------------

#[rstest]
#[case::current_error("return nil, err", "return nil, errors.Wrap(err)")]
#[case::new_error_is_flattened(
    r#"return foo, errors.New("bad")"#,
    r#"return foo, errors.New("bad")"#
)]
#[case::double_wrap("return errors.Wrap(errors.Wrap(err))", "return errors.Wrap(err)")]
#[case::suppressed("\treturn err // nowrap", "\treturn err // nowrap")]
#[case::formatted_kept_wrapped(
    r#"return fmt.Errorf("x: %w", err)"#,
    r#"return errors.Wrap(fmt.Errorf("x: %w", err))"#
)]
#[case::non_return("if err != nil {", "if err != nil {")]
fn rewrites_lines(engine: Engine, #[case] line: &str, #[case] expected: &str) {
    assert_eq!(engine.rewrite_line(line), expected);
}

#[rstest]
#[case("return nil, err")]
#[case(r#"return foo, errors.New("bad")"#)]
#[case(r#"return fmt.Errorf("x")"#)]
#[case("return log.Error(err)")]
#[case("return errors.Wrap(errors.Wrap(err))")]
#[case("\treturn x, y, err // trailing")]
fn rewriting_twice_is_stable(engine: Engine, #[case] line: &str) {
    let once = engine.rewrite_line(line);
    let twice = engine.rewrite_line(&once);
    assert_eq!(twice, once);
}

fn return_argument() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "err",
        "nil",
        "0",
        "name",
        r#"errors.New("x")"#,
        r#"fmt.Errorf("x: %d", n)"#,
        "log.Error(err)",
        "errors.Wrap(err)",
        r#"errors.Wrap(errors.New("x"))"#,
    ])
}

fn return_line() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "\t", "\t\t", "    "]),
        prop::collection::vec(return_argument(), 1..4),
    )
        .prop_map(|(indent, arguments)| format!("{indent}return {}", arguments.join(", ")))
}

proptest! {
    #[test]
    fn rewriting_generated_returns_twice_is_stable(line in return_line()) {
        let engine = Engine::standard().expect("standard engine builds");
        let once = engine.rewrite_line(&line);
        prop_assert_eq!(engine.rewrite_line(&once), once);
    }
}

#[rstest]
fn standard_engine_uses_default_rewriter(engine: Engine) {
    assert_eq!(*engine.rewriter(), LineRewriter::default());
    assert_eq!(engine.rewriter().wrap_call(), DEFAULT_WRAP_CALL);
}

// ---------------------------------------------------------------------------
// Whole sources
// ---------------------------------------------------------------------------

const SOURCE: &str = "package demo

import \"errors\"

func load(name string) (string, error) {
\tdata, err := read(name)
\tif err != nil {
\t\treturn \"\", err
\t}
\tif data == \"\" {
\t\treturn \"\", errors.New(\"empty\")
\t}
\treturn data, nil
}
";

const EXPECTED: &str = "package demo

import \"errors\"

func load(name string) (string, error) {
\tdata, err := read(name)
\tif err != nil {
\t\treturn \"\", errors.Wrap(err)
\t}
\tif data == \"\" {
\t\treturn \"\", errors.New(\"empty\")
\t}
\treturn data, nil
}
";

#[rstest]
fn rewrites_source_line_by_line(engine: Engine) {
    let result = engine.rewrite_source(SOURCE);
    assert_eq!(result.output(), EXPECTED);
    assert_eq!(result.changed_lines(), 1);
    assert!(result.has_changes());
}

#[rstest]
fn preserves_crlf_line_endings(engine: Engine) {
    let result = engine.rewrite_source("func f() error {\r\n\treturn err\r\n}\r\n");
    assert_eq!(
        result.into_output(),
        "func f() error {\r\n\treturn errors.Wrap(err)\r\n}\r\n"
    );
}

#[rstest]
fn untouched_source_reports_no_changes(engine: Engine) {
    let source = "package demo\n\nfunc f() int {\n\treturn 42\n}\n";
    let result = engine.rewrite_source(source);
    assert_eq!(result.output(), source);
    assert!(!result.has_changes());
}

#[test]
fn engine_error_names_pattern() {
    let source = regex::Regex::new("(").expect_err("unbalanced group is rejected");
    let error = EngineError::invalid_pattern("(", source);
    let message = error.to_string();
    assert!(message.contains("`(`"), "expected pattern in message: {message}");
}
