//! Unit tests for the nested-wrap collapse pass.

use std::borrow::Cow;

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn collapse() -> CollapsePass {
    CollapsePass::standard().expect("standard pattern compiles")
}

#[rstest]
#[case::double_wrap("return errors.Wrap(errors.Wrap(err))", "return errors.Wrap(err)")]
#[case::wrapped_new(
    r#"return foo, errors.Wrap(errors.New("bad"))"#,
    r#"return foo, errors.New("bad")"#
)]
#[case::wrapped_errorf(
    r#"return nil, errors.Wrap(errors.Errorf("no %s", name))"#,
    r#"return nil, errors.Errorf("no %s", name)"#
)]
#[case::indented("\treturn errors.Wrap(errors.Wrap(err))", "\treturn errors.Wrap(err)")]
#[case::two_occurrences(
    "return errors.Wrap(errors.Wrap(a)), errors.Wrap(errors.Wrap(b))",
    "return errors.Wrap(a), errors.Wrap(b)"
)]
fn flattens_nested_wraps(collapse: CollapsePass, #[case] line: &str, #[case] expected: &str) {
    assert_eq!(collapse.apply(line), expected);
}

#[rstest]
#[case::single_wrap("return nil, errors.Wrap(err)")]
#[case::foreign_family("return errors.Wrap(fmt.Errorf(\"x\"))")]
#[case::no_adjacent_parens("return errors.Wrap(errors.New(\"x\") // broken")]
#[case::plain("x := 1")]
fn leaves_other_lines_untouched(collapse: CollapsePass, #[case] line: &str) {
    let collapsed = collapse.apply(line);
    assert!(matches!(collapsed, Cow::Borrowed(_)), "expected borrow: {line}");
    assert_eq!(collapsed, line);
}

#[test]
fn custom_family_is_escaped() {
    let collapse = CollapsePass::new("trace.Wrap", "trace.").expect("pattern compiles");
    assert_eq!(
        collapse.apply("return trace.Wrap(trace.BadParameter(\"x\"))"),
        "return trace.BadParameter(\"x\")"
    );
    let unrelated = "return traceXWrap(traceXWrap(err))";
    assert_eq!(collapse.apply(unrelated), unrelated);
}

#[rstest]
fn exposes_compiled_pattern(collapse: CollapsePass) {
    assert!(collapse.pattern().starts_with(r"errors\.Wrap\(errors\."));
}
