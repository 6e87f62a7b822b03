//! Whitespace style lint, emitted only when requested.

use renard::{ParseOptions, Position, Severity, parse};
use rstest::rstest;

fn style_items(source: &str) -> Vec<(Position, String)> {
    let options = ParseOptions::default().with_style_lint(true);
    parse(source, &options)
        .lint()
        .iter()
        .filter(|item| item.severity == Severity::Style)
        .map(|item| (item.start, item.message.clone()))
        .collect()
}

#[test]
fn style_lint_is_off_by_default() {
    let results = parse("x<-1", &ParseOptions::default());
    assert!(results.lint().is_empty());
}

#[test]
fn missing_space_around_assignment() {
    let items = style_items("x<-1");
    assert_eq!(
        items,
        vec![
            (Position::new(0, 1), "expected whitespace".to_string()),
            (Position::new(0, 3), "expected whitespace".to_string()),
        ]
    );
}

#[test]
fn missing_space_on_one_side_only() {
    let items = style_items("x <-1");
    assert_eq!(items, vec![(Position::new(0, 4), "expected whitespace".to_string())]);
}

#[rstest]
#[case("x <- 1")]
#[case("a == b")]
#[case("a %in% b")]
#[case("x <- a + b")]
fn spaced_binary_operators_are_quiet(#[case] source: &str) {
    assert!(style_items(source).is_empty(), "for {:?}", source);
}

#[rstest]
#[case("-x")]
#[case("x <- -1")]
#[case("f(-2)")]
#[case("a^b")]
#[case("x <- 1:10")]
#[case("!flag")]
#[case("~model")]
fn exempt_operators_are_quiet(#[case] source: &str) {
    assert!(style_items(source).is_empty(), "for {:?}", source);
}

#[test]
fn spaces_around_tight_operators_are_flagged() {
    let items = style_items("pkg :: name");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|(_, m)| m == "unnecessary whitespace"));

    let items = style_items("df $col");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].1, "unnecessary whitespace");
}

#[test]
fn comma_spacing() {
    // space required after, forbidden before
    let items = style_items("f(x ,y)");
    assert_eq!(
        items,
        vec![
            (Position::new(0, 4), "unnecessary whitespace".to_string()),
            (Position::new(0, 5), "expected whitespace".to_string()),
        ]
    );

    assert!(style_items("f(x, y)").is_empty());
}

#[test]
fn padding_inside_call_delimiters() {
    let items = style_items("f( x )");
    assert_eq!(
        items,
        vec![
            (Position::new(0, 3), "unnecessary whitespace".to_string()),
            (Position::new(0, 5), "unnecessary whitespace".to_string()),
        ]
    );
}

#[test]
fn multiline_calls_are_not_padding() {
    let items = style_items("f(\n  x,\n  y\n)");
    assert!(items.is_empty());
}

#[test]
fn style_items_do_not_count_as_errors() {
    let options = ParseOptions::default().with_style_lint(true);
    let results = parse("x<-1", &options);
    assert!(!results.has_errors());
    assert!(!results.lint().is_empty());
}
