//! Reference resolution: visibility rules, externals, suggestions,
//! definition-after-use.

use once_cell::sync::Lazy;
use renard::semantic::find_all_unresolved_symbols;
use renard::{ExternalSymbols, ParseOptions, Position, Severity, lint, parse};

static BASE_SYMBOLS: Lazy<ExternalSymbols> = Lazy::new(|| {
    ["print", "c", "sum", "paste", "length"]
        .iter()
        .map(|&name| name.into())
        .collect()
});

fn warnings(items: &renard::LintItems) -> Vec<(Position, String)> {
    items
        .iter()
        .filter(|item| item.severity == Severity::Warning)
        .map(|item| (item.start, item.message.clone()))
        .collect()
}

fn infos(items: &renard::LintItems) -> Vec<(Position, String)> {
    items
        .iter()
        .filter(|item| item.severity == Severity::Info)
        .map(|item| (item.start, item.message.clone()))
        .collect()
}

#[test]
fn clean_script_produces_no_diagnostics() {
    let items = lint("x <- 1; y <- x + 1", None, &BASE_SYMBOLS);
    assert!(items.is_empty());
}

#[test]
fn free_variable_in_function_body_warns() {
    let items = lint("x <- function(a, b) a + b + c", None, &BASE_SYMBOLS);
    let warnings = warnings(&items);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, Position::new(0, 28));
    assert_eq!(warnings[0].1, "no symbol named 'c' in scope");
}

#[test]
fn same_scope_visibility_is_order_dependent() {
    // reference before the only definition in the same scope
    let items = lint("print(x)\nx <- 1\nprint(x)", None, &BASE_SYMBOLS);
    let warnings = warnings(&items);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, Position::new(0, 6));

    let infos = infos(&items);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].0, Position::new(1, 0));
    assert_eq!(infos[0].1, "'x' is defined after it is used");
}

#[test]
fn ancestor_visibility_is_total() {
    // the function body may use names defined later in the enclosing scope
    let source = "f <- function() g()\ng <- function() 1\nf()";
    let items = lint(source, None, &BASE_SYMBOLS);
    assert!(items.is_empty());
}

#[test]
fn self_assignment_resolves_its_own_right_hand_side() {
    let items = lint("if (a > 0) { a <- a + 1 }", None, &BASE_SYMBOLS);

    // the condition reads 'a' before any definition; the right-hand side
    // 'a' is resolved by the definition at or before its position
    let warnings = warnings(&items);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, Position::new(0, 4));
    assert_eq!(warnings[0].1, "no symbol named 'a' in scope");

    let infos = infos(&items);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].0, Position::new(0, 13));
}

#[test]
fn external_symbols_resolve_references() {
    let no_externals = lint("print(1)", None, &ExternalSymbols::default());
    assert_eq!(warnings(&no_externals).len(), 1);

    let with_externals = lint("print(1)", None, &BASE_SYMBOLS);
    assert!(with_externals.is_empty());
}

#[test]
fn case_insensitive_suggestion() {
    let items = lint("myValue <- 1\nmyvalue + 1", None, &BASE_SYMBOLS);
    let warnings = warnings(&items);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("did you mean 'myValue'"));
}

#[test]
fn suggestion_searches_ancestor_scopes() {
    let source = "Total <- 0\nf <- function() total + 1";
    let items = lint(source, None, &BASE_SYMBOLS);
    let warnings = warnings(&items);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].1,
        "no symbol named 'total' in scope; did you mean 'Total'?"
    );
}

#[test]
fn formals_resolve_body_references() {
    let items = lint("f <- function(a, b = 1) a + b", None, &BASE_SYMBOLS);
    assert!(items.is_empty());
}

#[test]
fn for_variable_resolves_loop_body() {
    let items = lint("for (i in 1:3) print(i)", None, &BASE_SYMBOLS);
    assert!(items.is_empty());
}

#[test]
fn qualified_references_are_never_unresolved() {
    let items = lint("pkg::bar(1)\npkg:::baz", None, &ExternalSymbols::default());
    assert!(warnings(&items).is_empty());
}

#[test]
fn nse_arguments_are_not_resolved() {
    let externals: ExternalSymbols = ["library", "quote", "subset"]
        .iter()
        .map(|&name| name.into())
        .collect();
    let source = "library(utterlyUnknownPackage)\nquote(no + such + symbols)\nsubset(df, col > 2)";
    let items = lint(source, None, &externals);
    // only 'df' style references outside the suppression would warn; all of
    // these sit inside NSE calls
    assert!(warnings(&items).is_empty());
}

#[test]
fn back_quoted_references_match_externals() {
    let mut externals = ExternalSymbols::default();
    externals.insert("weird name".into());
    let items = lint("`weird name`(1)", None, &externals);
    assert!(items.is_empty());
}

#[test]
fn unresolved_items_carry_scope_and_position() {
    let results = parse(
        "f <- function() missing_inner\nmissing_outer",
        &ParseOptions::default(),
    );
    let unresolved = find_all_unresolved_symbols(results.scope_tree());

    assert_eq!(unresolved.len(), 2);
    // parent before children: the root's unresolved reference comes first
    assert_eq!(unresolved[0].symbol, "missing_outer");
    assert_eq!(unresolved[0].scope, renard::ROOT_SCOPE);
    assert_eq!(unresolved[1].symbol, "missing_inner");
    assert_ne!(unresolved[1].scope, renard::ROOT_SCOPE);
}

#[test]
fn diagnostics_are_sorted_by_start_position() {
    let source = "zzz\nyyy\nxxx";
    let items = lint(source, None, &ExternalSymbols::default());
    let positions: Vec<_> = items.iter().map(|item| item.start).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn lint_is_deterministic() {
    let source = "f <- function(x) {\n  if (x > limit) warn(x)\n}\nf(1)";
    let a = lint(source, None, &BASE_SYMBOLS);
    let b = lint(source, None, &BASE_SYMBOLS);
    assert_eq!(a.get(), b.get());
}
