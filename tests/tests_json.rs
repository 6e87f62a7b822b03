#![cfg(feature = "json")]

//! The diagnostic JSON surface consumed over RPC.

use renard::lint::json::lint_as_json;
use renard::{ExternalSymbols, lint};

#[test]
fn lint_items_serialize_with_dotted_field_names() {
    let items = lint("x <- unknown_symbol", None, &ExternalSymbols::default());
    let value = lint_as_json(&items);
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);

    let item = &array[0];
    assert_eq!(item["start.row"], 0);
    assert_eq!(item["start.column"], 5);
    assert_eq!(item["end.row"], 0);
    assert_eq!(item["end.column"], 19);
    assert_eq!(item["type"], "warning");
    assert_eq!(item["text"], "no symbol named 'unknown_symbol' in scope");
    assert_eq!(item["raw"], item["text"]);
}

#[test]
fn coordinates_stay_zero_based() {
    let items = lint("\n\n  oops", None, &ExternalSymbols::default());
    let value = lint_as_json(&items);
    let item = &value.as_array().unwrap()[0];
    assert_eq!(item["start.row"], 2);
    assert_eq!(item["start.column"], 2);
}

#[test]
fn empty_lint_serializes_to_empty_array() {
    let items = lint("x <- 1", None, &ExternalSymbols::default());
    let value = lint_as_json(&items);
    assert_eq!(value.as_array().unwrap().len(), 0);
}
