//! JSON surface for RPC consumers.
//!
//! Items serialize as flat objects with dotted field names, matching the
//! document-marker protocol: `start.row`, `start.column`, `end.row`,
//! `end.column`, `text`, `raw`, `type`. Coordinates stay 0-based; consumers
//! presenting them to humans add 1.

use serde::Serialize;

use super::{LintItem, LintItems};

/// Wire representation of a single lint item
#[derive(Debug, Clone, Serialize)]
pub struct LintItemJson<'a> {
    #[serde(rename = "start.row")]
    pub start_row: usize,
    #[serde(rename = "start.column")]
    pub start_column: usize,
    #[serde(rename = "end.row")]
    pub end_row: usize,
    #[serde(rename = "end.column")]
    pub end_column: usize,
    pub text: &'a str,
    pub raw: &'a str,
    #[serde(rename = "type")]
    pub item_type: &'static str,
}

impl<'a> From<&'a LintItem> for LintItemJson<'a> {
    fn from(item: &'a LintItem) -> Self {
        Self {
            start_row: item.start.row,
            start_column: item.start.column,
            end_row: item.end.row,
            end_column: item.end.column,
            text: &item.message,
            raw: &item.message,
            item_type: item.severity.as_str(),
        }
    }
}

/// Serialize lint items as a JSON array value
pub fn lint_as_json(items: &LintItems) -> serde_json::Value {
    let array: Vec<LintItemJson<'_>> = items.iter().map(LintItemJson::from).collect();
    serde_json::to_value(array).expect("lint items serialize infallibly")
}
