//! Lint items — the diagnostic output of the analysis pass.
//!
//! The pass never fails; everything it has to say lands here. The sink keeps
//! a running error counter (used for the too-many-errors cap) and silently
//! drops style items unless the caller asked for them.

use std::fmt;

use crate::base::{Position, Span};
use crate::parser::AnnotatedToken;

#[cfg(feature = "json")]
pub mod json;

/// Severity level of a lint item
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Style,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Style => "style",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message with source range
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintItem {
    pub start: Position,
    pub end: Position,
    pub severity: Severity,
    pub message: String,
}

impl LintItem {
    pub fn new(
        start: Position,
        end: Position,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            severity,
            message: message.into(),
        }
    }

    /// Diagnostic covering a whole token
    pub fn from_token(token: &AnnotatedToken, severity: Severity, message: impl Into<String>) -> Self {
        Self::new(token.position, token.end_position(), severity, message)
    }

    /// The source range this item covers
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// 1-based coordinates for human-facing consumers
    pub fn one_based(&self) -> (usize, usize, usize, usize) {
        (
            self.start.row + 1,
            self.start.column + 1,
            self.end.row + 1,
            self.end.column + 1,
        )
    }
}

impl fmt::Display for LintItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}: {}",
            self.start.row + 1,
            self.start.column + 1,
            self.severity,
            self.message
        )
    }
}

/// Accumulator for lint items
#[derive(Clone, Debug, Default)]
pub struct LintItems {
    items: Vec<LintItem>,
    error_count: usize,
    record_style_lint: bool,
}

impl LintItems {
    pub fn new(record_style_lint: bool) -> Self {
        Self {
            items: Vec::new(),
            error_count: 0,
            record_style_lint,
        }
    }

    pub fn add(
        &mut self,
        start: Position,
        end: Position,
        severity: Severity,
        message: impl Into<String>,
    ) {
        if severity.is_error() {
            self.error_count += 1;
        }
        self.items.push(LintItem::new(start, end, severity, message));
    }

    // =========================================================================
    // Parser diagnostics
    // =========================================================================

    pub fn unexpected_token(&mut self, token: &AnnotatedToken, expected: Option<&str>) {
        let mut message = format!("unexpected token '{}'", token.text);
        if let Some(expected) = expected {
            message.push_str(", expected ");
            message.push_str(expected);
        }
        self.error_count += 1;
        self.items.push(LintItem::from_token(token, Severity::Error, message));
    }

    /// An unmatched closer. When the delimiter stack was non-empty, `opener`
    /// carries the token at top-of-stack and gets a companion info item.
    pub fn unexpected_closing_bracket(
        &mut self,
        token: &AnnotatedToken,
        opener: Option<&AnnotatedToken>,
    ) {
        self.error_count += 1;
        self.items.push(LintItem::from_token(
            token,
            Severity::Error,
            format!("unexpected closing bracket '{}'", token.text),
        ));

        if let Some(opener) = opener {
            self.items.push(LintItem::from_token(
                opener,
                Severity::Info,
                format!("unmatched bracket '{}' here", opener.text),
            ));
        }
    }

    /// An opener left unclosed at end of input; anchored just past the token
    pub fn unexpected_end_of_document(&mut self, token: &AnnotatedToken) {
        let end = token.end_position();
        self.error_count += 1;
        self.items.push(LintItem::new(
            end,
            end,
            Severity::Error,
            "unexpected end of document",
        ));
    }

    pub fn too_many_errors(&mut self, position: Position) {
        self.error_count += 1;
        self.items.push(LintItem::new(
            position,
            position,
            Severity::Error,
            "too many errors emitted; stopping now",
        ));
    }

    // =========================================================================
    // Resolver diagnostics
    // =========================================================================

    pub fn no_symbol_named(&mut self, symbol: &str, position: Position, candidate: Option<&str>) {
        let mut message = format!("no symbol named '{}' in scope", symbol);
        if let Some(candidate) = candidate {
            message.push_str(&format!("; did you mean '{}'?", candidate));
        }
        let end = Position::new(position.row, position.column + symbol.chars().count());
        self.items.push(LintItem::new(position, end, Severity::Warning, message));
    }

    pub fn symbol_defined_after_usage(&mut self, symbol: &str, definition: Position) {
        let end = Position::new(definition.row, definition.column + symbol.chars().count());
        self.items.push(LintItem::new(
            definition,
            end,
            Severity::Info,
            format!("'{}' is defined after it is used", symbol),
        ));
    }

    // =========================================================================
    // Style diagnostics (dropped unless requested)
    // =========================================================================

    pub fn expected_whitespace(&mut self, token: &AnnotatedToken) {
        if !self.record_style_lint {
            return;
        }
        self.items.push(LintItem::new(
            token.position,
            token.position,
            Severity::Style,
            "expected whitespace",
        ));
    }

    pub fn unnecessary_whitespace(&mut self, token: &AnnotatedToken) {
        if !self.record_style_lint {
            return;
        }
        self.items.push(LintItem::new(
            token.position,
            token.position,
            Severity::Style,
            "unnecessary whitespace",
        ));
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn get(&self) -> &[LintItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LintItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Stable-sort items by start position
    pub fn sort_by_position(&mut self) {
        self.items.sort_by_key(|item| item.start);
    }

    pub fn into_vec(self) -> Vec<LintItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a LintItems {
    type Item = &'a LintItem;
    type IntoIter = std::slice::Iter<'a, LintItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
