//! Single-pass parser for the R-like surface syntax.
//!
//! This is not a grammar-driven parser and it builds no syntax tree. It is a
//! hand-written push-down automaton: one forward pass over the annotated
//! token stream, driven by the parse-state stack, that
//!
//! - matches delimiters through a LIFO of open brackets,
//! - records symbol definitions and references into the scope tree,
//! - spawns a child scope for each `function(...)` body,
//! - emits whitespace style lint when asked to, and
//! - recovers from errors by advancing one token.
//!
//! The pass always terminates and never fails; everything it finds is
//! reported through the lint sink.

use smol_str::SmolStr;

use crate::base::{Position, decode_source_lossy};
use crate::lint::{LintItems, Severity};
use crate::semantic::{ROOT_SCOPE, ScopeId, ScopeTree};

use super::annotate::{AnnotatedToken, annotate};
use super::state::{ParseState, StateStack};
use super::token_kind::{TokenKind, kind_to_name};

/// Functions whose arguments use non-standard evaluation: identifiers inside
/// a direct call to one of these are not recorded as references.
pub const NSE_FUNCTIONS: &[&str] = &[
    "library",
    "require",
    "quote",
    "substitute",
    "enquote",
    "expression",
    "evalq",
    "subset",
];

/// Options controlling a parse pass
#[derive(Debug, Clone)]
pub struct ParseOptions {
    record_style_lint: bool,
    max_errors: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_lint(mut self, record: bool) -> Self {
        self.record_style_lint = record;
        self
    }

    pub fn record_style_lint(&self) -> bool {
        self.record_style_lint
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            record_style_lint: false,
            max_errors: 1000,
        }
    }
}

/// The outcome of a parse pass: the scope tree and the accumulated lint
#[derive(Debug)]
pub struct ParseResults {
    pub scope_tree: ScopeTree,
    pub lint: LintItems,
    stopped_early: bool,
}

impl ParseResults {
    pub fn scope_tree(&self) -> &ScopeTree {
        &self.scope_tree
    }

    pub fn lint(&self) -> &LintItems {
        &self.lint
    }

    pub fn error_count(&self) -> usize {
        self.lint.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.lint.has_errors()
    }

    /// Whether the pass hit the error cap and terminated before end of input
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }
}

/// Parse source text into a scope tree plus diagnostics
pub fn parse(source: &str, options: &ParseOptions) -> ParseResults {
    let tokens = annotate(source);
    let mut parser = Parser::new(&tokens, options);
    parser.run();
    let mut results = parser.into_results();
    results.lint.sort_by_position();
    tracing::debug!(
        scopes = results.scope_tree.len(),
        lint = results.lint.len(),
        errors = results.lint.error_count(),
        "parse pass finished"
    );
    results
}

/// Parse raw bytes, decoding as UTF-8 with replacement characters.
///
/// An invalid byte sequence yields a single error diagnostic at the position
/// where decoding first failed; analysis proceeds on the replaced text.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> ParseResults {
    let (text, invalid_at) = decode_source_lossy(bytes);
    let mut results = parse(&text, options);
    if let Some(position) = invalid_at {
        results.lint.add(
            position,
            position,
            Severity::Error,
            "invalid UTF-8 byte sequence in source; bytes replaced with U+FFFD",
        );
        results.lint.sort_by_position();
    }
    results
}

/// A function whose argument list is being parsed. The scope exists already;
/// it is entered when the body begins.
struct FunctionFrame {
    scope: ScopeId,
    expecting_formal: bool,
}

struct Parser<'t> {
    tokens: &'t [AnnotatedToken],
    pos: usize,

    tree: ScopeTree,
    scope: ScopeId,
    states: StateStack,
    /// Indices of open-delimiter tokens
    brace_stack: Vec<usize>,
    lint: LintItems,

    /// One entry per open paren argument list: is it an NSE call?
    nse_stack: Vec<bool>,
    frames: Vec<FunctionFrame>,
    /// Set by `->` / `->>`: the next identifier is a definition target
    pending_right_assign: bool,
    /// Index of the `)` that closed the last control-flow condition
    last_condition_close: Option<usize>,

    max_errors: usize,
    record_style_lint: bool,
    stopped_early: bool,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [AnnotatedToken], options: &ParseOptions) -> Self {
        debug_assert!(matches!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF)));
        Self {
            tokens,
            pos: 0,
            tree: ScopeTree::new(),
            scope: ROOT_SCOPE,
            states: StateStack::new(),
            brace_stack: Vec::new(),
            lint: LintItems::new(options.record_style_lint),
            nse_stack: Vec::new(),
            frames: Vec::new(),
            pending_right_assign: false,
            last_condition_close: None,
            max_errors: options.max_errors,
            record_style_lint: options.record_style_lint,
            stopped_early: false,
        }
    }

    fn into_results(self) -> ParseResults {
        ParseResults {
            scope_tree: self.tree,
            lint: self.lint,
            stopped_early: self.stopped_early,
        }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn token_at(&self, index: usize) -> &'t AnnotatedToken {
        let clamped = index.min(self.tokens.len() - 1);
        &self.tokens[clamped]
    }

    fn current(&self) -> &'t AnnotatedToken {
        self.token_at(self.pos)
    }

    fn peek(&self, n: usize) -> &'t AnnotatedToken {
        self.token_at(self.pos + n)
    }

    fn prev(&self) -> Option<&'t AnnotatedToken> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn bump(&mut self) {
        if !self.at(TokenKind::EOF) {
            self.pos += 1;
        }
    }

    // =========================================================================
    // Delimiter stack
    // =========================================================================

    fn push_bracket(&mut self) {
        self.brace_stack.push(self.pos);
    }

    /// Pop against the closer at the cursor, diagnosing mismatches.
    /// The top is popped even when it does not complement the closer.
    fn pop_bracket(&mut self) {
        let closer = self.current();
        match self.brace_stack.last().copied() {
            None => self.lint.unexpected_closing_bracket(closer, None),
            Some(index) => {
                let opener = &self.tokens[index];
                if opener.kind.complement() != Some(closer.kind) {
                    self.lint.unexpected_closing_bracket(closer, Some(opener));
                }
                self.brace_stack.pop();
            }
        }
    }

    // =========================================================================
    // State and scope transitions
    // =========================================================================

    fn pop_state(&mut self, expected: ParseState) {
        if !self.states.check(expected) {
            self.lint.unexpected_token(self.current(), None);
        }
        self.states.pop();
    }

    fn exit_scope(&mut self, close: Position) {
        tracing::trace!(scope = self.scope, ?close, "scope closed");
        self.tree.set_close_position(self.scope, close);
        self.scope = self.tree.node(self.scope).parent().unwrap_or(ROOT_SCOPE);
    }

    /// Enter a construct body: a brace opens the statement form, anything
    /// else leaves a single-expression body on the stack.
    fn push_body(&mut self, statement: ParseState, expression: ParseState) {
        if self.at(TokenKind::L_BRACE) {
            self.states.push(statement);
            self.push_bracket();
            self.bump();
        } else {
            self.states.push(expression);
        }
    }

    fn in_nse_call(&self) -> bool {
        self.nse_stack.iter().any(|&nse| nse)
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    fn run(&mut self) {
        loop {
            if self.at(TokenKind::EOF) {
                break;
            }
            if self.lint.error_count() >= self.max_errors {
                self.lint.too_many_errors(self.current().position);
                self.stopped_early = true;
                return;
            }

            if self.close_expression_bodies() {
                continue;
            }

            let is_right_assign_target = self.pending_right_assign;
            self.pending_right_assign = false;

            if self.record_style_lint {
                self.check_style();
            }

            match self.current().kind {
                TokenKind::IF_KW => self.handle_condition_keyword(ParseState::IfCondition),
                TokenKind::WHILE_KW => self.handle_condition_keyword(ParseState::WhileCondition),
                TokenKind::FOR_KW => self.handle_for(),
                TokenKind::REPEAT_KW => {
                    self.bump();
                    self.push_body(ParseState::RepeatStatement, ParseState::RepeatExpression);
                }
                TokenKind::FUNCTION_KW => self.handle_function(),
                TokenKind::IDENT => self.handle_identifier(is_right_assign_target),

                TokenKind::L_PAREN => self.handle_open_paren(),
                TokenKind::L_BRACE => {
                    self.states.push(ParseState::WithinBraces);
                    self.push_bracket();
                    self.bump();
                }
                TokenKind::L_BRACKET => {
                    self.states.push(ParseState::SingleBracketArgumentList);
                    self.push_bracket();
                    self.bump();
                }
                TokenKind::L_DBRACKET => {
                    self.states.push(ParseState::DoubleBracketArgumentList);
                    self.push_bracket();
                    self.bump();
                }

                TokenKind::R_PAREN => self.handle_close_paren(),
                TokenKind::R_BRACE => self.handle_close_brace(),
                TokenKind::R_BRACKET => {
                    self.handle_close_bracket(ParseState::SingleBracketArgumentList)
                }
                TokenKind::R_DBRACKET => {
                    self.handle_close_bracket(ParseState::DoubleBracketArgumentList)
                }

                TokenKind::COMMA => self.handle_comma(),

                TokenKind::RIGHT_ASSIGN | TokenKind::SUPER_RIGHT_ASSIGN => {
                    self.pending_right_assign = true;
                    self.bump();
                }

                TokenKind::ELSE_KW | TokenKind::ERROR => {
                    self.lint.unexpected_token(self.current(), None);
                    self.bump();
                }

                _ => self.bump(),
            }
        }

        self.finish();
    }

    /// Close single-expression bodies that end at the cursor.
    /// Returns true when tokens were consumed (an `else` continuation).
    fn close_expression_bodies(&mut self) -> bool {
        while self.states.in_control_flow_expression() && self.expression_terminates_here() {
            if self.states.current() == ParseState::IfExpression && self.at(TokenKind::ELSE_KW) {
                self.states.pop();
                self.bump();
                self.push_body(ParseState::IfStatement, ParseState::IfExpression);
                return true;
            }
            let state = self.states.pop().expect("expression state present");
            if state == ParseState::FunctionExpression {
                self.exit_scope(self.current().position);
            }
        }
        false
    }

    /// Does the token at the cursor end a single-expression body?
    fn expression_terminates_here(&self) -> bool {
        let token = self.current();
        match token.kind {
            TokenKind::SEMICOLON
            | TokenKind::COMMA
            | TokenKind::R_PAREN
            | TokenKind::R_BRACE
            | TokenKind::R_BRACKET
            | TokenKind::R_DBRACKET
            | TokenKind::ELSE_KW
            | TokenKind::EOF => true,
            _ => {
                token.newline_before
                    && self.prev().is_some_and(|prev| prev.kind.ends_expression())
            }
        }
    }

    // =========================================================================
    // Construct handlers
    // =========================================================================

    fn handle_condition_keyword(&mut self, condition: ParseState) {
        self.bump();
        if self.at(TokenKind::L_PAREN) {
            self.states.push(condition);
            self.push_bracket();
            self.bump();
        } else {
            self.lint
                .unexpected_token(self.current(), Some(kind_to_name(TokenKind::L_PAREN)));
        }
    }

    fn handle_for(&mut self) {
        self.bump();
        if !self.at(TokenKind::L_PAREN) {
            self.lint
                .unexpected_token(self.current(), Some(kind_to_name(TokenKind::L_PAREN)));
            return;
        }
        self.states.push(ParseState::ForCondition);
        self.push_bracket();
        self.bump();

        if self.at(TokenKind::IDENT) {
            let token = self.current();
            self.tree
                .add_defined_symbol(self.scope, token.symbol_name(), token.position);
            self.bump();
        } else {
            self.lint
                .unexpected_token(self.current(), Some(kind_to_name(TokenKind::IDENT)));
        }

        if self.at(TokenKind::IN_KW) {
            self.bump();
        } else {
            self.lint
                .unexpected_token(self.current(), Some(kind_to_name(TokenKind::IN_KW)));
        }
    }

    fn handle_function(&mut self) {
        let name = self.binding_name();
        self.bump();
        if !self.at(TokenKind::L_PAREN) {
            self.lint
                .unexpected_token(self.current(), Some(kind_to_name(TokenKind::L_PAREN)));
            return;
        }
        // The scope exists from here so formals land in it; its open position
        // is refined to the body token once the argument list closes.
        let scope = self.tree.add_child(self.scope, name, self.current().position);
        self.frames.push(FunctionFrame {
            scope,
            expecting_formal: true,
        });
        self.states.push(ParseState::FunctionArgumentList);
        self.push_bracket();
        self.bump();
    }

    /// The binding name for a function literal: `x <- function(...)` names
    /// the new scope `x`
    fn binding_name(&self) -> SmolStr {
        if self.pos >= 2 {
            let assign = &self.tokens[self.pos - 1];
            let target = &self.tokens[self.pos - 2];
            let assigns = matches!(
                assign.kind,
                TokenKind::LEFT_ASSIGN | TokenKind::SUPER_LEFT_ASSIGN | TokenKind::EQ
            );
            if assigns && target.kind == TokenKind::IDENT {
                return target.symbol_name();
            }
        }
        SmolStr::new_static("<anonymous>")
    }

    fn handle_identifier(&mut self, is_right_assign_target: bool) {
        let token = self.current();
        let position = token.position;
        let name = token.symbol_name();
        let next_kind = self.peek(1).kind;

        // pkg::name / pkg:::name qualified references
        if matches!(
            next_kind,
            TokenKind::COLON_COLON | TokenKind::COLON_COLON_COLON
        ) {
            let qualified = self.peek(2);
            if qualified.kind == TokenKind::IDENT {
                if self.record_style_lint {
                    let colon = self.peek(1);
                    if colon.space_before || colon.newline_before {
                        self.lint.unnecessary_whitespace(colon);
                    }
                    if qualified.space_before || qualified.newline_before {
                        self.lint.unnecessary_whitespace(qualified);
                    }
                }
                let symbol = qualified.symbol_name();
                if next_kind == TokenKind::COLON_COLON {
                    self.tree.add_internal_symbol(self.scope, name, symbol);
                } else {
                    self.tree.add_exported_symbol(self.scope, name, symbol);
                }
                self.bump();
                self.bump();
                self.bump();
            } else {
                self.lint
                    .unexpected_token(qualified, Some(kind_to_name(TokenKind::IDENT)));
                self.bump();
                self.bump();
            }
            return;
        }

        // x$field / x@slot: the right-hand side is a field name
        if self
            .prev()
            .is_some_and(|prev| matches!(prev.kind, TokenKind::DOLLAR | TokenKind::AT))
        {
            self.bump();
            return;
        }

        // formal parameter of the function whose argument list is open
        if self.states.current() == ParseState::FunctionArgumentList {
            if let Some(frame) = self.frames.last_mut() {
                if frame.expecting_formal {
                    frame.expecting_formal = false;
                    let scope = frame.scope;
                    self.tree.add_defined_symbol(scope, name, position);
                    self.bump();
                    return;
                }
            }
        }

        // expr -> name / expr ->> name
        if is_right_assign_target {
            self.tree.add_defined_symbol(self.scope, name, position);
            self.bump();
            return;
        }

        // name <- expr, name <<- expr; name = expr outside argument lists
        let defines = matches!(
            next_kind,
            TokenKind::LEFT_ASSIGN | TokenKind::SUPER_LEFT_ASSIGN
        ) || (next_kind == TokenKind::EQ && !self.states.in_argument_list());
        if defines {
            self.tree.add_defined_symbol(self.scope, name, position);
            self.bump();
            return;
        }

        // the name side of a named argument is not a reference
        if next_kind == TokenKind::EQ && self.states.in_argument_list() {
            self.bump();
            return;
        }

        if !self.in_nse_call() {
            self.tree.add_referenced_symbol(self.scope, name, position);
        }
        self.bump();
    }

    fn handle_open_paren(&mut self) {
        // `expr(` is a call; a paren opening an expression is grouping. The
        // `)` closing a control-flow condition never makes the body a call.
        let after_condition = self
            .pos
            .checked_sub(1)
            .is_some_and(|i| self.last_condition_close == Some(i));
        let callee = self.prev().filter(|prev| {
            !after_condition
                && matches!(
                    prev.kind,
                    TokenKind::IDENT
                        | TokenKind::STRING
                        | TokenKind::R_PAREN
                        | TokenKind::R_BRACKET
                        | TokenKind::R_DBRACKET
                )
        });

        match callee {
            Some(callee) => {
                let nse = callee.kind == TokenKind::IDENT
                    && NSE_FUNCTIONS.contains(&callee.symbol_name().as_str());
                self.states.push(ParseState::ParenArgumentList);
                self.nse_stack.push(nse);
            }
            None => self.states.push(ParseState::WithinParens),
        }
        self.push_bracket();
        self.bump();
    }

    fn handle_close_paren(&mut self) {
        match self.states.current() {
            ParseState::IfCondition => {
                self.close_condition(ParseState::IfCondition);
                self.push_body(ParseState::IfStatement, ParseState::IfExpression);
            }
            ParseState::WhileCondition => {
                self.close_condition(ParseState::WhileCondition);
                self.push_body(ParseState::WhileStatement, ParseState::WhileExpression);
            }
            ParseState::ForCondition => {
                self.close_condition(ParseState::ForCondition);
                self.push_body(ParseState::ForStatement, ParseState::ForExpression);
            }
            ParseState::FunctionArgumentList => {
                self.pop_bracket();
                self.pop_state(ParseState::FunctionArgumentList);
                self.bump();
                if let Some(frame) = self.frames.pop() {
                    // The body starts here: `{` for the statement form, the
                    // first expression token otherwise.
                    self.tree.set_open_position(frame.scope, self.current().position);
                    self.push_body(ParseState::FunctionStatement, ParseState::FunctionExpression);
                    self.scope = frame.scope;
                    tracing::trace!(scope = self.scope, "scope entered");
                } else {
                    self.push_body(ParseState::FunctionStatement, ParseState::FunctionExpression);
                }
            }
            ParseState::ParenArgumentList => {
                self.pop_bracket();
                self.pop_state(ParseState::ParenArgumentList);
                self.nse_stack.pop();
                self.bump();
            }
            ParseState::WithinParens => {
                self.pop_bracket();
                self.pop_state(ParseState::WithinParens);
                self.bump();
            }
            _ => {
                self.pop_bracket();
                self.bump();
            }
        }
    }

    fn close_condition(&mut self, condition: ParseState) {
        self.pop_bracket();
        self.pop_state(condition);
        self.last_condition_close = Some(self.pos);
        self.bump();
    }

    fn handle_close_brace(&mut self) {
        match self.states.current() {
            ParseState::WithinBraces => {
                self.pop_bracket();
                self.pop_state(ParseState::WithinBraces);
                self.bump();
            }
            ParseState::IfStatement => {
                self.pop_bracket();
                self.pop_state(ParseState::IfStatement);
                self.bump();
                if self.at(TokenKind::ELSE_KW) {
                    self.bump();
                    self.push_body(ParseState::IfStatement, ParseState::IfExpression);
                }
            }
            ParseState::WhileStatement
            | ParseState::ForStatement
            | ParseState::RepeatStatement => {
                let state = self.states.current();
                self.pop_bracket();
                self.pop_state(state);
                self.bump();
            }
            ParseState::FunctionStatement => {
                let close = self.current().position;
                self.pop_bracket();
                self.pop_state(ParseState::FunctionStatement);
                self.exit_scope(close);
                self.bump();
            }
            _ => {
                self.pop_bracket();
                self.bump();
            }
        }
    }

    fn handle_close_bracket(&mut self, expected: ParseState) {
        self.pop_bracket();
        if self.states.current() == expected {
            self.states.pop();
        }
        self.bump();
    }

    fn handle_comma(&mut self) {
        if self.states.current() == ParseState::FunctionArgumentList {
            if let Some(frame) = self.frames.last_mut() {
                frame.expecting_formal = true;
            }
        }
        if !self.states.in_parenthetical_scope() {
            self.lint.unexpected_token(self.current(), None);
        }
        self.bump();
    }

    // =========================================================================
    // Termination
    // =========================================================================

    fn finish(&mut self) {
        let eof_position = self.tokens[self.tokens.len() - 1].position;

        while !self.states.at_top_level() {
            let state = self.states.pop().expect("above top level");
            match state {
                ParseState::FunctionStatement | ParseState::FunctionExpression => {
                    self.exit_scope(eof_position);
                }
                ParseState::FunctionArgumentList => {
                    // Argument list never closed; the scope never had a body.
                    if let Some(frame) = self.frames.pop() {
                        self.tree.set_close_position(frame.scope, eof_position);
                    }
                }
                _ => {}
            }
        }

        let residual = std::mem::take(&mut self.brace_stack);
        for index in residual.into_iter().rev() {
            self.lint.unexpected_end_of_document(&self.tokens[index]);
        }

        self.scope = ROOT_SCOPE;
    }

    // =========================================================================
    // Whitespace style
    // =========================================================================

    fn check_style(&mut self) {
        let token = self.current();
        let kind = token.kind;
        let next = self.peek(1);
        let prev = self.prev();

        if kind.requires_surrounding_whitespace() {
            let binary = match kind {
                TokenKind::PLUS | TokenKind::MINUS => {
                    prev.is_some_and(|p| p.kind.ends_expression())
                }
                _ => true,
            };
            if binary {
                if prev.is_some() && !token.space_before && !token.newline_before {
                    self.lint.expected_whitespace(token);
                }
                if next.kind != TokenKind::EOF && !next.space_before && !next.newline_before {
                    self.lint.expected_whitespace(next);
                }
            }
        } else if kind.is_tight_operator() {
            if token.space_before || token.newline_before {
                self.lint.unnecessary_whitespace(token);
            }
            if next.space_before || next.newline_before {
                self.lint.unnecessary_whitespace(next);
            }
        }

        match kind {
            TokenKind::COMMA => {
                if token.space_before && !token.newline_before {
                    self.lint.unnecessary_whitespace(token);
                }
                let next_needs_space = !matches!(
                    next.kind,
                    TokenKind::R_PAREN
                        | TokenKind::R_BRACKET
                        | TokenKind::R_DBRACKET
                        | TokenKind::COMMA
                        | TokenKind::EOF
                );
                if next_needs_space && !next.space_before && !next.newline_before {
                    self.lint.expected_whitespace(next);
                }
            }
            TokenKind::L_PAREN | TokenKind::L_BRACKET | TokenKind::L_DBRACKET => {
                let abuts_content = !next.kind.is_opening_delimiter()
                    && !next.kind.is_closing_delimiter()
                    && next.kind != TokenKind::EOF;
                if abuts_content && next.space_before && !next.newline_before {
                    self.lint.unnecessary_whitespace(next);
                }
            }
            TokenKind::R_PAREN | TokenKind::R_BRACKET | TokenKind::R_DBRACKET => {
                let abuts_content = prev.is_some_and(|p| {
                    !p.kind.is_opening_delimiter()
                        && !p.kind.is_closing_delimiter()
                        && p.kind != TokenKind::COMMA
                });
                if abuts_content && token.space_before && !token.newline_before {
                    self.lint.unnecessary_whitespace(token);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(source: &str) -> ParseResults {
        parse(source, &ParseOptions::default())
    }

    #[test]
    fn test_parse_empty() {
        let results = parse_default("");
        assert!(!results.has_errors());
        assert!(results.lint().is_empty());
        assert_eq!(results.scope_tree().len(), 1);
    }

    #[test]
    fn test_parse_simple_assignments() {
        let results = parse_default("x <- 1; y <- x + 1");
        assert!(results.lint().is_empty());
        let root = results.scope_tree().root();
        assert!(root.defined_symbols().contains_key("x"));
        assert!(root.defined_symbols().contains_key("y"));
        assert_eq!(root.referenced_symbols()["x"].len(), 1);
    }

    #[test]
    fn test_function_creates_scope() {
        let results = parse_default("f <- function(a, b) a + b");
        let tree = results.scope_tree();
        assert_eq!(tree.len(), 2);
        let child = tree.node(tree.root().children()[0]);
        assert_eq!(child.name(), "f");
        assert!(child.defined_symbols().contains_key("a"));
        assert!(child.defined_symbols().contains_key("b"));
        assert!(child.referenced_symbols().contains_key("a"));
    }

    #[test]
    fn test_braces_are_not_scopes() {
        let results = parse_default("{ x <- 1 }");
        let tree = results.scope_tree();
        assert_eq!(tree.len(), 1);
        assert!(tree.root().defined_symbols().contains_key("x"));
    }

    #[test]
    fn test_balanced_delimiters_are_quiet() {
        let results = parse_default("f(x[1], y[[2]], (z))");
        assert!(!results.has_errors());
    }

    #[test]
    fn test_mismatched_closer_is_diagnosed_and_recovered() {
        let results = parse_default("({[x)");
        let errors: Vec<_> = results
            .lint()
            .iter()
            .filter(|item| item.severity == Severity::Error)
            .collect();
        assert!(
            errors
                .iter()
                .any(|item| item.message == "unexpected closing bracket ')'")
        );
        assert!(
            results
                .lint()
                .iter()
                .any(|item| item.severity == Severity::Info
                    && item.message == "unmatched bracket '[' here")
        );
    }

    #[test]
    fn test_error_cap() {
        let source = ")".repeat(50);
        let options = ParseOptions::default().with_max_errors(5);
        let results = parse(&source, &options);
        assert!(results.stopped_early());
        let errors: Vec<_> = results
            .lint()
            .iter()
            .filter(|item| item.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 6);
        let last = results.lint().get().last().unwrap();
        assert_eq!(last.message, "too many errors emitted; stopping now");
    }

    #[test]
    fn test_determinism() {
        let source = "f <- function(x) { if (x > 0) g(x) else h(x, k) }";
        let a = parse_default(source);
        let b = parse_default(source);
        assert_eq!(a.lint().get(), b.lint().get());
        assert_eq!(a.scope_tree().len(), b.scope_tree().len());
    }
}
