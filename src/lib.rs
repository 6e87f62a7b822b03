//! # renard
//!
//! Scope-aware linter core for an R-like scripting language: tokenizer,
//! resilient single-pass parser, and symbol resolution.
//!
//! ## Module Structure
//!
//! ```text
//! semantic ⇄ parser ⇄ lint
//!        ↘    ↓    ↙
//!           base
//! ```
//!
//! `base` (Position, Span, source decoding) is the only leaf. The other
//! three are mutually dependent pairs rather than a strict layering:
//! `parser` and `lint` reference each other (the parser writes to the sink,
//! the sink's constructors take annotated tokens), and so do `parser` and
//! `semantic` (the parser builds the scope tree, the resolver's [`lint`]
//! entry calls back into [`parse`]).
//!
//! The core is a pure function of its inputs: no I/O, no shared state, no
//! panics on malformed source. [`parse`] produces a [`ScopeTree`] plus
//! diagnostics; [`lint`] additionally resolves references against a
//! caller-supplied [`ExternalSymbols`] set.

// ============================================================================
// MODULES (base is the leaf; parser, lint, and semantic are interdependent)
// ============================================================================

/// Foundation types: Position, Span, source decoding
pub mod base;

/// Diagnostics: severity, lint items, the sink
pub mod lint;

/// Lexer, token annotation, and the push-down parser
pub mod parser;

/// Scope tree and reference resolution
pub mod semantic;

// Re-export the public surface
pub use base::{DecodeError, Position, Span, decode_source};
pub use lint::{LintItem, LintItems, Severity};
pub use parser::{
    AnnotatedToken, NSE_FUNCTIONS, ParseOptions, ParseResults, ParseState, TokenKind, parse,
    parse_bytes, tokenize,
};
pub use semantic::{
    ExternalSymbols, ParseItem, ROOT_SCOPE, ScopeId, ScopeNode, ScopeTree, lint,
};
