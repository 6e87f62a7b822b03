//! Reference resolution over the scope tree.
//!
//! After the parse pass, every scope node holds the symbols it defined and
//! referenced. The resolver walks the tree, collects references with no
//! visible definition, filters out names supplied by the caller (built-ins,
//! attached packages, project indexes), and reports the rest.

use std::path::Path;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::Position;
use crate::lint::LintItems;
use crate::parser::{ParseOptions, parse, strip_back_quotes};

use super::scope::{ROOT_SCOPE, ScopeId, ScopeTree};

/// Names considered defined without local evidence
pub type ExternalSymbols = FxHashSet<SmolStr>;

/// An unresolved reference: a symbol, where it was referenced, and in which
/// scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseItem {
    pub symbol: SmolStr,
    pub position: Position,
    pub scope: ScopeId,
}

/// Collect every reference with no visible definition, walking the tree
/// parent-before-children, siblings in insertion order.
pub fn find_all_unresolved_symbols(tree: &ScopeTree) -> Vec<ParseItem> {
    let mut items = Vec::new();
    let mut pending = vec![ROOT_SCOPE];
    while let Some(id) = pending.pop() {
        let node = tree.node(id);
        for (symbol, positions) in node.referenced_symbols() {
            for &position in positions {
                if !tree.symbol_has_definition(id, symbol, position) {
                    tracing::trace!(%symbol, ?position, scope = id, "unresolved reference");
                    items.push(ParseItem {
                        symbol: symbol.clone(),
                        position,
                        scope: id,
                    });
                }
            }
        }
        pending.extend(node.children().iter().rev().copied());
    }
    items
}

/// Find a defined symbol in scope whose lowercase spelling matches the
/// unresolved reference. A candidate spelled exactly like the reference is
/// never suggested; that case is the defined-after-use info instead.
pub fn suggest_similar_symbol(tree: &ScopeTree, item: &ParseItem) -> Option<SmolStr> {
    let lower = item.symbol.to_lowercase();
    let mut scope = Some(item.scope);
    while let Some(id) = scope {
        let node = tree.node(id);
        for name in node.defined_symbols().keys() {
            if *name != item.symbol && name.to_lowercase() == lower {
                return Some(name.clone());
            }
        }
        scope = node.parent();
    }
    None
}

/// Report unresolved references, minus those in the external symbol set.
///
/// Each surviving item yields a warning, possibly carrying a similar-name
/// suggestion, plus one info per same-scope definition that appears after
/// the reference.
pub fn resolve_symbols(tree: &ScopeTree, externals: &ExternalSymbols, lint: &mut LintItems) {
    let unresolved = find_all_unresolved_symbols(tree);
    tracing::debug!(count = unresolved.len(), "resolving references");

    for item in &unresolved {
        if externals.contains(strip_back_quotes(&item.symbol).as_str()) {
            continue;
        }

        let candidate = suggest_similar_symbol(tree, item);
        lint.no_symbol_named(&item.symbol, item.position, candidate.as_deref());

        if let Some(positions) = tree.node(item.scope).defined_symbols().get(&item.symbol) {
            for &definition in positions {
                if definition > item.position {
                    lint.symbol_defined_after_usage(&item.symbol, definition);
                }
            }
        }
    }
}

/// Parse source text and resolve references against `externals`.
///
/// `origin` is metadata only; it never causes I/O. When the parse pass hit
/// the error cap the resolver is skipped, leaving the cap item last.
pub fn lint(source: &str, origin: Option<&Path>, externals: &ExternalSymbols) -> LintItems {
    tracing::debug!(?origin, externals = externals.len(), "lint pass");
    let mut results = parse(source, &ParseOptions::default());
    if !results.stopped_early() {
        resolve_symbols(&results.scope_tree, externals, &mut results.lint);
        results.lint.sort_by_position();
    }
    results.lint
}
