//! Semantic layer: the scope tree built by the parser and the resolver that
//! reports unresolved references.

mod resolver;
mod scope;

pub use resolver::{
    ExternalSymbols, ParseItem, find_all_unresolved_symbols, lint, resolve_symbols,
    suggest_similar_symbol,
};
pub use scope::{PackageSymbols, ROOT_SCOPE, ScopeId, ScopeNode, ScopeTree, SymbolPositions};
