//! The lexical scope tree.
//!
//! Scopes are stored in an arena (`Vec<ScopeNode>` addressed by `ScopeId`);
//! the parent link is an index, not ownership, so the parent/child relation
//! cannot cycle. The root scope is created up front; further nodes appear
//! only for `function(...)` bodies — braces are blocks, not scopes.
//!
//! Each node maps symbol names to the ordered positions where they are
//! defined and referenced, plus per-package sets of qualified references
//! (`pkg::name` and `pkg:::name`).

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::base::Position;

/// Index of a scope node in the tree's arena
pub type ScopeId = usize;

/// The root scope's id
pub const ROOT_SCOPE: ScopeId = 0;

/// Symbol name → ordered positions
pub type SymbolPositions = IndexMap<SmolStr, Vec<Position>>;

/// Package name → qualified symbols referenced through it
pub type PackageSymbols = IndexMap<SmolStr, IndexSet<SmolStr>>;

/// A lexical scope: the root, or one function body
#[derive(Debug)]
pub struct ScopeNode {
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,

    /// Display name: `<root>`, the binding name, or `<anonymous>`
    name: SmolStr,
    /// The `{` or `(` that opened the scope; `(0, 0)` for the root
    open_position: Position,
    /// Set when the parser leaves the scope; `None` for the root
    close_position: Option<Position>,

    defined_symbols: SymbolPositions,
    referenced_symbols: SymbolPositions,

    internal_symbols: PackageSymbols, // pkg::name
    exported_symbols: PackageSymbols, // pkg:::name
}

impl ScopeNode {
    fn new(parent: Option<ScopeId>, name: SmolStr, open_position: Position) -> Self {
        Self {
            parent,
            children: Vec::new(),
            name,
            open_position,
            close_position: None,
            defined_symbols: SymbolPositions::default(),
            referenced_symbols: SymbolPositions::default(),
            internal_symbols: PackageSymbols::default(),
            exported_symbols: PackageSymbols::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn open_position(&self) -> Position {
        self.open_position
    }

    pub fn close_position(&self) -> Option<Position> {
        self.close_position
    }

    pub fn defined_symbols(&self) -> &SymbolPositions {
        &self.defined_symbols
    }

    pub fn referenced_symbols(&self) -> &SymbolPositions {
        &self.referenced_symbols
    }

    pub fn internal_symbols(&self) -> &PackageSymbols {
        &self.internal_symbols
    }

    pub fn exported_symbols(&self) -> &PackageSymbols {
        &self.exported_symbols
    }
}

/// The scope tree, rooted at `<root>`
#[derive(Debug)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ScopeNode::new(
                None,
                SmolStr::new_static("<root>"),
                Position::default(),
            )],
        }
    }

    pub fn root(&self) -> &ScopeNode {
        &self.nodes[ROOT_SCOPE]
    }

    pub fn node(&self, id: ScopeId) -> &ScopeNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the root always exists
    }

    /// Iterate all scope ids, parent before children, siblings in insertion
    /// order. Arena ids are allocated in exactly that order.
    pub fn ids(&self) -> impl Iterator<Item = ScopeId> + use<> {
        0..self.nodes.len()
    }

    /// Walk the parent chain of `id`, excluding `id` itself
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let mut current = self.nodes[id].parent;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.nodes[id].parent;
            Some(id)
        })
    }

    // =========================================================================
    // Construction (parser-side)
    // =========================================================================

    pub fn add_child(&mut self, parent: ScopeId, name: SmolStr, open_position: Position) -> ScopeId {
        let id = self.nodes.len();
        self.nodes.push(ScopeNode::new(Some(parent), name, open_position));
        self.nodes[parent].children.push(id);
        tracing::trace!(parent, id, name = %self.nodes[id].name, "scope created");
        id
    }

    pub fn set_open_position(&mut self, id: ScopeId, position: Position) {
        self.nodes[id].open_position = position;
    }

    pub fn set_close_position(&mut self, id: ScopeId, position: Position) {
        self.nodes[id].close_position = Some(position);
    }

    pub fn add_defined_symbol(&mut self, id: ScopeId, name: SmolStr, position: Position) {
        tracing::trace!(id, %name, ?position, "defined symbol");
        self.nodes[id].defined_symbols.entry(name).or_default().push(position);
    }

    pub fn add_referenced_symbol(&mut self, id: ScopeId, name: SmolStr, position: Position) {
        tracing::trace!(id, %name, ?position, "referenced symbol");
        self.nodes[id]
            .referenced_symbols
            .entry(name)
            .or_default()
            .push(position);
    }

    pub fn add_internal_symbol(&mut self, id: ScopeId, package: SmolStr, name: SmolStr) {
        self.nodes[id].internal_symbols.entry(package).or_default().insert(name);
    }

    pub fn add_exported_symbol(&mut self, id: ScopeId, package: SmolStr, name: SmolStr) {
        self.nodes[id].exported_symbols.entry(package).or_default().insert(name);
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Visibility rule for a reference to `symbol` at `position` in scope
    /// `id`: a definition in the same scope at a position `<=` the reference,
    /// or a definition in any ancestor scope regardless of position.
    pub fn symbol_has_definition(&self, id: ScopeId, symbol: &str, position: Position) -> bool {
        if let Some(positions) = self.nodes[id].defined_symbols.get(symbol) {
            if positions.iter().any(|p| *p <= position) {
                return true;
            }
        }
        self.ancestors(id)
            .any(|ancestor| self.nodes[ancestor].defined_symbols.contains_key(symbol))
    }

    /// The innermost scope whose extent contains `position`.
    ///
    /// A function scope spans from its open position to its close position
    /// (to the end of input while still open); the root spans everything.
    pub fn scope_at(&self, position: Position) -> ScopeId {
        let mut current = ROOT_SCOPE;
        'descend: loop {
            for &child in &self.nodes[current].children {
                let node = &self.nodes[child];
                let within_open = node.open_position <= position;
                let within_close = node.close_position.is_none_or(|close| position <= close);
                if within_open && within_close {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
