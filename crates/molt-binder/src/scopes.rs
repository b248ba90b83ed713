//! Scopes: container kinds, parent chains, and ordered binding tables.

use crate::FxIndexMap;
use crate::bindings::BindingId;
use molt_ast::{Node, NodeIndex};
use serde::Serialize;

/// Index of a scope in the binder's scope table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == ScopeId::NONE
    }
}

/// Kinds of container nodes that open a scope during binding.
///
/// `Module`, `Function`, and `Class` are lexical scopes. `If` and `With` are
/// bookkeeping containers: the source language has no block scoping, but
/// their tables carry branch-visibility information downstream consumers
/// need (an `if` drains into private per-branch lists, a `with` keeps its
/// table for diagnostics).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ContainerKind {
    Module,
    Function,
    Class,
    If,
    With,
}

impl ContainerKind {
    /// The scope kind `node` opens, if any.
    pub fn of(node: &Node) -> Option<ContainerKind> {
        match node {
            Node::Module(_) => Some(ContainerKind::Module),
            Node::FunctionDef(_) => Some(ContainerKind::Function),
            Node::ClassDef(_) => Some(ContainerKind::Class),
            Node::If(_) => Some(ContainerKind::If),
            Node::With(_) => Some(ContainerKind::With),
            _ => None,
        }
    }

    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            ContainerKind::Module | ContainerKind::Function | ContainerKind::Class
        )
    }
}

/// One scope: its container, its parent link, and what it declares.
#[derive(Debug)]
pub struct Scope {
    pub kind: ContainerKind,
    /// The container node that owns this scope.
    pub node: NodeIndex,
    /// Enclosing scope, `ScopeId::NONE` at the root.
    pub parent: ScopeId,
    /// Bindings declared directly in this scope, in declaration order.
    pub(crate) table: FxIndexMap<String, BindingId>,
    /// Alias nodes of import statements declared directly in this scope.
    /// Imports resolve by identity, not lexical lookup, so they are kept
    /// apart from the binding table.
    pub imports: Vec<NodeIndex>,
}

impl Scope {
    pub fn new(kind: ContainerKind, node: NodeIndex, parent: ScopeId) -> Scope {
        Scope {
            kind,
            node,
            parent,
            table: FxIndexMap::default(),
            imports: Vec::new(),
        }
    }

    /// Look up a name declared directly in this scope.
    pub fn get(&self, name: &str) -> Option<BindingId> {
        self.table.get(name).copied()
    }

    /// Bindings declared directly in this scope, in declaration order.
    pub fn vars(&self) -> impl Iterator<Item = BindingId> + '_ {
        self.table.values().copied()
    }

    /// Declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
