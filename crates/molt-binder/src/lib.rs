//! Scope construction and name binding for the molt front end.
//!
//! Two passes run over a parsed tree, strictly in order:
//!
//! 1. **Variable binding** ([`BinderState::bind_module`]): one pre-order
//!    traversal that opens a scope per container node, registers every
//!    declaration (assignment targets, parameters, loop targets, nested
//!    `def`/`class` names) into its owning scope's ordered table, and records
//!    a scope-chain snapshot for every visited node.
//! 2. **List-growth detection** ([`BinderState::collect_list_growth`]): a
//!    second traversal that finds `x.append(..)`-shaped calls whose receiver
//!    resolves to a binding originally assigned a list literal, and records
//!    the call sites on that binding.
//!
//! The tree itself is never mutated: all annotations live in side tables on
//! [`BinderState`], keyed by node index. Downstream consumers (type
//! inference, the per-target emitters) query the state through
//! [`BinderState::find`] and the other accessors.

pub mod bindings;
pub mod scopes;

mod list_growth;
mod state;
mod state_binding;

pub use bindings::{Binding, BindingArena, BindingId, binding_flags};
pub use scopes::{ContainerKind, Scope, ScopeId};
pub use state::{BinderState, BranchVars, ScopeChain};

use molt_ast::{NodeArena, NodeIndex};
use molt_common::Span;
use molt_common::diagnostics::{Diagnostic, diagnostic_codes};
use std::fmt;

/// Ordered map with the binder's hasher; insertion order is declaration order.
pub(crate) type FxIndexMap<K, V> =
    indexmap::IndexMap<K, V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;

/// Errors raised by the analysis passes.
///
/// The analysis aborts on the first error; a tree with an unbound name
/// cannot be typed downstream, so there is no partial-result mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No enclosing scope of the requesting node declares the name.
    UnresolvedName { name: String, node: NodeIndex },
    /// A node index did not resolve to a node in the arena.
    InvalidNode { node: NodeIndex },
    /// The list-growth pass ran before the binding pass completed.
    PassOrdering,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnresolvedName { name, node } => {
                write!(f, "cannot find name '{}' from node {}", name, node.0)
            }
            Error::InvalidNode { node } => {
                write!(f, "node index {} does not resolve to a node", node.0)
            }
            Error::PassOrdering => {
                write!(f, "list-growth detection ran before variable binding completed")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Render the error as a diagnostic anchored at the offending node.
    pub fn to_diagnostic(&self, arena: &NodeArena, file: &str) -> Diagnostic {
        let (span, code) = match self {
            Error::UnresolvedName { node, .. } => (
                arena.get(*node).map(|n| n.span()).unwrap_or_default(),
                diagnostic_codes::CANNOT_FIND_NAME,
            ),
            Error::InvalidNode { node } => (
                arena.get(*node).map(|n| n.span()).unwrap_or_default(),
                diagnostic_codes::INVALID_NODE,
            ),
            Error::PassOrdering => (Span::EMPTY, diagnostic_codes::PASS_ORDERING),
        };
        Diagnostic::error(file, span, self.to_string(), code)
    }
}

/// Run both passes over `module` in the required order.
pub fn analyze(arena: &NodeArena, module: NodeIndex) -> Result<BinderState, Error> {
    let mut state = BinderState::new();
    state.bind_module(arena, module)?;
    state.collect_list_growth(arena, module)?;
    Ok(state)
}
