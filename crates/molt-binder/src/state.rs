//! Binder state: scope stack, annotation side tables, and name resolution.

use crate::Error;
use crate::bindings::{Binding, BindingArena, BindingId};
use crate::scopes::{ContainerKind, Scope, ScopeId};
use molt_ast::{NodeArena, NodeIndex};
use molt_common::limits::{BINDING_PREALLOC, MAX_SCOPE_WALK_ITERATIONS};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Private per-branch binding lists of an `if` statement.
///
/// A name bound in only one branch is not guaranteed bound after the
/// statement, so neither list is merged into the enclosing scope. Whether a
/// consumer unions, intersects, or ignores them is its own policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BranchVars {
    pub body_vars: Vec<BindingId>,
    pub orelse_vars: Vec<BindingId>,
}

/// State built up by the analysis passes over one syntax tree.
///
/// The tree is never mutated; every annotation lives here in a side table
/// keyed by node index. A `BinderState` is only meaningful together with
/// the arena it was built from.
pub struct BinderState {
    /// Arena of binding records.
    pub bindings: BindingArena,
    /// Every scope created during binding, in creation order. Parent links
    /// make each entry the head of a full chain, so per-node snapshots can
    /// be a single index.
    pub(crate) scopes: Vec<Scope>,
    /// Stack of currently open scopes, innermost last. Empty outside a
    /// traversal; every push is popped on all exit paths.
    pub(crate) scope_stack: Vec<ScopeId>,
    /// Scope-chain snapshot: each visited node's innermost enclosing scope.
    node_scopes: FxHashMap<u32, ScopeId>,
    /// Declaration site -> its binding record.
    node_bindings: FxHashMap<u32, BindingId>,
    /// Assignment-target node -> the statement responsible for it.
    assigned_from: FxHashMap<u32, NodeIndex>,
    /// Imported alias node -> its import statement.
    imported_from: FxHashMap<u32, NodeIndex>,
    /// `if` node -> private branch binding lists.
    branch_vars: FxHashMap<u32, BranchVars>,
    /// Set once the variable binding pass has completed.
    pub(crate) bound: bool,
}

impl Default for BinderState {
    fn default() -> Self {
        BinderState::new()
    }
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            bindings: BindingArena::with_capacity(BINDING_PREALLOC),
            scopes: Vec::new(),
            scope_stack: Vec::new(),
            node_scopes: FxHashMap::default(),
            node_bindings: FxHashMap::default(),
            assigned_from: FxHashMap::default(),
            imported_from: FxHashMap::default(),
            branch_vars: FxHashMap::default(),
            bound: false,
        }
    }

    /// Whether the variable binding pass has completed.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    // Scope management

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, node: NodeIndex) -> ScopeId {
        let parent = self.scope_stack.last().copied().unwrap_or(ScopeId::NONE);
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, node, parent));
        self.scope_stack.push(id);
        trace!(?kind, scope = id.0, "enter scope");
        id
    }

    pub(crate) fn exit_scope(&mut self) {
        let popped = self.scope_stack.pop();
        debug_assert!(popped.is_some(), "exit_scope without matching enter_scope");
        if let Some(id) = popped {
            trace!(scope = id.0, "exit scope");
        }
    }

    pub(crate) fn current_scope_id(&self) -> Option<ScopeId> {
        self.scope_stack.last().copied()
    }

    /// Record the innermost enclosing scope of a visited node.
    pub(crate) fn record_scope(&mut self, node: NodeIndex) {
        if let Some(&id) = self.scope_stack.last() {
            self.node_scopes.insert(node.0, id);
        }
    }

    /// Declare a name in the current scope. See [`BinderState::declare_in`].
    pub(crate) fn declare(
        &mut self,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        assigned_from: NodeIndex,
    ) {
        let Some(scope) = self.current_scope_id() else {
            debug_assert!(false, "declaration outside any scope");
            return;
        };
        self.declare_in(scope, name, flags, declaration, assigned_from);
    }

    /// Declare a name in `scope`, merging with an existing same-name binding.
    ///
    /// The first declaration wins: a merge appends the new declaration site
    /// and ors in the flags, but `assigned_from` keeps the original
    /// statement, and the binding keeps its position in the scope's order.
    pub(crate) fn declare_in(
        &mut self,
        scope: ScopeId,
        name: &str,
        flags: u32,
        declaration: NodeIndex,
        assigned_from: NodeIndex,
    ) -> Option<BindingId> {
        let existing = self.scope(scope).and_then(|s| s.get(name));
        if let Some(id) = existing {
            if let Some(binding) = self.bindings.get_mut(id) {
                binding.flags |= flags;
                if !binding.declarations.contains(&declaration) {
                    binding.declarations.push(declaration);
                }
            }
            self.node_bindings.insert(declaration.0, id);
            debug!(name, binding = id.0, "merged into existing binding");
            return Some(id);
        }

        if self.scope(scope).is_none() {
            debug_assert!(false, "declaration into unknown scope");
            return None;
        }
        let id = self
            .bindings
            .alloc(name, flags, scope, declaration, assigned_from);
        if let Some(entry) = self.scope_mut(scope) {
            entry.table.insert(name.to_string(), id);
        }
        self.node_bindings.insert(declaration.0, id);
        debug!(name, binding = id.0, scope = scope.0, "declared binding");
        Some(id)
    }

    /// Record an imported alias: side-table entry plus the owning scope's
    /// import list. Aliases never enter the binding table.
    pub(crate) fn record_import(&mut self, alias: NodeIndex, statement: NodeIndex) {
        self.imported_from.insert(alias.0, statement);
        if let Some(id) = self.current_scope_id()
            && let Some(scope) = self.scope_mut(id)
        {
            scope.imports.push(alias);
        }
    }

    /// Drain the current scope's binding table, preserving declaration order.
    /// Used by `if` binding to capture per-branch lists.
    pub(crate) fn drain_current_scope_vars(&mut self) -> Vec<BindingId> {
        let Some(id) = self.current_scope_id() else {
            return Vec::new();
        };
        match self.scope_mut(id) {
            Some(scope) => scope.table.drain(..).map(|(_, id)| id).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn set_branch_vars(&mut self, node: NodeIndex, vars: BranchVars) {
        self.branch_vars.insert(node.0, vars);
    }

    // Queries

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get(id.0 as usize)
        }
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get_mut(id.0 as usize)
        }
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// The innermost scope enclosing `node` at the moment it was visited.
    pub fn scope_of(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&node.0).copied()
    }

    /// The scope chain of `node`, innermost to outermost.
    pub fn chain(&self, node: NodeIndex) -> ScopeChain<'_> {
        ScopeChain {
            state: self,
            next: self.scope_of(node).unwrap_or(ScopeId::NONE),
            remaining: MAX_SCOPE_WALK_ITERATIONS,
        }
    }

    /// Resolve `name` through `node`'s scope chain, innermost outward,
    /// returning the first matching binding.
    pub fn find(&self, name: &str, node: NodeIndex) -> Result<BindingId, Error> {
        self.try_find(name, node).ok_or_else(|| Error::UnresolvedName {
            name: name.to_string(),
            node,
        })
    }

    /// Like [`BinderState::find`], but a miss is `None` instead of an error.
    /// The list-growth pass uses this: most attribute calls are unrelated to
    /// list mutation and must not abort the analysis.
    pub fn try_find(&self, name: &str, node: NodeIndex) -> Option<BindingId> {
        for scope_id in self.chain(node) {
            if let Some(scope) = self.scope(scope_id)
                && let Some(id) = scope.get(name)
            {
                debug!(name, scope = scope_id.0, binding = id.0, "resolved name");
                return Some(id);
            }
        }
        debug!(name, node = node.0, "name not found in any enclosing scope");
        None
    }

    /// Resolve an imported alias visible from `node`: its `as` name if
    /// present, otherwise the first segment of the module path.
    pub fn find_import(
        &self,
        arena: &NodeArena,
        name: &str,
        node: NodeIndex,
    ) -> Option<NodeIndex> {
        for scope_id in self.chain(node) {
            let scope = self.scope(scope_id)?;
            for &alias_idx in &scope.imports {
                let Some(alias) = arena.get_alias(alias_idx) else {
                    continue;
                };
                let bound = alias
                    .asname
                    .as_deref()
                    .unwrap_or_else(|| alias.name.split('.').next().unwrap_or(&alias.name));
                if bound == name {
                    return Some(alias_idx);
                }
            }
        }
        None
    }

    /// The binding declared at `node`, if `node` is a declaration site.
    pub fn binding_of(&self, node: NodeIndex) -> Option<BindingId> {
        self.node_bindings.get(&node.0).copied()
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id)
    }

    /// The statement responsible for the assignment target `node`.
    pub fn assigned_from(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.assigned_from.get(&node.0).copied()
    }

    pub(crate) fn set_assigned_from(&mut self, node: NodeIndex, statement: NodeIndex) {
        self.assigned_from.insert(node.0, statement);
    }

    /// The import statement an alias node belongs to.
    pub fn imported_from(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.imported_from.get(&node.0).copied()
    }

    /// Private branch binding lists of an `if` node.
    pub fn branch_vars(&self, node: NodeIndex) -> Option<&BranchVars> {
        self.branch_vars.get(&node.0)
    }

    /// Bindings declared directly in `scope`, in declaration order.
    pub fn vars(&self, scope: ScopeId) -> impl Iterator<Item = BindingId> + '_ {
        self.scope(scope).into_iter().flat_map(|s| s.vars())
    }

    /// Growth-mutation call sites recorded for `binding`, in order.
    pub fn growth_calls(&self, binding: BindingId) -> &[NodeIndex] {
        self.bindings
            .get(binding)
            .map(|b| b.calls.as_slice())
            .unwrap_or(&[])
    }
}

/// Iterator over a node's scope chain, innermost to outermost.
///
/// Bounded by [`MAX_SCOPE_WALK_ITERATIONS`] so a corrupted parent link can
/// never hang resolution.
pub struct ScopeChain<'a> {
    state: &'a BinderState,
    next: ScopeId,
    remaining: usize,
}

impl Iterator for ScopeChain<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        if self.next.is_none() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let id = self.next;
        self.next = self.state.scope(id).map(|s| s.parent).unwrap_or(ScopeId::NONE);
        Some(id)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
