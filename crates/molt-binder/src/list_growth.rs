//! List-growth detection pass.
//!
//! Finds calls of the shape `x.append(..)` / `x.extend(..)` / `x.insert(..)`
//! where `x` is a simple loaded name resolving to a binding whose original
//! declaration assigned a list literal, and records the call sites on that
//! binding. Emitters use the result to pick a growable collection
//! representation for the variable in the target language.
//!
//! Detection is deliberately permissive and conservative: calls that do not
//! match the shape are skipped silently, and only the binding's *original*
//! `assigned_from` is consulted; re-assignment to or from a list later in
//! the program does not change the verdict.

use crate::Error;
use crate::state::BinderState;
use molt_ast::{ExprContext, Node, NodeArena, NodeIndex};
use smallvec::{SmallVec, smallvec};
use tracing::{Level, debug, span, trace};

/// Method names recognized as in-place list growth.
const LIST_GROWTH_METHODS: [&str; 3] = ["append", "extend", "insert"];

impl BinderState {
    /// Run the list-growth pass over the tree rooted at `root`.
    ///
    /// Requires the variable binding pass to have completed: receiver names
    /// resolve through the scope-chain snapshots that pass recorded.
    pub fn collect_list_growth(&mut self, arena: &NodeArena, root: NodeIndex) -> Result<(), Error> {
        if !self.is_bound() {
            return Err(Error::PassOrdering);
        }
        let _span = span!(Level::DEBUG, "collect_list_growth", root = root.0).entered();

        // Pre-order walk so recorded calls keep program order.
        let mut stack: SmallVec<[NodeIndex; 32]> = smallvec![root];
        while let Some(idx) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                return Err(Error::InvalidNode { node: idx });
            };
            if matches!(node, Node::Call(_)) {
                self.record_growth_call(arena, idx);
            }
            let children = arena.get_children(idx);
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn record_growth_call(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(call) = arena.get_call(idx) else {
            return;
        };
        // Only one-level `name.method(..)` shapes qualify; anything else is
        // outside the detector's remit and skipped without complaint.
        let Some(callee) = arena.get_attribute(call.func) else {
            return;
        };
        if callee.ctx != ExprContext::Load {
            return;
        }
        if !LIST_GROWTH_METHODS.contains(&callee.attr.as_str()) {
            return;
        }
        let Some(receiver) = arena.get_name(callee.value) else {
            return;
        };
        let Some(binding_id) = self.try_find(&receiver.id, idx) else {
            trace!(receiver = %receiver.id, "growth receiver did not resolve; skipped");
            return;
        };
        let originally_list = self
            .binding(binding_id)
            .is_some_and(|b| is_list_assignment(arena, b.assigned_from));
        if !originally_list {
            return;
        }
        if let Some(binding) = self.bindings.get_mut(binding_id) {
            debug!(receiver = %receiver.id, call = idx.0, "recorded growth call");
            binding.calls.push(idx);
        }
    }
}

/// Whether `statement` is a plain assignment storing a list literal into a
/// simple name.
fn is_list_assignment(arena: &NodeArena, statement: NodeIndex) -> bool {
    let Some(assign) = arena.get_assign(statement) else {
        return false;
    };
    let Some(&first_target) = assign.targets.first() else {
        return false;
    };
    let Some(target) = arena.get_name(first_target) else {
        return false;
    };
    if target.ctx != ExprContext::Store {
        return false;
    }
    arena.get_list(assign.value).is_some()
}
