//! Shared helpers for binder integration tests.
#![allow(dead_code)]

use molt_binder::{BinderState, BindingId, ScopeId};
use molt_ast::{ConstantValue, ExprContext, NodeArena, NodeIndex};

/// Opt-in test logging: `RUST_LOG=molt_binder=trace cargo test`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn load(arena: &mut NodeArena, id: &str) -> NodeIndex {
    arena.add_name(id, ExprContext::Load)
}

pub fn store(arena: &mut NodeArena, id: &str) -> NodeIndex {
    arena.add_name(id, ExprContext::Store)
}

pub fn int(arena: &mut NodeArena, v: i64) -> NodeIndex {
    arena.add_constant(ConstantValue::Int(v))
}

/// `name = value`; returns `(statement, target)`.
pub fn assign(arena: &mut NodeArena, name: &str, value: NodeIndex) -> (NodeIndex, NodeIndex) {
    let target = store(arena, name);
    (arena.add_assign(vec![target], value), target)
}

/// `name = []`; returns `(statement, target)`.
pub fn list_assign(arena: &mut NodeArena, name: &str) -> (NodeIndex, NodeIndex) {
    let list = arena.add_list(vec![], ExprContext::Load);
    let target = store(arena, name);
    (arena.add_assign(vec![target], list), target)
}

/// `receiver.method(args)` as a statement; returns `(statement, call)`.
pub fn method_call(
    arena: &mut NodeArena,
    receiver: &str,
    method: &str,
    args: Vec<NodeIndex>,
) -> (NodeIndex, NodeIndex) {
    let recv = load(arena, receiver);
    let func = arena.add_attribute(recv, method, ExprContext::Load);
    let call = arena.add_call(func, args, vec![]);
    (arena.add_expr_stmt(call), call)
}

/// Names declared in `scope`, in declaration order.
pub fn var_names(state: &BinderState, scope: ScopeId) -> Vec<String> {
    state
        .vars(scope)
        .filter_map(|id| state.binding(id).map(|b| b.name.clone()))
        .collect()
}

/// Names behind a list of binding ids, in order.
pub fn names_of(state: &BinderState, ids: &[BindingId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| state.binding(id).map(|b| b.name.clone()))
        .collect()
}
