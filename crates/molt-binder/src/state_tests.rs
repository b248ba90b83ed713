use super::*;
use crate::bindings::binding_flags;
use molt_ast::{ConstantValue, ExprContext, NodeArena};

fn int(arena: &mut NodeArena, v: i64) -> NodeIndex {
    arena.add_constant(ConstantValue::Int(v))
}

fn assign(arena: &mut NodeArena, name: &str, value: NodeIndex) -> (NodeIndex, NodeIndex) {
    let target = arena.add_name(name, ExprContext::Store);
    (arena.add_assign(vec![target], value), target)
}

#[test]
fn scope_stack_balanced_after_bind() {
    let mut arena = NodeArena::new();
    let inner_pass = arena.add_pass();
    let func = arena.add_function_def("f", vec![], vec![inner_pass], NodeIndex::NONE);
    let test = arena.add_constant(ConstantValue::Bool(true));
    let body_pass = arena.add_pass();
    let if_stmt = arena.add_if(test, vec![body_pass], vec![]);
    let module = arena.add_module(vec![func, if_stmt]);

    let mut state = BinderState::new();
    state.bind_module(&arena, module).unwrap();

    assert!(state.scope_stack.is_empty());
    assert!(state.is_bound());
}

#[test]
fn scope_stack_unwinds_on_fault() {
    let mut arena = NodeArena::new();
    let dangling = NodeIndex(9999);
    let test = arena.add_constant(ConstantValue::Bool(true));
    let if_stmt = arena.add_if(test, vec![dangling], vec![]);
    let func = arena.add_function_def("f", vec![], vec![if_stmt], NodeIndex::NONE);
    let module = arena.add_module(vec![func]);

    let mut state = BinderState::new();
    let err = state.bind_module(&arena, module).unwrap_err();

    assert_eq!(err, Error::InvalidNode { node: dangling });
    assert!(state.scope_stack.is_empty());
    assert!(!state.is_bound());
}

#[test]
fn same_name_declarations_merge_into_one_binding() {
    let mut arena = NodeArena::new();
    let one = int(&mut arena, 1);
    let (first, t1) = assign(&mut arena, "x", one);
    let two = int(&mut arena, 2);
    let (second, t2) = assign(&mut arena, "x", two);
    let module = arena.add_module(vec![first, second]);

    let mut state = BinderState::new();
    state.bind_module(&arena, module).unwrap();

    assert_eq!(state.bindings.len(), 1);
    let id = state.binding_of(t1).unwrap();
    assert_eq!(state.binding_of(t2), Some(id));
    let binding = state.binding(id).unwrap();
    assert_eq!(binding.declarations, vec![t1, t2]);
    assert_eq!(binding.assigned_from, first);
    assert!(binding.has_flag(binding_flags::ASSIGNED));
}

#[test]
fn if_scope_table_is_drained_into_branch_lists() {
    let mut arena = NodeArena::new();
    let test = arena.add_constant(ConstantValue::Bool(true));
    let one = int(&mut arena, 1);
    let (stmt, _) = assign(&mut arena, "x", one);
    let if_stmt = arena.add_if(test, vec![stmt], vec![]);
    let module = arena.add_module(vec![if_stmt]);

    let mut state = BinderState::new();
    state.bind_module(&arena, module).unwrap();

    let if_scope = state.scope_of(if_stmt).unwrap();
    assert!(state.scope(if_scope).unwrap().is_empty());
    let branches = state.branch_vars(if_stmt).unwrap();
    assert_eq!(branches.body_vars.len(), 1);
    assert!(branches.orelse_vars.is_empty());
}

#[test]
fn chain_walks_innermost_to_outermost() {
    let mut arena = NodeArena::new();
    let inner_pass = arena.add_pass();
    let inner = arena.add_function_def("inner", vec![], vec![inner_pass], NodeIndex::NONE);
    let outer = arena.add_function_def("outer", vec![], vec![inner], NodeIndex::NONE);
    let module = arena.add_module(vec![outer]);

    let mut state = BinderState::new();
    state.bind_module(&arena, module).unwrap();

    let nodes: Vec<NodeIndex> = state
        .chain(inner_pass)
        .filter_map(|id| state.scope(id).map(|s| s.node))
        .collect();
    assert_eq!(nodes, vec![inner, outer, module]);
}

#[test]
fn growth_pass_requires_binding_pass() {
    let mut arena = NodeArena::new();
    let module = arena.add_module(vec![]);

    let mut state = BinderState::new();
    let err = state.collect_list_growth(&arena, module).unwrap_err();
    assert_eq!(err, Error::PassOrdering);
}
