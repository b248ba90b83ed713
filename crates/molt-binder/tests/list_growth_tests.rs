//! List-growth detection: positive shapes, skips, and conservatism.

mod util;

use molt_binder::{BinderState, Error, analyze};
use molt_ast::{ExprContext, NodeArena, NodeIndex};
use util::*;

#[test]
fn records_growth_calls_in_program_order() {
    init_tracing();
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "a");
    let one = int(&mut arena, 1);
    let (s1, c1) = method_call(&mut arena, "a", "append", vec![one]);
    let other = load(&mut arena, "other");
    let (s2, c2) = method_call(&mut arena, "a", "extend", vec![other]);
    let zero = int(&mut arena, 0);
    let two = int(&mut arena, 2);
    let (s3, c3) = method_call(&mut arena, "a", "insert", vec![zero, two]);
    let module = arena.add_module(vec![decl, s1, s2, s3]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert_eq!(state.growth_calls(id), &[c1, c2, c3]);
}

#[test]
fn non_list_binding_is_not_recorded() {
    let mut arena = NodeArena::new();
    let five = int(&mut arena, 5);
    let (decl, target) = assign(&mut arena, "b", five);
    let one = int(&mut arena, 1);
    let (stmt, _) = method_call(&mut arena, "b", "append", vec![one]);
    let module = arena.add_module(vec![decl, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn deep_receivers_are_skipped() {
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "a");
    // `a.b.append(1)`: receiver is an attribute, not a simple name.
    let base = load(&mut arena, "a");
    let inner = arena.add_attribute(base, "b", ExprContext::Load);
    let func = arena.add_attribute(inner, "append", ExprContext::Load);
    let one = int(&mut arena, 1);
    let call = arena.add_call(func, vec![one], vec![]);
    let stmt = arena.add_expr_stmt(call);
    let module = arena.add_module(vec![decl, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn unresolved_receivers_are_tolerated() {
    let mut arena = NodeArena::new();
    let one = int(&mut arena, 1);
    let (stmt, _) = method_call(&mut arena, "q", "append", vec![one]);
    let module = arena.add_module(vec![stmt]);

    // No error: most attribute calls are unrelated to list mutation.
    let state = analyze(&arena, module).unwrap();
    assert_eq!(state.bindings.len(), 0);
}

#[test]
fn original_list_declaration_wins_over_reassignment() {
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "a");
    let five = int(&mut arena, 5);
    let (reassign, _) = assign(&mut arena, "a", five);
    let one = int(&mut arena, 1);
    let (stmt, call) = method_call(&mut arena, "a", "append", vec![one]);
    let module = arena.add_module(vec![decl, reassign, stmt]);

    let state = analyze(&arena, module).unwrap();

    // The binding's original declaration was a list literal; the later
    // reassignment is deliberately not re-examined.
    let id = state.binding_of(target).unwrap();
    assert_eq!(state.growth_calls(id), &[call]);
}

#[test]
fn non_list_original_is_never_upgraded() {
    let mut arena = NodeArena::new();
    let five = int(&mut arena, 5);
    let (decl, target) = assign(&mut arena, "b", five);
    let list = arena.add_list(vec![], ExprContext::Load);
    let t2 = store(&mut arena, "b");
    let reassign = arena.add_assign(vec![t2], list);
    let one = int(&mut arena, 1);
    let (stmt, _) = method_call(&mut arena, "b", "append", vec![one]);
    let module = arena.add_module(vec![decl, reassign, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn branch_local_lists_do_not_resolve_after_the_if() {
    let mut arena = NodeArena::new();
    let cond = load(&mut arena, "cond");
    let (decl, target) = list_assign(&mut arena, "a");
    let if_stmt = arena.add_if(cond, vec![decl], vec![]);
    let one = int(&mut arena, 1);
    let (stmt, _) = method_call(&mut arena, "a", "append", vec![one]);
    let module = arena.add_module(vec![if_stmt, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn with_body_lists_resolve_inside_the_body() {
    let mut arena = NodeArena::new();
    let ctx = load(&mut arena, "ctx");
    let item = arena.add_with_item(ctx, NodeIndex::NONE);
    let (decl, target) = list_assign(&mut arena, "a");
    let one = int(&mut arena, 1);
    let (stmt, call) = method_call(&mut arena, "a", "append", vec![one]);
    let with_stmt = arena.add_with(vec![item], vec![decl, stmt]);
    let module = arena.add_module(vec![with_stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert_eq!(state.growth_calls(id), &[call]);
}

#[test]
fn function_local_lists_resolve_in_their_scope() {
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "acc");
    let one = int(&mut arena, 1);
    let (stmt, call) = method_call(&mut arena, "acc", "append", vec![one]);
    let def = arena.add_function_def("f", vec![], vec![decl, stmt], NodeIndex::NONE);
    let module = arena.add_module(vec![def]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert_eq!(state.growth_calls(id), &[call]);
}

#[test]
fn unrelated_methods_are_ignored() {
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "a");
    let (stmt, _) = method_call(&mut arena, "a", "sort", vec![]);
    let module = arena.add_module(vec![decl, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn plain_function_calls_are_ignored() {
    let mut arena = NodeArena::new();
    let (decl, target) = list_assign(&mut arena, "append");
    let callee = load(&mut arena, "append");
    let one = int(&mut arena, 1);
    let call = arena.add_call(callee, vec![one], vec![]);
    let stmt = arena.add_expr_stmt(call);
    let module = arena.add_module(vec![decl, stmt]);

    let state = analyze(&arena, module).unwrap();

    let id = state.binding_of(target).unwrap();
    assert!(state.growth_calls(id).is_empty());
}

#[test]
fn growth_pass_before_binding_pass_is_rejected() {
    let mut arena = NodeArena::new();
    let module = arena.add_module(vec![]);

    let mut state = BinderState::new();
    assert_eq!(
        state.collect_list_growth(&arena, module),
        Err(Error::PassOrdering)
    );
}
