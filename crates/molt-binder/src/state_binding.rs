//! Variable binding pass: one pre-order traversal that opens scopes,
//! registers declarations, and snapshots every node's scope chain.

use crate::Error;
use crate::bindings::binding_flags;
use crate::scopes::ContainerKind;
use crate::state::{BinderState, BranchVars};
use molt_ast::{
    AnnAssignData, AssignData, AugAssignData, ClassDefData, ForData, FunctionDefData, IfData, Node,
    NodeArena, NodeIndex, NodeList,
};
use tracing::{Level, span};

impl BinderState {
    /// Run the variable binding pass over a module root.
    ///
    /// On return, `Ok` or `Err`, the scope stack is back at its pre-call
    /// depth; a fault mid-traversal cannot leak open scopes.
    pub fn bind_module(&mut self, arena: &NodeArena, module: NodeIndex) -> Result<(), Error> {
        let _span = span!(Level::DEBUG, "bind_module", root = module.0).entered();
        debug_assert!(self.scope_stack.is_empty());
        let result = self.bind_node(arena, module);
        debug_assert!(self.scope_stack.is_empty());
        if result.is_ok() {
            self.bound = true;
        }
        result
    }

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) -> Result<(), Error> {
        let Some(node) = arena.get(idx) else {
            return Err(Error::InvalidNode { node: idx });
        };
        let container = ContainerKind::of(node);
        if let Some(kind) = container {
            self.enter_scope(kind, idx);
        }
        // Snapshot after any push: a container node's own chain includes
        // itself, everything else records its innermost enclosing scope.
        self.record_scope(idx);
        let result = self.bind_in_scope(arena, node, idx);
        if container.is_some() {
            self.exit_scope();
        }
        result
    }

    fn bind_in_scope(&mut self, arena: &NodeArena, node: &Node, idx: NodeIndex) -> Result<(), Error> {
        match node {
            Node::Module(module) => self.bind_body(arena, &module.body),
            Node::FunctionDef(func) => self.bind_function_def(arena, func, idx),
            Node::ClassDef(class) => self.bind_class_def(arena, class, idx),
            Node::Assign(assign) => self.bind_assign(arena, assign, idx),
            Node::AnnAssign(assign) => self.bind_ann_assign(arena, assign, idx),
            Node::AugAssign(assign) => self.bind_aug_assign(arena, assign, idx),
            Node::For(for_stmt) => self.bind_for(arena, for_stmt, idx),
            Node::If(if_stmt) => self.bind_if(arena, if_stmt, idx),
            Node::Import(import) => self.bind_import(arena, &import.names, idx),
            Node::ImportFrom(import) => self.bind_import(arena, &import.names, idx),
            // Everything else declares nothing; descend so every node still
            // gets its scope snapshot.
            _ => self.bind_body(arena, &arena.get_children(idx)),
        }
    }

    fn bind_body(&mut self, arena: &NodeArena, body: &NodeList) -> Result<(), Error> {
        for &stmt in body {
            self.bind_node(arena, stmt)?;
        }
        Ok(())
    }

    fn bind_opt(&mut self, arena: &NodeArena, idx: NodeIndex) -> Result<(), Error> {
        if idx.is_some() {
            self.bind_node(arena, idx)?;
        }
        Ok(())
    }

    /// A function registers its name in the *enclosing* scope before its
    /// body is traversed in a fresh scope, so sibling code after the
    /// definition (and the body itself, recursively) can resolve it once
    /// the body scope closes.
    fn bind_function_def(
        &mut self,
        arena: &NodeArena,
        func: &FunctionDefData,
        idx: NodeIndex,
    ) -> Result<(), Error> {
        self.declare_in_enclosing(&func.name, binding_flags::FUNCTION, idx);

        for &param in &func.params {
            let Some(data) = arena.get_parameter(param) else {
                return Err(Error::InvalidNode { node: param });
            };
            self.set_assigned_from(param, idx);
            self.declare(&data.name, binding_flags::PARAMETER, param, idx);
            self.bind_node(arena, param)?;
        }
        self.bind_opt(arena, func.returns)?;
        self.bind_body(arena, &func.body)
    }

    fn bind_class_def(
        &mut self,
        arena: &NodeArena,
        class: &ClassDefData,
        idx: NodeIndex,
    ) -> Result<(), Error> {
        self.declare_in_enclosing(&class.name, binding_flags::CLASS, idx);
        self.bind_body(arena, &class.bases)?;
        self.bind_body(arena, &class.body)
    }

    /// Register a definition's name one scope up from its own body scope.
    fn declare_in_enclosing(&mut self, name: &str, flags: u32, idx: NodeIndex) {
        let enclosing = self
            .current_scope_id()
            .and_then(|id| self.scope(id))
            .map(|scope| scope.parent);
        if let Some(parent) = enclosing
            && !parent.is_none()
        {
            self.declare_in(parent, name, flags, idx, idx);
        }
    }

    fn bind_assign(&mut self, arena: &NodeArena, assign: &AssignData, idx: NodeIndex) -> Result<(), Error> {
        for &target in &assign.targets {
            self.bind_target(arena, target, binding_flags::ASSIGNED, idx)?;
        }
        self.bind_node(arena, assign.value)
    }

    fn bind_ann_assign(
        &mut self,
        arena: &NodeArena,
        assign: &AnnAssignData,
        idx: NodeIndex,
    ) -> Result<(), Error> {
        self.bind_target(arena, assign.target, binding_flags::ANNOTATED, idx)?;
        self.bind_node(arena, assign.annotation)?;
        self.bind_opt(arena, assign.value)
    }

    fn bind_aug_assign(
        &mut self,
        arena: &NodeArena,
        assign: &AugAssignData,
        idx: NodeIndex,
    ) -> Result<(), Error> {
        self.bind_target(arena, assign.target, binding_flags::AUGMENTED, idx)?;
        self.bind_node(arena, assign.value)
    }

    /// A simple-name target declares in the innermost scope; compound
    /// targets (tuples, subscripts, attributes) introduce no binding and
    /// are only descended into.
    fn bind_target(
        &mut self,
        arena: &NodeArena,
        target: NodeIndex,
        flags: u32,
        statement: NodeIndex,
    ) -> Result<(), Error> {
        if let Some(name) = arena.get_name(target) {
            self.set_assigned_from(target, statement);
            self.declare(&name.id, flags, target, statement);
        }
        self.bind_node(arena, target)
    }

    /// The loop target binds in the enclosing scope; a `for` opens no
    /// scope of its own.
    fn bind_for(&mut self, arena: &NodeArena, for_stmt: &ForData, idx: NodeIndex) -> Result<(), Error> {
        self.set_assigned_from(for_stmt.target, idx);
        if let Some(name) = arena.get_name(for_stmt.target) {
            self.declare(&name.id, binding_flags::LOOP_TARGET, for_stmt.target, idx);
        }
        self.bind_node(arena, for_stmt.target)?;
        self.bind_node(arena, for_stmt.iter)?;
        self.bind_body(arena, &for_stmt.body)?;
        self.bind_body(arena, &for_stmt.orelse)
    }

    /// Body and else-branch bindings accumulate in the `if`'s own scope and
    /// are drained into private per-branch lists, which are never merged
    /// into the enclosing scope: a name bound in only one branch is not
    /// guaranteed bound after the statement.
    fn bind_if(&mut self, arena: &NodeArena, if_stmt: &IfData, idx: NodeIndex) -> Result<(), Error> {
        self.bind_node(arena, if_stmt.test)?;

        self.bind_body(arena, &if_stmt.body)?;
        let body_vars = self.drain_current_scope_vars();

        self.bind_body(arena, &if_stmt.orelse)?;
        let orelse_vars = self.drain_current_scope_vars();

        self.set_branch_vars(
            idx,
            BranchVars {
                body_vars,
                orelse_vars,
            },
        );
        Ok(())
    }

    /// Imported names resolve by identity, not lexical lookup: record the
    /// statement per alias, keep aliases out of the binding table.
    fn bind_import(&mut self, arena: &NodeArena, names: &NodeList, idx: NodeIndex) -> Result<(), Error> {
        for &alias in names {
            if arena.get_alias(alias).is_none() {
                return Err(Error::InvalidNode { node: alias });
            }
            self.record_scope(alias);
            self.record_import(alias, idx);
        }
        Ok(())
    }
}
