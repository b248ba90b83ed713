//! Node arena for syntax tree storage.

use crate::node::*;
use molt_common::Span;
use serde::Serialize;

/// Arena-based storage for syntax tree nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index.
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Get a node by index.
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index.
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Get a node's kind by index.
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind())
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set a node's source span. The parser calls this once positions are
    /// known; programmatically built trees may leave spans empty.
    pub fn set_span(&mut self, index: NodeIndex, span: Span) {
        if let Some(node) = self.get_mut(index) {
            node.base_mut().span = span;
        }
    }

    // Typed accessors

    pub fn get_module(&self, index: NodeIndex) -> Option<&ModuleData> {
        match self.get(index)? {
            Node::Module(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionDefData> {
        match self.get(index)? {
            Node::FunctionDef(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_class(&self, index: NodeIndex) -> Option<&ClassDefData> {
        match self.get(index)? {
            Node::ClassDef(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_parameter(&self, index: NodeIndex) -> Option<&ParameterData> {
        match self.get(index)? {
            Node::Parameter(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_assign(&self, index: NodeIndex) -> Option<&AssignData> {
        match self.get(index)? {
            Node::Assign(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_if(&self, index: NodeIndex) -> Option<&IfData> {
        match self.get(index)? {
            Node::If(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallData> {
        match self.get(index)? {
            Node::Call(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_attribute(&self, index: NodeIndex) -> Option<&AttributeData> {
        match self.get(index)? {
            Node::Attribute(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_name(&self, index: NodeIndex) -> Option<&NameData> {
        match self.get(index)? {
            Node::Name(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_alias(&self, index: NodeIndex) -> Option<&AliasData> {
        match self.get(index)? {
            Node::Alias(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_list(&self, index: NodeIndex) -> Option<&ListData> {
        match self.get(index)? {
            Node::List(data) => Some(data),
            _ => None,
        }
    }

    /// Identifier text of a `Name` node, if `index` is one.
    pub fn name_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_name(index).map(|n| n.id.as_str())
    }

    /// Direct children of a node, in source order.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                out.push(idx);
            }
        };
        match node {
            Node::Module(n) => n.body.iter().copied().for_each(&mut push),
            Node::FunctionDef(n) => {
                n.params.iter().copied().for_each(&mut push);
                push(n.returns);
                n.body.iter().copied().for_each(&mut push);
            }
            Node::Parameter(n) => {
                push(n.annotation);
                push(n.default);
            }
            Node::ClassDef(n) => {
                n.bases.iter().copied().for_each(&mut push);
                n.body.iter().copied().for_each(&mut push);
            }
            Node::Return(n) => push(n.value),
            Node::Pass(_) => {}
            Node::Assign(n) => {
                n.targets.iter().copied().for_each(&mut push);
                push(n.value);
            }
            Node::AnnAssign(n) => {
                push(n.target);
                push(n.annotation);
                push(n.value);
            }
            Node::AugAssign(n) => {
                push(n.target);
                push(n.value);
            }
            Node::For(n) => {
                push(n.target);
                push(n.iter);
                n.body.iter().copied().for_each(&mut push);
                n.orelse.iter().copied().for_each(&mut push);
            }
            Node::While(n) => {
                push(n.test);
                n.body.iter().copied().for_each(&mut push);
                n.orelse.iter().copied().for_each(&mut push);
            }
            Node::If(n) => {
                push(n.test);
                n.body.iter().copied().for_each(&mut push);
                n.orelse.iter().copied().for_each(&mut push);
            }
            Node::With(n) => {
                n.items.iter().copied().for_each(&mut push);
                n.body.iter().copied().for_each(&mut push);
            }
            Node::WithItem(n) => {
                push(n.context_expr);
                push(n.optional_vars);
            }
            Node::Import(n) => n.names.iter().copied().for_each(&mut push),
            Node::ImportFrom(n) => n.names.iter().copied().for_each(&mut push),
            Node::Alias(_) => {}
            Node::ExprStmt(n) => push(n.value),
            Node::Name(_) => {}
            Node::Attribute(n) => push(n.value),
            Node::Subscript(n) => {
                push(n.value);
                push(n.index);
            }
            Node::Call(n) => {
                push(n.func);
                n.args.iter().copied().for_each(&mut push);
                n.keywords.iter().copied().for_each(&mut push);
            }
            Node::Keyword(n) => push(n.value),
            Node::List(n) => n.elts.iter().copied().for_each(&mut push),
            Node::Tuple(n) => n.elts.iter().copied().for_each(&mut push),
            Node::Dict(n) => {
                for (&k, &v) in n.keys.iter().zip(n.values.iter()) {
                    push(k);
                    push(v);
                }
            }
            Node::Constant(_) => {}
            Node::Binary(n) => {
                push(n.left);
                push(n.right);
            }
            Node::Unary(n) => push(n.operand),
            Node::Compare(n) => {
                push(n.left);
                n.comparators.iter().copied().for_each(&mut push);
            }
        }
        out
    }

    // Builders. The parser drives these; tests build small trees directly.

    pub fn add_module(&mut self, body: NodeList) -> NodeIndex {
        self.add(Node::Module(ModuleData {
            base: NodeBase::default(),
            body,
        }))
    }

    pub fn add_function_def(
        &mut self,
        name: impl Into<String>,
        params: NodeList,
        body: NodeList,
        returns: NodeIndex,
    ) -> NodeIndex {
        self.add(Node::FunctionDef(FunctionDefData {
            base: NodeBase::default(),
            name: name.into(),
            params,
            body,
            returns,
        }))
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        annotation: NodeIndex,
        default: NodeIndex,
    ) -> NodeIndex {
        self.add(Node::Parameter(ParameterData {
            base: NodeBase::default(),
            name: name.into(),
            annotation,
            default,
        }))
    }

    pub fn add_class_def(
        &mut self,
        name: impl Into<String>,
        bases: NodeList,
        body: NodeList,
    ) -> NodeIndex {
        self.add(Node::ClassDef(ClassDefData {
            base: NodeBase::default(),
            name: name.into(),
            bases,
            body,
        }))
    }

    pub fn add_return(&mut self, value: NodeIndex) -> NodeIndex {
        self.add(Node::Return(ReturnData {
            base: NodeBase::default(),
            value,
        }))
    }

    pub fn add_pass(&mut self) -> NodeIndex {
        self.add(Node::Pass(PassData {
            base: NodeBase::default(),
        }))
    }

    pub fn add_assign(&mut self, targets: NodeList, value: NodeIndex) -> NodeIndex {
        self.add(Node::Assign(AssignData {
            base: NodeBase::default(),
            targets,
            value,
        }))
    }

    pub fn add_ann_assign(
        &mut self,
        target: NodeIndex,
        annotation: NodeIndex,
        value: NodeIndex,
    ) -> NodeIndex {
        self.add(Node::AnnAssign(AnnAssignData {
            base: NodeBase::default(),
            target,
            annotation,
            value,
        }))
    }

    pub fn add_aug_assign(&mut self, target: NodeIndex, op: BinaryOp, value: NodeIndex) -> NodeIndex {
        self.add(Node::AugAssign(AugAssignData {
            base: NodeBase::default(),
            target,
            op,
            value,
        }))
    }

    pub fn add_for(
        &mut self,
        target: NodeIndex,
        iter: NodeIndex,
        body: NodeList,
        orelse: NodeList,
    ) -> NodeIndex {
        self.add(Node::For(ForData {
            base: NodeBase::default(),
            target,
            iter,
            body,
            orelse,
        }))
    }

    pub fn add_while(&mut self, test: NodeIndex, body: NodeList, orelse: NodeList) -> NodeIndex {
        self.add(Node::While(WhileData {
            base: NodeBase::default(),
            test,
            body,
            orelse,
        }))
    }

    pub fn add_if(&mut self, test: NodeIndex, body: NodeList, orelse: NodeList) -> NodeIndex {
        self.add(Node::If(IfData {
            base: NodeBase::default(),
            test,
            body,
            orelse,
        }))
    }

    pub fn add_with(&mut self, items: NodeList, body: NodeList) -> NodeIndex {
        self.add(Node::With(WithData {
            base: NodeBase::default(),
            items,
            body,
        }))
    }

    pub fn add_with_item(&mut self, context_expr: NodeIndex, optional_vars: NodeIndex) -> NodeIndex {
        self.add(Node::WithItem(WithItemData {
            base: NodeBase::default(),
            context_expr,
            optional_vars,
        }))
    }

    pub fn add_import(&mut self, names: NodeList) -> NodeIndex {
        self.add(Node::Import(ImportData {
            base: NodeBase::default(),
            names,
        }))
    }

    pub fn add_import_from(
        &mut self,
        module: impl Into<String>,
        names: NodeList,
        level: u32,
    ) -> NodeIndex {
        self.add(Node::ImportFrom(ImportFromData {
            base: NodeBase::default(),
            module: module.into(),
            names,
            level,
        }))
    }

    pub fn add_alias(&mut self, name: impl Into<String>, asname: Option<String>) -> NodeIndex {
        self.add(Node::Alias(AliasData {
            base: NodeBase::default(),
            name: name.into(),
            asname,
        }))
    }

    pub fn add_expr_stmt(&mut self, value: NodeIndex) -> NodeIndex {
        self.add(Node::ExprStmt(ExprStmtData {
            base: NodeBase::default(),
            value,
        }))
    }

    pub fn add_name(&mut self, id: impl Into<String>, ctx: ExprContext) -> NodeIndex {
        self.add(Node::Name(NameData {
            base: NodeBase::default(),
            id: id.into(),
            ctx,
        }))
    }

    pub fn add_attribute(
        &mut self,
        value: NodeIndex,
        attr: impl Into<String>,
        ctx: ExprContext,
    ) -> NodeIndex {
        self.add(Node::Attribute(AttributeData {
            base: NodeBase::default(),
            value,
            attr: attr.into(),
            ctx,
        }))
    }

    pub fn add_subscript(&mut self, value: NodeIndex, index: NodeIndex, ctx: ExprContext) -> NodeIndex {
        self.add(Node::Subscript(SubscriptData {
            base: NodeBase::default(),
            value,
            index,
            ctx,
        }))
    }

    pub fn add_call(&mut self, func: NodeIndex, args: NodeList, keywords: NodeList) -> NodeIndex {
        self.add(Node::Call(CallData {
            base: NodeBase::default(),
            func,
            args,
            keywords,
        }))
    }

    pub fn add_keyword(&mut self, arg: Option<String>, value: NodeIndex) -> NodeIndex {
        self.add(Node::Keyword(KeywordData {
            base: NodeBase::default(),
            arg,
            value,
        }))
    }

    pub fn add_list(&mut self, elts: NodeList, ctx: ExprContext) -> NodeIndex {
        self.add(Node::List(ListData {
            base: NodeBase::default(),
            elts,
            ctx,
        }))
    }

    pub fn add_tuple(&mut self, elts: NodeList, ctx: ExprContext) -> NodeIndex {
        self.add(Node::Tuple(TupleData {
            base: NodeBase::default(),
            elts,
            ctx,
        }))
    }

    pub fn add_dict(&mut self, keys: NodeList, values: NodeList) -> NodeIndex {
        self.add(Node::Dict(DictData {
            base: NodeBase::default(),
            keys,
            values,
        }))
    }

    pub fn add_constant(&mut self, value: ConstantValue) -> NodeIndex {
        self.add(Node::Constant(ConstantData {
            base: NodeBase::default(),
            value,
        }))
    }

    pub fn add_binary(&mut self, left: NodeIndex, op: BinaryOp, right: NodeIndex) -> NodeIndex {
        self.add(Node::Binary(BinaryData {
            base: NodeBase::default(),
            left,
            op,
            right,
        }))
    }

    pub fn add_unary(&mut self, op: UnaryOp, operand: NodeIndex) -> NodeIndex {
        self.add(Node::Unary(UnaryData {
            base: NodeBase::default(),
            op,
            operand,
        }))
    }

    pub fn add_compare(
        &mut self,
        left: NodeIndex,
        ops: Vec<CompareOp>,
        comparators: NodeList,
    ) -> NodeIndex {
        self.add(Node::Compare(CompareData {
            base: NodeBase::default(),
            left,
            ops,
            comparators,
        }))
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
