//! Node kinds and per-kind data for the syntax tree.

use molt_common::Span;
use serde::Serialize;

/// Index of a node inside its [`crate::NodeArena`].
///
/// `NodeIndex` is only meaningful together with the arena that produced it.
/// Optional child slots hold [`NodeIndex::NONE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

/// An ordered list of child nodes.
pub type NodeList = Vec<NodeIndex>;

/// Discriminant for node kinds, stable across the analysis contract.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Module,
    FunctionDef,
    Parameter,
    ClassDef,
    Return,
    Pass,
    Assign,
    AnnAssign,
    AugAssign,
    For,
    While,
    If,
    With,
    WithItem,
    Import,
    ImportFrom,
    Alias,
    ExprStmt,
    Name,
    Attribute,
    Subscript,
    Call,
    Keyword,
    List,
    Tuple,
    Dict,
    Constant,
    Binary,
    Unary,
    Compare,
}

/// Common fields present in all nodes.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeBase {
    pub span: Span,
}

impl NodeBase {
    pub fn new(span: Span) -> NodeBase {
        NodeBase { span }
    }
}

/// Expression context: how a name-like expression is used at its site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    UAdd,
    USub,
    Invert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

/// Literal constant values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ConstantValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct ModuleData {
    pub base: NodeBase,
    pub body: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct FunctionDefData {
    pub base: NodeBase,
    pub name: String,
    /// Parameter nodes, in declaration order.
    pub params: NodeList,
    pub body: NodeList,
    /// Return annotation expression, or `NONE`.
    pub returns: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub base: NodeBase,
    pub name: String,
    /// Annotation expression, or `NONE`.
    pub annotation: NodeIndex,
    /// Default value expression, or `NONE`.
    pub default: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassDefData {
    pub base: NodeBase,
    pub name: String,
    pub bases: NodeList,
    pub body: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub base: NodeBase,
    /// Returned expression, or `NONE` for a bare `return`.
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct PassData {
    pub base: NodeBase,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssignData {
    pub base: NodeBase,
    pub targets: NodeList,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnnAssignData {
    pub base: NodeBase,
    pub target: NodeIndex,
    pub annotation: NodeIndex,
    /// Assigned expression, or `NONE` for a bare annotation.
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct AugAssignData {
    pub base: NodeBase,
    pub target: NodeIndex,
    pub op: BinaryOp,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForData {
    pub base: NodeBase,
    pub target: NodeIndex,
    pub iter: NodeIndex,
    pub body: NodeList,
    pub orelse: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct WhileData {
    pub base: NodeBase,
    pub test: NodeIndex,
    pub body: NodeList,
    pub orelse: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfData {
    pub base: NodeBase,
    pub test: NodeIndex,
    pub body: NodeList,
    pub orelse: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct WithData {
    pub base: NodeBase,
    pub items: NodeList,
    pub body: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct WithItemData {
    pub base: NodeBase,
    pub context_expr: NodeIndex,
    /// `as` target expression, or `NONE`.
    pub optional_vars: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportData {
    pub base: NodeBase,
    /// Alias nodes, one per imported module path.
    pub names: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImportFromData {
    pub base: NodeBase,
    pub module: String,
    pub names: NodeList,
    pub level: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct AliasData {
    pub base: NodeBase,
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExprStmtData {
    pub base: NodeBase,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct NameData {
    pub base: NodeBase,
    pub id: String,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct AttributeData {
    pub base: NodeBase,
    pub value: NodeIndex,
    pub attr: String,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct SubscriptData {
    pub base: NodeBase,
    pub value: NodeIndex,
    pub index: NodeIndex,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallData {
    pub base: NodeBase,
    pub func: NodeIndex,
    pub args: NodeList,
    /// Keyword-argument nodes, after positional args.
    pub keywords: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct KeywordData {
    pub base: NodeBase,
    /// `None` for a `**kwargs` splat.
    pub arg: Option<String>,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListData {
    pub base: NodeBase,
    pub elts: NodeList,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct TupleData {
    pub base: NodeBase,
    pub elts: NodeList,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, Serialize)]
pub struct DictData {
    pub base: NodeBase,
    pub keys: NodeList,
    pub values: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConstantData {
    pub base: NodeBase,
    pub value: ConstantValue,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryData {
    pub base: NodeBase,
    pub left: NodeIndex,
    pub op: BinaryOp,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryData {
    pub base: NodeBase,
    pub op: UnaryOp,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompareData {
    pub base: NodeBase,
    pub left: NodeIndex,
    pub ops: Vec<CompareOp>,
    pub comparators: NodeList,
}

/// A syntax tree node.
#[derive(Clone, Debug, Serialize)]
pub enum Node {
    Module(ModuleData),
    FunctionDef(FunctionDefData),
    Parameter(ParameterData),
    ClassDef(ClassDefData),
    Return(ReturnData),
    Pass(PassData),
    Assign(AssignData),
    AnnAssign(AnnAssignData),
    AugAssign(AugAssignData),
    For(ForData),
    While(WhileData),
    If(IfData),
    With(WithData),
    WithItem(WithItemData),
    Import(ImportData),
    ImportFrom(ImportFromData),
    Alias(AliasData),
    ExprStmt(ExprStmtData),
    Name(NameData),
    Attribute(AttributeData),
    Subscript(SubscriptData),
    Call(CallData),
    Keyword(KeywordData),
    List(ListData),
    Tuple(TupleData),
    Dict(DictData),
    Constant(ConstantData),
    Binary(BinaryData),
    Unary(UnaryData),
    Compare(CompareData),
}

impl Node {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Node::Module(_) => SyntaxKind::Module,
            Node::FunctionDef(_) => SyntaxKind::FunctionDef,
            Node::Parameter(_) => SyntaxKind::Parameter,
            Node::ClassDef(_) => SyntaxKind::ClassDef,
            Node::Return(_) => SyntaxKind::Return,
            Node::Pass(_) => SyntaxKind::Pass,
            Node::Assign(_) => SyntaxKind::Assign,
            Node::AnnAssign(_) => SyntaxKind::AnnAssign,
            Node::AugAssign(_) => SyntaxKind::AugAssign,
            Node::For(_) => SyntaxKind::For,
            Node::While(_) => SyntaxKind::While,
            Node::If(_) => SyntaxKind::If,
            Node::With(_) => SyntaxKind::With,
            Node::WithItem(_) => SyntaxKind::WithItem,
            Node::Import(_) => SyntaxKind::Import,
            Node::ImportFrom(_) => SyntaxKind::ImportFrom,
            Node::Alias(_) => SyntaxKind::Alias,
            Node::ExprStmt(_) => SyntaxKind::ExprStmt,
            Node::Name(_) => SyntaxKind::Name,
            Node::Attribute(_) => SyntaxKind::Attribute,
            Node::Subscript(_) => SyntaxKind::Subscript,
            Node::Call(_) => SyntaxKind::Call,
            Node::Keyword(_) => SyntaxKind::Keyword,
            Node::List(_) => SyntaxKind::List,
            Node::Tuple(_) => SyntaxKind::Tuple,
            Node::Dict(_) => SyntaxKind::Dict,
            Node::Constant(_) => SyntaxKind::Constant,
            Node::Binary(_) => SyntaxKind::Binary,
            Node::Unary(_) => SyntaxKind::Unary,
            Node::Compare(_) => SyntaxKind::Compare,
        }
    }

    pub fn base(&self) -> &NodeBase {
        match self {
            Node::Module(n) => &n.base,
            Node::FunctionDef(n) => &n.base,
            Node::Parameter(n) => &n.base,
            Node::ClassDef(n) => &n.base,
            Node::Return(n) => &n.base,
            Node::Pass(n) => &n.base,
            Node::Assign(n) => &n.base,
            Node::AnnAssign(n) => &n.base,
            Node::AugAssign(n) => &n.base,
            Node::For(n) => &n.base,
            Node::While(n) => &n.base,
            Node::If(n) => &n.base,
            Node::With(n) => &n.base,
            Node::WithItem(n) => &n.base,
            Node::Import(n) => &n.base,
            Node::ImportFrom(n) => &n.base,
            Node::Alias(n) => &n.base,
            Node::ExprStmt(n) => &n.base,
            Node::Name(n) => &n.base,
            Node::Attribute(n) => &n.base,
            Node::Subscript(n) => &n.base,
            Node::Call(n) => &n.base,
            Node::Keyword(n) => &n.base,
            Node::List(n) => &n.base,
            Node::Tuple(n) => &n.base,
            Node::Dict(n) => &n.base,
            Node::Constant(n) => &n.base,
            Node::Binary(n) => &n.base,
            Node::Unary(n) => &n.base,
            Node::Compare(n) => &n.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Node::Module(n) => &mut n.base,
            Node::FunctionDef(n) => &mut n.base,
            Node::Parameter(n) => &mut n.base,
            Node::ClassDef(n) => &mut n.base,
            Node::Return(n) => &mut n.base,
            Node::Pass(n) => &mut n.base,
            Node::Assign(n) => &mut n.base,
            Node::AnnAssign(n) => &mut n.base,
            Node::AugAssign(n) => &mut n.base,
            Node::For(n) => &mut n.base,
            Node::While(n) => &mut n.base,
            Node::If(n) => &mut n.base,
            Node::With(n) => &mut n.base,
            Node::WithItem(n) => &mut n.base,
            Node::Import(n) => &mut n.base,
            Node::ImportFrom(n) => &mut n.base,
            Node::Alias(n) => &mut n.base,
            Node::ExprStmt(n) => &mut n.base,
            Node::Name(n) => &mut n.base,
            Node::Attribute(n) => &mut n.base,
            Node::Subscript(n) => &mut n.base,
            Node::Call(n) => &mut n.base,
            Node::Keyword(n) => &mut n.base,
            Node::List(n) => &mut n.base,
            Node::Tuple(n) => &mut n.base,
            Node::Dict(n) => &mut n.base,
            Node::Constant(n) => &mut n.base,
            Node::Binary(n) => &mut n.base,
            Node::Unary(n) => &mut n.base,
            Node::Compare(n) => &mut n.base,
        }
    }

    pub fn span(&self) -> Span {
        self.base().span
    }
}
