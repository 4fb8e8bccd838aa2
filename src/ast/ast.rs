use crate::Location;

use super::{
    expressions::{ExpressionNode, FunctionInvocationNode, LiteralNode, VariableReferenceNode},
    statements::{
        AssignNode, CompoundStatementNode, ConditionNode, DeclarationNode, ForNode, FunctionNode,
        PrintNode, ProgramNode, ReadNode, ReturnNode, WhileNode,
    },
    types::TypeNode,
};

/// Handle to a node stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Raw identifier, only ever held by declarations and loops.
#[derive(Debug, Clone)]
pub struct IdNode {
    pub name: String,
}

/// Raw integer, used for array dimensions and loop bounds.
#[derive(Debug, Clone)]
pub struct IntValueNode {
    pub value: i32,
}

/// Debug-only node that prints its prefix and postfix around its location.
#[derive(Debug, Clone)]
pub struct EpsilonNode {
    pub prefix: String,
    pub postfix: String,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Program(ProgramNode),
    Declaration(DeclarationNode),
    Type(TypeNode),
    Literal(LiteralNode),
    Expression(ExpressionNode),
    CompoundStatement(CompoundStatementNode),
    Print(PrintNode),
    VariableReference(VariableReferenceNode),
    Assign(AssignNode),
    Read(ReadNode),
    Condition(ConditionNode),
    While(WhileNode),
    Return(ReturnNode),
    For(ForNode),
    FunctionInvocation(FunctionInvocationNode),
    Function(FunctionNode),
    Id(IdNode),
    IntValue(IntValueNode),
    Epsilon(EpsilonNode),
}

#[derive(Debug, Clone)]
pub struct AstNode {
    pub location: Location,
    pub kind: NodeKind,
    /// Next node in the sibling list this node heads or belongs to.
    pub next: Option<NodeId>,
}

/// Arena owning every node of a program.
///
/// Nodes refer to each other through [`NodeId`]s, and ordered lists are
/// threaded through each node's `next` link.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<AstNode>,
}

impl Ast {
    pub fn new() -> Self {
        Ast { nodes: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, location: Location, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(AstNode {
            location,
            kind,
            next: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn location(&self, id: NodeId) -> Location {
        self.node(id).location
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    /// Appends `node` to the end of the list headed by `list` and returns the head.
    pub fn append_sibling(&mut self, list: NodeId, node: NodeId) -> NodeId {
        let mut last = list;
        while let Some(next) = self.next(last) {
            last = next;
        }
        self.node_mut(last).next = Some(node);
        list
    }

    /// Appends to an optional list, starting a new one when it is empty.
    pub fn append_to(&mut self, list: Option<NodeId>, node: NodeId) -> NodeId {
        match list {
            Some(head) => self.append_sibling(head, node),
            None => node,
        }
    }

    /// Shallow copy of a node: the payload is cloned so children are shared,
    /// but the copy is detached from any sibling list.
    pub fn duplicate(&mut self, id: NodeId) -> NodeId {
        let node = self.node(id);
        let (location, kind) = (node.location, node.kind.clone());
        self.alloc(location, kind)
    }

    pub fn list_length(&self, head: Option<NodeId>) -> usize {
        self.siblings(head).count()
    }

    pub fn siblings(&self, head: Option<NodeId>) -> Siblings<'_> {
        Siblings {
            ast: self,
            current: head,
        }
    }

    pub fn new_id(&mut self, location: Location, name: &str) -> NodeId {
        self.alloc(
            location,
            NodeKind::Id(IdNode {
                name: name.to_string(),
            }),
        )
    }

    pub fn new_int_value(&mut self, location: Location, value: i32) -> NodeId {
        self.alloc(location, NodeKind::IntValue(IntValueNode { value }))
    }

    pub fn new_epsilon(&mut self, location: Location, prefix: &str, postfix: &str) -> NodeId {
        self.alloc(
            location,
            NodeKind::Epsilon(EpsilonNode {
                prefix: prefix.to_string(),
                postfix: postfix.to_string(),
            }),
        )
    }

    // Typed views. Each returns `None` when the node is of another kind.

    pub fn id_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Id(node) => Some(&node.name),
            _ => None,
        }
    }

    pub fn int_value(&self, id: NodeId) -> Option<i32> {
        match self.kind(id) {
            NodeKind::IntValue(node) => Some(node.value),
            _ => None,
        }
    }

    pub fn type_node(&self, id: NodeId) -> Option<&TypeNode> {
        match self.kind(id) {
            NodeKind::Type(node) => Some(node),
            _ => None,
        }
    }

    pub fn literal(&self, id: NodeId) -> Option<&LiteralNode> {
        match self.kind(id) {
            NodeKind::Literal(node) => Some(node),
            _ => None,
        }
    }

    pub fn expression(&self, id: NodeId) -> Option<&ExpressionNode> {
        match self.kind(id) {
            NodeKind::Expression(node) => Some(node),
            _ => None,
        }
    }

    pub fn expression_mut(&mut self, id: NodeId) -> Option<&mut ExpressionNode> {
        match &mut self.node_mut(id).kind {
            NodeKind::Expression(node) => Some(node),
            _ => None,
        }
    }

    pub fn variable_reference(&self, id: NodeId) -> Option<&VariableReferenceNode> {
        match self.kind(id) {
            NodeKind::VariableReference(node) => Some(node),
            _ => None,
        }
    }

    pub fn variable_reference_mut(&mut self, id: NodeId) -> Option<&mut VariableReferenceNode> {
        match &mut self.node_mut(id).kind {
            NodeKind::VariableReference(node) => Some(node),
            _ => None,
        }
    }

    pub fn function_invocation(&self, id: NodeId) -> Option<&FunctionInvocationNode> {
        match self.kind(id) {
            NodeKind::FunctionInvocation(node) => Some(node),
            _ => None,
        }
    }

    pub fn function_invocation_mut(&mut self, id: NodeId) -> Option<&mut FunctionInvocationNode> {
        match &mut self.node_mut(id).kind {
            NodeKind::FunctionInvocation(node) => Some(node),
            _ => None,
        }
    }

    pub fn function(&self, id: NodeId) -> Option<&FunctionNode> {
        match self.kind(id) {
            NodeKind::Function(node) => Some(node),
            _ => None,
        }
    }

    pub fn declaration(&self, id: NodeId) -> Option<&DeclarationNode> {
        match self.kind(id) {
            NodeKind::Declaration(node) => Some(node),
            _ => None,
        }
    }

    pub fn program(&self, id: NodeId) -> Option<&ProgramNode> {
        match self.kind(id) {
            NodeKind::Program(node) => Some(node),
            _ => None,
        }
    }
}

/// Iterator over a sibling list.
pub struct Siblings<'a> {
    ast: &'a Ast,
    current: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.ast.next(id);
        Some(id)
    }
}
