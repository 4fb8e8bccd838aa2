//! Lowering entry points.
//!
//! Lowering walks the same tree the analyzer checked. No target backend is
//! wired in yet, so every node lowers to nothing and raises no errors.

use log::debug;

use crate::ast::ast::{Ast, NodeId, NodeKind};

/// Lowers a single node, returning the number of errors raised.
pub fn lower(ast: &Ast, node: NodeId) -> usize {
    match ast.kind(node) {
        NodeKind::Program(_)
        | NodeKind::Declaration(_)
        | NodeKind::Type(_)
        | NodeKind::Literal(_)
        | NodeKind::Expression(_)
        | NodeKind::CompoundStatement(_)
        | NodeKind::Print(_)
        | NodeKind::VariableReference(_)
        | NodeKind::Assign(_)
        | NodeKind::Read(_)
        | NodeKind::Condition(_)
        | NodeKind::While(_)
        | NodeKind::Return(_)
        | NodeKind::For(_)
        | NodeKind::FunctionInvocation(_)
        | NodeKind::Function(_)
        | NodeKind::Id(_)
        | NodeKind::IntValue(_)
        | NodeKind::Epsilon(_) => 0,
    }
}

/// Lowers every node of a sibling list.
pub fn lower_list(ast: &Ast, head: Option<NodeId>) -> usize {
    ast.siblings(head).map(|node| lower(ast, node)).sum()
}

/// Lowers an analyzed program.
pub fn compile(ast: &Ast, root: NodeId) -> usize {
    let errors = lower_list(ast, Some(root));
    debug!("lowered {} nodes with {} errors", ast.len(), errors);
    errors
}
