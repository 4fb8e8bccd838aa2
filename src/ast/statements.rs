use crate::Location;

use super::{
    ast::{Ast, NodeId, NodeKind},
    types::{ScalarType, SymbolKind},
};

#[derive(Debug, Clone)]
pub struct ProgramNode {
    pub name: String,
    pub first_declaration: Option<NodeId>,
    pub first_function: Option<NodeId>,
    pub body: NodeId,
}

/// Declaration Node
/// Declares every identifier in `first_id`'s list with the same type.
#[derive(Debug, Clone)]
pub struct DeclarationNode {
    pub kind: SymbolKind,
    pub first_id: NodeId,
    pub type_node: NodeId,
    /// Only constants carry a literal.
    pub literal: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct CompoundStatementNode {
    pub first_declaration: Option<NodeId>,
    pub first_statement: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct PrintNode {
    pub expression: NodeId,
}

#[derive(Debug, Clone)]
pub struct AssignNode {
    pub variable: NodeId,
    pub expression: NodeId,
}

#[derive(Debug, Clone)]
pub struct ReadNode {
    pub variable: NodeId,
}

#[derive(Debug, Clone)]
pub struct ConditionNode {
    pub condition: NodeId,
    pub then_body: NodeId,
    pub else_body: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct WhileNode {
    pub condition: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ReturnNode {
    pub expression: Option<NodeId>,
}

/// For Node
///
/// Keeps the raw `Id`/`IntValue` nodes it was built from so the loop header
/// can be rendered, plus the implicit declaration of the loop variable.
#[derive(Debug, Clone)]
pub struct ForNode {
    pub loop_var: String,
    pub start: i32,
    pub end: i32,
    pub loop_var_node: NodeId,
    pub assign_node: NodeId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub declaration: NodeId,
    pub body: NodeId,
}

/// Function Node
///
/// A function without a body is a forward declaration.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub name: String,
    pub return_type: ScalarType,
    pub return_type_node: NodeId,
    pub first_parameter: Option<NodeId>,
    /// One type node per declared parameter identifier, in order.
    pub first_parameter_type: Option<NodeId>,
    pub parameter_type_string: String,
    pub body: Option<NodeId>,
}

impl Ast {
    pub fn new_program(
        &mut self,
        location: Location,
        name: &str,
        first_declaration: Option<NodeId>,
        first_function: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::Program(ProgramNode {
                name: name.to_string(),
                first_declaration,
                first_function,
                body,
            }),
        )
    }

    pub fn new_declaration(
        &mut self,
        location: Location,
        first_id: NodeId,
        type_node: NodeId,
        kind: SymbolKind,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::Declaration(DeclarationNode {
                kind,
                first_id,
                type_node,
                literal: None,
            }),
        )
    }

    /// Declares constants; their scalar type is taken from the literal.
    pub fn new_constant_declaration(
        &mut self,
        location: Location,
        first_id: NodeId,
        literal: NodeId,
    ) -> NodeId {
        let scalar = self
            .literal(literal)
            .map(|l| l.scalar_type())
            .unwrap_or(ScalarType::Integer);
        let type_node = self.new_scalar_type(location, scalar);

        self.alloc(
            location,
            NodeKind::Declaration(DeclarationNode {
                kind: SymbolKind::Constant,
                first_id,
                type_node,
                literal: Some(literal),
            }),
        )
    }

    pub fn new_compound_statement(
        &mut self,
        location: Location,
        first_declaration: Option<NodeId>,
        first_statement: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::CompoundStatement(CompoundStatementNode {
                first_declaration,
                first_statement,
            }),
        )
    }

    pub fn new_print(&mut self, location: Location, expression: NodeId) -> NodeId {
        self.alloc(location, NodeKind::Print(PrintNode { expression }))
    }

    pub fn new_assign(&mut self, location: Location, variable: NodeId, expression: NodeId) -> NodeId {
        self.alloc(
            location,
            NodeKind::Assign(AssignNode {
                variable,
                expression,
            }),
        )
    }

    pub fn new_read(&mut self, location: Location, variable: NodeId) -> NodeId {
        self.alloc(location, NodeKind::Read(ReadNode { variable }))
    }

    pub fn new_condition(
        &mut self,
        location: Location,
        condition: NodeId,
        then_body: NodeId,
        else_body: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::Condition(ConditionNode {
                condition,
                then_body,
                else_body,
            }),
        )
    }

    pub fn new_while(&mut self, location: Location, condition: NodeId, body: NodeId) -> NodeId {
        self.alloc(location, NodeKind::While(WhileNode { condition, body }))
    }

    pub fn new_return(&mut self, location: Location, expression: Option<NodeId>) -> NodeId {
        self.alloc(location, NodeKind::Return(ReturnNode { expression }))
    }

    /// Builds a counting loop from its raw parts.
    ///
    /// `loop_var` and `assign` are `Id` nodes, `start` and `end` are
    /// `IntValue` nodes. An integer loop variable declaration is synthesized
    /// at the loop variable's location.
    pub fn new_for(
        &mut self,
        location: Location,
        loop_var: NodeId,
        assign: NodeId,
        start: NodeId,
        end: NodeId,
        body: NodeId,
    ) -> NodeId {
        let name = self.id_name(loop_var).unwrap_or_default().to_string();
        let start_value = self.int_value(start).unwrap_or_default();
        let end_value = self.int_value(end).unwrap_or_default();

        let var_location = self.location(loop_var);
        let declared_id = self.duplicate(loop_var);
        let type_node = self.new_scalar_type(var_location, ScalarType::Integer);
        let declaration =
            self.new_declaration(var_location, declared_id, type_node, SymbolKind::LoopVar);

        self.alloc(
            location,
            NodeKind::For(ForNode {
                loop_var: name,
                start: start_value,
                end: end_value,
                loop_var_node: loop_var,
                assign_node: assign,
                start_node: start,
                end_node: end,
                declaration,
                body,
            }),
        )
    }

    /// Builds a function. A missing return type becomes `void`, and every
    /// parameter identifier gets its own copy of its declaration's type node.
    pub fn new_function(
        &mut self,
        location: Location,
        name: &str,
        first_parameter: Option<NodeId>,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let return_type_node = match return_type {
            Some(node) => node,
            None => self.new_scalar_type(Location::new(location.line, 0), ScalarType::Void),
        };
        let return_scalar = self
            .type_node(return_type_node)
            .map(|t| t.scalar)
            .unwrap_or(ScalarType::Void);

        let mut first_parameter_type = None;
        let mut type_strings = Vec::new();
        let declarations: Vec<NodeId> = self.siblings(first_parameter).collect();
        for declaration in declarations {
            let Some((first_id, type_node)) = self
                .declaration(declaration)
                .map(|d| (d.first_id, d.type_node))
            else {
                continue;
            };

            for _ in 0..self.list_length(Some(first_id)) {
                let copy = self.duplicate(type_node);
                if let Some(t) = self.type_node(copy) {
                    type_strings.push(t.type_string.clone());
                }
                first_parameter_type = Some(self.append_to(first_parameter_type, copy));
            }
        }

        self.alloc(
            location,
            NodeKind::Function(FunctionNode {
                name: name.to_string(),
                return_type: return_scalar,
                return_type_node,
                first_parameter,
                first_parameter_type,
                parameter_type_string: format!("({})", type_strings.join(", ")),
                body,
            }),
        )
    }
}
