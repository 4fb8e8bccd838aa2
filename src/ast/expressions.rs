use crate::Location;

use super::{
    ast::{Ast, NodeId, NodeKind},
    types::{Operator, ScalarType},
};

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i32),
    Real(f64),
    String(String),
    Boolean(bool),
}

/// Literal Node
/// A constant value together with its printable text.
#[derive(Debug, Clone)]
pub struct LiteralNode {
    pub value: LiteralValue,
    pub text: String,
}

impl LiteralNode {
    pub fn scalar_type(&self) -> ScalarType {
        match self.value {
            LiteralValue::Integer(_) => ScalarType::Integer,
            LiteralValue::Real(_) => ScalarType::Real,
            LiteralValue::String(_) => ScalarType::String,
            LiteralValue::Boolean(_) => ScalarType::Boolean,
        }
    }
}

// EXPRESSIONS

/// Expression Node
///
/// Unary operators keep their operand in `right`. Terminal wrappers keep
/// the wrapped node in `left` and leave `right` empty.
#[derive(Debug, Clone)]
pub struct ExpressionNode {
    pub operator: Operator,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Filled in by the analyzer; `None` means unknown or array-valued.
    pub result_type: Option<ScalarType>,
}

#[derive(Debug, Clone)]
pub struct VariableReferenceNode {
    pub name: String,
    pub first_index: Option<NodeId>,
    /// Scalar type once fully subscripted, `None` while array-valued or unresolved.
    pub var_type: Option<ScalarType>,
}

#[derive(Debug, Clone)]
pub struct FunctionInvocationNode {
    pub name: String,
    pub first_argument: Option<NodeId>,
    pub return_type: Option<ScalarType>,
}

impl Ast {
    pub fn new_integer_literal(&mut self, location: Location, value: i32) -> NodeId {
        self.new_literal(location, LiteralValue::Integer(value), value.to_string())
    }

    pub fn new_real_literal(&mut self, location: Location, value: f64) -> NodeId {
        self.new_literal(location, LiteralValue::Real(value), format!("{:.6}", value))
    }

    pub fn new_string_literal(&mut self, location: Location, value: &str) -> NodeId {
        self.new_literal(
            location,
            LiteralValue::String(value.to_string()),
            value.to_string(),
        )
    }

    pub fn new_boolean_literal(&mut self, location: Location, value: bool) -> NodeId {
        self.new_literal(location, LiteralValue::Boolean(value), value.to_string())
    }

    fn new_literal(&mut self, location: Location, value: LiteralValue, text: String) -> NodeId {
        self.alloc(location, NodeKind::Literal(LiteralNode { value, text }))
    }

    pub fn new_expression(
        &mut self,
        location: Location,
        operator: Operator,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::Expression(ExpressionNode {
                operator,
                left,
                right,
                result_type: None,
            }),
        )
    }

    pub fn new_variable_reference(
        &mut self,
        location: Location,
        name: &str,
        first_index: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::VariableReference(VariableReferenceNode {
                name: name.to_string(),
                first_index,
                var_type: None,
            }),
        )
    }

    pub fn new_function_invocation(
        &mut self,
        location: Location,
        name: &str,
        first_argument: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            location,
            NodeKind::FunctionInvocation(FunctionInvocationNode {
                name: name.to_string(),
                first_argument,
                return_type: None,
            }),
        )
    }

    /// The type an expression evaluated to, if the analyzer resolved one.
    pub fn result_type(&self, expression: NodeId) -> Option<ScalarType> {
        self.expression(expression).and_then(|e| e.result_type)
    }
}
