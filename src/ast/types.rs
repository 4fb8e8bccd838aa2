//! Type system definitions for the AST.
//!
//! This module defines the tags shared by the AST, the symbol table and the
//! analyzer, including:
//!
//! - Scalar types and the integer to real coercion rule
//! - Symbol kinds
//! - Operators, together with the pseudo-operators that wrap terminals
//! - Type nodes (scalar or array type annotations)

use std::fmt::Display;

use super::ast::{Ast, NodeId, NodeKind};
use crate::Location;

/// The scalar types of the language. `Void` only appears as a function return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Integer,
    Real,
    Boolean,
    String,
    Void,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Integer => "integer",
            ScalarType::Real => "real",
            ScalarType::Boolean => "boolean",
            ScalarType::String => "string",
            ScalarType::Void => "void",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Real)
    }

    /// Whether a value of this type may be stored where `target` is expected.
    /// Only integer widens to real, never the reverse.
    pub fn coerces_to(&self, target: ScalarType) -> bool {
        *self == target || (*self == ScalarType::Integer && target == ScalarType::Real)
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Program,
    Function,
    Parameter,
    Variable,
    LoopVar,
    Constant,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Program => "program",
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Variable => "variable",
            SymbolKind::LoopVar => "loop_var",
            SymbolKind::Constant => "constant",
        }
    }

    /// Kinds that can appear in a variable reference.
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            SymbolKind::Parameter | SymbolKind::Variable | SymbolKind::LoopVar | SymbolKind::Constant
        )
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expression operators.
///
/// `Constant`, `VariableReference` and `FunctionInvocation` mark expression
/// nodes that merely wrap a terminal. `StringConcat` is what `Add` becomes
/// once both operands are known to be strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    Mod,
    And,
    Or,
    Not,
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
    StringConcat,
    Constant,
    VariableReference,
    FunctionInvocation,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add | Operator::StringConcat => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Negate => "neg",
            Operator::Mod => "mod",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Equal => "=",
            Operator::GreaterEqual => ">=",
            Operator::Greater => ">",
            Operator::NotEqual => "<>",
            Operator::Constant => "constant",
            Operator::VariableReference => "variable reference",
            Operator::FunctionInvocation => "function invocation",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Operator::Constant | Operator::VariableReference | Operator::FunctionInvocation
        )
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Negate | Operator::Not)
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide
        )
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Operator::Less
                | Operator::LessEqual
                | Operator::Equal
                | Operator::GreaterEqual
                | Operator::Greater
                | Operator::NotEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A type annotation. Arrays keep their dimensions as a sibling chain of
/// `IntValue` nodes, outermost first.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub scalar: ScalarType,
    pub first_dimension: Option<NodeId>,
    pub type_string: String,
}

impl Ast {
    pub fn new_scalar_type(&mut self, location: Location, scalar: ScalarType) -> NodeId {
        self.alloc(
            location,
            NodeKind::Type(TypeNode {
                scalar,
                first_dimension: None,
                type_string: scalar.as_str().to_string(),
            }),
        )
    }

    pub fn new_array_type(
        &mut self,
        location: Location,
        first_dimension: NodeId,
        scalar: ScalarType,
    ) -> NodeId {
        let dimensions: Vec<i32> = self
            .siblings(Some(first_dimension))
            .filter_map(|dim| self.int_value(dim))
            .collect();
        let type_string = array_type_string(scalar, &dimensions);

        self.alloc(
            location,
            NodeKind::Type(TypeNode {
                scalar,
                first_dimension: Some(first_dimension),
                type_string,
            }),
        )
    }

    /// Dimensions of a type node, outermost first. Scalars have none.
    pub fn dimensions(&self, type_node: NodeId) -> Vec<i32> {
        let first = self.type_node(type_node).and_then(|t| t.first_dimension);
        self.siblings(first)
            .filter_map(|dim| self.int_value(dim))
            .collect()
    }
}

/// Renders `integer [3][4]`, or just `integer` when there are no dimensions.
pub fn array_type_string(scalar: ScalarType, dimensions: &[i32]) -> String {
    if dimensions.is_empty() {
        return scalar.as_str().to_string();
    }

    let dims: String = dimensions.iter().map(|d| format!("[{}]", d)).collect();
    format!("{} {}", scalar.as_str(), dims)
}
