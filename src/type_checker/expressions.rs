//! Expression typing: operators, terminal wrappers and function calls.

use crate::{
    ast::{
        ast::NodeId,
        expressions::{ExpressionNode, FunctionInvocationNode},
        types::{array_type_string, Operator, ScalarType, SymbolKind},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::type_checker::{Analyzer, ListPolicy};

impl Analyzer<'_> {
    pub(super) fn analyze_expression(&mut self, id: NodeId, expression: ExpressionNode) -> Result<usize, Error> {
        let errors = self.visit(expression.left)? + self.visit(expression.right)?;
        if errors > 0 {
            return Ok(errors);
        }

        let result_type = match expression.operator {
            Operator::Constant => expression
                .left
                .and_then(|literal| self.ast.literal(literal))
                .map(|literal| literal.scalar_type()),
            Operator::VariableReference => expression
                .left
                .and_then(|reference| self.ast.variable_reference(reference))
                .and_then(|reference| reference.var_type),
            Operator::FunctionInvocation => expression
                .left
                .and_then(|invocation| self.ast.function_invocation(invocation))
                .and_then(|invocation| invocation.return_type),
            _ => return Ok(self.analyze_operator(id, &expression)),
        };

        self.set_result_type(id, result_type);
        Ok(0)
    }

    /// Infers the result of a unary or binary operator from its operand types.
    fn analyze_operator(&mut self, id: NodeId, expression: &ExpressionNode) -> usize {
        let left = expression.left.and_then(|operand| self.ast.result_type(operand));
        let right = expression.right.and_then(|operand| self.ast.result_type(operand));
        let numeric = |t: Option<ScalarType>| t.is_some_and(|t| t.is_numeric());

        let mut operator = expression.operator;
        if operator == Operator::Add && left == Some(ScalarType::String) && right == Some(ScalarType::String) {
            operator = Operator::StringConcat;
            if let Some(node) = self.ast.expression_mut(id) {
                node.operator = operator;
            }
        }

        let result_type = match operator {
            Operator::Negate if numeric(right) => right,
            Operator::Not if right == Some(ScalarType::Boolean) => right,
            Operator::Mod if left == Some(ScalarType::Integer) && right == Some(ScalarType::Integer) => {
                Some(ScalarType::Integer)
            }
            op if op.is_arithmetic() && numeric(left) && numeric(right) => {
                if left == Some(ScalarType::Real) || right == Some(ScalarType::Real) {
                    Some(ScalarType::Real)
                } else {
                    Some(ScalarType::Integer)
                }
            }
            op if op.is_relational() && numeric(left) && numeric(right) => Some(ScalarType::Boolean),
            op if op.is_logical() && left == Some(ScalarType::Boolean) && right == Some(ScalarType::Boolean) => {
                Some(ScalarType::Boolean)
            }
            Operator::StringConcat if left == Some(ScalarType::String) && right == Some(ScalarType::String) => {
                Some(ScalarType::String)
            }
            _ => None,
        };

        if result_type.is_some() {
            self.set_result_type(id, result_type);
            return 0;
        }

        let error = if operator.is_unary() {
            ErrorImpl::InvalidUnaryOperand {
                operator: operator.symbol().to_string(),
                operand: self.optional_operand_name(expression.right),
            }
        } else {
            ErrorImpl::InvalidBinaryOperands {
                operator: operator.symbol().to_string(),
                left: self.optional_operand_name(expression.left),
                right: self.optional_operand_name(expression.right),
            }
        };
        self.report(error, id)
    }

    pub(super) fn analyze_function_invocation(
        &mut self,
        id: NodeId,
        invocation: FunctionInvocationNode,
    ) -> Result<usize, Error> {
        let Some(symbol) = self.symbols.lookup(&invocation.name) else {
            return Ok(self.report(ErrorImpl::UndeclaredSymbol { name: invocation.name }, id));
        };
        if self.symbols.kind(symbol) != SymbolKind::Function {
            return Ok(self.report(ErrorImpl::NonFunctionSymbol { name: invocation.name }, id));
        }

        let return_type = self.symbols.scalar_type(symbol);
        if let Some(node) = self.ast.function_invocation_mut(id) {
            node.return_type = return_type;
        }

        let errors = self.visit_list(invocation.first_argument, ListPolicy::StopAtFirstError)?;
        if errors > 0 {
            return Ok(errors);
        }

        let first_parameter_type = self
            .ast
            .function(self.symbols.node(symbol))
            .and_then(|function| function.first_parameter_type);
        let arguments: Vec<NodeId> = self.ast.siblings(invocation.first_argument).collect();
        let parameters: Vec<NodeId> = self.ast.siblings(first_parameter_type).collect();

        if arguments.len() != parameters.len() {
            return Ok(self.report(ErrorImpl::ArgumentCountMismatch { function: invocation.name }, id));
        }

        for (argument, parameter) in arguments.into_iter().zip(parameters) {
            let Some(expected) = self.ast.type_node(parameter).cloned() else {
                continue;
            };

            let compatible = if expected.first_dimension.is_none() {
                self.ast
                    .result_type(argument)
                    .is_some_and(|value| value.coerces_to(expected.scalar))
            } else {
                self.ast.result_type(argument).is_none()
                    && self.array_value_type_string(argument).as_deref() == Some(expected.type_string.as_str())
            };

            if !compatible {
                let argument_name = match self.array_value_type_string(argument) {
                    Some(type_string) if self.ast.result_type(argument).is_none() => type_string,
                    _ => self.operand_type_name(argument),
                };
                return Ok(self.report(
                    ErrorImpl::IncompatibleArgument {
                        argument: argument_name,
                        parameter: expected.type_string,
                    },
                    argument,
                ));
            }
        }

        Ok(0)
    }

    fn set_result_type(&mut self, id: NodeId, result_type: Option<ScalarType>) {
        if let Some(node) = self.ast.expression_mut(id) {
            node.result_type = result_type;
        }
    }

    fn optional_operand_name(&self, operand: Option<NodeId>) -> String {
        operand
            .map(|operand| self.operand_type_name(operand))
            .unwrap_or_else(|| String::from("unknown"))
    }

    /// Names the type of an already analyzed expression for diagnostics.
    ///
    /// Array-valued variable references are named by their declared type.
    pub(super) fn operand_type_name(&self, operand: NodeId) -> String {
        if let Some(result_type) = self.ast.result_type(operand) {
            return result_type.to_string();
        }

        self.wrapped_variable_reference(operand)
            .and_then(|name| self.symbols.lookup(name))
            .map(|symbol| self.symbols.type_string(symbol).to_string())
            .unwrap_or_else(|| String::from("unknown"))
    }

    /// Type string of what remains of an array after the reference's subscripts,
    /// e.g. `integer [4]` for `a[1]` with `a` declared as `integer [3][4]`.
    fn array_value_type_string(&self, operand: NodeId) -> Option<String> {
        let reference = self
            .ast
            .expression(operand)
            .filter(|expression| expression.operator == Operator::VariableReference)
            .and_then(|expression| expression.left)
            .and_then(|reference| self.ast.variable_reference(reference))?;
        let symbol = self.symbols.lookup(&reference.name)?;
        let scalar = self.symbols.scalar_type(symbol)?;

        let used = self.ast.list_length(reference.first_index);
        let remaining: Vec<i32> = self
            .ast
            .dimensions(self.symbols.node(symbol))
            .into_iter()
            .skip(used)
            .collect();
        if remaining.is_empty() {
            return None;
        }

        Some(array_type_string(scalar, &remaining))
    }

    fn wrapped_variable_reference(&self, operand: NodeId) -> Option<&str> {
        self.ast
            .expression(operand)
            .filter(|expression| expression.operator == Operator::VariableReference)
            .and_then(|expression| expression.left)
            .and_then(|reference| self.ast.variable_reference(reference))
            .map(|reference| reference.name.as_str())
    }
}
