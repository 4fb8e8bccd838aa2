//! Indented text dump of an AST.
//!
//! Each node prints one line, `<indent><label> <line: L, col: C>[ <extra>]`,
//! with two spaces of indent per level. Terminal wrapper expressions print
//! the node they wrap at their own level; `Id`, `IntValue` and `Type` nodes
//! are folded into their parents' lines.

use std::fmt::Write;

use crate::Location;

use super::ast::{Ast, NodeId, NodeKind};

impl Ast {
    /// Renders `node` and every sibling after it.
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.print_list(&mut out, Some(node), 0);
        out
    }

    fn print_list(&self, out: &mut String, head: Option<NodeId>, level: usize) {
        for id in self.siblings(head) {
            self.print_node(out, id, level);
        }
    }

    fn print_line(&self, out: &mut String, level: usize, label: &str, location: Location, extra: Option<&str>) {
        let _ = write!(out, "{}{} {}", "  ".repeat(level), label, location);
        if let Some(extra) = extra {
            let _ = write!(out, " {}", extra);
        }
        out.push('\n');
    }

    fn print_node(&self, out: &mut String, id: NodeId, level: usize) {
        let location = self.location(id);

        match self.kind(id) {
            NodeKind::Program(program) => {
                let extra = format!("{} void", program.name);
                self.print_line(out, level, "program", location, Some(&extra));
                self.print_list(out, program.first_declaration, level + 1);
                self.print_list(out, program.first_function, level + 1);
                self.print_node(out, program.body, level + 1);
            }
            NodeKind::Declaration(declaration) => {
                self.print_line(out, level, "declaration", location, None);
                let type_string = self
                    .type_node(declaration.type_node)
                    .map(|t| t.type_string.as_str())
                    .unwrap_or("");

                for var in self.siblings(Some(declaration.first_id)) {
                    let extra = format!("{} {}", self.id_name(var).unwrap_or(""), type_string);
                    self.print_line(out, level + 1, "variable", self.location(var), Some(&extra));
                    if let Some(literal) = declaration.literal {
                        self.print_node(out, literal, level + 2);
                    }
                }
            }
            NodeKind::Literal(literal) => {
                self.print_line(out, level, "constant", location, Some(&literal.text));
            }
            NodeKind::Expression(expression) => {
                if expression.operator.is_terminal() {
                    if let Some(wrapped) = expression.left {
                        self.print_node(out, wrapped, level);
                    }
                } else if expression.left.is_none() {
                    self.print_line(out, level, "unary operator", location, Some(expression.operator.symbol()));
                    if let Some(operand) = expression.right {
                        self.print_node(out, operand, level + 1);
                    }
                } else {
                    self.print_line(out, level, "binary operator", location, Some(expression.operator.symbol()));
                    for operand in [expression.left, expression.right].into_iter().flatten() {
                        self.print_node(out, operand, level + 1);
                    }
                }
            }
            NodeKind::CompoundStatement(compound) => {
                self.print_line(out, level, "compound statement", location, None);
                self.print_list(out, compound.first_declaration, level + 1);
                self.print_list(out, compound.first_statement, level + 1);
            }
            NodeKind::Print(print) => {
                self.print_line(out, level, "print statement", location, None);
                self.print_node(out, print.expression, level + 1);
            }
            NodeKind::VariableReference(reference) => {
                self.print_line(out, level, "variable reference", location, Some(&reference.name));
                self.print_list(out, reference.first_index, level + 1);
            }
            NodeKind::Assign(assign) => {
                self.print_line(out, level, "assignment statement", location, None);
                self.print_node(out, assign.variable, level + 1);
                self.print_node(out, assign.expression, level + 1);
            }
            NodeKind::Read(read) => {
                self.print_line(out, level, "read statement", location, None);
                self.print_node(out, read.variable, level + 1);
            }
            NodeKind::Condition(condition) => {
                self.print_line(out, level, "if statement", location, None);
                self.print_node(out, condition.condition, level + 1);
                self.print_node(out, condition.then_body, level + 1);
                if let Some(else_body) = condition.else_body {
                    self.print_node(out, else_body, level + 1);
                }
            }
            NodeKind::While(while_node) => {
                self.print_line(out, level, "while statement", location, None);
                self.print_node(out, while_node.condition, level + 1);
                self.print_node(out, while_node.body, level + 1);
            }
            NodeKind::Return(return_node) => {
                self.print_line(out, level, "return statement", location, None);
                if let Some(expression) = return_node.expression {
                    self.print_node(out, expression, level + 1);
                }
            }
            NodeKind::For(for_node) => {
                self.print_line(out, level, "for statement", location, None);
                self.print_node(out, for_node.declaration, level + 1);

                let start = for_node.start.to_string();
                self.print_line(out, level + 1, "assignment statement", self.location(for_node.assign_node), None);
                self.print_line(
                    out,
                    level + 2,
                    "variable reference",
                    self.location(for_node.loop_var_node),
                    Some(&for_node.loop_var),
                );
                self.print_line(out, level + 2, "constant", self.location(for_node.start_node), Some(&start));

                let end = for_node.end.to_string();
                self.print_line(out, level + 1, "constant", self.location(for_node.end_node), Some(&end));
                self.print_node(out, for_node.body, level + 1);
            }
            NodeKind::FunctionInvocation(invocation) => {
                self.print_line(out, level, "function invocation", location, Some(&invocation.name));
                self.print_list(out, invocation.first_argument, level + 1);
            }
            NodeKind::Function(function) => {
                let extra = format!(
                    "{} {} {}",
                    function.name,
                    function.return_type.as_str(),
                    function.parameter_type_string
                );
                self.print_line(out, level, "function declaration", location, Some(&extra));
                self.print_list(out, function.first_parameter, level + 1);
                self.print_list(out, function.body, level + 1);
            }
            NodeKind::Epsilon(epsilon) => {
                let _ = writeln!(
                    out,
                    "{}{} {} {}",
                    "  ".repeat(level),
                    epsilon.prefix,
                    location,
                    epsilon.postfix
                );
            }
            NodeKind::Type(_) | NodeKind::Id(_) | NodeKind::IntValue(_) => {}
        }
    }
}
