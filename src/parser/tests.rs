//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Declarations, constants and array types
//! - Function definitions and forward declarations
//! - Expression precedence and associativity
//! - Control flow statements
//! - Syntax errors and the nesting limit

use super::parser::parse;
use crate::ast::ast::{Ast, NodeId, NodeKind};
use crate::ast::types::{Operator, ScalarType, SymbolKind};
use crate::errors::errors::Error;
use crate::lexer::lexer::tokenize;
use crate::Location;

fn parse_source(source: &str) -> Result<(Ast, NodeId), Error> {
    parse(tokenize(source).unwrap(), 256)
}

/// Parses a program whose body holds `body`, returning its statements.
fn parse_body(declarations: &str, body: &str) -> (Ast, Vec<NodeId>) {
    let source = format!("test;\n{}\nbegin\n{}\nend\nend\n", declarations, body);
    let (ast, root) = parse_source(&source).unwrap();
    let compound = ast.program(root).unwrap().body;
    let first = match ast.kind(compound) {
        NodeKind::CompoundStatement(c) => c.first_statement,
        _ => panic!("body is not a compound statement"),
    };
    let statements = ast.siblings(first).collect();
    (ast, statements)
}

fn printed_expression(ast: &Ast, statement: NodeId) -> NodeId {
    match ast.kind(statement) {
        NodeKind::Print(print) => print.expression,
        _ => panic!("not a print statement"),
    }
}

fn operator(ast: &Ast, expression: NodeId) -> Operator {
    ast.expression(expression).unwrap().operator
}

#[test]
fn test_parse_precedence() {
    let (ast, root) = parse_source("p;\nbegin\nprint 1 + 2 * 3;\nend\nend").unwrap();

    let expected = "\
program <line: 1, col: 1> p void
  compound statement <line: 2, col: 1>
    print statement <line: 3, col: 1>
      binary operator <line: 3, col: 9> +
        constant <line: 3, col: 7> 1
        binary operator <line: 3, col: 13> *
          constant <line: 3, col: 11> 2
          constant <line: 3, col: 15> 3
";
    assert_eq!(ast.render(root), expected);
}

#[test]
fn test_parse_not_binds_looser_than_relational() {
    let (ast, statements) = parse_body("", "print not a < b and c;");
    let expression = printed_expression(&ast, statements[0]);

    assert_eq!(operator(&ast, expression), Operator::And);
    let left = ast.expression(expression).unwrap().left.unwrap();
    assert_eq!(operator(&ast, left), Operator::Not);
    let negated = ast.expression(left).unwrap().right.unwrap();
    assert_eq!(operator(&ast, negated), Operator::Less);
}

#[test]
fn test_parse_left_associative() {
    let (ast, statements) = parse_body("", "print 1 - 2 - 3;");
    let expression = printed_expression(&ast, statements[0]);

    assert_eq!(operator(&ast, expression), Operator::Subtract);
    let left = ast.expression(expression).unwrap().left.unwrap();
    assert_eq!(operator(&ast, left), Operator::Subtract);
}

#[test]
fn test_parse_unary_minus() {
    let (ast, statements) = parse_body("", "print -a * (b + 1);");
    let expression = printed_expression(&ast, statements[0]);

    assert_eq!(operator(&ast, expression), Operator::Multiply);
    let node = ast.expression(expression).unwrap();
    assert_eq!(operator(&ast, node.left.unwrap()), Operator::Negate);
    assert_eq!(operator(&ast, node.right.unwrap()), Operator::Add);
}

#[test]
fn test_parse_declarations() {
    let source = "test;\nvar a, b : integer;\nvar c : array 2 of array 3 of real;\nvar d : -5;\nvar s : \"hi\";\nbegin\nend\nend\n";
    let (ast, root) = parse_source(source).unwrap();
    let declarations: Vec<NodeId> = ast.siblings(ast.program(root).unwrap().first_declaration).collect();

    assert_eq!(declarations.len(), 4);

    let first = ast.declaration(declarations[0]).unwrap();
    assert_eq!(first.kind, SymbolKind::Variable);
    assert_eq!(ast.list_length(Some(first.first_id)), 2);
    assert_eq!(ast.location(declarations[0]), Location::new(2, 1));

    let array = ast.declaration(declarations[1]).unwrap();
    assert_eq!(ast.type_node(array.type_node).unwrap().type_string, "real [2][3]");

    let constant = ast.declaration(declarations[2]).unwrap();
    assert_eq!(constant.kind, SymbolKind::Constant);
    let literal = ast.literal(constant.literal.unwrap()).unwrap();
    assert_eq!(literal.text, "-5");
    assert_eq!(ast.location(constant.literal.unwrap()), Location::new(4, 9));

    let string = ast.declaration(declarations[3]).unwrap();
    assert_eq!(ast.type_node(string.type_node).unwrap().scalar, ScalarType::String);
}

#[test]
fn test_parse_functions() {
    let source = "\
test;
f(a, b : integer; c : array 3 of real) : boolean;
g()
begin
  return;
end
end
begin
end
end
";
    let (ast, root) = parse_source(source).unwrap();
    let functions: Vec<NodeId> = ast.siblings(ast.program(root).unwrap().first_function).collect();

    let forward = ast.function(functions[0]).unwrap();
    assert_eq!(forward.name, "f");
    assert!(forward.body.is_none());
    assert_eq!(forward.return_type, ScalarType::Boolean);
    assert_eq!(forward.parameter_type_string, "(integer, integer, real [3])");
    assert_eq!(ast.location(functions[0]), Location::new(2, 1));

    let defined = ast.function(functions[1]).unwrap();
    assert_eq!(defined.return_type, ScalarType::Void);
    assert_eq!(defined.parameter_type_string, "()");
    assert!(defined.body.is_some());
}

#[test]
fn test_parse_control_flow() {
    let body = "\
if a then begin print 1; end else begin print 2; end end if
while b do begin end end do
for i := 1 to 10 do begin end end do
read x[1];
f(1, 2);
x := 3;";
    let (ast, statements) = parse_body("", body);

    assert_eq!(statements.len(), 6);
    assert!(matches!(ast.kind(statements[0]), NodeKind::Condition(c) if c.else_body.is_some()));
    assert!(matches!(ast.kind(statements[1]), NodeKind::While(_)));
    match ast.kind(statements[2]) {
        NodeKind::For(for_node) => {
            assert_eq!(for_node.loop_var, "i");
            assert_eq!((for_node.start, for_node.end), (1, 10));
        }
        _ => panic!("expected for statement"),
    }
    assert!(matches!(ast.kind(statements[3]), NodeKind::Read(_)));
    assert!(matches!(ast.kind(statements[4]), NodeKind::FunctionInvocation(f) if f.name == "f"));
    assert!(matches!(ast.kind(statements[5]), NodeKind::Assign(_)));
    assert_eq!(ast.location(statements[5]), Location::new(9, 3));
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("test;\nbegin\nprint 1\nend\nend\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(*error.get_location(), Location::new(4, 1));
}

#[test]
fn test_parse_missing_expression() {
    let error = parse_source("test;\nbegin\nx := ;\nend\nend\n").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_trailing_tokens() {
    assert!(parse_source("test;\nbegin\nend\nend\nextra").is_err());
}

#[test]
fn test_parse_nesting_limit() {
    let nested = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    let source = format!("test;\nbegin\nprint {};\nend\nend\n", nested);

    let error = parse(tokenize(&source).unwrap(), 16).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(parse(tokenize(&source).unwrap(), 256).is_ok());
}
