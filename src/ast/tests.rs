//! Unit tests for AST construction and rendering.

use crate::ast::ast::Ast;
use crate::ast::types::{Operator, ScalarType, SymbolKind};
use crate::Location;

fn loc(line: u32, col: u32) -> Location {
    Location::new(line, col)
}

#[test]
fn test_sibling_list() {
    let mut ast = Ast::new();
    let a = ast.new_id(loc(1, 1), "a");
    let b = ast.new_id(loc(1, 4), "b");
    let c = ast.new_id(loc(1, 7), "c");

    let head = ast.append_sibling(a, b);
    let head = ast.append_sibling(head, c);

    assert_eq!(head, a);
    assert_eq!(ast.list_length(Some(head)), 3);
    assert_eq!(ast.list_length(None), 0);
    let names: Vec<&str> = ast.siblings(Some(head)).filter_map(|id| ast.id_name(id)).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_duplicate_is_detached() {
    let mut ast = Ast::new();
    let a = ast.new_id(loc(1, 1), "a");
    let b = ast.new_id(loc(1, 4), "b");
    ast.append_sibling(a, b);

    let copy = ast.duplicate(a);

    assert_ne!(copy, a);
    assert_eq!(ast.id_name(copy), Some("a"));
    assert_eq!(ast.location(copy), loc(1, 1));
    assert_eq!(ast.next(copy), None);
    assert_eq!(ast.next(a), Some(b));
}

#[test]
fn test_array_type_string() {
    let mut ast = Ast::new();
    let three = ast.new_int_value(loc(1, 9), 3);
    let four = ast.new_int_value(loc(1, 22), 4);
    ast.append_sibling(three, four);

    let array = ast.new_array_type(loc(1, 9), three, ScalarType::Integer);

    assert_eq!(ast.type_node(array).map(|t| t.type_string.as_str()), Some("integer [3][4]"));
    assert_eq!(ast.dimensions(array), vec![3, 4]);

    let scalar = ast.new_scalar_type(loc(1, 1), ScalarType::Real);
    assert_eq!(ast.type_node(scalar).map(|t| t.type_string.as_str()), Some("real"));
    assert!(ast.dimensions(scalar).is_empty());
}

#[test]
fn test_literal_text() {
    let mut ast = Ast::new();
    let real = ast.new_real_literal(loc(1, 1), 3.5);
    let boolean = ast.new_boolean_literal(loc(1, 1), false);
    let integer = ast.new_integer_literal(loc(1, 1), -7);

    assert_eq!(ast.literal(real).map(|l| l.text.as_str()), Some("3.500000"));
    assert_eq!(ast.literal(boolean).map(|l| l.text.as_str()), Some("false"));
    assert_eq!(ast.literal(integer).map(|l| l.text.as_str()), Some("-7"));
    assert_eq!(ast.literal(real).map(|l| l.scalar_type()), Some(ScalarType::Real));
}

#[test]
fn test_function_parameter_types() {
    let mut ast = Ast::new();

    let a = ast.new_id(loc(1, 5), "a");
    let b = ast.new_id(loc(1, 8), "b");
    ast.append_sibling(a, b);
    let int_type = ast.new_scalar_type(loc(1, 12), ScalarType::Integer);
    let first = ast.new_declaration(loc(1, 5), a, int_type, SymbolKind::Parameter);

    let c = ast.new_id(loc(1, 21), "c");
    let dim = ast.new_int_value(loc(1, 25), 3);
    let array = ast.new_array_type(loc(1, 25), dim, ScalarType::Real);
    let second = ast.new_declaration(loc(1, 21), c, array, SymbolKind::Parameter);
    ast.append_sibling(first, second);

    let function = ast.new_function(loc(1, 1), "f", Some(first), None, None);
    let node = ast.function(function).expect("function node");

    assert_eq!(node.return_type, ScalarType::Void);
    assert_eq!(node.parameter_type_string, "(integer, integer, real [3])");
    assert_eq!(ast.list_length(node.first_parameter_type), 3);
    assert_eq!(ast.location(node.return_type_node), loc(1, 0));

    let empty = ast.new_function(loc(5, 1), "g", None, Some(int_type), None);
    assert_eq!(ast.function(empty).map(|f| f.parameter_type_string.as_str()), Some("()"));
}

#[test]
fn test_render_program() {
    let mut ast = Ast::new();
    let one = ast.new_integer_literal(loc(3, 11), 1);
    let left = ast.new_expression(loc(3, 11), Operator::Constant, Some(one), None);
    let two = ast.new_integer_literal(loc(3, 15), 2);
    let right = ast.new_expression(loc(3, 15), Operator::Constant, Some(two), None);
    let sum = ast.new_expression(loc(3, 13), Operator::Add, Some(left), Some(right));
    let print = ast.new_print(loc(3, 5), sum);
    let body = ast.new_compound_statement(loc(2, 1), None, Some(print));
    let program = ast.new_program(loc(1, 1), "test", None, None, body);

    let expected = "\
program <line: 1, col: 1> test void
  compound statement <line: 2, col: 1>
    print statement <line: 3, col: 5>
      binary operator <line: 3, col: 13> +
        constant <line: 3, col: 11> 1
        constant <line: 3, col: 15> 2
";
    assert_eq!(ast.render(program), expected);
}

#[test]
fn test_render_declaration_and_unary() {
    let mut ast = Ast::new();
    let x = ast.new_id(loc(1, 5), "x");
    let literal = ast.new_integer_literal(loc(1, 9), 10);
    let declaration = ast.new_constant_declaration(loc(1, 1), x, literal);

    let reference = ast.new_variable_reference(loc(2, 6), "x", None);
    let wrapped = ast.new_expression(loc(2, 6), Operator::VariableReference, Some(reference), None);
    let negated = ast.new_expression(loc(2, 5), Operator::Negate, None, Some(wrapped));
    ast.append_sibling(declaration, negated);

    let expected = "\
declaration <line: 1, col: 1>
  variable <line: 1, col: 5> x integer
    constant <line: 1, col: 9> 10
unary operator <line: 2, col: 5> neg
  variable reference <line: 2, col: 6> x
";
    assert_eq!(ast.render(declaration), expected);
}

#[test]
fn test_render_for_loop() {
    let mut ast = Ast::new();
    let var = ast.new_id(loc(1, 5), "i");
    let assign = ast.new_id(loc(1, 7), ":=");
    let start = ast.new_int_value(loc(1, 10), 1);
    let end = ast.new_int_value(loc(1, 15), 3);
    let body = ast.new_compound_statement(loc(2, 1), None, None);
    let for_node = ast.new_for(loc(1, 1), var, assign, start, end, body);

    let expected = "\
for statement <line: 1, col: 1>
  declaration <line: 1, col: 5>
    variable <line: 1, col: 5> i integer
  assignment statement <line: 1, col: 7>
    variable reference <line: 1, col: 5> i
    constant <line: 1, col: 10> 1
  constant <line: 1, col: 15> 3
  compound statement <line: 2, col: 1>
";
    assert_eq!(ast.render(for_node), expected);
}

#[test]
fn test_render_epsilon() {
    let mut ast = Ast::new();
    let epsilon = ast.new_epsilon(loc(4, 2), "marker", "here");

    assert_eq!(ast.render(epsilon), "marker <line: 4, col: 2> here\n");
}
