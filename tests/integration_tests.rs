//! Integration tests for the whole front end.
//!
//! These tests run P programs through tokenization, parsing, semantic
//! analysis and lowering, and check the reported errors, the inferred types
//! and the rendered tree.

use pcompiler::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        types::ScalarType,
    },
    check_source,
    compiler::compiler::compile,
    errors::diagnostics::Diagnostics,
    parse_source,
    type_checker::{
        symbol_table::SymbolTable,
        type_checker::{Analyzer, AnalyzerConfig, DEFAULT_MAX_NESTING_DEPTH},
    },
};

/// Checks a program silently, returning the error count and the error names.
fn check(source: &str) -> (usize, Vec<String>) {
    let mut diagnostics = Diagnostics::without_source();
    let checked = check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();
    assert_eq!(checked.error_count, diagnostics.error_count());

    let names = diagnostics
        .errors()
        .iter()
        .map(|e| e.get_error_name().to_string())
        .collect();
    (checked.error_count, names)
}

fn messages(source: &str) -> Vec<String> {
    let mut diagnostics = Diagnostics::without_source();
    check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();
    diagnostics.errors().iter().map(|e| e.to_string()).collect()
}

/// Statements of the program body, in order.
fn body_statements(ast: &Ast, root: NodeId) -> Vec<NodeId> {
    let body = ast.program(root).unwrap().body;
    match ast.kind(body) {
        NodeKind::CompoundStatement(compound) => ast.siblings(compound.first_statement).collect(),
        _ => panic!("program body is not a compound statement"),
    }
}

#[test]
fn test_fixture_render_matches_golden() {
    let (ast, root) = parse_source(include_str!("fixtures/sample.p"), DEFAULT_MAX_NESTING_DEPTH).unwrap();

    assert_eq!(ast.render(root), include_str!("fixtures/sample.ast"));
}

#[test]
fn test_fixture_is_semantically_clean() {
    let mut diagnostics = Diagnostics::without_source();
    let checked = check_source(
        include_str!("fixtures/sample.p"),
        &AnalyzerConfig::default(),
        &mut diagnostics,
    )
    .unwrap();

    assert_eq!(checked.error_count, 0);
    assert_eq!(compile(&checked.ast, checked.root), 0);

    let statements = body_statements(&checked.ast, checked.root);
    let NodeKind::Print(print) = checked.ast.kind(statements[1]) else {
        panic!("expected print statement");
    };
    assert_eq!(checked.ast.result_type(print.expression), Some(ScalarType::Real));
}

#[test]
fn test_error_fixture() {
    let (errors, names) = check(include_str!("fixtures/errors.p"));

    assert_eq!(errors, 8);
    assert_eq!(
        names,
        vec![
            "IncompatibleAssignment",
            "OverSubscript",
            "NonIntegerIndex",
            "ArrayAssignment",
            "IncompatibleArgument",
            "ArgumentCountMismatch",
            "AssignToLoopVar",
            "ReturnOutsideFunction",
        ]
    );
}

#[test]
fn test_scopes_are_balanced() {
    let source = include_str!("fixtures/errors.p");
    let (mut ast, root) = parse_source(source, DEFAULT_MAX_NESTING_DEPTH).unwrap();
    let mut symbols = SymbolTable::init();
    let mut diagnostics = Diagnostics::without_source();

    let errors = Analyzer::new(&mut ast, &mut symbols, &mut diagnostics, AnalyzerConfig::default())
        .analyze(root)
        .unwrap();

    assert_eq!(errors, 8);
    assert_eq!(symbols.current_level(), None);
    assert_eq!(symbols.live_count(), 0);
}

#[test]
fn test_inner_scopes_shadow_outer_names() {
    let source = "\
test;
var x : integer;
f(x : real) : real
begin
  var x : string;
  return 1.0;
end
end
begin
  var x : boolean;
  x := true;
end
end
";
    assert_eq!(check(source), (0, vec![]));
}

#[test]
fn test_outer_name_resolves_again_after_inner_scope_closes() {
    let source = "\
test;
var x : integer;
begin
  begin
    var x : string;
    x := \"a\";
  end
  x := 1;
  x := \"b\";
end
end
";
    let mut diagnostics = Diagnostics::without_source();
    let checked = check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();

    assert_eq!(checked.error_count, 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "IncompatibleAssignment");
    assert_eq!(diagnostics.errors()[0].get_location().line, 9);
    assert_eq!(
        diagnostics.errors()[0].to_string(),
        "assigning to 'integer' from incompatible type 'string'"
    );
}

#[test]
fn test_loop_variable_cannot_be_redeclared() {
    let source = "\
test;
begin
  for i := 1 to 2 do
  begin
    var i : integer;
    for i := 3 to 4 do
    begin
    end
    end do
  end
  end do
end
end
";
    let (errors, names) = check(source);

    assert_eq!(errors, 2);
    assert_eq!(names, vec!["SymbolRedeclared", "SymbolRedeclared"]);
}

#[test]
fn test_loop_variable_is_read_only() {
    let source = "\
test;
begin
  for i := 1 to 2 do
  begin
    i := 2;
    read i;
    print i;
  end
  end do
end
end
";
    assert_eq!(
        messages(source),
        vec![
            "the value of loop variable cannot be modified inside the loop body",
            "variable reference of read statement cannot be a constant or loop variable",
        ]
    );
}

#[test]
fn test_integer_coerces_to_real_only() {
    let source = "test;\nvar r : real;\nvar i : integer;\nbegin\nr := 1;\ni := 1.0;\nend\nend\n";

    assert_eq!(
        messages(source),
        vec!["assigning to 'integer' from incompatible type 'real'"]
    );
}

#[test]
fn test_arithmetic_result_types() {
    let source = "\
test;
begin
  print 1 + 2.0;
  print 7 mod 2;
  print 1 < 2.0;
  print \"a\" + \"b\";
  print not (1 = 1) or false;
end
end
";
    let mut diagnostics = Diagnostics::without_source();
    let checked = check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();
    assert_eq!(checked.error_count, 0);

    let types: Vec<Option<ScalarType>> = body_statements(&checked.ast, checked.root)
        .into_iter()
        .map(|statement| match checked.ast.kind(statement) {
            NodeKind::Print(print) => checked.ast.result_type(print.expression),
            _ => panic!("expected print statement"),
        })
        .collect();

    assert_eq!(
        types,
        vec![
            Some(ScalarType::Real),
            Some(ScalarType::Integer),
            Some(ScalarType::Boolean),
            Some(ScalarType::String),
            Some(ScalarType::Boolean),
        ]
    );
}

#[test]
fn test_invalid_operands() {
    let source = "test;\nbegin\nprint true and 1;\nprint 1 + \"a\";\nprint \"a\" - \"b\";\nprint not 1;\nend\nend\n";

    assert_eq!(
        messages(source),
        vec![
            "invalid operands to binary operator 'and' ('boolean' and 'integer')",
            "invalid operands to binary operator '+' ('integer' and 'string')",
            "invalid operands to binary operator '-' ('string' and 'string')",
            "invalid operand to unary operator 'not' ('integer')",
        ]
    );
}

#[test]
fn test_array_subscripts() {
    let source = "\
test;
var a : array 2 of array 3 of real;
var b : array 2 of array 3 of real;
begin
  a[1][2] := 1;
  print a[1][2] * 2;
  print a[1];
  a[true][1] := 1;
  a[1][2][1] := 1;
  a := b;
end
end
";
    let (errors, names) = check(source);

    assert_eq!(errors, 4);
    assert_eq!(
        names,
        vec!["PrintNonScalar", "NonIntegerIndex", "OverSubscript", "ArrayAssignment"]
    );
}

#[test]
fn test_function_arguments() {
    let source = "\
test;
var m : array 4 of array 2 of integer;
scale(v : array 2 of integer; k : real) : real;
avg(n : integer) : real;
begin
  print scale(m[1], 3);
  print scale(m, 3);
  print scale(m[1]);
  print avg(2.5);
  print avg(1, 2);
end
end
";
    assert_eq!(
        messages(source),
        vec![
            "incompatible type passing 'integer [4][2]' to parameter of type 'integer [2]'",
            "too few/much arguments provided for function 'scale'",
            "incompatible type passing 'real' to parameter of type 'integer'",
            "too few/much arguments provided for function 'avg'",
        ]
    );
}

#[test]
fn test_return_context() {
    let source = "\
test;
p()
begin
  return 1;
end
end
f() : integer
begin
  return;
  return \"s\";
  return 2;
end
end
g() : real
begin
  return 2;
end
end
begin
  return;
end
end
";
    assert_eq!(
        messages(source),
        vec![
            "procedure 'p' should not return a value",
            "function 'f' must return a value of type 'integer'",
            "return 'string' from a function with return type 'integer'",
            "return statement is not allowed outside of a function",
        ]
    );
}

#[test]
fn test_real_does_not_coerce_to_integer_on_return() {
    let source = "test;\nf() : integer\nbegin\nreturn 2.5;\nend\nend\nbegin\nend\nend\n";

    assert_eq!(
        messages(source),
        vec!["return 'real' from a function with return type 'integer'"]
    );
}

#[test]
fn test_invocation_takes_the_return_type() {
    let source = "\
test;
var r : real;
f(x : integer) : real
begin
  return x;
end
end
begin
  r := f(3);
end
end
";
    let mut diagnostics = Diagnostics::without_source();
    let checked = check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();
    assert_eq!(checked.error_count, 0);

    let statements = body_statements(&checked.ast, checked.root);
    let NodeKind::Assign(assign) = checked.ast.kind(statements[0]) else {
        panic!("expected assignment");
    };
    assert_eq!(checked.ast.result_type(assign.expression), Some(ScalarType::Real));
}

#[test]
fn test_forward_declaration_then_definition_is_redeclared() {
    let source = "test;\nf() : integer;\nf() : integer\nbegin\nreturn 1;\nend\nend\nbegin\nend\nend\n";

    assert_eq!(check(source), (1, vec!["SymbolRedeclared".to_string()]));
}

#[test]
fn test_diagnostic_rendering() {
    let source = "test;\nbegin\n  print x;\nend\nend\n";
    let mut diagnostics = Diagnostics::new(source).with_echo(false);
    let checked = check_source(source, &AnalyzerConfig::default(), &mut diagnostics).unwrap();

    assert_eq!(checked.error_count, 1);
    assert_eq!(
        diagnostics.render(&diagnostics.errors()[0]),
        "<Error> Found in line 3, column 9: use of undeclared symbol 'x'\n  print x;\n        ^\n"
    );
}

#[test]
fn test_syntax_error_stops_before_analysis() {
    let mut diagnostics = Diagnostics::without_source();
    let error = check_source("test;\nbegin\nprint 1\nend\nend\n", &AnalyzerConfig::default(), &mut diagnostics)
        .unwrap_err();

    assert!(!error.is_fatal());
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_deep_nesting_is_fatal() {
    let nested = format!("{}x{}", "(".repeat(64), ")".repeat(64));
    let source = format!("test;\nbegin\nprint {};\nend\nend\n", nested);
    let config = AnalyzerConfig {
        max_nesting_depth: 32,
        ..AnalyzerConfig::default()
    };

    let mut diagnostics = Diagnostics::without_source();
    let error = check_source(&source, &config, &mut diagnostics).unwrap_err();

    assert!(error.is_fatal());
    assert_eq!(error.get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_limit_counts_tree_depth_in_analysis() {
    let chain = vec!["1"; 40].join(" + ");
    let source = format!("test;\nbegin\nprint {};\nend\nend\n", chain);
    let config = AnalyzerConfig {
        max_nesting_depth: 16,
        ..AnalyzerConfig::default()
    };

    assert!(parse_source(&source, config.max_nesting_depth).is_ok());

    let mut diagnostics = Diagnostics::without_source();
    let error = check_source(&source, &config, &mut diagnostics).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(!diagnostics.has_errors());

    let relaxed = AnalyzerConfig {
        max_nesting_depth: 64,
        ..AnalyzerConfig::default()
    };
    let checked = check_source(&source, &relaxed, &mut diagnostics).unwrap();
    assert_eq!(checked.error_count, 0);
}
