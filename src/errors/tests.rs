//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Location;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Location::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_location() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        Location::new(4, 42),
    );

    assert_eq!(error.get_location().line, 4);
    assert_eq!(error.get_location().col, 42);
}

#[test]
fn test_semantic_messages() {
    let error = Error::new(
        ErrorImpl::SymbolRedeclared {
            name: "a".to_string(),
        },
        Location::new(1, 1),
    );
    assert_eq!(error.to_string(), "symbol 'a' is redeclared");

    let error = Error::new(
        ErrorImpl::InvalidBinaryOperands {
            operator: "+".to_string(),
            left: "integer".to_string(),
            right: "string".to_string(),
        },
        Location::new(1, 1),
    );
    assert_eq!(
        error.to_string(),
        "invalid operands to binary operator '+' ('integer' and 'string')"
    );

    let error = Error::new(
        ErrorImpl::IncompatibleArgument {
            argument: "real [3]".to_string(),
            parameter: "integer [3]".to_string(),
        },
        Location::new(1, 1),
    );
    assert_eq!(
        error.to_string(),
        "incompatible type passing 'real [3]' to parameter of type 'integer [3]'"
    );
}

#[test]
fn test_only_nesting_is_fatal() {
    let fatal = Error::new(ErrorImpl::NestingTooDeep { limit: 8 }, Location::null());
    let counted = Error::new(ErrorImpl::PrintNonScalar, Location::null());

    assert!(fatal.is_fatal());
    assert!(!counted.is_fatal());
}

#[test]
fn test_error_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "x".to_string(),
        },
        Location::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert!(msg.contains("Unexpected token")),
        ErrorTip::None => panic!("Expected suggestion"),
    }

    let error = Error::new(ErrorImpl::NonIntegerIndex, Location::null());
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_only_stopping_errors_have_tips() {
    let fatal = Error::new(ErrorImpl::NestingTooDeep { limit: 8 }, Location::null());
    assert!(matches!(fatal.get_tip(), ErrorTip::Suggestion(_)));

    let counted = [
        ErrorImpl::AssignToLoopVar,
        ErrorImpl::ReadConstantOrLoopVar,
        ErrorImpl::ArgumentCountMismatch {
            function: "f".to_string(),
        },
        ErrorImpl::UndeclaredSymbol {
            name: "x".to_string(),
        },
    ];
    for error_impl in counted {
        let error = Error::new(error_impl, Location::null());
        assert!(!error.is_fatal());
        assert!(matches!(error.get_tip(), ErrorTip::None), "{}", error.get_error_name());
    }
}

#[test]
fn test_diagnostics_render() {
    let diagnostics = Diagnostics::new("test;\nbegin\n  x := 1;\nend\nend\n").with_echo(false);
    let error = Error::new(
        ErrorImpl::UndeclaredSymbol {
            name: "x".to_string(),
        },
        Location::new(3, 3),
    );

    assert_eq!(
        diagnostics.render(&error),
        "<Error> Found in line 3, column 3: use of undeclared symbol 'x'\n  x := 1;\n  ^\n"
    );
}

#[test]
fn test_diagnostics_without_source() {
    let mut diagnostics = Diagnostics::without_source();
    let error = Error::new(ErrorImpl::ArrayAssignment, Location::new(7, 1));

    assert_eq!(
        diagnostics.render(&error),
        "<Error> Found in line 7, column 1: array assignment is not allowed\n\n^\n"
    );

    diagnostics.report(error);
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.has_errors());
}
