use crate::{
    ast::{ast::NodeId, types::Operator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression with the Pratt loop.
///
/// # Arguments
///
/// * `parser` - The parser positioned at the first token of the expression
/// * `bp` - Binding power of the enclosing operator; only operators binding
///   tighter than it extend the expression
///
/// # Returns
///
/// Returns the root node of the parsed expression, or the first syntax Error.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    parser.enter()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected expression"));
    };
    let mut left = nud(parser)?;

    // While the current token binds tighter than bp, keep extending lhs
    while let Some(&next_bp) = parser.get_bp_lookup().get(&parser.current_token_kind()) {
        if next_bp <= bp {
            break;
        }

        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("expected operator"));
        };
        left = led(parser, left, next_bp)?;
    }

    parser.leave();
    Ok(left)
}

/// Parses an integer token's text.
///
/// # Returns
///
/// Returns the value, or a `NumberParseError` when it does not fit an `i32`.
pub fn parse_integer(token: &Token) -> Result<i32, Error> {
    token.value.parse().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.location(),
        )
    })
}

fn parse_real(token: &Token) -> Result<f64, Error> {
    token.value.parse().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.location(),
        )
    })
}

/// Parses a literal token into a literal node.
///
/// # Arguments
///
/// * `parser` - The parser positioned at the literal token
/// * `negative` - The minus sign preceding the literal, if any. Numeric
///   literals are negated and located at it; other literals are rejected.
///
/// # Returns
///
/// Returns the literal node, or an Error if the token is not a literal.
pub fn parse_literal(parser: &mut Parser, negative: Option<&Token>) -> Result<NodeId, Error> {
    let token = parser.current_token().clone();
    let location = negative.map(|minus| minus.location()).unwrap_or(token.location());

    let negate = negative.is_some();

    let literal = match token.kind {
        TokenKind::Integer => {
            let value = parse_integer(&token)?;
            parser.ast.new_integer_literal(location, if negate { -value } else { value })
        }
        TokenKind::Real => {
            let value = parse_real(&token)?;
            parser.ast.new_real_literal(location, if negate { -value } else { value })
        }
        TokenKind::String if !negate => parser.ast.new_string_literal(location, &token.value),
        TokenKind::True if !negate => parser.ast.new_boolean_literal(location, true),
        TokenKind::False if !negate => parser.ast.new_boolean_literal(location, false),
        _ => return Err(parser.unexpected("expected literal constant")),
    };

    parser.advance();
    Ok(literal)
}

/// Parses a literal and wraps it in a constant expression.
pub fn parse_literal_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let location = parser.get_location();
    let literal = parse_literal(parser, None)?;
    Ok(parser.ast.new_expression(location, Operator::Constant, Some(literal), None))
}

/// Parses `ID ('[' Expr ']')*` into a variable reference node.
pub fn parse_variable_reference(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect_detailed(TokenKind::Identifier, "expected variable name")?;

    let mut first_index = None;
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let index = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseBracket)?;
        first_index = Some(parser.ast.append_to(first_index, index));
    }

    Ok(parser.ast.new_variable_reference(name.location(), &name.value, first_index))
}

/// Parses `ID '(' [Expr (',' Expr)*] ')'` into a function invocation node.
pub fn parse_function_invocation(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect_detailed(TokenKind::Identifier, "expected function name")?;
    parser.expect(TokenKind::OpenParen)?;

    let mut first_argument = None;
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let argument = parse_expr(parser, BindingPower::Default)?;
            first_argument = Some(parser.ast.append_to(first_argument, argument));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    parser.expect_detailed(TokenKind::CloseParen, "expected ')' after arguments")?;

    Ok(parser.ast.new_function_invocation(name.location(), &name.value, first_argument))
}

/// Parses an identifier in expression position.
///
/// An identifier followed by `(` is a function invocation; anything else is
/// a variable reference. Either is wrapped in an expression node.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let location = parser.get_location();

    if parser.peek(1).kind == TokenKind::OpenParen {
        let invocation = parse_function_invocation(parser)?;
        return Ok(parser.ast.new_expression(
            location,
            Operator::FunctionInvocation,
            Some(invocation),
            None,
        ));
    }

    let reference = parse_variable_reference(parser)?;
    Ok(parser.ast.new_expression(
        location,
        Operator::VariableReference,
        Some(reference),
        None,
    ))
}

/// Parses `'(' Expr ')'`, returning the inner expression unwrapped.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::CloseParen, "expected ')' to close the group")?;

    Ok(expr)
}

/// Parses a unary `-` or `not` and its operand.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let operator_token = parser.advance();
    let (operator, bp) = match operator_token.kind {
        TokenKind::Not => (Operator::Not, BindingPower::Not),
        _ => (Operator::Negate, BindingPower::Unary),
    };

    let rhs = parse_expr(parser, bp)?;
    Ok(parser.ast.new_expression(operator_token.location(), operator, None, Some(rhs)))
}

/// Parses the right-hand side of an infix operator.
///
/// # Arguments
///
/// * `parser` - The parser positioned at the operator token
/// * `left` - The already parsed left operand
/// * `bp` - The operator's binding power
///
/// # Returns
///
/// Returns the binary expression node, or an Error if the token is not a
/// binary operator.
pub fn parse_binary_expr(parser: &mut Parser, left: NodeId, bp: BindingPower) -> Result<NodeId, Error> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Plus => Operator::Add,
        TokenKind::Dash => Operator::Subtract,
        TokenKind::Star => Operator::Multiply,
        TokenKind::Slash => Operator::Divide,
        TokenKind::Mod => Operator::Mod,
        TokenKind::And => Operator::And,
        TokenKind::Or => Operator::Or,
        TokenKind::Less => Operator::Less,
        TokenKind::LessEquals => Operator::LessEqual,
        TokenKind::Equals => Operator::Equal,
        TokenKind::GreaterEquals => Operator::GreaterEqual,
        TokenKind::Greater => Operator::Greater,
        TokenKind::NotEquals => Operator::NotEqual,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(parser.ast.new_expression(operator_token.location(), operator, Some(left), Some(right)))
}
