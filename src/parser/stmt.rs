use log::trace;

use crate::{
    ast::{ast::NodeId, types::SymbolKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_function_invocation, parse_integer, parse_literal, parse_variable_reference},
        lookups::BindingPower,
    },
};

use super::{
    parser::Parser,
    types::{parse_scalar_type, parse_type},
};

/// Parses `ID ';' Declaration* Function* CompoundStatement 'end'`.
pub fn parse_program(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect_detailed(TokenKind::Identifier, "expected program name")?;
    parser.expect(TokenKind::Semicolon)?;

    let first_declaration = parse_declarations(parser)?;

    let mut first_function = None;
    while parser.current_token_kind() == TokenKind::Identifier {
        let function = parse_function(parser)?;
        first_function = Some(parser.ast.append_to(first_function, function));
    }

    if parser.current_token_kind() != TokenKind::Begin {
        return Err(parser.unexpected("expected 'begin' of the program body"));
    }
    let body = parse_compound_stmt(parser)?;
    parser.expect_detailed(TokenKind::End, "expected 'end' after the program body")?;

    Ok(parser
        .ast
        .new_program(name.location(), &name.value, first_declaration, first_function, body))
}

fn parse_declarations(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    let mut first = None;
    while parser.current_token_kind() == TokenKind::Var {
        let declaration = parse_declaration(parser)?;
        first = Some(parser.ast.append_to(first, declaration));
    }
    Ok(first)
}

/// Parses `'var' IdList ':' (Type | ['-'] Literal) ';'`.
pub fn parse_declaration(parser: &mut Parser) -> Result<NodeId, Error> {
    let var = parser.expect(TokenKind::Var)?;
    let first_id = parse_id_list(parser)?;
    parser.expect_detailed(TokenKind::Colon, "expected ':' after declared names")?;

    let declaration = if parser.get_type_nud_lookup().contains_key(&parser.current_token_kind()) {
        let type_node = parse_type(parser)?;
        parser
            .ast
            .new_declaration(var.location(), first_id, type_node, SymbolKind::Variable)
    } else {
        let negative = if parser.current_token_kind() == TokenKind::Dash {
            Some(parser.advance())
        } else {
            None
        };
        let literal = parse_literal(parser, negative.as_ref())?;
        parser.ast.new_constant_declaration(var.location(), first_id, literal)
    };

    parser.expect(TokenKind::Semicolon)?;
    Ok(declaration)
}

fn parse_id_list(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.expect_detailed(TokenKind::Identifier, "expected identifier")?;
    let first = parser.ast.new_id(token.location(), &token.value);

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        let token = parser.expect_detailed(TokenKind::Identifier, "expected identifier after ','")?;
        let id = parser.ast.new_id(token.location(), &token.value);
        parser.ast.append_sibling(first, id);
    }

    Ok(first)
}

/// Parses a function definition, or a forward declaration ending in `;`.
pub fn parse_function(parser: &mut Parser) -> Result<NodeId, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    trace!("parse function {}", name.value);
    parser.expect_detailed(TokenKind::OpenParen, "expected '(' after function name")?;

    let mut first_parameter = None;
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let parameter = parse_formal_arg(parser)?;
            first_parameter = Some(parser.ast.append_to(first_parameter, parameter));

            if parser.current_token_kind() != TokenKind::Semicolon {
                break;
            }
            parser.advance();
        }
    }
    parser.expect_detailed(TokenKind::CloseParen, "expected ')' after parameters")?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_scalar_type(parser)?)
    } else {
        None
    };

    let body = if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else {
        let body = parse_compound_stmt(parser)?;
        parser.expect_detailed(TokenKind::End, "expected 'end' after function body")?;
        Some(body)
    };

    Ok(parser
        .ast
        .new_function(name.location(), &name.value, first_parameter, return_type, body))
}

fn parse_formal_arg(parser: &mut Parser) -> Result<NodeId, Error> {
    let location = parser.get_location();
    let first_id = parse_id_list(parser)?;
    parser.expect_detailed(TokenKind::Colon, "expected ':' after parameter names")?;
    let type_node = parse_type(parser)?;

    Ok(parser
        .ast
        .new_declaration(location, first_id, type_node, SymbolKind::Parameter))
}

pub fn parse_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.enter()?;

    let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() else {
        return Err(parser.unexpected("expected statement"));
    };
    let stmt = handler(parser)?;

    parser.leave();
    Ok(stmt)
}

/// Parses `'begin' Declaration* Statement* 'end'`.
pub fn parse_compound_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let begin = parser.expect(TokenKind::Begin)?;
    let first_declaration = parse_declarations(parser)?;

    let mut first_statement = None;
    while parser.current_token_kind() != TokenKind::End {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(parser.unexpected("expected 'end'"));
        }
        let stmt = parse_stmt(parser)?;
        first_statement = Some(parser.ast.append_to(first_statement, stmt));
    }
    parser.advance();

    Ok(parser
        .ast
        .new_compound_statement(begin.location(), first_declaration, first_statement))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.ast.new_print(keyword.location(), expression))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let variable = parse_variable_reference(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.ast.new_read(keyword.location(), variable))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::Then, "expected 'then' after condition")?;
    let then_body = parse_compound_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_compound_stmt(parser)?)
    } else {
        None
    };

    parser.expect_detailed(TokenKind::End, "expected 'end if'")?;
    parser.expect_detailed(TokenKind::If, "expected 'end if'")?;

    Ok(parser
        .ast
        .new_condition(keyword.location(), condition, then_body, else_body))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::Do, "expected 'do' after condition")?;
    let body = parse_compound_stmt(parser)?;
    parser.expect_detailed(TokenKind::End, "expected 'end do'")?;
    parser.expect_detailed(TokenKind::Do, "expected 'end do'")?;

    Ok(parser.ast.new_while(keyword.location(), condition, body))
}

/// Parses `'for' ID ':=' INT 'to' INT 'do' CompoundStatement 'end' 'do'`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let name = parser.expect_detailed(TokenKind::Identifier, "expected loop variable")?;
    let assign = parser.expect_detailed(TokenKind::Assignment, "expected ':=' after loop variable")?;
    let start = parser.expect_detailed(TokenKind::Integer, "expected integer lower bound")?;
    parser.expect_detailed(TokenKind::To, "expected 'to'")?;
    let end = parser.expect_detailed(TokenKind::Integer, "expected integer upper bound")?;
    parser.expect_detailed(TokenKind::Do, "expected 'do' after loop bounds")?;
    let body = parse_compound_stmt(parser)?;
    parser.expect_detailed(TokenKind::End, "expected 'end do'")?;
    parser.expect_detailed(TokenKind::Do, "expected 'end do'")?;

    let (start_value, end_value) = (parse_integer(&start)?, parse_integer(&end)?);
    let loop_var = parser.ast.new_id(name.location(), &name.value);
    let assign = parser.ast.new_id(assign.location(), &assign.value);
    let start = parser.ast.new_int_value(start.location(), start_value);
    let end = parser.ast.new_int_value(end.location(), end_value);

    Ok(parser
        .ast
        .new_for(keyword.location(), loop_var, assign, start, end, body))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword = parser.advance();
    let expression = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.ast.new_return(keyword.location(), expression))
}

/// Statements starting with a name are either calls or assignments.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.peek(1).kind == TokenKind::OpenParen {
        let invocation = parse_function_invocation(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(invocation);
    }

    let variable = parse_variable_reference(parser)?;
    let assign = parser.expect_detailed(TokenKind::Assignment, "expected ':=' in assignment")?;
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.ast.new_assign(assign.location(), variable, expression))
}
