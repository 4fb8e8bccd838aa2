//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Scalar types (`integer`, `real`, `boolean`, `string`)
//! - Array types, one `array N of` prefix per dimension
//!
//! Type handlers are registered in a lookup table keyed by the first token
//! of the type, the same way expression NUD handlers are.

use std::collections::HashMap;

use crate::{
    ast::{ast::NodeId, types::ScalarType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<NodeId, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::IntegerType, parse_scalar_type);
    parser.type_nud(TokenKind::RealType, parse_scalar_type);
    parser.type_nud(TokenKind::BooleanType, parse_scalar_type);
    parser.type_nud(TokenKind::StringType, parse_scalar_type);
    parser.type_nud(TokenKind::Array, parse_array_type);
}

fn scalar_of(kind: TokenKind) -> Option<ScalarType> {
    match kind {
        TokenKind::IntegerType => Some(ScalarType::Integer),
        TokenKind::RealType => Some(ScalarType::Real),
        TokenKind::BooleanType => Some(ScalarType::Boolean),
        TokenKind::StringType => Some(ScalarType::String),
        _ => None,
    }
}

pub fn parse_scalar_type(parser: &mut Parser) -> Result<NodeId, Error> {
    let Some(scalar) = scalar_of(parser.current_token_kind()) else {
        return Err(parser.unexpected("expected scalar type"));
    };

    let token = parser.advance();
    Ok(parser.ast.new_scalar_type(token.location(), scalar))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<NodeId, Error> {
    let location = parser.get_location();

    let mut first_dimension = None;
    while parser.current_token_kind() == TokenKind::Array {
        parser.advance();
        let size = parser.expect_detailed(TokenKind::Integer, "expected array size")?;
        let value = size.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: size.value.clone(),
                },
                size.location(),
            )
        })?;
        parser.expect_detailed(TokenKind::Of, "expected 'of' after array size")?;

        let dimension = parser.ast.new_int_value(size.location(), value);
        first_dimension = Some(parser.ast.append_to(first_dimension, dimension));
    }

    let Some(scalar) = scalar_of(parser.current_token_kind()) else {
        return Err(parser.unexpected("expected element type of array"));
    };
    parser.advance();

    match first_dimension {
        Some(first) => Ok(parser.ast.new_array_type(location, first, scalar)),
        None => Err(parser.unexpected("expected 'array'")),
    }
}

pub fn parse_type(parser: &mut Parser) -> Result<NodeId, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_location(),
        ));
    };

    handler(parser)
}
