use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Location, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("array", TokenKind::Array);
        map.insert("begin", TokenKind::Begin);
        map.insert("boolean", TokenKind::BooleanType);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("end", TokenKind::End);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("if", TokenKind::If);
        map.insert("integer", TokenKind::IntegerType);
        map.insert("mod", TokenKind::Mod);
        map.insert("not", TokenKind::Not);
        map.insert("of", TokenKind::Of);
        map.insert("or", TokenKind::Or);
        map.insert("print", TokenKind::Print);
        map.insert("read", TokenKind::Read);
        map.insert("real", TokenKind::RealType);
        map.insert("return", TokenKind::Return);
        map.insert("string", TokenKind::StringType);
        map.insert("then", TokenKind::Then);
        map.insert("to", TokenKind::To);
        map.insert("true", TokenKind::True);
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Real,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // :=
    Equals,     // =
    NotEquals,  // <>
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    And,
    Array,
    Begin,
    BooleanType,
    Do,
    Else,
    End,
    False,
    For,
    If,
    IntegerType,
    Mod,
    Not,
    Of,
    Or,
    Print,
    Read,
    RealType,
    Return,
    StringType,
    Then,
    To,
    True,
    Var,
    While,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn location(&self) -> Location {
        self.span.start
    }
}
