#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::{Ast, NodeId},
    errors::{diagnostics::Diagnostics, errors::Error},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{
        symbol_table::SymbolTable,
        type_checker::{Analyzer, AnalyzerConfig},
    },
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A 1-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub line: u32,
    pub col: u32,
}

impl Location {
    pub fn new(line: u32, col: u32) -> Self {
        Location { line, col }
    }

    /// Location used for nodes that have no source text of their own.
    pub fn null() -> Self {
        Location { line: 0, col: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<line: {}, col: {}>", self.line, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

/// The result of running a source file through the whole front end.
#[derive(Debug)]
pub struct Checked {
    pub ast: Ast,
    pub root: NodeId,
    pub error_count: usize,
}

/// Tokenizes and parses `source` into an AST, returning the program node.
pub fn parse_source(source: &str, max_depth: usize) -> Result<(Ast, NodeId), Error> {
    let tokens = tokenize(source)?;
    parse(tokens, max_depth)
}

/// Parses and semantically checks `source`.
///
/// Semantic errors are reported through `diagnostics` and counted in the
/// returned [`Checked`]; only syntax errors and fatal conditions are `Err`.
pub fn check_source(
    source: &str,
    config: &AnalyzerConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Checked, Error> {
    let (mut ast, root) = parse_source(source, config.max_nesting_depth)?;

    let mut symbols = SymbolTable::init();
    let error_count = Analyzer::new(&mut ast, &mut symbols, diagnostics, config.clone()).analyze(root)?;
    symbols.teardown();

    Ok(Checked {
        ast,
        root,
        error_count,
    })
}
