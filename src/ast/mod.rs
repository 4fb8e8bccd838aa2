/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, sibling lists and typed node views
/// - expressions: Literal, expression, variable reference and call payloads
/// - statements: Program, declaration, statement and function payloads
/// - types: Scalar types, symbol kinds, operators and type nodes
/// - printer: The indented text dump
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
