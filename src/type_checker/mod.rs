//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the AST in a single walk:
//!
//! - Maintaining nested scopes in a symbol table
//! - Detecting redeclared, undeclared and misused symbols
//! - Inferring expression types and writing them back into the tree
//! - Checking assignments, calls, returns and loop headers
//!
//! Errors are reported through a diagnostics sink and counted, so one run
//! reports every independent problem in a program.

pub mod expressions;
pub mod symbol_table;
pub mod type_checker;
