//! Code generation module for the compiler.
//!
//! This module holds the lowering pass that runs after semantic analysis.
//! It dispatches over every node kind; no target backend is wired in, so
//! lowering currently produces no output.

pub mod compiler;
