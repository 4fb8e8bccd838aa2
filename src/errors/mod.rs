//! Error types and error reporting for the compiler.
//!
//! This module defines the errors raised by every compilation phase. It includes:
//!
//! - Error structures carrying a source location
//! - Syntax, semantic and fatal error variants with their messages
//! - A diagnostics sink that renders errors against the source line

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
