//! Shared primitives for the Theta compiler front end.
//!
//! This crate holds the vocabulary the rest of the compiler agrees on:
//!
//! - [`DataType`]: the closed set of type tags a type declaration can carry
//! - [`CompileError`]: recoverable compilation errors
//! - [`Diagnostics`]: the ordered, session-owned error collector
//!
//! Everything here is independent of the AST representation so that the
//! parser, optimizer, type checker, and code generator can all depend on it
//! without depending on each other.

mod data_type;
mod diagnostics;
mod error;

pub use data_type::DataType;
pub use diagnostics::Diagnostics;
pub use error::CompileError;
