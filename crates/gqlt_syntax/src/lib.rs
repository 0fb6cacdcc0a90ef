//! Syntax layer for gqlt.
//!
//! Lexing and parsing live outside this workspace; this crate only defines
//! the AST node shapes that the type layer reads:
//! - `ast`: documents, operations, fragments, selections and value literals

pub mod ast;

pub use ast::*;
