//! Core utilities for gqlt.
//!
//! This crate provides foundational types used throughout gqlt:
//! - `span`: Byte-offset source spans
//! - `location`: Line/column source locations
//! - `error`: The client-facing formatted error envelope

pub mod error;
pub mod location;
pub mod span;

pub use error::{format_error, format_errors, FormattedError, LocatedError};
pub use location::SourceLocation;
pub use span::Span;
