//! The client-facing error envelope.
//!
//! Every failure that crosses the boundary of the type layer (construction
//! errors, resolver errors surfaced by an executor) is eventually turned into
//! a [`FormattedError`], which serializes to the usual GraphQL error shape:
//!
//! ```json
//! { "message": "...", "locations": [{ "line": 1, "column": 3 }] }
//! ```

use crate::location::SourceLocation;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;

/// A formatted error, ready to be serialized into a response.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct FormattedError {
    /// Human-readable error message.
    pub message: String,
    /// Locations in the request document the error refers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    /// Additional structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FormattedError {
    /// Creates a new formatted error with no locations.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            details: None,
        }
    }

    /// Adds a location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.locations.push(location);
        self
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// An error tied to one or more places in a request document.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct LocatedError {
    pub message: String,
    pub locations: Vec<SourceLocation>,
}

impl LocatedError {
    /// Creates a located error without locations.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    /// Creates a located error from AST spans, resolving each against `source`.
    pub fn at_spans(message: impl Into<String>, source: &str, spans: &[Span]) -> Self {
        Self {
            message: message.into(),
            locations: spans.iter().map(|span| span.location(source)).collect(),
        }
    }
}

/// Formats an arbitrary error into the client envelope.
///
/// A `FormattedError` is returned unchanged and a `LocatedError` keeps its
/// locations; anything else is reduced to its display message.
pub fn format_error(err: &(dyn Error + 'static)) -> FormattedError {
    if let Some(formatted) = err.downcast_ref::<FormattedError>() {
        return formatted.clone();
    }

    let locations = err
        .downcast_ref::<LocatedError>()
        .map(|located| located.locations.clone())
        .unwrap_or_default();

    FormattedError {
        message: err.to_string(),
        locations,
        details: None,
    }
}

/// Formats a list of errors.
pub fn format_errors<E: Error + 'static>(errors: &[E]) -> Vec<FormattedError> {
    errors.iter().map(|err| format_error(err)).collect()
}
