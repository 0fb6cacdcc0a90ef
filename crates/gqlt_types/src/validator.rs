//! Document validation against a schema.

use crate::schema::Schema;
use gqlt_core::FormattedError;
use gqlt_syntax::ast;
use serde::Serialize;

/// The outcome of validating a request document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FormattedError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Valid exactly when `errors` is empty.
    pub fn from_errors(errors: Vec<FormattedError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates `document` against `schema`.
///
/// No rules are implemented yet; every document is accepted.
pub fn validate_document(schema: &Schema, document: &ast::Document) -> ValidationResult {
    tracing::trace!(
        query = schema.query_type().name(),
        definitions = document.definitions.len(),
        "validating document"
    );
    ValidationResult::valid()
}
