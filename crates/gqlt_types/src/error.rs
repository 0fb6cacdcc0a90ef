//! Errors raised while defining types and publishing a schema.
//!
//! Constructors return these instead of storing a nilable error on the type
//! value, so a type that failed validation never enters the graph. Messages
//! are kept stable: hosts surface them verbatim through [`FormattedError`].

use gqlt_core::FormattedError;
use miette::Diagnostic;
use std::fmt::Write;
use thiserror::Error;

/// Result alias for type-definition operations.
pub type TypeResult<T> = Result<T, TypeError>;

/// A definition error local to one type.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Type must be named.")]
    #[diagnostic(code(gqlt::types::unnamed))]
    Unnamed,

    #[error("Names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"{0}\" does not.")]
    #[diagnostic(code(gqlt::types::invalid_name))]
    InvalidName(String),

    #[error("Schema must contain unique named types but contains multiple types named \"{0}\".")]
    #[diagnostic(code(gqlt::types::duplicate_type))]
    DuplicateType(String),

    #[error("Unknown type \"{0}\".")]
    #[diagnostic(code(gqlt::types::unknown_type))]
    UnknownType(String),

    #[error(
        "{0} must provide \"serialize\" function. If this custom Scalar is also used as an \
         input type, ensure \"parseValue\" and \"parseLiteral\" functions are also provided."
    )]
    #[diagnostic(code(gqlt::types::missing_serialize))]
    MissingSerialize(String),

    #[error("{0} must provide both \"parseValue\" and \"parseLiteral\" functions.")]
    #[diagnostic(code(gqlt::types::incomplete_parse_functions))]
    IncompleteParseFunctions(String),

    #[error(
        "{0} fields must be an object with field names as keys or a function which return \
         such an object."
    )]
    #[diagnostic(code(gqlt::types::empty_fields))]
    EmptyFields(String),

    #[error("{owner}.{field} field type must be Output Type but got: {ty}.")]
    #[diagnostic(code(gqlt::types::field_not_output))]
    FieldNotOutput {
        owner: String,
        field: String,
        ty: String,
    },

    #[error("{owner}.{field}({argument}:) argument type must be Input Type but got: {ty}.")]
    #[diagnostic(code(gqlt::types::argument_not_input))]
    ArgumentNotInput {
        owner: String,
        field: String,
        argument: String,
        ty: String,
    },

    #[error("{owner}.{field} field type must be Input Type but got: {ty}.")]
    #[diagnostic(code(gqlt::types::input_field_not_input))]
    InputFieldNotInput {
        owner: String,
        field: String,
        ty: String,
    },

    #[error("{object} may only implement Interface types, it cannot implement: {name}.")]
    #[diagnostic(code(gqlt::types::not_an_interface))]
    NotAnInterface { object: String, name: String },

    #[error(
        "Interface Type {interface} does not provide a \"resolveType\" function and \
         implementing Type {object} does not provide a \"isTypeOf\" function. There is no way \
         to resolve this implementing type during execution."
    )]
    #[diagnostic(code(gqlt::types::unresolvable_implementation))]
    UnresolvableImplementation { interface: String, object: String },

    #[error("Must provide Array of types for Union {0}.")]
    #[diagnostic(code(gqlt::types::empty_union))]
    EmptyUnion(String),

    #[error("{union_type} may only contain Object types, it cannot contain: {name}.")]
    #[diagnostic(code(gqlt::types::not_an_object))]
    NotAnObject { union_type: String, name: String },

    #[error(
        "Union Type {union_type} does not provide a \"resolveType\" function and possible \
         Type {object} does not provide a \"isTypeOf\" function. There is no way to resolve \
         this possible type during execution."
    )]
    #[diagnostic(code(gqlt::types::unresolvable_member))]
    UnresolvableMember { union_type: String, object: String },

    #[error("{0} values must be an object with value names as keys.")]
    #[diagnostic(code(gqlt::types::empty_enum))]
    EmptyEnum(String),

    #[error("Can only create NonNull of a Nullable Type but got: {0}.")]
    #[diagnostic(code(gqlt::types::non_null_of_non_null))]
    NonNullOfNonNull(String),

    #[error(
        "Cannot add field \"{field}\" to {type_name}: only Object and Interface types have \
         fields."
    )]
    #[diagnostic(code(gqlt::types::cannot_add_field))]
    CannotAddField { type_name: String, field: String },

    #[error("\"{interface}\" expects field \"{field}\" but \"{object}\" does not provide it.")]
    #[diagnostic(code(gqlt::types::missing_interface_field))]
    MissingInterfaceField {
        interface: String,
        object: String,
        field: String,
    },

    #[error(
        "{interface}.{field} expects type \"{expected}\" but {object}.{field} provides type \
         \"{found}\"."
    )]
    #[diagnostic(code(gqlt::types::interface_field_mismatch))]
    InterfaceFieldMismatch {
        interface: String,
        object: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error(
        "{interface}.{field} expects argument \"{argument}\" but {object}.{field} does not \
         provide it."
    )]
    #[diagnostic(code(gqlt::types::missing_interface_argument))]
    MissingInterfaceArgument {
        interface: String,
        object: String,
        field: String,
        argument: String,
    },

    #[error(
        "{interface}.{field}({argument}:) expects type \"{expected}\" but \
         {object}.{field}({argument}:) provides type \"{found}\"."
    )]
    #[diagnostic(code(gqlt::types::interface_argument_mismatch))]
    InterfaceArgumentMismatch {
        interface: String,
        object: String,
        field: String,
        argument: String,
        expected: String,
        found: String,
    },

    #[error("Schema query must be Object Type but got: {0}.")]
    #[diagnostic(code(gqlt::types::invalid_query_root))]
    InvalidQueryRoot(String),

    #[error("Schema mutation must be Object Type but got: {0}.")]
    #[diagnostic(code(gqlt::types::invalid_mutation_root))]
    InvalidMutationRoot(String),
}

impl From<&TypeError> for FormattedError {
    fn from(error: &TypeError) -> Self {
        FormattedError::new(error.to_string())
    }
}

impl From<TypeError> for FormattedError {
    fn from(error: TypeError) -> Self {
        FormattedError::from(&error)
    }
}

/// Publication failed: one or more registered types are invalid.
///
/// Errors are collected across all types so a host can report every broken
/// definition at startup instead of fixing them one at a time.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{}", display_errors(.errors))]
#[diagnostic(code(gqlt::types::invalid_schema))]
pub struct SchemaError {
    #[related]
    pub errors: Vec<TypeError>,
}

impl SchemaError {
    pub fn new(errors: Vec<TypeError>) -> Self {
        Self { errors }
    }

    /// Formats every collected error into the client envelope.
    pub fn formatted(&self) -> Vec<FormattedError> {
        self.errors.iter().map(FormattedError::from).collect()
    }
}

impl From<TypeError> for SchemaError {
    fn from(error: TypeError) -> Self {
        Self::new(vec![error])
    }
}

fn display_errors(errors: &[TypeError]) -> String {
    match errors {
        [single] => single.to_string(),
        errors => {
            let mut out = format!("schema has {} invalid definitions", errors.len());
            for error in errors {
                let _ = write!(out, "\n  - {error}");
            }
            out
        }
    }
}
