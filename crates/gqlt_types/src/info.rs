//! Values passed to field resolvers and abstract-type predicates.

use crate::definition::{CompositeType, Type};
use crate::schema::Schema;
use gqlt_core::FormattedError;
use gqlt_syntax::ast;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Execution state for the field being resolved.
///
/// Built by the executor for every resolver call and every `is_type_of` /
/// `resolve_type` invocation.
#[derive(Clone)]
pub struct ResolveInfo<'a> {
    pub field_name: String,
    pub field_asts: Vec<ast::Field>,
    pub return_type: Type<'a>,
    pub parent_type: CompositeType<'a>,
    pub schema: &'a Schema,
    pub fragments: IndexMap<String, ast::FragmentDefinition>,
    pub root_value: Value,
    pub operation: Option<ast::OperationDefinition>,
    pub variable_values: IndexMap<String, Value>,
}

impl<'a> ResolveInfo<'a> {
    pub fn new(
        field_name: impl Into<String>,
        return_type: Type<'a>,
        parent_type: CompositeType<'a>,
        schema: &'a Schema,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_asts: Vec::new(),
            return_type,
            parent_type,
            schema,
            fragments: IndexMap::new(),
            root_value: Value::Null,
            operation: None,
            variable_values: IndexMap::new(),
        }
    }

    pub fn with_field_asts(mut self, field_asts: Vec<ast::Field>) -> Self {
        self.field_asts = field_asts;
        self
    }

    /// Collects the fragment definitions of `document` by name.
    pub fn with_document(mut self, document: &ast::Document) -> Self {
        self.fragments = document
            .fragments()
            .map(|fragment| (fragment.name.value.clone(), fragment.clone()))
            .collect();
        self
    }

    pub fn with_root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }

    pub fn with_operation(mut self, operation: ast::OperationDefinition) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn with_variable_values(mut self, variable_values: IndexMap<String, Value>) -> Self {
        self.variable_values = variable_values;
        self
    }

    pub fn fragment(&self, name: &str) -> Option<&ast::FragmentDefinition> {
        self.fragments.get(name)
    }
}

impl fmt::Debug for ResolveInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveInfo")
            .field("field_name", &self.field_name)
            .field("return_type", &self.return_type.to_string())
            .field("parent_type", &self.parent_type.name())
            .field("fragments", &self.fragments.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Arguments to a field resolver.
#[derive(Debug, Clone)]
pub struct ResolveParams<'a> {
    /// The parent value the field is read from.
    pub source: &'a Value,
    /// Coerced argument values.
    pub args: IndexMap<String, Value>,
    pub info: &'a ResolveInfo<'a>,
    pub context: &'a Context,
}

impl<'a> ResolveParams<'a> {
    pub fn new(source: &'a Value, info: &'a ResolveInfo<'a>, context: &'a Context) -> Self {
        Self {
            source,
            args: IndexMap::new(),
            info,
            context,
        }
    }

    pub fn with_args(mut self, args: IndexMap<String, Value>) -> Self {
        self.args = args;
        self
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Deserializes an argument into `T`.
    pub fn arg_as<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.args
            .get(name)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Request-scoped data shared by every resolver of one execution.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub data: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value in the context. Values that cannot be represented as
    /// JSON are rejected and the previous entry is kept.
    pub fn set<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.data.insert(key.into(), value);
        Ok(())
    }

    /// Gets a value from the context.
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Result of a field resolver.
pub type FieldResult = Result<Value, FieldError>;

/// An error returned by a field resolver.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, Value>>,
}

/// A response path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Sets the `code` extension.
    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_extension("code", Value::String(code.into()))
    }
}

impl From<FieldError> for FormattedError {
    fn from(error: FieldError) -> Self {
        let formatted = FormattedError::new(error.message);
        match error.extensions {
            Some(extensions) => {
                formatted.with_details(Value::Object(extensions.into_iter().collect()))
            }
            None => formatted,
        }
    }
}
