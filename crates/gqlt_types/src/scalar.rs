//! Custom scalar types.

use crate::error::{TypeError, TypeResult};
use crate::name::assert_valid_name;
use gqlt_syntax::ast;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Converts an internal value into its response representation.
pub type SerializeFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Coerces a variable value into the internal representation.
pub type ParseValueFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Coerces a literal from a request document into the internal representation.
pub type ParseLiteralFn = Arc<dyn Fn(&ast::Value) -> Option<Value> + Send + Sync>;

/// Configuration for a scalar.
#[derive(Clone, Default)]
pub struct ScalarConfig {
    pub name: String,
    pub description: Option<String>,
    pub serialize: Option<SerializeFn>,
    pub parse_value: Option<ParseValueFn>,
    pub parse_literal: Option<ParseLiteralFn>,
}

impl ScalarConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_serialize(
        mut self,
        f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.serialize = Some(Arc::new(f));
        self
    }

    pub fn with_parse_value(
        mut self,
        f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_value = Some(Arc::new(f));
        self
    }

    pub fn with_parse_literal(
        mut self,
        f: impl Fn(&ast::Value) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.parse_literal = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ScalarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarConfig")
            .field("name", &self.name)
            .field("serialize", &self.serialize.is_some())
            .field("parse_value", &self.parse_value.is_some())
            .field("parse_literal", &self.parse_literal.is_some())
            .finish_non_exhaustive()
    }
}

/// A validated scalar.
#[derive(Clone)]
pub struct ScalarType {
    name: String,
    description: Option<String>,
    serialize: SerializeFn,
    parse_value: Option<ParseValueFn>,
    parse_literal: Option<ParseLiteralFn>,
}

impl ScalarType {
    /// Validates `config`.
    ///
    /// `serialize` is mandatory. The two parse functions must be supplied
    /// together or not at all; a scalar without them is output-only.
    pub fn new(config: ScalarConfig) -> TypeResult<Self> {
        if config.name.is_empty() {
            return Err(TypeError::Unnamed);
        }
        assert_valid_name(&config.name)?;

        let Some(serialize) = config.serialize else {
            return Err(TypeError::MissingSerialize(config.name));
        };
        if config.parse_value.is_some() != config.parse_literal.is_some() {
            return Err(TypeError::IncompleteParseFunctions(config.name));
        }

        Ok(Self {
            name: config.name,
            description: config.description,
            serialize,
            parse_value: config.parse_value,
            parse_literal: config.parse_literal,
        })
    }

    /// Assembles a scalar whose name and functions are known to be valid.
    pub(crate) fn from_parts(
        name: &str,
        description: &str,
        serialize: SerializeFn,
        parse_value: ParseValueFn,
        parse_literal: ParseLiteralFn,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            serialize,
            parse_value: Some(parse_value),
            parse_literal: Some(parse_literal),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn serialize(&self, value: &Value) -> Option<Value> {
        (self.serialize)(value)
    }

    /// Coerces a variable value. Passes the value through when no parser is set.
    pub fn parse_value(&self, value: &Value) -> Option<Value> {
        match &self.parse_value {
            Some(parse) => parse(value),
            None => Some(value.clone()),
        }
    }

    /// Coerces a literal. Yields `None` when no parser is set.
    pub fn parse_literal(&self, literal: &ast::Value) -> Option<Value> {
        self.parse_literal.as_ref().and_then(|parse| parse(literal))
    }

    /// Whether this scalar can appear in argument and input-field positions.
    pub fn is_input_capable(&self) -> bool {
        self.parse_value.is_some() && self.parse_literal.is_some()
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("input_capable", &self.is_input_capable())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
