//! Enum types.

use crate::error::{TypeError, TypeResult};
use crate::name::assert_valid_name;
use gqlt_syntax::ast;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;

/// Configuration for a single enum value.
#[derive(Debug, Clone, Default)]
pub struct EnumValueConfig {
    /// Internal value. Defaults to the value's name.
    pub value: Option<Value>,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
}

impl EnumValueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

/// Configuration for an enum.
#[derive(Debug, Clone, Default)]
pub struct EnumConfig {
    pub name: String,
    pub description: Option<String>,
    pub values: IndexMap<String, EnumValueConfig>,
}

impl EnumConfig {
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

    pub fn with_value(mut self, name: impl Into<String>, config: EnumValueConfig) -> Self {
        self.values.insert(name.into(), config);
        self
    }
}

/// A published enum value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub name: String,
    pub value: Value,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
}

impl EnumValueDefinition {
    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }
}

/// A validated enum with its lookup tables built.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    description: Option<String>,
    values: Vec<EnumValueDefinition>,
    by_name: FxHashMap<String, usize>,
    /// Keyed by the compact JSON encoding of the internal value.
    by_value: FxHashMap<String, usize>,
}

impl EnumType {
    pub fn new(config: EnumConfig) -> TypeResult<Self> {
        if config.name.is_empty() {
            return Err(TypeError::Unnamed);
        }
        assert_valid_name(&config.name)?;
        if config.values.is_empty() {
            return Err(TypeError::EmptyEnum(config.name));
        }

        let mut values = config
            .values
            .into_iter()
            .map(|(name, value)| {
                assert_valid_name(&name)?;
                Ok(EnumValueDefinition {
                    value: value.value.unwrap_or_else(|| Value::String(name.clone())),
                    name,
                    description: value.description,
                    deprecation_reason: value.deprecation_reason,
                })
            })
            .collect::<TypeResult<Vec<_>>>()?;
        values.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_name = FxHashMap::default();
        let mut by_value = FxHashMap::default();
        for (index, value) in values.iter().enumerate() {
            by_name.insert(value.name.clone(), index);
            // Later values win when internal values collide.
            by_value.insert(value_key(&value.value), index);
        }

        Ok(Self {
            name: config.name,
            description: config.description,
            values,
            by_name,
            by_value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Values sorted by name.
    pub fn values(&self) -> &[EnumValueDefinition] {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&EnumValueDefinition> {
        self.by_name.get(name).map(|&index| &self.values[index])
    }

    /// Maps an internal value to its name.
    pub fn serialize(&self, value: &Value) -> Option<Value> {
        self.by_value
            .get(&value_key(value))
            .map(|&index| Value::String(self.values[index].name.clone()))
    }

    /// Maps a value name supplied as a variable to its internal value.
    pub fn parse_value(&self, value: &Value) -> Option<Value> {
        let name = value.as_str()?;
        self.value(name).map(|def| def.value.clone())
    }

    /// Maps an enum literal to its internal value. Other literal kinds yield `None`.
    pub fn parse_literal(&self, literal: &ast::Value) -> Option<Value> {
        let name = literal.as_enum()?;
        self.value(name).map(|def| def.value.clone())
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn value_key(value: &Value) -> String {
    value.to_string()
}
