//! Input object types.

use crate::build::KindTable;
use crate::error::{TypeError, TypeResult};
use crate::name::is_valid_name;
use crate::thunk::Thunk;
use crate::type_ref::TypeRef;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Input field configurations keyed by field name.
pub type InputFieldConfigMap = IndexMap<String, InputFieldConfig>;

/// Configuration for an input object field.
#[derive(Debug, Clone)]
pub struct InputFieldConfig {
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

impl InputFieldConfig {
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            default_value: None,
            description: None,
        }
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Configuration for an input object type.
pub struct InputObjectConfig {
    pub name: String,
    pub description: Option<String>,
    pub fields: Thunk<InputFieldConfigMap>,
}

impl InputObjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Thunk::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<Thunk<InputFieldConfigMap>>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, field: InputFieldConfig) -> Self {
        let name = name.into();
        self.fields = match self.fields {
            Thunk::Value(mut map) => {
                map.insert(name, field);
                Thunk::Value(map)
            }
            Thunk::Lazy(f) => Thunk::lazy(move || {
                let mut map = f();
                map.insert(name, field);
                map
            }),
        };
        self
    }
}

impl fmt::Debug for InputObjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputObjectConfig")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// A published input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectField {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

/// A published input object type.
#[derive(Debug, Clone)]
pub struct InputObjectType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, InputObjectField>,
}

impl InputObjectType {
    /// Builds the field map.
    ///
    /// Unlike object fields, an invalid entry is dropped with a warning and
    /// the remaining fields are kept.
    pub(crate) fn define(config: InputObjectConfig, kinds: &KindTable) -> TypeResult<Self> {
        let configs = config.fields.resolve();
        if configs.is_empty() {
            return Err(TypeError::EmptyFields(config.name));
        }

        let mut fields = IndexMap::with_capacity(configs.len());
        for (name, field) in configs {
            if !is_valid_name(&name) {
                tracing::warn!(
                    type_name = %config.name,
                    field = %name,
                    "skipping input field with invalid name"
                );
                continue;
            }
            match kinds.accepts_input(&field.ty) {
                Ok(true) => {}
                Ok(false) => {
                    let err = TypeError::InputFieldNotInput {
                        owner: config.name.clone(),
                        field: name,
                        ty: field.ty.to_string(),
                    };
                    tracing::warn!(type_name = %config.name, "skipping input field: {err}");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(
                        type_name = %config.name,
                        field = %name,
                        "skipping input field: {err}"
                    );
                    continue;
                }
            }

            fields.insert(
                name.clone(),
                InputObjectField {
                    name,
                    ty: field.ty,
                    default_value: field.default_value,
                    description: field.description,
                },
            );
        }

        Ok(Self {
            name: config.name,
            description: config.description,
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, InputObjectField> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&InputObjectField> {
        self.fields.get(name)
    }
}

impl fmt::Display for InputObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
