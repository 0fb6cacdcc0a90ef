//! Interface types.

use crate::build::KindTable;
use crate::error::TypeResult;
use crate::field::{define_field_map, FieldConfig, FieldConfigMap, FieldDefinition};
use crate::info::ResolveInfo;
use crate::object::{extend_thunk, ObjectType};
use crate::thunk::Thunk;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Maps a runtime value to the name of its concrete object type.
pub type ResolveTypeFn = Arc<dyn Fn(&Value, &ResolveInfo<'_>) -> Option<String> + Send + Sync>;

/// Configuration for an interface type.
pub struct InterfaceConfig {
    pub name: String,
    pub description: Option<String>,
    pub fields: Thunk<FieldConfigMap>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl InterfaceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Thunk::default(),
            resolve_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<Thunk<FieldConfigMap>>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldConfig) -> Self {
        self.fields = extend_thunk(self.fields, name.into(), field);
        self
    }

    pub fn with_resolve_type(
        mut self,
        f: impl Fn(&Value, &ResolveInfo<'_>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for InterfaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceConfig")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}

/// A published interface type.
#[derive(Clone)]
pub struct InterfaceType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, FieldDefinition>,
    resolve_type: Option<ResolveTypeFn>,
    implementations: Vec<Arc<ObjectType>>,
    possible: FxHashSet<String>,
}

impl InterfaceType {
    /// Builds the field map and records every object in `objects` that
    /// declares this interface, keeping their order.
    pub(crate) fn define(
        config: InterfaceConfig,
        added: FieldConfigMap,
        objects: &[Arc<ObjectType>],
        kinds: &KindTable,
    ) -> TypeResult<Self> {
        let mut field_configs = config.fields.resolve();
        field_configs.extend(added);
        let fields = define_field_map(&config.name, field_configs, kinds)?;

        let implementations: Vec<_> = objects
            .iter()
            .filter(|object| object.implements(&config.name))
            .cloned()
            .collect();
        let possible = implementations
            .iter()
            .map(|object| object.name().to_string())
            .collect();

        Ok(Self {
            name: config.name,
            description: config.description,
            fields,
            resolve_type: config.resolve_type,
            implementations,
            possible,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Implementing objects in registration order.
    pub fn implementations(&self) -> &[Arc<ObjectType>] {
        &self.implementations
    }

    pub fn is_possible_type(&self, object: &str) -> bool {
        self.possible.contains(object)
    }

    pub fn has_resolve_type(&self) -> bool {
        self.resolve_type.is_some()
    }

    pub(crate) fn resolve_type_fn(&self) -> Option<&ResolveTypeFn> {
        self.resolve_type.as_ref()
    }
}

impl fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field(
                "implementations",
                &self.implementations.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .field("resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
