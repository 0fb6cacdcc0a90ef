//! Object types.

use crate::build::KindTable;
use crate::definition::TypeKind;
use crate::error::{TypeError, TypeResult};
use crate::field::{define_field_map, FieldConfig, FieldConfigMap, FieldDefinition};
use crate::info::ResolveInfo;
use crate::schema::BuildOptions;
use crate::thunk::Thunk;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Decides whether a runtime value belongs to an object type.
pub type IsTypeOfFn = Arc<dyn Fn(&Value, &ResolveInfo<'_>) -> bool + Send + Sync>;

/// Configuration for an object type.
pub struct ObjectConfig {
    pub name: String,
    pub description: Option<String>,
    pub fields: Thunk<FieldConfigMap>,
    /// Names of the implemented interfaces.
    pub interfaces: Thunk<Vec<String>>,
    pub is_type_of: Option<IsTypeOfFn>,
}

impl ObjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Thunk::default(),
            interfaces: Thunk::default(),
            is_type_of: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the field map. Pass [`Thunk::lazy`] for maps that name types
    /// registered later.
    pub fn with_fields(mut self, fields: impl Into<Thunk<FieldConfigMap>>) -> Self {
        self.fields = fields.into();
        self
    }

    /// Adds a single field on top of the configured map.
    pub fn with_field(mut self, name: impl Into<String>, field: FieldConfig) -> Self {
        self.fields = extend_thunk(self.fields, name.into(), field);
        self
    }

    pub fn with_interfaces(mut self, interfaces: impl Into<Thunk<Vec<String>>>) -> Self {
        self.interfaces = interfaces.into();
        self
    }

    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.interfaces = match self.interfaces {
            Thunk::Value(mut names) => {
                names.push(name);
                Thunk::Value(names)
            }
            Thunk::Lazy(f) => Thunk::lazy(move || {
                let mut names = f();
                names.push(name);
                names
            }),
        };
        self
    }

    pub fn with_is_type_of(
        mut self,
        f: impl Fn(&Value, &ResolveInfo<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_type_of = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for ObjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectConfig")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("interfaces", &self.interfaces)
            .field("is_type_of", &self.is_type_of.is_some())
            .finish_non_exhaustive()
    }
}

pub(crate) fn extend_thunk(
    fields: Thunk<FieldConfigMap>,
    name: String,
    field: FieldConfig,
) -> Thunk<FieldConfigMap> {
    match fields {
        Thunk::Value(mut map) => {
            map.insert(name, field);
            Thunk::Value(map)
        }
        Thunk::Lazy(f) => Thunk::lazy(move || {
            let mut map = f();
            map.insert(name, field);
            map
        }),
    }
}

/// A published object type.
#[derive(Clone)]
pub struct ObjectType {
    name: String,
    description: Option<String>,
    fields: IndexMap<String, FieldDefinition>,
    interfaces: Vec<String>,
    is_type_of: Option<IsTypeOfFn>,
}

impl ObjectType {
    /// Resolves both thunks and validates the object against the classified
    /// registry. Fields added through the registry override same-named ones.
    pub(crate) fn define(
        config: ObjectConfig,
        added: FieldConfigMap,
        kinds: &KindTable,
        options: &BuildOptions,
    ) -> TypeResult<Self> {
        let interfaces = define_interfaces(
            &config.name,
            config.interfaces.resolve(),
            config.is_type_of.is_some(),
            kinds,
            options,
        )?;

        let mut field_configs = config.fields.resolve();
        field_configs.extend(added);
        let fields = define_field_map(&config.name, field_configs, kinds)?;

        Ok(Self {
            name: config.name,
            description: config.description,
            fields,
            interfaces,
            is_type_of: config.is_type_of,
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

    /// Names of the implemented interfaces, in declaration order.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface)
    }

    pub fn has_is_type_of(&self) -> bool {
        self.is_type_of.is_some()
    }

    /// Runs the `is_type_of` predicate. `None` when the object has none.
    pub fn is_type_of(&self, value: &Value, info: &ResolveInfo<'_>) -> Option<bool> {
        self.is_type_of.as_ref().map(|f| f(value, info))
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("interfaces", &self.interfaces)
            .field("is_type_of", &self.is_type_of.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validates the interface list of `object`.
///
/// With `require_interface_resolve_type` set, every interface must declare
/// `resolve_type` whatever the object provides. Otherwise an object
/// `is_type_of` is accepted in its place.
fn define_interfaces(
    object: &str,
    names: Vec<String>,
    has_is_type_of: bool,
    kinds: &KindTable,
    options: &BuildOptions,
) -> TypeResult<Vec<String>> {
    let mut interfaces = Vec::with_capacity(names.len());
    for name in names {
        match kinds.kind(&name) {
            None => return Err(TypeError::UnknownType(name)),
            Some(TypeKind::Interface) => {}
            Some(_) => {
                return Err(TypeError::NotAnInterface {
                    object: object.to_string(),
                    name,
                })
            }
        }

        let resolvable = kinds.has_resolve_type(&name)
            || (!options.require_interface_resolve_type && has_is_type_of);
        if !resolvable {
            return Err(TypeError::UnresolvableImplementation {
                interface: name,
                object: object.to_string(),
            });
        }

        if !interfaces.contains(&name) {
            interfaces.push(name);
        }
    }
    Ok(interfaces)
}
