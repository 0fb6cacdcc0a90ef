//! The building phase of a schema.
//!
//! Types are registered by name and may reference each other freely, in any
//! order. Rules that need only the type itself are checked at registration;
//! everything that follows references is checked when the registry is
//! published through [`Schema::new`](crate::Schema::new).

use crate::definition::TypeKind;
use crate::enum_type::{EnumConfig, EnumType};
use crate::error::{TypeError, TypeResult};
use crate::field::{FieldConfig, FieldConfigMap};
use crate::input_object::InputObjectConfig;
use crate::interface::InterfaceConfig;
use crate::name::assert_valid_name;
use crate::object::ObjectConfig;
use crate::scalar::{ScalarConfig, ScalarType};
use crate::scalars::builtin_scalars;
use crate::type_ref::TypeRef;
use crate::union::UnionConfig;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// A registered type awaiting publication.
#[derive(Debug)]
pub(crate) enum Registered {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectConfig),
    Interface(InterfaceConfig),
    Union(UnionConfig),
    InputObject(InputObjectConfig),
}

impl Registered {
    pub(crate) fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }
}

/// Collects type definitions before a schema is published.
#[derive(Debug)]
pub struct TypeRegistry {
    entries: IndexMap<String, Registered>,
    added_fields: FxHashMap<String, FieldConfigMap>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry holding the built-in scalars.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for scalar in builtin_scalars() {
            registry
                .entries
                .insert(scalar.name().to_string(), Registered::Scalar(scalar));
        }
        registry
    }

    /// Creates a registry without the built-in scalars.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
            added_fields: FxHashMap::default(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<TypeKind> {
        self.entries.get(name).map(Registered::kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn register_scalar(&mut self, config: ScalarConfig) -> TypeResult<TypeRef> {
        let scalar = ScalarType::new(config)?;
        self.insert(scalar.name().to_string(), Registered::Scalar(scalar))
    }

    pub fn register_enum(&mut self, config: EnumConfig) -> TypeResult<TypeRef> {
        let enum_type = EnumType::new(config)?;
        self.insert(enum_type.name().to_string(), Registered::Enum(enum_type))
    }

    pub fn register_object(&mut self, config: ObjectConfig) -> TypeResult<TypeRef> {
        check_name(&config.name)?;
        self.insert(config.name.clone(), Registered::Object(config))
    }

    pub fn register_interface(&mut self, config: InterfaceConfig) -> TypeResult<TypeRef> {
        check_name(&config.name)?;
        self.insert(config.name.clone(), Registered::Interface(config))
    }

    pub fn register_union(&mut self, config: UnionConfig) -> TypeResult<TypeRef> {
        config.validate()?;
        self.insert(config.name.clone(), Registered::Union(config))
    }

    pub fn register_input_object(&mut self, config: InputObjectConfig) -> TypeResult<TypeRef> {
        check_name(&config.name)?;
        self.insert(config.name.clone(), Registered::InputObject(config))
    }

    /// Adds a field to a registered object or interface. A field of the same
    /// name in the type's own configuration is replaced.
    pub fn add_field_config(
        &mut self,
        type_name: &str,
        field_name: impl Into<String>,
        config: FieldConfig,
    ) -> TypeResult<()> {
        let field_name = field_name.into();
        match self.entries.get(type_name) {
            Some(Registered::Object(_) | Registered::Interface(_)) => {}
            Some(_) => {
                return Err(TypeError::CannotAddField {
                    type_name: type_name.to_string(),
                    field: field_name,
                })
            }
            None => return Err(TypeError::UnknownType(type_name.to_string())),
        }
        assert_valid_name(&field_name)?;

        tracing::debug!(type_name, field = %field_name, "added field");
        self.added_fields
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name, config);
        Ok(())
    }

    fn insert(&mut self, name: String, entry: Registered) -> TypeResult<TypeRef> {
        if self.entries.contains_key(&name) {
            return Err(TypeError::DuplicateType(name));
        }
        tracing::debug!(type_name = %name, kind = %entry.kind(), "registered type");
        self.entries.insert(name.clone(), entry);
        Ok(TypeRef::Named(name))
    }

    pub(crate) fn into_parts(
        self,
    ) -> (IndexMap<String, Registered>, FxHashMap<String, FieldConfigMap>) {
        (self.entries, self.added_fields)
    }
}

fn check_name(name: &str) -> TypeResult<()> {
    if name.is_empty() {
        return Err(TypeError::Unnamed);
    }
    assert_valid_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enum_type::EnumValueConfig;

    #[test]
    fn test_builtins_registered() {
        let registry = TypeRegistry::new();
        let names: Vec<_> = registry.type_names().collect();
        assert_eq!(names, ["Int", "Float", "String", "Boolean", "ID"]);
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .register_object(ObjectConfig::new("String"))
            .unwrap_err();
        assert_eq!(err, TypeError::DuplicateType("String".into()));
    }

    #[test]
    fn test_register_returns_reference() {
        let mut registry = TypeRegistry::new();
        let color = registry
            .register_enum(EnumConfig::new("Color").with_value("RED", EnumValueConfig::new()))
            .unwrap();
        assert_eq!(color, TypeRef::named("Color"));
        assert_eq!(registry.kind("Color"), Some(TypeKind::Enum));
    }

    #[test]
    fn test_local_rules_checked_on_registration() {
        let mut registry = TypeRegistry::new();
        assert_eq!(
            registry.register_object(ObjectConfig::new("")).unwrap_err(),
            TypeError::Unnamed
        );
        assert_eq!(
            registry.register_union(UnionConfig::new("Pet")).unwrap_err(),
            TypeError::EmptyUnion("Pet".into())
        );
        assert_eq!(
            registry
                .register_scalar(ScalarConfig::new("Odd"))
                .unwrap_err(),
            TypeError::MissingSerialize("Odd".into())
        );
        assert!(!registry.contains("Pet"));
    }

    #[test]
    fn test_add_field_config_targets() {
        let mut registry = TypeRegistry::new();
        registry.register_object(ObjectConfig::new("Query")).unwrap();
        registry
            .add_field_config("Query", "hello", FieldConfig::new("String"))
            .unwrap();
        assert_eq!(
            registry
                .add_field_config("Int", "x", FieldConfig::new("String"))
                .unwrap_err(),
            TypeError::CannotAddField {
                type_name: "Int".into(),
                field: "x".into(),
            }
        );
        assert_eq!(
            registry
                .add_field_config("Missing", "x", FieldConfig::new("String"))
                .unwrap_err(),
            TypeError::UnknownType("Missing".into())
        );
    }
}
