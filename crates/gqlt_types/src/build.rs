//! Publication: turns a registry into the immutable type map of a schema.
//!
//! Publication runs in two passes. The first classifies every registered
//! name so that field and member references can be checked without the
//! referenced type being built yet. The second builds objects, then unions
//! and interfaces (whose possible types are taken from the built objects),
//! then input objects, and finally checks that every object provides the
//! fields of the interfaces it implements.
//!
//! Errors are collected across all types; any error aborts publication.

use crate::definition::{TypeDefinition, TypeKind};
use crate::error::{SchemaError, TypeError, TypeResult};
use crate::input_object::InputObjectType;
use crate::interface::InterfaceType;
use crate::object::ObjectType;
use crate::registry::{Registered, TypeRegistry};
use crate::schema::BuildOptions;
use crate::type_ref::TypeRef;
use crate::union::UnionType;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// The kind of every registered name, known before any type is built.
#[derive(Debug, Default)]
pub(crate) struct KindTable {
    kinds: FxHashMap<String, TypeKind>,
    /// Scalars without parse functions.
    output_only: FxHashSet<String>,
    /// Interfaces and unions with a `resolve_type` function.
    resolvable: FxHashSet<String>,
}

impl KindTable {
    fn classify(entries: &IndexMap<String, Registered>) -> Self {
        let mut table = Self::default();
        for (name, entry) in entries {
            table.insert(name.as_str(), entry.kind());
            match entry {
                Registered::Scalar(scalar) if !scalar.is_input_capable() => {
                    table.mark_output_only(name.as_str());
                }
                Registered::Interface(config) if config.resolve_type.is_some() => {
                    table.mark_resolvable(name.as_str());
                }
                Registered::Union(config) if config.resolve_type.is_some() => {
                    table.mark_resolvable(name.as_str());
                }
                _ => {}
            }
        }
        table
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, kind: TypeKind) {
        self.kinds.insert(name.into(), kind);
    }

    pub(crate) fn mark_output_only(&mut self, name: impl Into<String>) {
        self.output_only.insert(name.into());
    }

    pub(crate) fn mark_resolvable(&mut self, name: impl Into<String>) {
        self.resolvable.insert(name.into());
    }

    pub(crate) fn kind(&self, name: &str) -> Option<TypeKind> {
        self.kinds.get(name).copied()
    }

    pub(crate) fn has_resolve_type(&self, name: &str) -> bool {
        self.resolvable.contains(name)
    }

    fn named_kind<'t>(&self, ty: &'t TypeRef) -> TypeResult<(&'t str, TypeKind)> {
        let name = ty.innermost_name();
        self.kind(name)
            .map(|kind| (name, kind))
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    /// Whether `ty` may be a field type. Unknown names are an error.
    pub(crate) fn accepts_output(&self, ty: &TypeRef) -> TypeResult<bool> {
        let (_, kind) = self.named_kind(ty)?;
        Ok(kind != TypeKind::InputObject)
    }

    /// Whether `ty` may be an argument or input field type. Scalars must have
    /// parse functions. Unknown names are an error.
    pub(crate) fn accepts_input(&self, ty: &TypeRef) -> TypeResult<bool> {
        let (name, kind) = self.named_kind(ty)?;
        Ok(match kind {
            TypeKind::Scalar => !self.output_only.contains(name),
            TypeKind::Enum | TypeKind::InputObject => true,
            TypeKind::Object
            | TypeKind::Interface
            | TypeKind::Union
            | TypeKind::List
            | TypeKind::NonNull => false,
        })
    }
}

/// Builds every registered type. Returns the type map in registration order.
pub(crate) fn publish(
    registry: TypeRegistry,
    options: &BuildOptions,
) -> Result<IndexMap<String, TypeDefinition>, SchemaError> {
    let (entries, mut added) = registry.into_parts();
    let kinds = KindTable::classify(&entries);
    let order: Vec<String> = entries.keys().cloned().collect();
    tracing::debug!(types = order.len(), "publishing schema");

    let mut errors = Vec::new();
    let mut published: FxHashMap<String, TypeDefinition> = FxHashMap::default();
    let mut objects: Vec<Arc<ObjectType>> = Vec::new();
    let mut interfaces = Vec::new();
    let mut unions = Vec::new();
    let mut inputs = Vec::new();

    for (name, entry) in entries {
        match entry {
            Registered::Scalar(scalar) => {
                published.insert(name, TypeDefinition::Scalar(scalar));
            }
            Registered::Enum(enum_type) => {
                published.insert(name, TypeDefinition::Enum(enum_type));
            }
            Registered::Object(config) => {
                let extra = added.remove(&name).unwrap_or_default();
                match ObjectType::define(config, extra, &kinds, options) {
                    Ok(object) => objects.push(Arc::new(object)),
                    Err(err) => errors.push(err),
                }
            }
            Registered::Interface(config) => interfaces.push(config),
            Registered::Union(config) => unions.push(config),
            Registered::InputObject(config) => inputs.push(config),
        }
    }

    let object_map: FxHashMap<String, Arc<ObjectType>> = objects
        .iter()
        .map(|object| (object.name().to_string(), Arc::clone(object)))
        .collect();

    for config in unions {
        match UnionType::define(config, &object_map, &kinds) {
            Ok(union_type) => {
                published.insert(union_type.name().to_string(), TypeDefinition::Union(union_type));
            }
            Err(err) => errors.push(err),
        }
    }

    for config in interfaces {
        let extra = added.remove(&config.name).unwrap_or_default();
        match InterfaceType::define(config, extra, &objects, &kinds) {
            Ok(interface) => {
                published.insert(
                    interface.name().to_string(),
                    TypeDefinition::Interface(interface),
                );
            }
            Err(err) => errors.push(err),
        }
    }

    for config in inputs {
        match InputObjectType::define(config, &kinds) {
            Ok(input) => {
                published.insert(input.name().to_string(), TypeDefinition::InputObject(input));
            }
            Err(err) => errors.push(err),
        }
    }

    for object in objects {
        published.insert(object.name().to_string(), TypeDefinition::Object(object));
    }

    for name in &order {
        if let Some(TypeDefinition::Interface(interface)) = published.get(name) {
            for object in interface.implementations() {
                errors.extend(check_implementation(interface, object, &published));
            }
        }
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "schema publication failed");
        return Err(SchemaError::new(errors));
    }

    Ok(order
        .into_iter()
        .filter_map(|name| published.remove_entry(&name))
        .collect())
}

/// Checks that `object` provides every field of `interface` with a
/// compatible type and the same arguments.
fn check_implementation(
    interface: &InterfaceType,
    object: &ObjectType,
    types: &FxHashMap<String, TypeDefinition>,
) -> Vec<TypeError> {
    let mut errors = Vec::new();
    for (field_name, expected) in interface.fields() {
        let Some(found) = object.field(field_name) else {
            errors.push(TypeError::MissingInterfaceField {
                interface: interface.name().to_string(),
                object: object.name().to_string(),
                field: field_name.clone(),
            });
            continue;
        };

        if !is_covariant(&found.ty, &expected.ty, types) {
            errors.push(TypeError::InterfaceFieldMismatch {
                interface: interface.name().to_string(),
                object: object.name().to_string(),
                field: field_name.clone(),
                expected: expected.ty.to_string(),
                found: found.ty.to_string(),
            });
        }

        for arg in &expected.args {
            match found.arg(&arg.name) {
                None => errors.push(TypeError::MissingInterfaceArgument {
                    interface: interface.name().to_string(),
                    object: object.name().to_string(),
                    field: field_name.clone(),
                    argument: arg.name.clone(),
                }),
                Some(found_arg) if found_arg.ty != arg.ty => {
                    errors.push(TypeError::InterfaceArgumentMismatch {
                        interface: interface.name().to_string(),
                        object: object.name().to_string(),
                        field: field_name.clone(),
                        argument: arg.name.clone(),
                        expected: arg.ty.to_string(),
                        found: found_arg.ty.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }
    errors
}

/// Whether a field of type `found` satisfies an interface field of type
/// `expected`. Non-null may narrow a nullable type, and a named type may be
/// an object that is a possible type of the expected interface or union.
fn is_covariant(
    found: &TypeRef,
    expected: &TypeRef,
    types: &FxHashMap<String, TypeDefinition>,
) -> bool {
    match (found, expected) {
        (TypeRef::NonNull(found), TypeRef::NonNull(expected))
        | (TypeRef::List(found), TypeRef::List(expected)) => is_covariant(found, expected, types),
        (TypeRef::NonNull(found), expected) => is_covariant(found, expected, types),
        (TypeRef::Named(found), TypeRef::Named(expected)) => {
            found == expected
                || match types.get(expected) {
                    Some(TypeDefinition::Interface(interface)) => interface.is_possible_type(found),
                    Some(TypeDefinition::Union(union_type)) => union_type.is_possible_type(found),
                    _ => false,
                }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ArgumentConfig, FieldConfig};
    use crate::interface::InterfaceConfig;
    use crate::object::ObjectConfig;
    use crate::scalar::ScalarConfig;
    use crate::union::UnionConfig;

    fn node_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register_interface(
                InterfaceConfig::new("Node")
                    .with_field("id", FieldConfig::new(TypeRef::non_null("ID".into()).unwrap()))
                    .with_field(
                        "related",
                        FieldConfig::new("Node").with_argument("first", ArgumentConfig::new("Int")),
                    )
                    .with_resolve_type(|_, _| Some("User".to_string())),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_kind_table_rejects_output_only_scalar_as_input() {
        let mut registry = TypeRegistry::new();
        registry
            .register_scalar(ScalarConfig::new("Odd").with_serialize(|v| Some(v.clone())))
            .unwrap();
        let (entries, _) = registry.into_parts();
        let kinds = KindTable::classify(&entries);
        assert!(kinds.accepts_output(&"Odd".into()).unwrap());
        assert!(!kinds.accepts_input(&"Odd".into()).unwrap());
        assert!(kinds.accepts_input(&"Int".into()).unwrap());
    }

    #[test]
    fn test_failed_union_member_reported_once() {
        let mut registry = TypeRegistry::new();
        registry
            .register_union(UnionConfig::new("Pet").with_type("Dog"))
            .unwrap();
        registry.register_object(ObjectConfig::new("Dog")).unwrap();
        registry
            .register_object(ObjectConfig::new("Query").with_field("pet", FieldConfig::new("Pet")))
            .unwrap();
        let err = publish(registry, &BuildOptions::default()).unwrap_err();
        assert_eq!(err.errors, vec![TypeError::EmptyFields("Dog".into())]);
    }

    #[test]
    fn test_conforming_implementation() {
        let mut registry = node_registry();
        registry
            .register_object(
                ObjectConfig::new("User")
                    .with_interface("Node")
                    .with_field("id", FieldConfig::new(TypeRef::non_null("ID".into()).unwrap()))
                    .with_field(
                        "related",
                        FieldConfig::new(TypeRef::non_null("User".into()).unwrap())
                            .with_argument("first", ArgumentConfig::new("Int")),
                    ),
            )
            .unwrap();
        let types = publish(registry, &BuildOptions::default()).unwrap();
        let Some(TypeDefinition::Interface(node)) = types.get("Node") else {
            panic!("Node should be an interface");
        };
        assert_eq!(node.implementations().len(), 1);
    }

    #[test]
    fn test_non_conforming_implementation() {
        let mut registry = node_registry();
        registry
            .register_object(
                ObjectConfig::new("User")
                    .with_interface("Node")
                    .with_field("id", FieldConfig::new("ID"))
                    .with_field("related", FieldConfig::new("Node")),
            )
            .unwrap();
        let err = publish(registry, &BuildOptions::default()).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                TypeError::InterfaceFieldMismatch {
                    interface: "Node".into(),
                    object: "User".into(),
                    field: "id".into(),
                    expected: "ID!".into(),
                    found: "ID".into(),
                },
                TypeError::MissingInterfaceArgument {
                    interface: "Node".into(),
                    object: "User".into(),
                    field: "related".into(),
                    argument: "first".into(),
                },
            ]
        );
    }

    #[test]
    fn test_errors_accumulate_across_types() {
        let mut registry = TypeRegistry::new();
        registry.register_object(ObjectConfig::new("Empty")).unwrap();
        registry
            .register_union(UnionConfig::new("Pet").with_type("Dog"))
            .unwrap();
        let err = publish(registry, &BuildOptions::default()).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                TypeError::EmptyFields("Empty".into()),
                TypeError::UnknownType("Dog".into()),
            ]
        );
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = TypeRegistry::empty();
        registry
            .register_scalar(ScalarConfig::new("Zeta").with_serialize(|v| Some(v.clone())))
            .unwrap();
        registry
            .register_object(
                ObjectConfig::new("Alpha").with_field("zeta", FieldConfig::new("Zeta")),
            )
            .unwrap();
        let types = publish(registry, &BuildOptions::default()).unwrap();
        let names: Vec<_> = types.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }
}
