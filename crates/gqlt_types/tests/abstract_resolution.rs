//! Integration tests for resolving interface and union values to object types.

use gqlt_types::{
    get_possible_types, BuildOptions, FieldConfig, InterfaceConfig, ObjectConfig, Schema,
    SchemaConfig, TypeError, TypeRef, TypeRegistry, UnionConfig,
};
use serde_json::{json, Value};

fn kind_is(kind: &'static str) -> impl Fn(&Value, &gqlt_types::ResolveInfo<'_>) -> bool {
    move |value: &Value, _: &gqlt_types::ResolveInfo<'_>| value["kind"] == kind
}

fn pet_schema() -> Schema {
    let mut registry = TypeRegistry::new();
    registry
        .register_union(UnionConfig::new("Pet").with_types(["Dog", "Cat", "Pup"]))
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Dog")
                .with_field("barks", FieldConfig::new("Boolean"))
                .with_is_type_of(kind_is("dog")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Cat")
                .with_field("meows", FieldConfig::new("Boolean"))
                .with_is_type_of(kind_is("cat")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Pup")
                .with_field("barks", FieldConfig::new("Boolean"))
                .with_is_type_of(kind_is("dog")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Query")
                .with_field("pets", FieldConfig::new(TypeRef::list("Pet".into()))),
        )
        .unwrap();
    Schema::new(SchemaConfig::default(), registry).unwrap()
}

/// Test that union members are tried in declaration order
#[test]
fn test_union_first_match_wins() {
    let schema = pet_schema();
    let pet = schema.abstract_type("Pet").unwrap();
    let info = schema.resolve_info("Query", "pets").unwrap();

    let names: Vec<_> = get_possible_types(&pet).iter().map(|o| o.name()).collect();
    assert_eq!(names, ["Dog", "Cat", "Pup"]);

    let dog = pet.get_object_type(&json!({ "kind": "dog" }), &info).unwrap();
    assert_eq!(dog.name(), "Dog");
    let cat = pet.get_object_type(&json!({ "kind": "cat" }), &info).unwrap();
    assert_eq!(cat.name(), "Cat");
}

/// Test that a value no member accepts resolves to nothing
#[test]
fn test_union_no_match() {
    let schema = pet_schema();
    let pet = schema.abstract_type("Pet").unwrap();
    let info = schema.resolve_info("Query", "pets").unwrap();
    assert!(pet.get_object_type(&json!({ "kind": "fish" }), &info).is_none());
}

/// Test that a union member without isTypeOf needs a union resolveType
#[test]
fn test_union_member_must_be_resolvable() {
    let mut registry = TypeRegistry::new();
    registry
        .register_union(UnionConfig::new("Pet").with_type("Dog"))
        .unwrap();
    registry
        .register_object(ObjectConfig::new("Dog").with_field("barks", FieldConfig::new("Boolean")))
        .unwrap();
    registry
        .register_object(ObjectConfig::new("Query").with_field("pet", FieldConfig::new("Pet")))
        .unwrap();
    let err = Schema::new(SchemaConfig::default(), registry).unwrap_err();
    assert_eq!(
        err.errors,
        vec![TypeError::UnresolvableMember {
            union_type: "Pet".into(),
            object: "Dog".into(),
        }]
    );
}

/// Test interface resolution through resolveType
#[test]
fn test_interface_resolve_type() {
    let mut registry = TypeRegistry::new();
    registry
        .register_interface(
            InterfaceConfig::new("Node")
                .with_field("id", FieldConfig::new("ID"))
                .with_resolve_type(|value, _| value["__typename"].as_str().map(str::to_string)),
        )
        .unwrap();
    for name in ["User", "Post"] {
        registry
            .register_object(
                ObjectConfig::new(name)
                    .with_interface("Node")
                    .with_field("id", FieldConfig::new("ID")),
            )
            .unwrap();
    }
    registry
        .register_object(ObjectConfig::new("Query").with_field("node", FieldConfig::new("Node")))
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let node = schema.abstract_type("Node").unwrap();
    let info = schema.resolve_info("Query", "node").unwrap();

    let names: Vec<_> = node.possible_types().iter().map(|o| o.name()).collect();
    assert_eq!(names, ["User", "Post"]);
    assert!(schema.is_possible_type(&node, schema.object("Post").unwrap()));
    assert!(!schema.is_possible_type(&node, schema.query_type()));

    let post = node.get_object_type(&json!({ "__typename": "Post" }), &info).unwrap();
    assert_eq!(post.name(), "Post");
    assert!(node.get_object_type(&json!({ "__typename": "Query" }), &info).is_none());
    assert!(node.get_object_type(&json!({}), &info).is_none());
}

/// Test that implementations are tried in registration order when the
/// interface has no resolveType
#[test]
fn test_interface_falls_back_to_is_type_of() {
    let mut registry = TypeRegistry::new();
    registry
        .register_interface(
            InterfaceConfig::new("Animal").with_field("name", FieldConfig::new("String")),
        )
        .unwrap();
    for (name, kind) in [("Wolf", "dog"), ("Dog", "dog"), ("Cat", "cat")] {
        registry
            .register_object(
                ObjectConfig::new(name)
                    .with_interface("Animal")
                    .with_field("name", FieldConfig::new("String"))
                    .with_is_type_of(kind_is(kind)),
            )
            .unwrap();
    }
    registry
        .register_object(
            ObjectConfig::new("Query").with_field("animal", FieldConfig::new("Animal")),
        )
        .unwrap();
    let config = SchemaConfig::default()
        .with_options(BuildOptions::new().with_require_interface_resolve_type(false));
    let schema = Schema::new(config, registry).unwrap();
    let animal = schema.abstract_type("Animal").unwrap();
    let info = schema.resolve_info("Query", "animal").unwrap();

    let dog = animal.get_object_type(&json!({ "kind": "dog" }), &info).unwrap();
    assert_eq!(dog.name(), "Wolf");
    let cat = animal.get_object_type(&json!({ "kind": "cat" }), &info).unwrap();
    assert_eq!(cat.name(), "Cat");
    assert!(animal.get_object_type(&json!({ "kind": "fish" }), &info).is_none());
}
