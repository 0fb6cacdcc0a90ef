//! Integration tests for registering types and publishing schemas.

use gqlt_types::{
    get_named, ArgumentConfig, BuildOptions, Context, EnumConfig, EnumValueConfig, FieldConfig,
    FieldConfigMap, InputFieldConfig, InputObjectConfig, InterfaceConfig, ObjectConfig,
    ResolveParams, ScalarConfig, Schema, SchemaConfig, Thunk, TypeDefinition, TypeError, TypeRef,
    TypeRegistry,
};
use serde_json::{json, Value};

fn odd_scalar() -> ScalarConfig {
    ScalarConfig::new("Odd").with_serialize(|value| {
        value
            .as_i64()
            .filter(|n| n % 2 == 1)
            .map(Value::from)
    })
}

/// Test that a type referring to itself builds through a lazy field map
#[test]
fn test_self_referencing_object() {
    let mut registry = TypeRegistry::new();
    registry
        .register_object(ObjectConfig::new("Person").with_fields(Thunk::lazy(|| {
            FieldConfigMap::from([
                ("name".to_string(), FieldConfig::new("String")),
                ("bestFriend".to_string(), FieldConfig::new("Person")),
            ])
        })))
        .unwrap();
    registry
        .register_object(ObjectConfig::new("Query").with_field("me", FieldConfig::new("Person")))
        .unwrap();

    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let person = schema.object("Person").unwrap();
    let best_friend = schema.resolve(&person.field("bestFriend").unwrap().ty).unwrap();
    assert_eq!(best_friend.as_object().map(|o| o.name()), Some("Person"));
}

/// Test that types may be registered after the types referencing them
#[test]
fn test_forward_references() {
    let mut registry = TypeRegistry::new();
    registry
        .register_object(ObjectConfig::new("Query").with_field("post", FieldConfig::new("Post")))
        .unwrap();
    registry
        .register_object(ObjectConfig::new("Post").with_field("title", FieldConfig::new("String")))
        .unwrap();
    assert!(Schema::new(SchemaConfig::default(), registry).is_ok());
}

/// Test the error for an interface that cannot resolve its implementation
#[test]
fn test_interface_without_resolve_type_names_both_types() {
    let mut registry = TypeRegistry::new();
    registry
        .register_interface(
            InterfaceConfig::new("Named").with_field("name", FieldConfig::new("String")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Dog")
                .with_interface("Named")
                .with_field("name", FieldConfig::new("String")),
        )
        .unwrap();
    registry
        .register_object(ObjectConfig::new("Query").with_field("dog", FieldConfig::new("Dog")))
        .unwrap();

    let err = Schema::new(SchemaConfig::default(), registry).unwrap_err();
    assert_eq!(
        err.errors,
        vec![TypeError::UnresolvableImplementation {
            interface: "Named".into(),
            object: "Dog".into(),
        }]
    );
    let message = err.to_string();
    assert!(message.contains("Interface Type Named"));
    assert!(message.contains("implementing Type Dog"));
}

/// Test a scalar without parse functions in output and input positions
#[test]
fn test_output_only_scalar() {
    let mut registry = TypeRegistry::new();
    registry.register_scalar(odd_scalar()).unwrap();
    registry
        .register_object(ObjectConfig::new("Query").with_field("odd", FieldConfig::new("Odd")))
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let Some(TypeDefinition::Scalar(odd)) = schema.get_type("Odd") else {
        panic!("Odd should be a scalar");
    };
    assert_eq!(odd.serialize(&json!(7)), Some(json!(7)));
    assert_eq!(odd.serialize(&json!(8)), None);

    let mut registry = TypeRegistry::new();
    registry.register_scalar(odd_scalar()).unwrap();
    registry
        .register_object(
            ObjectConfig::new("Query").with_field(
                "check",
                FieldConfig::new("Boolean").with_argument("value", ArgumentConfig::new("Odd")),
            ),
        )
        .unwrap();
    let err = Schema::new(SchemaConfig::default(), registry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query.check(value:) argument type must be Input Type but got: Odd."
    );
}

/// Test that an object without fields is rejected by name
#[test]
fn test_empty_fields_names_object() {
    let mut registry = TypeRegistry::new();
    registry.register_object(ObjectConfig::new("Query")).unwrap();
    let err = Schema::new(SchemaConfig::default(), registry).unwrap_err();
    assert_eq!(err.errors, vec![TypeError::EmptyFields("Query".into())]);
}

/// Test that invalid input fields are dropped while invalid object fields fail the object
#[test]
fn test_input_fields_skip_object_fields_abort() {
    let mut registry = TypeRegistry::new();
    registry
        .register_input_object(
            InputObjectConfig::new("Filter")
                .with_field("name", InputFieldConfig::new("String"))
                .with_field("owner", InputFieldConfig::new("Query")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Query").with_field(
                "search",
                FieldConfig::new("String").with_argument("filter", ArgumentConfig::new("Filter")),
            ),
        )
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let Some(TypeDefinition::InputObject(filter)) = schema.get_type("Filter") else {
        panic!("Filter should be an input object");
    };
    assert_eq!(filter.fields().len(), 1);
    assert!(filter.field("name").is_some());

    let mut registry = TypeRegistry::new();
    registry
        .register_input_object(
            InputObjectConfig::new("Filter").with_field("name", InputFieldConfig::new("String")),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Query")
                .with_field("name", FieldConfig::new("String"))
                .with_field("filter", FieldConfig::new("Filter")),
        )
        .unwrap();
    let err = Schema::new(SchemaConfig::default(), registry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query.filter field type must be Output Type but got: Filter."
    );
}

/// Test enum serialization and parsing in both directions
#[test]
fn test_enum_round_trip() {
    let mut registry = TypeRegistry::new();
    registry
        .register_enum(
            EnumConfig::new("Episode")
                .with_value("NEWHOPE", EnumValueConfig::new().with_value(4))
                .with_value("EMPIRE", EnumValueConfig::new().with_value(5))
                .with_value("JEDI", EnumValueConfig::new().with_value(6)),
        )
        .unwrap();
    registry
        .register_object(
            ObjectConfig::new("Query").with_field("episode", FieldConfig::new("Episode")),
        )
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let Some(TypeDefinition::Enum(episode)) = schema.get_type("Episode") else {
        panic!("Episode should be an enum");
    };

    for value in episode.values() {
        let name = episode.serialize(&value.value).unwrap();
        assert_eq!(episode.parse_value(&name), Some(value.value.clone()));
        let internal = episode.parse_value(&json!(value.name)).unwrap();
        assert_eq!(episode.serialize(&internal), Some(json!(value.name)));
    }
}

/// Test wrapper construction and unwrapping to the named type
#[test]
fn test_wrappers() {
    let required = TypeRef::non_null(TypeRef::named("Int")).unwrap();
    assert_eq!(
        TypeRef::non_null(required.clone()).unwrap_err(),
        TypeError::NonNullOfNonNull("Int!".into())
    );

    let mut registry = TypeRegistry::new();
    let deep = TypeRef::non_null(TypeRef::list(required)).unwrap();
    registry
        .register_object(ObjectConfig::new("Query").with_field("ids", FieldConfig::new(deep)))
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let ty = schema
        .resolve(&schema.query_type().field("ids").unwrap().ty)
        .unwrap();
    assert_eq!(ty.to_string(), "[Int!]!");
    assert_eq!(get_named(&ty).name(), Some("Int"));
}

/// Test that added fields join a lazily supplied field map
#[test]
fn test_added_fields_join_thunk_fields() {
    let mut registry = TypeRegistry::new();
    registry
        .register_object(ObjectConfig::new("Query").with_fields(Thunk::lazy(|| {
            FieldConfigMap::from([("a".to_string(), FieldConfig::new("String"))])
        })))
        .unwrap();
    registry
        .add_field_config("Query", "b", FieldConfig::new("Int"))
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let names: Vec<_> = schema.query_type().fields().keys().cloned().collect();
    assert_eq!(names, ["a", "b"]);
}

/// Test the default resolver and a custom resolver with arguments
#[test]
fn test_field_resolution() {
    let mut registry = TypeRegistry::new();
    registry
        .register_object(
            ObjectConfig::new("Query")
                .with_field("name", FieldConfig::new("String"))
                .with_field(
                    "greeting",
                    FieldConfig::new("String")
                        .with_argument(
                            "to",
                            ArgumentConfig::new("String").with_default_value("you"),
                        )
                        .with_resolver(|params| {
                            let to = params.arg_as::<String>("to").unwrap_or_default();
                            Ok(json!(format!("hello, {to}")))
                        }),
                ),
        )
        .unwrap();
    let schema = Schema::new(SchemaConfig::default(), registry).unwrap();
    let context = Context::new();
    let source = json!({ "name": "Luke" });

    let info = schema.resolve_info("Query", "name").unwrap();
    let params = ResolveParams::new(&source, &info, &context);
    let field = schema.query_type().field("name").unwrap();
    assert!(!field.has_resolver());
    assert_eq!(field.resolve(&params).unwrap(), json!("Luke"));

    let info = schema.resolve_info("Query", "greeting").unwrap();
    let params = ResolveParams::new(&source, &info, &context)
        .with_args([("to".to_string(), json!("Leia"))].into_iter().collect());
    let field = schema.query_type().field("greeting").unwrap();
    assert_eq!(field.resolve(&params).unwrap(), json!("hello, Leia"));
}

/// Test that isTypeOf suffices when the resolveType requirement is relaxed
#[test]
fn test_relaxed_interface_option() {
    let registry = || {
        let mut registry = TypeRegistry::new();
        registry
            .register_interface(
                InterfaceConfig::new("Named").with_field("name", FieldConfig::new("String")),
            )
            .unwrap();
        registry
            .register_object(
                ObjectConfig::new("Query")
                    .with_interface("Named")
                    .with_field("name", FieldConfig::new("String"))
                    .with_is_type_of(|_, _| true),
            )
            .unwrap();
        registry
    };

    assert!(Schema::new(SchemaConfig::default(), registry()).is_err());

    let config = SchemaConfig::default()
        .with_options(BuildOptions::new().with_require_interface_resolve_type(false));
    let schema = Schema::new(config, registry()).unwrap();
    let named = schema.abstract_type("Named").unwrap();
    assert!(named.is_possible_type(schema.query_type()));
}
