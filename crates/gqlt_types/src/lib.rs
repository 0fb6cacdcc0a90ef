//! The gqlt type system.
//!
//! Types are declared on a [`TypeRegistry`] and published into an immutable
//! [`Schema`]:
//!
//! ```
//! use gqlt_types::{FieldConfig, ObjectConfig, Schema, SchemaConfig, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_object(
//!     ObjectConfig::new("Query").with_field("hello", FieldConfig::new("String")),
//! )?;
//! let schema = Schema::new(SchemaConfig::default(), registry)?;
//! assert!(schema.query_type().field("hello").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Types reference each other by name through [`TypeRef`], so cyclic graphs
//! need no special handling. Publication checks every reference, computes
//! interface implementations and possible-type sets, and reports all
//! definition errors at once.

pub mod abstract_type;
mod build;
pub mod definition;
pub mod enum_type;
pub mod error;
pub mod field;
pub mod info;
pub mod input_object;
pub mod interface;
pub mod name;
pub mod object;
pub mod printer;
pub mod registry;
pub mod scalar;
pub mod scalars;
pub mod schema;
pub mod thunk;
pub mod type_ref;
pub mod union;
pub mod validator;

pub use abstract_type::{get_possible_types, is_possible_type, AbstractType};
pub use definition::{
    get_named, is_input_type, is_output_type, CompositeType, Type, TypeDefinition, TypeKind,
};
pub use enum_type::{EnumConfig, EnumType, EnumValueConfig, EnumValueDefinition};
pub use error::{SchemaError, TypeError, TypeResult};
pub use field::{
    Argument, ArgumentConfig, FieldConfig, FieldConfigMap, FieldDefinition, FieldResolveFn,
};
pub use info::{Context, FieldError, FieldResult, PathSegment, ResolveInfo, ResolveParams};
pub use input_object::{
    InputFieldConfig, InputFieldConfigMap, InputObjectConfig, InputObjectField, InputObjectType,
};
pub use interface::{InterfaceConfig, InterfaceType, ResolveTypeFn};
pub use name::{assert_valid_name, is_valid_name};
pub use object::{IsTypeOfFn, ObjectConfig, ObjectType};
pub use printer::{print_schema, print_type};
pub use registry::TypeRegistry;
pub use scalar::{ParseLiteralFn, ParseValueFn, ScalarConfig, ScalarType, SerializeFn};
pub use schema::{BuildOptions, Schema, SchemaConfig};
pub use thunk::Thunk;
pub use type_ref::TypeRef;
pub use union::{UnionConfig, UnionType};
pub use validator::{validate_document, ValidationResult};
