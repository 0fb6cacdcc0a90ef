//! The closed set of type variants and their classification.

use crate::abstract_type::AbstractType;
use crate::enum_type::EnumType;
use crate::field::FieldDefinition;
use crate::input_object::InputObjectType;
use crate::interface::InterfaceType;
use crate::object::ObjectType;
use crate::scalar::ScalarType;
use crate::union::UnionType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The kind of a type, as reported by introspection's `__TypeKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named type owned by a published schema.
#[derive(Debug, Clone)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(Arc<ObjectType>),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(ty) => ty.name(),
            Self::Object(ty) => ty.name(),
            Self::Interface(ty) => ty.name(),
            Self::Union(ty) => ty.name(),
            Self::Enum(ty) => ty.name(),
            Self::InputObject(ty) => ty.name(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.as_type().kind()
    }

    /// Borrows this definition as a [`Type`].
    pub fn as_type(&self) -> Type<'_> {
        match self {
            Self::Scalar(ty) => Type::Scalar(ty),
            Self::Object(ty) => Type::Object(ty),
            Self::Interface(ty) => Type::Interface(ty),
            Self::Union(ty) => Type::Union(ty),
            Self::Enum(ty) => Type::Enum(ty),
            Self::InputObject(ty) => Type::InputObject(ty),
        }
    }
}

/// A resolved view of a type, including list and non-null wrappers.
#[derive(Debug, Clone)]
pub enum Type<'a> {
    Scalar(&'a ScalarType),
    Object(&'a ObjectType),
    Interface(&'a InterfaceType),
    Union(&'a UnionType),
    Enum(&'a EnumType),
    InputObject(&'a InputObjectType),
    List(Box<Type<'a>>),
    NonNull(Box<Type<'a>>),
}

impl<'a> Type<'a> {
    /// The type's name. Wrappers are anonymous.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Scalar(ty) => Some(ty.name()),
            Self::Object(ty) => Some(ty.name()),
            Self::Interface(ty) => Some(ty.name()),
            Self::Union(ty) => Some(ty.name()),
            Self::Enum(ty) => Some(ty.name()),
            Self::InputObject(ty) => Some(ty.name()),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    pub fn description(&self) -> Option<&'a str> {
        match self {
            Self::Scalar(ty) => ty.description(),
            Self::Object(ty) => ty.description(),
            Self::Interface(ty) => ty.description(),
            Self::Union(ty) => ty.description(),
            Self::Enum(ty) => ty.description(),
            Self::InputObject(ty) => ty.description(),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::List(_) => TypeKind::List,
            Self::NonNull(_) => TypeKind::NonNull,
        }
    }

    /// Strips every list and non-null wrapper.
    pub fn named(&self) -> Type<'a> {
        let mut current = self;
        loop {
            match current {
                Self::List(inner) | Self::NonNull(inner) => current = inner,
                named => return named.clone(),
            }
        }
    }

    /// Strips one outer non-null wrapper, if any.
    pub fn nullable(&self) -> Type<'a> {
        match self {
            Self::NonNull(inner) => (**inner).clone(),
            other => other.clone(),
        }
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::List(_) | Self::NonNull(_))
    }

    /// Whether the type may appear as an argument or input field type.
    /// Scalars qualify only when they have parse functions.
    pub fn is_input(&self) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.is_input_capable(),
            Self::Enum(_) | Self::InputObject(_) => true,
            Self::Object(_) | Self::Interface(_) | Self::Union(_) => false,
            Self::List(inner) | Self::NonNull(inner) => inner.is_input(),
        }
    }

    /// Whether the type may appear as a field return type.
    pub fn is_output(&self) -> bool {
        match self {
            Self::Scalar(_)
            | Self::Object(_)
            | Self::Interface(_)
            | Self::Union(_)
            | Self::Enum(_) => true,
            Self::InputObject(_) => false,
            Self::List(inner) | Self::NonNull(inner) => inner.is_output(),
        }
    }

    /// Whether the named type is a scalar or an enum.
    pub fn is_leaf(&self) -> bool {
        matches!(self.named(), Self::Scalar(_) | Self::Enum(_))
    }

    /// The type as a selection-set parent. Wrappers are not composite.
    pub fn as_composite(&self) -> Option<CompositeType<'a>> {
        match *self {
            Self::Object(ty) => Some(CompositeType::Object(ty)),
            Self::Interface(ty) => Some(CompositeType::Interface(ty)),
            Self::Union(ty) => Some(CompositeType::Union(ty)),
            _ => None,
        }
    }

    pub fn as_abstract(&self) -> Option<AbstractType<'a>> {
        match *self {
            Self::Interface(ty) => Some(AbstractType::Interface(ty)),
            Self::Union(ty) => Some(AbstractType::Union(ty)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&'a ObjectType> {
        match *self {
            Self::Object(ty) => Some(ty),
            _ => None,
        }
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

/// Strips every list and non-null wrapper from `ty`.
pub fn get_named<'a>(ty: &Type<'a>) -> Type<'a> {
    ty.named()
}

pub fn is_input_type(ty: &Type<'_>) -> bool {
    ty.is_input()
}

pub fn is_output_type(ty: &Type<'_>) -> bool {
    ty.is_output()
}

/// A type that can own a selection set.
#[derive(Debug, Clone, Copy)]
pub enum CompositeType<'a> {
    Object(&'a ObjectType),
    Interface(&'a InterfaceType),
    Union(&'a UnionType),
}

impl<'a> CompositeType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Object(ty) => ty.name(),
            Self::Interface(ty) => ty.name(),
            Self::Union(ty) => ty.name(),
        }
    }

    /// The declared fields. Unions have none.
    pub fn fields(&self) -> Option<&'a IndexMap<String, FieldDefinition>> {
        match self {
            Self::Object(ty) => Some(ty.fields()),
            Self::Interface(ty) => Some(ty.fields()),
            Self::Union(_) => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'a FieldDefinition> {
        self.fields().and_then(|fields| fields.get(name))
    }

    pub fn as_abstract(&self) -> Option<AbstractType<'a>> {
        match *self {
            Self::Object(_) => None,
            Self::Interface(ty) => Some(AbstractType::Interface(ty)),
            Self::Union(ty) => Some(AbstractType::Union(ty)),
        }
    }
}

impl<'a> From<CompositeType<'a>> for Type<'a> {
    fn from(ty: CompositeType<'a>) -> Self {
        match ty {
            CompositeType::Object(ty) => Type::Object(ty),
            CompositeType::Interface(ty) => Type::Interface(ty),
            CompositeType::Union(ty) => Type::Union(ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enum_type::{EnumConfig, EnumValueConfig};
    use crate::scalar::ScalarConfig;
    use crate::scalars;
    use serde_json::Value;

    #[test]
    fn test_named_strips_deep_nesting() {
        let int = scalars::int();
        let ty = Type::NonNull(Box::new(Type::List(Box::new(Type::NonNull(Box::new(
            Type::Scalar(&int),
        ))))));
        assert_eq!(ty.to_string(), "[Int!]!");
        assert_eq!(ty.name(), None);
        assert_eq!(get_named(&ty).name(), Some("Int"));
        assert_eq!(ty.nullable().to_string(), "[Int!]");
        assert_eq!(ty.kind(), TypeKind::NonNull);
        assert!(ty.is_leaf());
    }

    #[test]
    fn test_input_output_classification() {
        let string = scalars::string();
        let color =
            EnumType::new(EnumConfig::new("Color").with_value("RED", EnumValueConfig::new()))
                .unwrap();
        for ty in [Type::Scalar(&string), Type::Enum(&color)] {
            let wrapped = Type::List(Box::new(ty.clone()));
            assert!(is_input_type(&wrapped) && is_output_type(&wrapped));
            assert!(ty.as_composite().is_none());
        }
    }

    #[test]
    fn test_output_only_scalar_is_not_input() {
        let odd = ScalarType::new(
            ScalarConfig::new("Odd").with_serialize(|value: &Value| Some(value.clone())),
        )
        .unwrap();
        let ty = Type::NonNull(Box::new(Type::Scalar(&odd)));
        assert!(!odd.is_input_capable());
        assert!(!is_input_type(&ty));
        assert!(is_output_type(&ty));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_value(TypeKind::InputObject).unwrap(),
            serde_json::json!("INPUT_OBJECT")
        );
        assert_eq!(TypeKind::NonNull.to_string(), "NON_NULL");
    }
}
