//! Runtime resolution of interface and union values to object types.

use crate::info::ResolveInfo;
use crate::interface::{InterfaceType, ResolveTypeFn};
use crate::object::ObjectType;
use crate::union::UnionType;
use serde_json::Value;
use std::sync::Arc;

/// A type whose concrete object type is only known at execution time.
#[derive(Debug, Clone, Copy)]
pub enum AbstractType<'a> {
    Interface(&'a InterfaceType),
    Union(&'a UnionType),
}

impl<'a> AbstractType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Interface(ty) => ty.name(),
            Self::Union(ty) => ty.name(),
        }
    }

    /// The candidate objects: implementations in registration order for an
    /// interface, members in declaration order for a union.
    pub fn possible_types(&self) -> &'a [Arc<ObjectType>] {
        match self {
            Self::Interface(ty) => ty.implementations(),
            Self::Union(ty) => ty.types(),
        }
    }

    pub fn is_possible_type(&self, object: &ObjectType) -> bool {
        match self {
            Self::Interface(ty) => ty.is_possible_type(object.name()),
            Self::Union(ty) => ty.is_possible_type(object.name()),
        }
    }

    fn resolve_type_fn(&self) -> Option<&'a ResolveTypeFn> {
        match self {
            Self::Interface(ty) => ty.resolve_type_fn(),
            Self::Union(ty) => ty.resolve_type_fn(),
        }
    }

    /// Maps `value` to its concrete object type.
    ///
    /// A configured `resolve_type` decides alone, and the name it returns must
    /// be one of the possible types. Otherwise the possible types are tried in
    /// order and the first whose `is_type_of` accepts the value wins. `None`
    /// means no type matched; the executor reports it as a field error.
    pub fn get_object_type(&self, value: &Value, info: &ResolveInfo<'_>) -> Option<&'a ObjectType> {
        if let Some(resolve_type) = self.resolve_type_fn() {
            let name = resolve_type(value, info)?;
            let object = self
                .possible_types()
                .iter()
                .find(|object| object.name() == name)
                .map(|object| &**object);
            if object.is_none() {
                tracing::debug!(
                    abstract_type = self.name(),
                    resolved = %name,
                    "resolve_type returned a type that is not a possible type"
                );
            }
            return object;
        }

        let object = self
            .possible_types()
            .iter()
            .map(|object| &**object)
            .find(|object| object.is_type_of(value, info) == Some(true));
        tracing::trace!(
            abstract_type = self.name(),
            resolved = object.map(ObjectType::name),
            "resolved abstract type with is_type_of"
        );
        object
    }
}

/// The candidate objects of `ty`.
pub fn get_possible_types<'a>(ty: &AbstractType<'a>) -> &'a [Arc<ObjectType>] {
    ty.possible_types()
}

pub fn is_possible_type(ty: &AbstractType<'_>, object: &ObjectType) -> bool {
    ty.is_possible_type(object)
}
