//! Name-based references between types.
//!
//! Fields, arguments and member lists point at other types through a
//! [`TypeRef`] instead of owning them. References are resolved against the
//! published schema, which is what lets `Person.bestFriend: Person` exist
//! without reference cycles.

use crate::error::{TypeError, TypeResult};
use std::fmt;

/// A reference to a named type, optionally wrapped in list/non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named type: `Person`.
    Named(String),
    /// A list type: `[Person]`.
    List(Box<TypeRef>),
    /// A non-null type: `Person!`.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` as non-null. Double non-null wrapping is rejected.
    pub fn non_null(inner: TypeRef) -> TypeResult<Self> {
        match inner {
            Self::NonNull(_) => Err(TypeError::NonNullOfNonNull(inner.to_string())),
            inner => Ok(Self::NonNull(Box::new(inner))),
        }
    }

    /// Shorthand for `[inner]`, consuming `self`.
    pub fn into_list(self) -> Self {
        Self::list(self)
    }

    /// Shorthand for `inner!`, consuming `self`.
    pub fn into_non_null(self) -> TypeResult<Self> {
        Self::non_null(self)
    }

    /// The name of the type under all wrappers.
    pub fn innermost_name(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                Self::Named(name) => return name,
                Self::List(inner) | Self::NonNull(inner) => current = inner,
            }
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Strips a single outer non-null wrapper, if any.
    pub fn nullable(&self) -> &TypeRef {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
