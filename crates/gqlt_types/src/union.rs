//! Union types.

use crate::build::KindTable;
use crate::definition::TypeKind;
use crate::error::{TypeError, TypeResult};
use crate::info::ResolveInfo;
use crate::interface::ResolveTypeFn;
use crate::name::assert_valid_name;
use crate::object::ObjectType;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Configuration for a union type.
pub struct UnionConfig {
    pub name: String,
    pub description: Option<String>,
    /// Member object type names, in declaration order.
    pub types: Vec<String>,
    pub resolve_type: Option<ResolveTypeFn>,
}

impl UnionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            types: Vec::new(),
            resolve_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.types.push(name.into());
        self
    }

    pub fn with_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_resolve_type(
        mut self,
        f: impl Fn(&Value, &ResolveInfo<'_>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(f));
        self
    }

    /// Checks the rules that need no other type: a valid name and at least
    /// one member.
    pub(crate) fn validate(&self) -> TypeResult<()> {
        if self.name.is_empty() {
            return Err(TypeError::Unnamed);
        }
        assert_valid_name(&self.name)?;
        if self.types.is_empty() {
            return Err(TypeError::EmptyUnion(self.name.clone()));
        }
        Ok(())
    }
}

impl fmt::Debug for UnionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionConfig")
            .field("name", &self.name)
            .field("types", &self.types)
            .field("resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}

/// A published union type.
#[derive(Clone)]
pub struct UnionType {
    name: String,
    description: Option<String>,
    types: Vec<Arc<ObjectType>>,
    resolve_type: Option<ResolveTypeFn>,
    possible: FxHashSet<String>,
}

impl UnionType {
    /// Resolves member names against the published objects.
    ///
    /// `kinds` reports what a non-object member actually is, for the error.
    pub(crate) fn define(
        config: UnionConfig,
        objects: &FxHashMap<String, Arc<ObjectType>>,
        kinds: &KindTable,
    ) -> TypeResult<Self> {
        config.validate()?;

        let mut types: Vec<Arc<ObjectType>> = Vec::with_capacity(config.types.len());
        for name in &config.types {
            let Some(object) = objects.get(name) else {
                match kinds.kind(name) {
                    // The member failed to build and reported its own error.
                    Some(TypeKind::Object) => continue,
                    Some(_) => {
                        return Err(TypeError::NotAnObject {
                            union_type: config.name.clone(),
                            name: name.clone(),
                        })
                    }
                    None => return Err(TypeError::UnknownType(name.clone())),
                }
            };
            if config.resolve_type.is_none() && !object.has_is_type_of() {
                return Err(TypeError::UnresolvableMember {
                    union_type: config.name.clone(),
                    object: name.clone(),
                });
            }
            if !types.iter().any(|member| member.name() == name) {
                types.push(Arc::clone(object));
            }
        }

        let possible = types.iter().map(|object| object.name().to_string()).collect();
        Ok(Self {
            name: config.name,
            description: config.description,
            types,
            resolve_type: config.resolve_type,
            possible,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Member objects in declaration order.
    pub fn types(&self) -> &[Arc<ObjectType>] {
        &self.types
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

impl fmt::Debug for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field(
                "types",
                &self.types.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .field("resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
