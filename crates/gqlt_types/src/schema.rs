//! The published, immutable schema.

use crate::abstract_type::AbstractType;
use crate::build::publish;
use crate::definition::{CompositeType, Type, TypeDefinition};
use crate::error::{SchemaError, TypeError};
use crate::info::ResolveInfo;
use crate::object::ObjectType;
use crate::registry::TypeRegistry;
use crate::type_ref::TypeRef;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Publication settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Require `resolve_type` on every implemented interface, even when the
    /// implementing object provides `is_type_of`. On by default.
    pub require_interface_resolve_type: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            require_interface_resolve_type: true,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_interface_resolve_type(mut self, require: bool) -> Self {
        self.require_interface_resolve_type = require;
        self
    }
}

/// Root operation types and build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    pub query: String,
    pub mutation: Option<String>,
    pub options: BuildOptions,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::new("Query")
    }
}

impl SchemaConfig {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            mutation: None,
            options: BuildOptions::default(),
        }
    }

    pub fn with_mutation(mut self, mutation: impl Into<String>) -> Self {
        self.mutation = Some(mutation.into());
        self
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }
}

/// A validated type graph, safe to share across threads.
pub struct Schema {
    query: Arc<ObjectType>,
    mutation: Option<Arc<ObjectType>>,
    types: IndexMap<String, TypeDefinition>,
}

impl Schema {
    /// Publishes `registry`.
    ///
    /// Every type is built and checked; the first failing type does not stop
    /// the others from being checked. The query root must be an object type,
    /// as must the mutation root when one is configured.
    pub fn new(config: SchemaConfig, registry: TypeRegistry) -> Result<Self, SchemaError> {
        let types = publish(registry, &config.options)?;

        let query = root_object(&types, &config.query, TypeError::InvalidQueryRoot);
        let mutation = config
            .mutation
            .as_deref()
            .map(|name| root_object(&types, name, TypeError::InvalidMutationRoot))
            .transpose();
        let (query, mutation) = match (query, mutation) {
            (Ok(query), Ok(mutation)) => (query, mutation),
            (query, mutation) => {
                let errors = query.err().into_iter().chain(mutation.err()).collect();
                return Err(SchemaError::new(errors));
            }
        };

        tracing::debug!(
            types = types.len(),
            query = query.name(),
            mutation = mutation.as_ref().map(|m| m.name()),
            "schema published"
        );
        Ok(Self {
            query,
            mutation,
            types,
        })
    }

    pub fn query_type(&self) -> &ObjectType {
        &self.query
    }

    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation.as_deref()
    }

    /// Every type, in registration order.
    pub fn type_map(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn named_type(&self, name: &str) -> Option<Type<'_>> {
        self.get_type(name).map(TypeDefinition::as_type)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name)? {
            TypeDefinition::Object(object) => Some(&**object),
            _ => None,
        }
    }

    pub fn composite_type(&self, name: &str) -> Option<CompositeType<'_>> {
        self.named_type(name)?.as_composite()
    }

    pub fn abstract_type(&self, name: &str) -> Option<AbstractType<'_>> {
        self.named_type(name)?.as_abstract()
    }

    /// Resolves a reference into a [`Type`], keeping its wrappers.
    pub fn resolve(&self, ty: &TypeRef) -> Option<Type<'_>> {
        Some(match ty {
            TypeRef::Named(name) => self.named_type(name)?,
            TypeRef::List(inner) => Type::List(Box::new(self.resolve(inner)?)),
            TypeRef::NonNull(inner) => Type::NonNull(Box::new(self.resolve(inner)?)),
        })
    }

    pub fn possible_types<'a>(&self, ty: &AbstractType<'a>) -> &'a [Arc<ObjectType>] {
        ty.possible_types()
    }

    pub fn is_possible_type(&self, ty: &AbstractType<'_>, object: &ObjectType) -> bool {
        ty.is_possible_type(object)
    }

    /// Builds the [`ResolveInfo`] for `parent.field`.
    pub fn resolve_info(&self, parent: &str, field: &str) -> Option<ResolveInfo<'_>> {
        let parent_type = self.composite_type(parent)?;
        let definition = parent_type.field(field)?;
        let return_type = self.resolve(&definition.ty)?;
        Some(ResolveInfo::new(field, return_type, parent_type, self))
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("query", &self.query.name())
            .field("mutation", &self.mutation.as_ref().map(|m| m.name()))
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn root_object(
    types: &IndexMap<String, TypeDefinition>,
    name: &str,
    not_object: fn(String) -> TypeError,
) -> Result<Arc<ObjectType>, TypeError> {
    match types.get(name) {
        Some(TypeDefinition::Object(object)) => Ok(Arc::clone(object)),
        Some(_) => Err(not_object(name.to_string())),
        None => Err(TypeError::UnknownType(name.to_string())),
    }
}
