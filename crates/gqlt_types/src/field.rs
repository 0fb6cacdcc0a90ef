//! Output fields and their arguments.

use crate::build::KindTable;
use crate::error::{TypeError, TypeResult};
use crate::info::{FieldResult, ResolveParams};
use crate::name::assert_valid_name;
use crate::type_ref::TypeRef;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Resolves a field value from its parent.
pub type FieldResolveFn = Arc<dyn Fn(&ResolveParams<'_>) -> FieldResult + Send + Sync>;

/// Field configurations keyed by field name.
pub type FieldConfigMap = IndexMap<String, FieldConfig>;

/// Configuration for a field argument.
#[derive(Debug, Clone)]
pub struct ArgumentConfig {
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

impl ArgumentConfig {
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            default_value: None,
            description: None,
        }
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Configuration for a field on an object or interface.
#[derive(Clone)]
pub struct FieldConfig {
    pub ty: TypeRef,
    pub args: IndexMap<String, ArgumentConfig>,
    pub resolve: Option<FieldResolveFn>,
    pub deprecation_reason: Option<String>,
    pub description: Option<String>,
}

impl FieldConfig {
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            args: IndexMap::new(),
            resolve: None,
            deprecation_reason: None,
            description: None,
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, arg: ArgumentConfig) -> Self {
        self.args.insert(name.into(), arg);
        self
    }

    pub fn with_resolver(
        mut self,
        f: impl Fn(&ResolveParams<'_>) -> FieldResult + Send + Sync + 'static,
    ) -> Self {
        self.resolve = Some(Arc::new(f));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("ty", &self.ty)
            .field("args", &self.args)
            .field("resolve", &self.resolve.is_some())
            .finish_non_exhaustive()
    }
}

/// A published field argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

/// A published field.
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    /// Sorted by name.
    pub args: Vec<Argument>,
    pub deprecation_reason: Option<String>,
    pub description: Option<String>,
    resolve: Option<FieldResolveFn>,
}

impl FieldDefinition {
    pub fn arg(&self, name: &str) -> Option<&Argument> {
        self.args.iter().find(|arg| arg.name == name)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn has_resolver(&self) -> bool {
        self.resolve.is_some()
    }

    /// Runs the configured resolver, or reads `source[name]` when there is none.
    pub fn resolve(&self, params: &ResolveParams<'_>) -> FieldResult {
        match &self.resolve {
            Some(resolve) => resolve(params),
            None => Ok(default_resolve(params.source, &self.name)),
        }
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("args", &self.args)
            .field("deprecation_reason", &self.deprecation_reason)
            .field("resolve", &self.resolve.is_some())
            .finish_non_exhaustive()
    }
}

fn default_resolve(source: &Value, field_name: &str) -> Value {
    source.get(field_name).cloned().unwrap_or(Value::Null)
}

/// Builds the field map of an object or interface.
///
/// Fails on the first invalid field; no partial map is produced.
pub(crate) fn define_field_map(
    owner: &str,
    configs: FieldConfigMap,
    kinds: &KindTable,
) -> TypeResult<IndexMap<String, FieldDefinition>> {
    if configs.is_empty() {
        return Err(TypeError::EmptyFields(owner.to_string()));
    }

    let mut fields = IndexMap::with_capacity(configs.len());
    for (name, config) in configs {
        assert_valid_name(&name)?;
        if !kinds.accepts_output(&config.ty)? {
            return Err(TypeError::FieldNotOutput {
                owner: owner.to_string(),
                field: name,
                ty: config.ty.to_string(),
            });
        }

        let mut args = Vec::with_capacity(config.args.len());
        for (arg_name, arg) in config.args {
            assert_valid_name(&arg_name)?;
            if !kinds.accepts_input(&arg.ty)? {
                return Err(TypeError::ArgumentNotInput {
                    owner: owner.to_string(),
                    field: name,
                    argument: arg_name,
                    ty: arg.ty.to_string(),
                });
            }
            args.push(Argument {
                name: arg_name,
                ty: arg.ty,
                default_value: arg.default_value,
                description: arg.description,
            });
        }
        args.sort_by(|a, b| a.name.cmp(&b.name));

        fields.insert(
            name.clone(),
            FieldDefinition {
                name,
                ty: config.ty,
                args,
                deprecation_reason: config.deprecation_reason,
                description: config.description,
                resolve: config.resolve,
            },
        );
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TypeKind;

    fn kinds() -> KindTable {
        let mut kinds = KindTable::default();
        kinds.insert("String", TypeKind::Scalar);
        kinds.insert("Int", TypeKind::Scalar);
        kinds.insert("Person", TypeKind::Object);
        kinds.insert("PersonInput", TypeKind::InputObject);
        kinds
    }

    #[test]
    fn test_args_sorted_by_name() {
        let configs = FieldConfigMap::from([(
            "friends".to_string(),
            FieldConfig::new(TypeRef::list("Person".into()))
                .with_argument("first", ArgumentConfig::new("Int"))
                .with_argument("after", ArgumentConfig::new("String")),
        )]);
        let fields = define_field_map("Person", configs, &kinds()).unwrap();
        let names: Vec<_> = fields["friends"].args.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["after", "first"]);
    }

    #[test]
    fn test_empty_map_names_owner() {
        let err = define_field_map("Person", FieldConfigMap::new(), &kinds()).unwrap_err();
        assert_eq!(err, TypeError::EmptyFields("Person".into()));
        assert!(err.to_string().starts_with("Person fields must be an object"));
    }

    #[test]
    fn test_rejects_input_object_as_output() {
        let configs = FieldConfigMap::from([
            ("name".to_string(), FieldConfig::new("String")),
            ("input".to_string(), FieldConfig::new("PersonInput")),
        ]);
        let err = define_field_map("Person", configs, &kinds()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Person.input field type must be Output Type but got: PersonInput."
        );
    }

    #[test]
    fn test_rejects_object_as_argument() {
        let configs = FieldConfigMap::from([(
            "friend".to_string(),
            FieldConfig::new("Person").with_argument("like", ArgumentConfig::new("Person")),
        )]);
        let err = define_field_map("Person", configs, &kinds()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Person.friend(like:) argument type must be Input Type but got: Person."
        );
    }

    #[test]
    fn test_unknown_field_type() {
        let configs = FieldConfigMap::from([("pet".to_string(), FieldConfig::new("Pet"))]);
        let err = define_field_map("Person", configs, &kinds()).unwrap_err();
        assert_eq!(err, TypeError::UnknownType("Pet".into()));
    }
}
