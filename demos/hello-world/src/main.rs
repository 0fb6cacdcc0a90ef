//! Hello World
//!
//! Builds a one-field schema, prints it as SDL and resolves `{ hello }`.
//!
//! # Running
//! ```bash
//! cargo run -p gqlt-demo-hello-world
//! ```

use gqlt_types::{
    print_schema, Context, FieldConfig, ObjectConfig, ResolveParams, Schema, SchemaConfig,
    TypeRegistry,
};
use miette::{miette, IntoDiagnostic};
use serde_json::{json, Map, Value};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "gqlt=info,hello_world=info";

fn main() -> miette::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_target(false)
        .compact()
        .init();

    let mut registry = TypeRegistry::new();
    registry.register_object(ObjectConfig::new("Query").with_field(
        "hello",
        FieldConfig::new("String").with_resolver(|_| Ok(json!("world"))),
    ))?;
    let schema = Schema::new(SchemaConfig::default(), registry)?;
    info!(types = schema.type_map().len(), "schema ready");
    println!("{}\n", print_schema(&schema));

    let context = Context::new();
    let root = Value::Null;
    let mut data = Map::new();
    for (name, field) in schema.query_type().fields() {
        let info = schema
            .resolve_info("Query", name)
            .ok_or_else(|| miette!("no field Query.{name}"))?;
        let params = ResolveParams::new(&root, &info, &context);
        data.insert(name.clone(), field.resolve(&params).into_diagnostic()?);
    }

    let response = json!({ "data": data });
    println!("{}", serde_json::to_string(&response).into_diagnostic()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary() {
        let target = env!("CARGO_CRATE_NAME");
        assert!(DEFAULT_FILTER
            .split(',')
            .any(|directive| directive == format!("{target}=info")));
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }
}
