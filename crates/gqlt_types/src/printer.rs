//! SDL printing.

use crate::definition::TypeDefinition;
use crate::enum_type::EnumType;
use crate::field::{Argument, FieldDefinition};
use crate::input_object::InputObjectType;
use crate::interface::InterfaceType;
use crate::object::ObjectType;
use crate::scalar::ScalarType;
use crate::scalars::is_builtin_scalar;
use crate::schema::Schema;
use crate::union::UnionType;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::Write;

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Prints every non-built-in type of `schema` in registration order.
///
/// A `schema { ... }` block is only emitted when a root type does not use
/// its conventional name.
pub fn print_schema(schema: &Schema) -> String {
    let mut blocks = Vec::new();
    if let Some(block) = print_schema_definition(schema) {
        blocks.push(block);
    }
    blocks.extend(
        schema
            .type_map()
            .values()
            .filter(|ty| !is_builtin_scalar(ty.name()))
            .map(print_type),
    );
    blocks.join("\n\n")
}

fn print_schema_definition(schema: &Schema) -> Option<String> {
    let query = schema.query_type().name();
    let mutation = schema.mutation_type().map(ObjectType::name);
    if query == "Query" && mutation.map_or(true, |name| name == "Mutation") {
        return None;
    }

    let mut out = String::from("schema {\n");
    let _ = writeln!(out, "  query: {query}");
    if let Some(mutation) = mutation {
        let _ = writeln!(out, "  mutation: {mutation}");
    }
    out.push('}');
    Some(out)
}

/// Prints a single type definition.
pub fn print_type(ty: &TypeDefinition) -> String {
    match ty {
        TypeDefinition::Scalar(scalar) => print_scalar(scalar),
        TypeDefinition::Object(object) => print_object(object),
        TypeDefinition::Interface(interface) => print_interface(interface),
        TypeDefinition::Union(union_type) => print_union(union_type),
        TypeDefinition::Enum(enum_type) => print_enum(enum_type),
        TypeDefinition::InputObject(input) => print_input_object(input),
    }
}

fn print_scalar(scalar: &ScalarType) -> String {
    format!(
        "{}scalar {}",
        print_description(scalar.description(), ""),
        scalar.name()
    )
}

fn print_object(object: &ObjectType) -> String {
    let implements = if object.interfaces().is_empty() {
        String::new()
    } else {
        format!(" implements {}", object.interfaces().join(" & "))
    };
    format!(
        "{}type {}{implements} {}",
        print_description(object.description(), ""),
        object.name(),
        print_fields(object.fields())
    )
}

fn print_interface(interface: &InterfaceType) -> String {
    format!(
        "{}interface {} {}",
        print_description(interface.description(), ""),
        interface.name(),
        print_fields(interface.fields())
    )
}

fn print_union(union_type: &UnionType) -> String {
    let members: Vec<_> = union_type.types().iter().map(|o| o.name()).collect();
    format!(
        "{}union {} = {}",
        print_description(union_type.description(), ""),
        union_type.name(),
        members.join(" | ")
    )
}

fn print_enum(enum_type: &EnumType) -> String {
    let mut out = print_description(enum_type.description(), "");
    let _ = writeln!(out, "enum {} {{", enum_type.name());
    for value in enum_type.values() {
        out.push_str(&print_description(value.description.as_deref(), "  "));
        let _ = writeln!(
            out,
            "  {}{}",
            value.name,
            print_deprecated(value.deprecation_reason.as_deref())
        );
    }
    out.push('}');
    out
}

fn print_input_object(input: &InputObjectType) -> String {
    let mut out = print_description(input.description(), "");
    let _ = writeln!(out, "input {} {{", input.name());
    for field in input.fields().values() {
        out.push_str(&print_description(field.description.as_deref(), "  "));
        let _ = writeln!(
            out,
            "  {}: {}{}",
            field.name,
            field.ty,
            print_default(field.default_value.as_ref())
        );
    }
    out.push('}');
    out
}

fn print_fields(fields: &IndexMap<String, FieldDefinition>) -> String {
    let mut out = String::from("{\n");
    for field in fields.values() {
        out.push_str(&print_description(field.description.as_deref(), "  "));
        let _ = writeln!(
            out,
            "  {}{}: {}{}",
            field.name,
            print_args(&field.args),
            field.ty,
            print_deprecated(field.deprecation_reason.as_deref())
        );
    }
    out.push('}');
    out
}

fn print_args(args: &[Argument]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let args: Vec<_> = args
        .iter()
        .map(|arg| {
            format!(
                "{}: {}{}",
                arg.name,
                arg.ty,
                print_default(arg.default_value.as_ref())
            )
        })
        .collect();
    format!("({})", args.join(", "))
}

fn print_default(value: Option<&Value>) -> String {
    value
        .map(|value| format!(" = {}", print_value(value)))
        .unwrap_or_default()
}

fn print_deprecated(reason: Option<&str>) -> String {
    match reason {
        None => String::new(),
        Some(DEFAULT_DEPRECATION_REASON | "") => " @deprecated".to_string(),
        Some(reason) => format!(
            " @deprecated(reason: {})",
            print_value(&Value::String(reason.to_string()))
        ),
    }
}

fn print_description(description: Option<&str>, indent: &str) -> String {
    let Some(description) = description else {
        return String::new();
    };
    if description.contains('\n') {
        let mut out = format!("{indent}\"\"\"\n");
        for line in description.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "{indent}{}", line.replace("\"\"\"", "\\\"\"\""));
            }
        }
        let _ = writeln!(out, "{indent}\"\"\"");
        out
    } else {
        format!(
            "{indent}{}\n",
            print_value(&Value::String(description.to_string()))
        )
    }
}

/// Prints a runtime value as a GraphQL literal.
fn print_value(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(print_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<_> = fields
                .iter()
                .map(|(name, value)| format!("{name}: {}", print_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        // JSON encoding of null, booleans, numbers and strings is valid GraphQL.
        other => other.to_string(),
    }
}
