//! Built-in scalars: `Int`, `Float`, `String`, `Boolean` and `ID`.

use crate::scalar::ScalarType;
use gqlt_syntax::ast;
use serde_json::Value;
use std::sync::Arc;

pub const INT: &str = "Int";
pub const FLOAT: &str = "Float";
pub const STRING: &str = "String";
pub const BOOLEAN: &str = "Boolean";
pub const ID: &str = "ID";

const BUILTIN_NAMES: [&str; 5] = [INT, FLOAT, STRING, BOOLEAN, ID];

/// Returns `true` for the names of the built-in scalars.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

/// All built-in scalars in registration order.
pub fn builtin_scalars() -> Vec<ScalarType> {
    vec![int(), float(), string(), boolean(), id()]
}

pub fn int() -> ScalarType {
    ScalarType::from_parts(
        INT,
        "The `Int` scalar type represents non-fractional signed whole numeric values. \
         Int can represent values between -(2^31) and 2^31 - 1.",
        Arc::new(coerce_int),
        Arc::new(|value: &Value| match value {
            Value::Number(_) => coerce_int(value),
            _ => None,
        }),
        Arc::new(|literal: &ast::Value| match literal {
            ast::Value::Int(n, _) => i32::try_from(*n).ok().map(Value::from),
            _ => None,
        }),
    )
}

pub fn float() -> ScalarType {
    ScalarType::from_parts(
        FLOAT,
        "The `Float` scalar type represents signed double-precision fractional values.",
        Arc::new(coerce_float),
        Arc::new(|value: &Value| match value {
            Value::Number(_) => coerce_float(value),
            _ => None,
        }),
        Arc::new(|literal: &ast::Value| match literal {
            ast::Value::Float(f, _) => float_value(*f),
            #[allow(clippy::cast_precision_loss)]
            ast::Value::Int(n, _) => float_value(*n as f64),
            _ => None,
        }),
    )
}

pub fn string() -> ScalarType {
    ScalarType::from_parts(
        STRING,
        "The `String` scalar type represents textual data, represented as UTF-8 character \
         sequences.",
        Arc::new(|value: &Value| match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        }),
        Arc::new(|value: &Value| value.is_string().then(|| value.clone())),
        Arc::new(|literal: &ast::Value| match literal {
            ast::Value::String(s, _) => Some(Value::String(s.clone())),
            _ => None,
        }),
    )
}

pub fn boolean() -> ScalarType {
    ScalarType::from_parts(
        BOOLEAN,
        "The `Boolean` scalar type represents `true` or `false`.",
        Arc::new(|value: &Value| match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
            Value::String(s) => Some(Value::Bool(!s.is_empty() && s != "false")),
            _ => None,
        }),
        Arc::new(|value: &Value| value.is_boolean().then(|| value.clone())),
        Arc::new(|literal: &ast::Value| match literal {
            ast::Value::Boolean(b, _) => Some(Value::Bool(*b)),
            _ => None,
        }),
    )
}

pub fn id() -> ScalarType {
    ScalarType::from_parts(
        ID,
        "The `ID` scalar type represents a unique identifier, often used to refetch an object \
         or as key for a cache.",
        Arc::new(coerce_id),
        Arc::new(coerce_id),
        Arc::new(|literal: &ast::Value| match literal {
            ast::Value::String(s, _) => Some(Value::String(s.clone())),
            ast::Value::Int(n, _) => Some(Value::String(n.to_string())),
            _ => None,
        }),
    )
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok().map(Value::from)
            } else {
                let f = n.as_f64()?;
                integral_i32(f).map(Value::from)
            }
        }
        Value::Bool(b) => Some(Value::from(i32::from(*b))),
        Value::String(s) => s.trim().parse::<i32>().ok().map(Value::from),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral_i32(f: f64) -> Option<i32> {
    let in_range = f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX);
    in_range.then(|| f as i32)
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_f64().and_then(float_value),
        Value::Bool(b) => float_value(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(float_value),
        _ => None,
    }
}

fn float_value(f: f64) -> Option<Value> {
    serde_json::Number::from_f64(f).map(Value::Number)
}

fn coerce_id(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::String(n.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlt_core::Span;
    use serde_json::json;

    #[test]
    fn test_int_range() {
        let int = int();
        assert_eq!(int.serialize(&json!(42)), Some(json!(42)));
        assert_eq!(int.serialize(&json!(3.0)), Some(json!(3)));
        assert_eq!(int.serialize(&json!(3.5)), None);
        assert_eq!(int.serialize(&json!(i64::from(i32::MAX) + 1)), None);
        assert_eq!(int.serialize(&json!(true)), Some(json!(1)));
        assert_eq!(int.parse_value(&json!("7")), None);
        assert_eq!(
            int.parse_literal(&ast::Value::Int(1 << 40, Span::default())),
            None
        );
    }

    #[test]
    fn test_float_accepts_int_literal() {
        let float = float();
        assert_eq!(
            float.parse_literal(&ast::Value::Int(2, Span::default())),
            Some(json!(2.0))
        );
        assert_eq!(float.serialize(&json!("1.5")), Some(json!(1.5)));
    }

    #[test]
    fn test_string_and_boolean() {
        assert_eq!(string().serialize(&json!(12)), Some(json!("12")));
        assert_eq!(string().parse_value(&json!(12)), None);
        assert_eq!(boolean().serialize(&json!(0)), Some(json!(false)));
        assert_eq!(
            boolean().parse_literal(&ast::Value::Boolean(true, Span::default())),
            Some(json!(true))
        );
    }

    #[test]
    fn test_id() {
        let id = id();
        assert_eq!(id.serialize(&json!(1001)), Some(json!("1001")));
        assert_eq!(
            id.parse_literal(&ast::Value::Int(4, Span::default())),
            Some(json!("4"))
        );
        assert_eq!(id.parse_value(&json!(1.5)), None);
    }

    #[test]
    fn test_builtins_are_input_capable() {
        let scalars = builtin_scalars();
        assert_eq!(scalars.len(), 5);
        assert!(scalars.iter().all(ScalarType::is_input_capable));
        assert!(scalars.iter().all(|s| is_builtin_scalar(s.name())));
        assert!(!is_builtin_scalar("DateTime"));
    }
}
