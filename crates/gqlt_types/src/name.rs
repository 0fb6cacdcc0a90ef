//! Identifier validation for type, field, argument and enum value names.

use crate::error::{TypeError, TypeResult};

/// Returns `true` if `name` matches `^[_a-zA-Z][_a-zA-Z0-9]*$`.
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first == b'_' || first.is_ascii_alphabetic() => {
            bytes.all(|b| b == b'_' || b.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Fails with a descriptive error naming `name` if it is not a valid identifier.
pub fn assert_valid_name(name: &str) -> TypeResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(TypeError::InvalidName(name.to_string()))
    }
}
