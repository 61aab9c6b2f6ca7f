//! Runtime kinds of JSON values

use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// The runtime kind of a JSON value.
///
/// Integers and floats share the `Number` kind, so `1` and `1.5` are the
/// same kind and only differ by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether values of this kind are compared by value rather than structure
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
        }
    }
}

/// Numeric equality across integer and float representations.
///
/// `serde_json` keeps `1` and `1.0` as distinct representations; fixtures
/// written by hand should not care which one a server emits.
pub(crate) fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Scalar equality used by the matcher
pub(crate) fn scalars_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(-3)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(2.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Number.to_string(), "number");
        assert_eq!(ValueKind::Object.to_string(), "object");
    }

    #[test]
    fn test_integer_and_float_compare_numerically() {
        assert!(scalars_equal(&json!(1), &json!(1.0)));
        assert!(scalars_equal(&json!(-7), &json!(-7)));
        assert!(!scalars_equal(&json!(1), &json!(1.5)));
        assert!(!scalars_equal(&json!(u64::MAX), &json!(-1)));
    }

    #[test]
    fn test_non_numeric_scalars() {
        assert!(scalars_equal(&json!("a"), &json!("a")));
        assert!(!scalars_equal(&json!("a"), &json!("b")));
        assert!(scalars_equal(&json!(null), &json!(null)));
        assert!(!scalars_equal(&json!(true), &json!(false)));
    }
}
