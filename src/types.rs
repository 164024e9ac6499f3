//! Runtime type tags and scalar helpers for JSON values.
//!
//! The type check dispatches on a type-name string rather than compile-time
//! polymorphism. [`ValueType`] is the closed set of recognized tags, with a
//! total `matches` function from (value, tag) to bool — adding a tag is a
//! one-line addition.

use serde_json::Value;

/// The closed set of type tags recognized by type checks.
///
/// Parsed from a type-name string via [`From<&str>`]. The common aliases
/// `int`, `double` and `bool` are accepted. Any unrecognized name becomes
/// [`ValueType::Named`], a structural type a decoded JSON value can never
/// inhabit — the check then always fails, mirroring an instance-of test
/// against plain data.
///
/// # Example
///
/// ```rust
/// use dragnet::ValueType;
/// use serde_json::json;
///
/// assert!(ValueType::from("integer").matches(&json!(42)));
/// assert!(!ValueType::from("string").matches(&json!(42)));
/// assert!(!ValueType::from("SomeClass").matches(&json!({"a": 1})));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Null,
    /// A named structural type; never matched by decoded JSON data.
    Named(String),
}

impl ValueType {
    /// Returns true when the value's runtime category matches this tag.
    ///
    /// Integers and floats are distinct: `1` is an integer, `1.0` a float.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_f64(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::Array => value.is_array(),
            ValueType::Object => value.is_object(),
            ValueType::Null => value.is_null(),
            ValueType::Named(_) => false,
        }
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        match name {
            "string" => ValueType::String,
            "int" | "integer" => ValueType::Integer,
            "float" | "double" => ValueType::Float,
            "bool" | "boolean" => ValueType::Boolean,
            "array" => ValueType::Array,
            "object" => ValueType::Object,
            "null" => ValueType::Null,
            other => ValueType::Named(other.to_string()),
        }
    }
}

/// Returns the canonical type name of a value's runtime category.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value for inclusion in an error message.
///
/// Strings render bare (no quotes), composites render as placeholders.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) => "[array]".to_string(),
        Value::Object(_) => "[object]".to_string(),
    }
}

/// Views a value as a number, accepting numeric strings.
///
/// Range checks treat `"42"` and `42` alike; anything non-numeric is `None`.
pub fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// Loose scalar equality: exact equality, plus the single documented
/// coercion of a numeric string against a number.
///
/// The coercion is deliberately narrow — arrays and objects are never
/// compared loosely, and two strings are never compared numerically.
pub fn loosely_equals(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::String(s), Value::Number(n)) | (Value::Number(n), Value::String(s)) => {
            matches!((s.parse::<f64>(), n.as_f64()), (Ok(x), Some(y)) if x == y)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_parsing_aliases() {
        assert_eq!(ValueType::from("int"), ValueType::Integer);
        assert_eq!(ValueType::from("integer"), ValueType::Integer);
        assert_eq!(ValueType::from("double"), ValueType::Float);
        assert_eq!(ValueType::from("bool"), ValueType::Boolean);
        assert_eq!(
            ValueType::from("DateTime"),
            ValueType::Named("DateTime".to_string())
        );
    }

    #[test]
    fn test_matches_scalars() {
        assert!(ValueType::String.matches(&json!("x")));
        assert!(ValueType::Integer.matches(&json!(7)));
        assert!(ValueType::Integer.matches(&json!(u64::MAX)));
        assert!(ValueType::Float.matches(&json!(1.5)));
        assert!(ValueType::Boolean.matches(&json!(false)));
        assert!(ValueType::Null.matches(&json!(null)));
    }

    #[test]
    fn test_integer_and_float_are_distinct() {
        assert!(!ValueType::Float.matches(&json!(1)));
        assert!(!ValueType::Integer.matches(&json!(1.0)));
    }

    #[test]
    fn test_matches_composites() {
        assert!(ValueType::Array.matches(&json!([1, 2])));
        assert!(ValueType::Object.matches(&json!({"a": 1})));
        assert!(!ValueType::Object.matches(&json!([1, 2])));
    }

    #[test]
    fn test_named_type_never_matches() {
        let named = ValueType::from("App\\Models\\User");
        assert!(!named.matches(&json!({"id": 1})));
        assert!(!named.matches(&json!("user")));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!(1)), "integer");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!("a")), "string");
        assert_eq!(type_name(&json!(null)), "null");
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!(null)), "null");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(3.5)), "3.5");
        assert_eq!(value_to_string(&json!("hi")), "hi");
        assert_eq!(value_to_string(&json!([1])), "[array]");
        assert_eq!(value_to_string(&json!({})), "[object]");
    }

    #[test]
    fn test_as_numeric() {
        assert_eq!(as_numeric(&json!(5)), Some(5.0));
        assert_eq!(as_numeric(&json!("5.5")), Some(5.5));
        assert_eq!(as_numeric(&json!("five")), None);
        assert_eq!(as_numeric(&json!(true)), None);
    }

    #[test]
    fn test_loose_equality_is_narrow() {
        assert!(loosely_equals(&json!(5), &json!(5)));
        assert!(loosely_equals(&json!("5"), &json!(5)));
        assert!(loosely_equals(&json!(5.0), &json!("5")));
        assert!(!loosely_equals(&json!("5"), &json!("5.0")));
        assert!(!loosely_equals(&json!([1]), &json!(["1"])));
        assert!(!loosely_equals(&json!(null), &json!(0)));
    }
}
