//! Dot-path resolution into nested JSON documents.
//!
//! Paths are plain dot-separated strings such as `user.address.city` or
//! `tags.0`. Each segment is an object key or, when the current node is an
//! array, the decimal form of a 0-based index. There is no escaping: a key
//! that itself contains a dot is not addressable.

use serde_json::Value;

/// Resolves a dot-separated path against a document.
///
/// Returns `Some(value)` when every segment resolves, `None` as soon as a
/// segment is absent or the current node is neither an object nor an array.
/// A key that is present but maps to JSON `null` resolves to
/// `Some(&Value::Null)` — presence and null-ness are distinct.
///
/// Resolution is read-only and O(path depth).
///
/// # Example
///
/// ```rust
/// use dragnet::path::resolve;
/// use serde_json::json;
///
/// let doc = json!({"user": {"tags": ["a", "b"]}, "gone": null});
///
/// assert_eq!(resolve(&doc, "user.tags.1"), Some(&json!("b")));
/// assert_eq!(resolve(&doc, "gone"), Some(&json!(null)));
/// assert_eq!(resolve(&doc, "user.missing"), None);
/// ```
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = lookup(current, segment)?;
    }
    Some(current)
}

/// Returns true when the path resolves, including to an explicit null.
pub fn exists(document: &Value, path: &str) -> bool {
    resolve(document, path).is_some()
}

/// Looks up a single segment in one node.
fn lookup<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Joins a path prefix and a key with a dot; an empty prefix yields the key.
pub fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Appends an array index segment to a path.
pub fn join_index(path: &str, index: usize) -> String {
    format!("{path}.{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_key() {
        let doc = json!({"id": 123});
        assert_eq!(resolve(&doc, "id"), Some(&json!(123)));
    }

    #[test]
    fn test_nested_object_path() {
        let doc = json!({"user": {"address": {"city": "Tunis"}}});
        assert_eq!(resolve(&doc, "user.address.city"), Some(&json!("Tunis")));
    }

    #[test]
    fn test_array_index_segment() {
        let doc = json!({"tags": ["a", "b", "c"]});
        assert_eq!(resolve(&doc, "tags.0"), Some(&json!("a")));
        assert_eq!(resolve(&doc, "tags.2"), Some(&json!("c")));
        assert_eq!(resolve(&doc, "tags.3"), None);
    }

    #[test]
    fn test_mixed_object_and_array() {
        let doc = json!({"users": [{"email": "a@b.c"}]});
        assert_eq!(resolve(&doc, "users.0.email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn test_absent_key_short_circuits() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(resolve(&doc, "a.x.y"), None);
        assert_eq!(resolve(&doc, "x"), None);
    }

    #[test]
    fn test_descends_into_scalar_fails() {
        let doc = json!({"a": 5});
        assert_eq!(resolve(&doc, "a.b"), None);
    }

    #[test]
    fn test_present_null_is_found() {
        let doc = json!({"a": null, "b": {"c": null}});
        assert_eq!(resolve(&doc, "a"), Some(&Value::Null));
        assert_eq!(resolve(&doc, "b.c"), Some(&Value::Null));
        assert!(exists(&doc, "a"));
        assert!(exists(&doc, "b.c"));
    }

    #[test]
    fn test_non_numeric_segment_on_array() {
        let doc = json!({"tags": ["a"]});
        assert_eq!(resolve(&doc, "tags.first"), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "name"), "name");
        assert_eq!(join("user", "name"), "user.name");
        assert_eq!(join_index("tags", 2), "tags.2");
    }
}
