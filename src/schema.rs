//! Declarative schema trees and their recursive evaluator.
//!
//! A [`Schema`] maps field names to rules. A rule is one of four closed
//! shapes: a type-name shorthand, a [`FieldRules`] descriptor, a nested
//! sub-schema, or a custom callback receiving the engine and the field's
//! fully-qualified path. Evaluation walks the tree and dispatches each
//! field to the corresponding [`Validator`] checks, so schema validation
//! accumulates exactly the errors the direct calls would have.

use indexmap::IndexMap;

use crate::engine::Validator;
use crate::enums::AllowList;
use crate::path;

/// A custom per-field check invoked with the engine and the full path.
pub type CheckFn = Box<dyn Fn(&mut Validator, &str) + Send + Sync>;

/// One rule attached to a schema field.
pub enum Rule {
    /// Shorthand for a bare type check (`"string"`, `"integer"`, ...).
    Type(String),
    /// A descriptor bundling per-field constraints.
    Field(FieldRules),
    /// A nested schema; evaluation recurses with an extended path prefix.
    Nested(Schema),
    /// A custom callback performing its own checks.
    Check(CheckFn),
}

impl From<&str> for Rule {
    fn from(type_name: &str) -> Self {
        Rule::Type(type_name.to_string())
    }
}

impl From<String> for Rule {
    fn from(type_name: String) -> Self {
        Rule::Type(type_name)
    }
}

impl From<FieldRules> for Rule {
    fn from(rules: FieldRules) -> Self {
        Rule::Field(rules)
    }
}

impl From<Schema> for Rule {
    fn from(schema: Schema) -> Self {
        Rule::Nested(schema)
    }
}

/// Per-field constraint descriptor for schema validation.
///
/// Every constraint is optional; absent means not checked. The checks for
/// one field run in a fixed order — required, type, enum, range, length,
/// pattern — and all present checks run even after an earlier failure,
/// except that a missing required field short-circuits the rest.
///
/// # Example
///
/// ```rust
/// use dragnet::FieldRules;
///
/// let rules = FieldRules::new()
///     .required()
///     .of_type("string")
///     .min_length(1)
///     .max_length(64)
///     .pattern(r"^[a-z0-9_]+$");
/// ```
#[derive(Clone, Default)]
pub struct FieldRules {
    pub(crate) of_type: Option<String>,
    pub(crate) required: bool,
    pub(crate) allowed: Option<AllowList>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<String>,
}

impl FieldRules {
    /// Creates an empty descriptor; nothing is checked until constraints
    /// are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to have the given runtime type.
    pub fn of_type(mut self, type_name: impl Into<String>) -> Self {
        self.of_type = Some(type_name.into());
        self
    }

    /// Marks the field as required; absence becomes an error instead of a
    /// silent skip.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restricts the value to an allow-list (literal values, an inline
    /// enum definition, or a registered enum name).
    pub fn allowed(mut self, allow: impl Into<AllowList>) -> Self {
        self.allowed = Some(allow.into());
        self
    }

    /// Sets the inclusive numeric lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive numeric upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the minimum length (characters for strings, items for arrays).
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum length (characters for strings, items for arrays).
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires the value to match a regex pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// An insertion-ordered declarative rule tree.
///
/// # Example
///
/// ```rust
/// use dragnet::{FieldRules, Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .rule("name", FieldRules::new().required().of_type("string"))
///     .rule(
///         "address",
///         Schema::new().rule("city", "string").rule("zip", "string"),
///     )
///     .check("tags", |v, key| {
///         v.where_not_empty(key);
///     });
///
/// let mut v = Validator::new(json!({
///     "name": "Amira",
///     "address": {"city": "Tunis", "zip": "1001"},
///     "tags": ["a"]
/// }));
/// v.where_schema("", &schema);
/// assert!(v.passes());
/// ```
#[derive(Default)]
pub struct Schema {
    rules: IndexMap<String, Rule>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a rule to a field: a type-name shorthand, a
    /// [`FieldRules`] descriptor, or a nested [`Schema`].
    pub fn rule(mut self, field: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.rules.insert(field.into(), rule.into());
        self
    }

    /// Attaches a custom callback to a field; it receives the engine and
    /// the field's fully-qualified path and performs its own checks.
    pub fn check<F>(mut self, field: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut Validator, &str) + Send + Sync + 'static,
    {
        self.rules.insert(field.into(), Rule::Check(Box::new(callback)));
        self
    }

    /// Returns the number of fields with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are attached.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over (field, rule) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }
}

/// Recursively applies a schema to the validator's document at a path
/// prefix (empty = root).
pub(crate) fn evaluate(v: &mut Validator, key: &str, schema: &Schema) {
    if !key.is_empty() && v.value(key).is_none() {
        v.add_error(key, format!("The '{key}' is required"));
        return;
    }

    let target = if key.is_empty() {
        Some(v.data())
    } else {
        v.value(key)
    };
    let is_object = target.is_some_and(serde_json::Value::is_object);
    if !is_object {
        let message = if key.is_empty() {
            "The data must be an object".to_string()
        } else {
            format!("The '{key}' must be an object")
        };
        v.add_error(key, message);
        return;
    }

    for (field, rule) in schema.iter() {
        let full = path::join(key, field);
        match rule {
            Rule::Type(type_name) => {
                v.where_type(&full, type_name);
            }
            Rule::Field(rules) => apply_field_rules(v, &full, rules),
            Rule::Nested(nested) => evaluate(v, &full, nested),
            Rule::Check(callback) => callback(v, &full),
        }
    }
}

/// Applies one field's descriptor in the fixed check order.
fn apply_field_rules(v: &mut Validator, key: &str, rules: &FieldRules) {
    if v.value(key).is_none() {
        if rules.required {
            v.add_error(key, format!("The '{key}' is required"));
        }
        return;
    }

    if let Some(type_name) = &rules.of_type {
        v.where_type(key, type_name);
    }
    if let Some(allow) = &rules.allowed {
        v.where_in(key, allow.clone());
    }
    if rules.min.is_some() || rules.max.is_some() {
        v.where_between(
            key,
            rules.min.unwrap_or(f64::NEG_INFINITY),
            rules.max.unwrap_or(f64::INFINITY),
        );
    }
    if rules.min_length.is_some() || rules.max_length.is_some() {
        v.where_length(key, None, rules.min_length, rules.max_length);
    }
    if let Some(pattern) = &rules.pattern {
        v.where_regex(key, pattern, false);
    }
}
