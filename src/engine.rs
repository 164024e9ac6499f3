//! The path-addressed rule engine.
//!
//! A [`Validator`] wraps one frozen document and accumulates every rule
//! violation in a path-keyed [`ErrorMap`] — checks never throw and never
//! stop subsequent checks. Every check method returns `&mut Self` so rules
//! chain fluently; each one resolves its path against the original document,
//! so call order never changes the pass/fail outcome, only message order
//! within one path's list.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::enums::{AllowList, EnumRegistry};
use crate::error::{ErrorMap, ValidationError};
use crate::path;
use crate::schema::{self, Schema};
use crate::types::{self, ValueType};

/// The outcome of a custom predicate.
///
/// `FailWith` carries a message used verbatim; a bare `Fail` gets the
/// operation's generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    FailWith(String),
}

/// Which IP versions an address check admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpVersion {
    #[default]
    Any,
    V4,
    V6,
}

/// A stateful rule engine over one JSON document.
///
/// Construct it from a pre-decoded [`Value`] or from raw text (which must
/// decode, or construction fails), issue any number of chainable checks,
/// then query the outcome. The document is never mutated; the engine's only
/// mutable state is its error accumulator and the finalization flag.
///
/// # Example
///
/// ```rust
/// use dragnet::Validator;
/// use serde_json::json;
///
/// let mut v = Validator::new(json!({"id": 123, "tags": ["a", "b"]}));
/// v.has("id")
///     .where_type("id", "integer")
///     .where_length("tags", Some(2), None, None);
///
/// assert!(v.passes());
/// ```
#[derive(Debug)]
pub struct Validator {
    data: Value,
    errors: ErrorMap,
    validated: bool,
    enums: Option<EnumRegistry>,
}

/// The standard required-class message recorded whenever a checked path
/// does not resolve.
fn required(key: &str) -> String {
    format!("The '{key}' is required")
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern compiles")
    })
}

impl Validator {
    /// Creates a validator over a pre-decoded document.
    pub fn new(data: Value) -> Self {
        Self {
            data,
            errors: ErrorMap::new(),
            validated: false,
            enums: None,
        }
    }

    /// Creates a validator from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJson`] carrying the decoder's
    /// message when the text does not decode. No engine exists in that
    /// case — decode failures never enter the error accumulator.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let data = serde_json::from_str(text)?;
        Ok(Self::new(data))
    }

    /// Attaches an enum registry used to resolve named allow-lists.
    pub fn with_enums(mut self, registry: EnumRegistry) -> Self {
        self.enums = Some(registry);
        self
    }

    /// Returns the wrapped document.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Resolves a path against the document without recording anything.
    pub fn value(&self, key: &str) -> Option<&Value> {
        path::resolve(&self.data, key)
    }

    // --- existence checks -------------------------------------------------

    /// Checks that a key exists. An explicit null counts as present.
    pub fn has(&mut self, key: &str) -> &mut Self {
        if path::resolve(&self.data, key).is_none() {
            self.errors.add(key, required(key));
        }
        self
    }

    /// Checks that every key in the list exists.
    pub fn has_all(&mut self, keys: &[&str]) -> &mut Self {
        for key in keys {
            self.has(key);
        }
        self
    }

    /// Checks that a key does not exist.
    pub fn has_not(&mut self, key: &str) -> &mut Self {
        if path::resolve(&self.data, key).is_some() {
            self.errors
                .add(key, format!("The '{key}' must not be present"));
        }
        self
    }

    /// Checks that none of the keys in the list exist.
    pub fn has_none(&mut self, keys: &[&str]) -> &mut Self {
        for key in keys {
            self.has_not(key);
        }
        self
    }

    /// Checks that at least one of the keys exists.
    ///
    /// When all are absent, one aggregate error is recorded under the
    /// synthetic key `anyOf`.
    pub fn has_any_of(&mut self, keys: &[&str]) -> &mut Self {
        let exists = keys.iter().any(|key| path::exists(&self.data, key));
        if !exists {
            self.errors.add(
                "anyOf",
                format!("At least one of these keys must exist: {}", keys.join(", ")),
            );
        }
        self
    }

    // --- value checks -----------------------------------------------------

    /// Checks that a key equals a value.
    ///
    /// Equality is loose only for the documented scalar coercion: a numeric
    /// string compares equal to the number it denotes. Arrays and objects
    /// always compare structurally.
    pub fn where_eq(&mut self, key: &str, expected: &Value) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        if !types::loosely_equals(value, expected) {
            self.errors.add(
                key,
                format!(
                    "The '{key}' must be exactly: {}",
                    types::value_to_string(expected)
                ),
            );
        }
        self
    }

    /// Like [`where_eq`](Self::where_eq), but an absent key passes.
    pub fn where_optional(&mut self, key: &str, expected: &Value) -> &mut Self {
        if path::resolve(&self.data, key).is_none() {
            return self;
        }
        self.where_eq(key, expected)
    }

    /// Checks that a key's value satisfies a boolean predicate.
    ///
    /// `message` overrides the generic failure message.
    pub fn where_is<F>(&mut self, key: &str, predicate: F, message: Option<&str>) -> &mut Self
    where
        F: Fn(&Value) -> bool,
    {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        if !predicate(value) {
            let message = message
                .map(str::to_string)
                .unwrap_or_else(|| format!("The '{key}' doesn't match the required condition"));
            self.errors.add(key, message);
        }
        self
    }

    /// Checks that a key's value passes a custom validator.
    ///
    /// A [`Verdict::FailWith`] message is recorded verbatim; a bare
    /// [`Verdict::Fail`] records the generic failure message.
    pub fn where_is_valid<F>(&mut self, key: &str, validator: F) -> &mut Self
    where
        F: Fn(&Value) -> Verdict,
    {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        match validator(value) {
            Verdict::Pass => {}
            Verdict::Fail => {
                self.errors
                    .add(key, format!("The '{key}' failed validation"));
            }
            Verdict::FailWith(message) => self.errors.add(key, message),
        }
        self
    }

    // --- type checks ------------------------------------------------------

    /// Checks that a key's value has the given runtime type.
    ///
    /// Recognized names: `string`, `int`/`integer`, `float`/`double`,
    /// `bool`/`boolean`, `array`, `object`, `null`. Any other name is a
    /// named structural type, which decoded JSON data never matches.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dragnet::Validator;
    /// use serde_json::json;
    ///
    /// let mut v = Validator::new(json!({"id": 123}));
    /// v.where_type("id", "integer");
    /// assert!(v.passes());
    ///
    /// let mut v = Validator::new(json!({"id": 123}));
    /// v.where_type("id", "string");
    /// assert!(v.fails());
    /// ```
    pub fn where_type(&mut self, key: &str, type_name: &str) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        if !ValueType::from(type_name).matches(value) {
            self.errors
                .add(key, format!("The '{key}' must be of type: {type_name}"));
        }
        self
    }

    /// Applies [`where_type`](Self::where_type) to a batch of (key, type) pairs.
    pub fn where_all_types<'a, I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, type_name) in pairs {
            self.where_type(key, type_name);
        }
        self
    }

    /// Like [`where_type`](Self::where_type), but an absent key passes.
    pub fn where_optional_type(&mut self, key: &str, type_name: &str) -> &mut Self {
        if path::resolve(&self.data, key).is_none() {
            return self;
        }
        self.where_type(key, type_name)
    }

    /// Checks that a key is an array whose elements all have the given type.
    ///
    /// Each failing element is recorded individually under `<key>.<index>`.
    pub fn where_contains_type(&mut self, key: &str, type_name: &str) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(items) = value.as_array() else {
            self.errors.add(key, format!("The '{key}' must be an array"));
            return self;
        };

        let expected = ValueType::from(type_name);
        let failing: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !expected.matches(item))
            .map(|(index, _)| index)
            .collect();

        for index in failing {
            let element_key = path::join_index(key, index);
            self.errors.add(
                element_key.clone(),
                format!("The '{element_key}' must be of type: {type_name}"),
            );
        }
        self
    }

    // --- numeric and size checks ------------------------------------------

    /// Checks that a key's value lies in the inclusive range `[min, max]`.
    ///
    /// A JSON number or a numeric string qualifies as numeric; anything
    /// else records a "must be numeric" error instead of the range check.
    pub fn where_between(&mut self, key: &str, min: f64, max: f64) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(number) = types::as_numeric(value) else {
            self.errors.add(key, format!("The '{key}' must be numeric"));
            return self;
        };
        if number < min || number > max {
            self.errors
                .add(key, format!("The '{key}' must be between {min} and {max}"));
        }
        self
    }

    /// Checks the length of a string (characters) or array (elements).
    ///
    /// Each supplied bound is checked independently, so one call can record
    /// up to one message per violated bound.
    pub fn where_length(
        &mut self,
        key: &str,
        exact: Option<usize>,
        min: Option<usize>,
        max: Option<usize>,
    ) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let (length, kind, unit) = match value {
            Value::String(s) => (s.chars().count(), "string", "characters"),
            Value::Array(items) => (items.len(), "array", "items"),
            _ => {
                self.errors
                    .add(key, format!("The '{key}' must be a string or array"));
                return self;
            }
        };

        if let Some(exact) = exact {
            if length != exact {
                self.errors.add(
                    key,
                    format!("The '{key}' {kind} must be exactly {exact} {unit} long"),
                );
            }
        }
        if let Some(min) = min {
            if length < min {
                self.errors.add(
                    key,
                    format!("The '{key}' {kind} must be at least {min} {unit} long"),
                );
            }
        }
        if let Some(max) = max {
            if length > max {
                self.errors.add(
                    key,
                    format!("The '{key}' {kind} must not exceed {max} {unit} long"),
                );
            }
        }
        self
    }

    /// Checks that a string or array is not empty.
    ///
    /// Values of other types pass; use a type check to constrain them.
    pub fn where_not_empty(&mut self, key: &str) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let empty_kind = match value {
            Value::String(s) if s.is_empty() => Some("string"),
            Value::Array(items) if items.is_empty() => Some("array"),
            _ => None,
        };
        if let Some(kind) = empty_kind {
            self.errors
                .add(key, format!("The '{key}' {kind} must not be empty"));
        }
        self
    }

    // --- string checks ----------------------------------------------------

    /// Checks that a string value matches a regex pattern.
    ///
    /// With `match_all`, every match is enumerated (mirrors global
    /// matching); the failure condition is the same either way — the
    /// pattern produced no match at all. An invalid pattern is recorded as
    /// an ordinary soft error at the path.
    pub fn where_regex(&mut self, key: &str, pattern: &str, match_all: bool) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(subject) = value.as_str() else {
            self.errors
                .add(key, format!("The '{key}' must be a string for regex validation"));
            return self;
        };
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(_) => {
                self.errors
                    .add(key, format!("The '{key}' has an invalid pattern: {pattern}"));
                return self;
            }
        };

        let matched = if match_all {
            regex.find_iter(subject).count() > 0
        } else {
            regex.is_match(subject)
        };
        if !matched {
            self.errors
                .add(key, format!("The '{key}' must match the pattern: {pattern}"));
        }
        self
    }

    /// Checks that a string value contains a substring.
    pub fn where_contains(&mut self, key: &str, needle: &str, case_sensitive: bool) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(subject) = value.as_str() else {
            self.errors.add(key, format!("The '{key}' must be a string"));
            return self;
        };

        let found = if case_sensitive {
            subject.contains(needle)
        } else {
            subject.to_lowercase().contains(&needle.to_lowercase())
        };
        if !found {
            let suffix = if case_sensitive { "" } else { " (case insensitive)" };
            self.errors
                .add(key, format!("The '{key}' must contain '{needle}'{suffix}"));
        }
        self
    }

    // --- array checks -----------------------------------------------------

    /// Checks every element of an array against a custom validator.
    ///
    /// The callback receives each element with its index; failures are
    /// keyed `<key>.<index>`. A [`Verdict::FailWith`] message is recorded
    /// verbatim, a bare [`Verdict::Fail`] gets the generic per-item message.
    pub fn where_each<F>(&mut self, key: &str, callback: F) -> &mut Self
    where
        F: Fn(&Value, usize) -> Verdict,
    {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(items) = value.as_array() else {
            self.errors.add(key, format!("The '{key}' must be an array"));
            return self;
        };

        let failures: Vec<(usize, String)> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match callback(item, index) {
                Verdict::Pass => None,
                Verdict::Fail => Some((index, format!("Item at index {index} failed validation"))),
                Verdict::FailWith(message) => Some((index, message)),
            })
            .collect();

        for (index, message) in failures {
            self.errors.add(path::join_index(key, index), message);
        }
        self
    }

    // --- allow-list check -------------------------------------------------

    /// Checks that a key's value is a strict member of an allow-list.
    ///
    /// The list is a literal `Vec<Value>`, an inline [`crate::EnumDef`]
    /// (expanded to its admissible values), or the name of a definition
    /// registered on the attached [`EnumRegistry`]. Membership uses strict
    /// value equality — no coercion.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dragnet::{EnumDef, Validator};
    /// use serde_json::json;
    ///
    /// let mut v = Validator::new(json!({"suit": "Hearts"}));
    /// v.where_in("suit", EnumDef::new("Suit").variant("Hearts").variant("Spades"));
    /// assert!(v.passes());
    /// ```
    pub fn where_in(&mut self, key: &str, allowed: impl Into<AllowList>) -> &mut Self {
        if path::resolve(&self.data, key).is_none() {
            self.errors.add(key, required(key));
            return self;
        }

        let values: Vec<Value> = match allowed.into() {
            AllowList::Values(values) => values,
            AllowList::Def(def) => def.expand(),
            AllowList::Named(name) => {
                match self.enums.as_ref().and_then(|registry| registry.get(&name)) {
                    Some(def) => def.expand(),
                    None => {
                        self.errors.add(
                            key,
                            format!("The '{key}' references unknown enum '{name}'"),
                        );
                        return self;
                    }
                }
            }
        };

        let member = path::resolve(&self.data, key)
            .is_some_and(|value| values.iter().any(|allowed| allowed == value));
        if !member {
            let rendered = values
                .iter()
                .map(types::value_to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.errors
                .add(key, format!("The '{key}' must be one of: {rendered}"));
        }
        self
    }

    // --- format checks ----------------------------------------------------

    /// Checks that a string value is a date in the given chrono format.
    ///
    /// The value must parse under `format` *and* re-render identically;
    /// the round trip guards against lenient parsing of malformed dates.
    pub fn where_date(&mut self, key: &str, format: &str) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(subject) = value.as_str() else {
            self.errors
                .add(key, format!("The '{key}' must be a string for date validation"));
            return self;
        };
        if !date_round_trips(subject, format) {
            self.errors.add(
                key,
                format!("The '{key}' must be a valid date in format: {format}"),
            );
        }
        self
    }

    /// Checks that a string value names a file path.
    ///
    /// With `must_exist`, performs one synchronous filesystem stat — the
    /// engine's only I/O touchpoint; it is not retried or cached.
    pub fn where_is_file(&mut self, key: &str, must_exist: bool) -> &mut Self {
        let Some(value) = path::resolve(&self.data, key) else {
            self.errors.add(key, required(key));
            return self;
        };
        let Some(file_path) = value.as_str() else {
            self.errors.add(
                key,
                format!("The '{key}' must be a string representing a file path"),
            );
            return self;
        };
        if must_exist && !std::path::Path::new(file_path).exists() {
            self.errors.add(
                key,
                format!("The file specified in '{key}' does not exist: {file_path}"),
            );
        }
        self
    }

    /// Checks that a string value looks like an e-mail address.
    pub fn where_email(&mut self, key: &str) -> &mut Self {
        self.where_is_valid(key, |value| match value.as_str() {
            None => Verdict::FailWith(format!("{key} must be a string")),
            Some(s) if email_regex().is_match(s) => Verdict::Pass,
            Some(_) => Verdict::FailWith(format!("{key} must be a valid email address")),
        })
    }

    /// Checks that a string value parses as an absolute URL.
    pub fn where_url(&mut self, key: &str) -> &mut Self {
        self.where_is_valid(key, |value| match value.as_str() {
            None => Verdict::FailWith(format!("{key} must be a string")),
            Some(s) if Url::parse(s).is_ok() => Verdict::Pass,
            Some(_) => Verdict::FailWith(format!("{key} must be a valid URL")),
        })
    }

    /// Checks that a string value parses as an IP address of the given version.
    pub fn where_ip(&mut self, key: &str, version: IpVersion) -> &mut Self {
        self.where_is_valid(key, |value| match value.as_str() {
            None => Verdict::FailWith(format!("{key} must be a string")),
            Some(s) => {
                let valid = match version {
                    IpVersion::Any => s.parse::<IpAddr>().is_ok(),
                    IpVersion::V4 => s.parse::<Ipv4Addr>().is_ok(),
                    IpVersion::V6 => s.parse::<Ipv6Addr>().is_ok(),
                };
                if valid {
                    Verdict::Pass
                } else {
                    Verdict::FailWith(format!("{key} must be a valid IP address"))
                }
            }
        })
    }

    // --- schema evaluation ------------------------------------------------

    /// Applies a declarative schema rooted at a path (empty key = document root).
    ///
    /// See [`Schema`] for the rule tree shape. The resulting error map is
    /// exactly the union of what the equivalent direct checks on each leaf
    /// field would have produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dragnet::{FieldRules, Schema, Validator};
    /// use serde_json::json;
    ///
    /// let schema = Schema::new()
    ///     .rule("name", "string")
    ///     .rule("age", FieldRules::new().of_type("integer").min(0.0).max(120.0));
    ///
    /// let mut v = Validator::new(json!({"name": "Amira", "age": 34}));
    /// v.where_schema("", &schema);
    /// assert!(v.passes());
    /// ```
    pub fn where_schema(&mut self, key: &str, schema: &Schema) -> &mut Self {
        schema::evaluate(self, key, schema);
        self
    }

    /// Records an error message at a path.
    ///
    /// For schema callbacks and custom extensions that perform their own
    /// checks; ordinary rules record through their own methods.
    pub fn add_error(&mut self, key: &str, message: impl Into<String>) -> &mut Self {
        self.errors.add(key, message);
        self
    }

    // --- outcome ----------------------------------------------------------

    /// Finalizes the session and returns whether validation passed.
    ///
    /// Idempotent: calling it again never re-runs rules or changes the
    /// accumulated errors.
    pub fn passes(&mut self) -> bool {
        self.validated = true;
        self.errors.is_empty()
    }

    /// Finalizes the session and returns whether validation failed.
    pub fn fails(&mut self) -> bool {
        !self.passes()
    }

    /// Returns the accumulated error map, finalizing first if needed.
    pub fn errors(&mut self) -> &ErrorMap {
        if !self.validated {
            self.passes();
        }
        &self.errors
    }

    /// Returns the document when validation passes, `None` otherwise.
    pub fn valid_data(&mut self) -> Option<&Value> {
        if self.passes() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Strict finalization: returns the document, or a structured failure
    /// carrying the full error map.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Failed`] when any rule recorded an error.
    pub fn validate(mut self) -> Result<Value, ValidationError> {
        if self.passes() {
            Ok(self.data)
        } else {
            Err(ValidationError::Failed {
                errors: self.errors,
            })
        }
    }
}

/// True when the value parses under the format and re-renders identically.
fn date_round_trips(value: &str, format: &str) -> bool {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        return dt.format(format).to_string() == value;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, format) {
        return date.format(format).to_string() == value;
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, format) {
        return time.format(format).to_string() == value;
    }
    false
}
