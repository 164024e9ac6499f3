//! # Dragnet
//!
//! Path-addressed JSON validation that accumulates every error, providing
//! comprehensive feedback rather than short-circuiting on the first failure.
//!
//! ## Overview
//!
//! A [`Validator`] wraps one decoded JSON document and exposes chainable,
//! path-addressed checks — existence, equality, type, allow-list, numeric
//! range, length, regex, substring, per-element and custom predicates —
//! plus recursive [`Schema`] evaluation. Every failure is recorded in an
//! insertion-ordered map from dot-path to messages; no check ever stops
//! the ones after it.
//!
//! ## Core Types
//!
//! - [`Validator`]: the rule engine accumulating path-keyed errors over one document
//! - [`ErrorMap`]: insertion-ordered mapping from path to violation messages
//! - [`Schema`] / [`FieldRules`]: declarative, recursively nested field rules
//! - [`EnumDef`] / [`EnumRegistry`]: caller-described enumerations for allow-list checks
//! - [`ValidationError`]: fatal decode failure or strict-finalization failure
//!
//! ## Example
//!
//! ```rust
//! use dragnet::Validator;
//! use serde_json::json;
//!
//! let mut v = Validator::new(json!({"user": {"age": -5}}));
//! v.where_between("user.age", 0.0, 120.0)
//!     .has("user.name");
//!
//! assert!(v.fails());
//! let errors = v.errors();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.contains("user.age"));
//! assert!(errors.contains("user.name"));
//! ```

pub mod engine;
pub mod enums;
pub mod error;
pub mod path;
pub mod schema;
pub mod types;

pub use engine::{IpVersion, Validator, Verdict};
pub use enums::{AllowList, EnumDef, EnumRegistry, RegistryError};
pub use error::{ErrorMap, ValidationError};
pub use schema::{FieldRules, Rule, Schema};
pub use types::ValueType;
