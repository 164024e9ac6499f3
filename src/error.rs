//! The error accumulator and validation error types.
//!
//! Soft rule failures are collected in an [`ErrorMap`] keyed by path; fatal
//! conditions (undecodable input, strict finalization) surface as
//! [`ValidationError`].

use std::fmt::{self, Display};

use indexmap::IndexMap;

/// An insertion-ordered mapping from path to its violation messages.
///
/// The map only grows during a validation session and is never pruned.
/// An empty map means validation currently passes. Multiple messages may
/// accumulate under one path, in the order the checks were issued;
/// duplicates are permitted.
///
/// # Example
///
/// ```rust
/// use dragnet::ErrorMap;
///
/// let mut errors = ErrorMap::new();
/// errors.add("user.age", "The 'user.age' must be between 1 and 100");
/// errors.add("user.age", "The 'user.age' must be of type: integer");
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.total(), 2);
/// assert_eq!(errors.get("user.age").map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the list for a path, creating the entry if needed.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(path.into())
            .or_default()
            .push(message.into());
    }

    /// Absorbs all entries of another map, preserving per-path message order.
    pub fn merge(&mut self, other: ErrorMap) {
        for (path, messages) in other.entries {
            self.entries.entry(path).or_default().extend(messages);
        }
    }

    /// Returns true when no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of paths that have at least one error.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total number of messages across all paths.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns the messages recorded for a path, if any.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Returns true when the path has at least one error.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterates over paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over (path, messages) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }
}

impl Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.total())?;
        for (path, messages) in self.iter() {
            for message in messages {
                writeln!(f, "  {path}: {message}")?;
            }
        }
        Ok(())
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A fatal validation error.
///
/// Two disjoint families exist: a construction-time decode failure, which
/// prevents any engine from being built, and the strict-finalization
/// surface of accumulated soft errors. Soft errors themselves are never
/// raised — they only live in the [`ErrorMap`].
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The raw input text failed to decode as JSON.
    #[error("Invalid JSON string: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    /// Strict finalization found one or more rule violations.
    #[error("{errors}")]
    Failed {
        /// The full path-keyed error map accumulated during the session.
        errors: ErrorMap,
    },
}

impl ValidationError {
    /// Returns the accumulated error map for a `Failed` error, if any.
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            ValidationError::Failed { errors } => Some(errors),
            ValidationError::InvalidJson { .. } => None,
        }
    }
}
