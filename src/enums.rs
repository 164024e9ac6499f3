//! Enum descriptions and the registry backing allow-list checks.
//!
//! Instead of reflecting into host-language enum declarations, callers
//! describe an enumeration explicitly as an ordered list of
//! (symbolic name, optional scalar value) pairs and, optionally, register
//! it under its name for lookup by [`crate::Validator::where_in`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// A caller-supplied description of an enumeration-like type.
///
/// Variants come in two mutually exclusive families: *backed* variants carry
/// an associated scalar value, *bare* variants carry only their symbolic
/// name. The first variant's shape decides the family when expanding.
///
/// # Example
///
/// ```rust
/// use dragnet::EnumDef;
/// use serde_json::json;
///
/// // A backed enum expands to its associated values...
/// let status = EnumDef::new("Status")
///     .variant_value("Active", json!("active"))
///     .variant_value("Banned", json!("banned"));
/// assert_eq!(status.expand(), vec![json!("active"), json!("banned")]);
///
/// // ...a bare enum expands to its variant names.
/// let suit = EnumDef::new("Suit").variant("Hearts").variant("Spades");
/// assert_eq!(suit.expand(), vec![json!("Hearts"), json!("Spades")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    name: String,
    variants: Vec<(String, Option<Value>)>,
}

impl EnumDef {
    /// Creates an empty enum description with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Appends a bare variant carrying only its symbolic name.
    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variants.push((name.into(), None));
        self
    }

    /// Appends a backed variant carrying an associated scalar value.
    pub fn variant_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variants.push((name.into(), Some(value)));
        self
    }

    /// Returns the type name this description was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expands the description into its set of admissible values.
    ///
    /// If the first variant is backed, every variant contributes its
    /// associated value; otherwise every variant contributes its symbolic
    /// name as a JSON string. Families are expected to be uniform within
    /// one description.
    pub fn expand(&self) -> Vec<Value> {
        let backed = self
            .variants
            .first()
            .is_some_and(|(_, value)| value.is_some());

        self.variants
            .iter()
            .map(|(name, value)| {
                if backed {
                    value
                        .clone()
                        .unwrap_or_else(|| Value::String(name.clone()))
                } else {
                    Value::String(name.clone())
                }
            })
            .collect()
    }
}

/// Type alias for the shared definition storage.
type DefMap = Arc<RwLock<HashMap<String, Arc<EnumDef>>>>;

/// A thread-safe registry of named enum descriptions.
///
/// Cloning is shallow: clones share the same storage, so a registry can be
/// attached to many validators cheaply. Lookups take a read lock only.
///
/// # Example
///
/// ```rust
/// use dragnet::{EnumDef, EnumRegistry};
///
/// let registry = EnumRegistry::new();
/// registry
///     .register(EnumDef::new("Role").variant("Admin").variant("User"))
///     .unwrap();
///
/// assert!(registry.get("Role").is_some());
/// assert!(registry.get("Unknown").is_none());
/// ```
#[derive(Debug, Default)]
pub struct EnumRegistry {
    defs: DefMap,
}

impl EnumRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a description under its own type name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(&self, def: EnumDef) -> Result<(), RegistryError> {
        let mut defs = self.defs.write();
        if defs.contains_key(def.name()) {
            return Err(RegistryError::DuplicateName(def.name().to_string()));
        }
        defs.insert(def.name().to_string(), Arc::new(def));
        Ok(())
    }

    /// Retrieves a description by name.
    pub fn get(&self, name: &str) -> Option<Arc<EnumDef>> {
        self.defs.read().get(name).cloned()
    }
}

impl Clone for EnumRegistry {
    fn clone(&self) -> Self {
        Self {
            defs: Arc::clone(&self.defs),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a description under a name that already exists.
    #[error("enum '{0}' already registered")]
    DuplicateName(String),
}

/// The admissible-values argument of an allow-list check.
///
/// Either a literal list used verbatim, an inline enum description expanded
/// on the spot, or the name of a description registered on the validator's
/// [`EnumRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum AllowList {
    /// A literal list of admissible values.
    Values(Vec<Value>),
    /// An inline enum description, expanded per [`EnumDef::expand`].
    Def(EnumDef),
    /// The name of a registered enum description.
    Named(String),
}

impl From<Vec<Value>> for AllowList {
    fn from(values: Vec<Value>) -> Self {
        AllowList::Values(values)
    }
}

impl From<&[Value]> for AllowList {
    fn from(values: &[Value]) -> Self {
        AllowList::Values(values.to_vec())
    }
}

impl From<EnumDef> for AllowList {
    fn from(def: EnumDef) -> Self {
        AllowList::Def(def)
    }
}

impl From<&EnumDef> for AllowList {
    fn from(def: &EnumDef) -> Self {
        AllowList::Def(def.clone())
    }
}

impl From<&str> for AllowList {
    fn from(name: &str) -> Self {
        AllowList::Named(name.to_string())
    }
}

impl From<String> for AllowList {
    fn from(name: String) -> Self {
        AllowList::Named(name)
    }
}
