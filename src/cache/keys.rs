//! Query cache key definitions.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::{Value, json};

use crate::method::Method;

/// Identifies one forwarded call: (component identity, method, arguments).
///
/// The key is the canonical JSON rendering of the triple. Object members are
/// ordered by name, so equal argument lists always produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(component: &str, method: Method, args: &[Value]) -> Self {
        Self(json!([component, method.name(), args]).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short stable digest, used in log fields instead of the full key.
    pub fn digest(&self) -> u64 {
        hash_value(&self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute a hash for any hashable value.
pub fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
