//! Attribute sets and the storage keys derived from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default key prefix.
pub const DEFAULT_PREFIX: &str = "_cache";

/// Named scalar fields identifying a cache entry or a context.
///
/// Fields are kept sorted by name, so two attribute sets built in any
/// order derive the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// `<prefix>_<k1>_<v1>__<k2>_<v2>...`
pub fn generate_key(prefix: &str, attrs: &Attributes) -> String {
    let fields: Vec<String> = attrs
        .iter()
        .map(|(name, value)| format!("{name}_{value}"))
        .collect();
    format!("{prefix}_{}", fields.join("__"))
}

/// `<prefix>_context_<name>_<value>`
pub fn generate_context_key(prefix: &str, name: &str, value: &str) -> String {
    format!("{prefix}_context_{name}_{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_independent_of_insertion_order() {
        let ab = Attributes::new().with("a", 1).with("b", 2);
        let ba = Attributes::new().with("b", 2).with("a", 1);

        assert_eq!(generate_key(DEFAULT_PREFIX, &ab), generate_key(DEFAULT_PREFIX, &ba));
        assert_eq!(generate_key(DEFAULT_PREFIX, &ab), "_cache_a_1__b_2");
    }

    #[test]
    fn test_key_shapes() {
        let one = Attributes::new().with("codeID", "intro");
        assert_eq!(generate_key("_cache", &one), "_cache_codeID_intro");
        assert_eq!(generate_key("_cache", &Attributes::new()), "_cache_");
        assert_eq!(generate_key("site", &one), "site_codeID_intro");
    }

    #[test]
    fn test_context_key() {
        assert_eq!(
            generate_context_key(DEFAULT_PREFIX, "lesson", "1"),
            "_cache_context_lesson_1"
        );
    }

    #[test]
    fn test_collect_and_display() {
        let attrs: Attributes = [("type", "html"), ("codeID", "x")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("type"), Some("html"));
        assert_eq!(attrs.to_string(), "codeID=x, type=html");
    }
}
