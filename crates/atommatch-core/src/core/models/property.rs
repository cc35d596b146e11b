use std::collections::HashMap;

/// Overrides for the names under which per-atom properties are looked up.
///
/// A key that has no override resolves to itself, so an empty map means
/// "use the default property names".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    overrides: HashMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this map with `key` redirected to `property`.
    pub fn with(mut self, key: &str, property: &str) -> Self {
        self.set(key, property);
        self
    }

    pub fn set(&mut self, key: &str, property: &str) {
        self.overrides.insert(key.to_string(), property.to_string());
    }

    /// Returns the property name to use for `key`.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.overrides.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
