//! Variable bindings for placeholder substitution.

use std::collections::HashMap;

/// User-supplied values for the `{{variable}}` placeholders of one prompt.
///
/// Names are stored trimmed, and lookups trim the queried name, so
/// `{{ Audience }}` and `{{Audience}}` address the same binding. The map is
/// ephemeral, scoped to one viewing of one record.
///
/// # Examples
///
/// ```
/// use promptdex_tpl::VariableMap;
///
/// let vars = VariableMap::new().with("name", "Ada");
/// assert_eq!(vars.get(" name "), Some("Ada"));
/// assert_eq!(vars.get("other"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    values: HashMap<String, String>,
}

impl VariableMap {
    /// Creates an empty variable map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, consuming and returning the map (builder style).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a binding in place. The name is trimmed before storage.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into().trim().to_string(), value.into());
    }

    /// Looks up a binding by name, trimming the queried name first.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name.trim()).map(String::as_str)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
