//! Placeholder extraction and best-effort substitution.
//!
//! A placeholder is `{{` followed by one or more non-`}` characters and a
//! closing `}}`. The same pattern backs both [`extract_variables`] and
//! [`render`], so extraction always reports exactly the set of tokens that
//! rendering can substitute. There is no nesting or escaping; the first `}`
//! after the opening braces ends the token.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::vars::VariableMap;

/// The one definition of what a placeholder looks like.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([^}]+)\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

/// Extracts distinct placeholder names from `text`, trimmed, in order of
/// first appearance.
///
/// Two placeholders whose inner text differs only by surrounding whitespace
/// count as the same variable.
///
/// # Examples
///
/// ```
/// use promptdex_tpl::extract_variables;
///
/// let names = extract_variables("Write a {{task}} for {{ Audience }}");
/// assert_eq!(names, vec!["task".to_string(), "Audience".to_string()]);
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let Some(inner) = caps.get(1) else { continue };
        let name = inner.as_str().trim();
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    names
}

/// True if `text` contains at least one placeholder.
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// Substitutes known variables into `text`, leaving everything else alone.
///
/// A placeholder is replaced only when its trimmed name maps to a non-empty
/// value; unknown names, empty bindings, and malformed brace runs survive
/// verbatim, braces included. Rendering never fails.
///
/// # Examples
///
/// ```
/// use promptdex_tpl::{render, VariableMap};
///
/// let vars = VariableMap::new().with("name", "Ada");
/// assert_eq!(render("Hello {{name}}!", &vars), "Hello Ada!");
/// assert_eq!(render("Hello {{name}}!", &VariableMap::new()), "Hello {{name}}!");
/// ```
pub fn render(text: &str, vars: &VariableMap) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            match vars.get(name) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => whole.to_string(),
            }
        })
        .into_owned()
}
