//! Promptdex template engine.
//!
//! Pure string operations over `{{variable}}` placeholders: extraction of
//! the distinct variable names a prompt exposes, and best-effort
//! substitution of user-supplied values. Both operations share one
//! placeholder definition, and neither can fail — malformed or unfilled
//! placeholders pass through untouched rather than erroring.
//!
//! # Examples
//!
//! ```
//! use promptdex_tpl::{extract_variables, render, VariableMap};
//!
//! let text = "Write a {{task}} for {{ Audience }}";
//! assert_eq!(extract_variables(text), vec!["task".to_string(), "Audience".to_string()]);
//!
//! let vars = VariableMap::new()
//!     .with("task", "launch plan")
//!     .with("Audience", "the design team");
//! assert_eq!(render(text, &vars), "Write a launch plan for the design team");
//! ```

pub mod placeholder;
pub mod vars;

// Re-export public types for convenience
pub use placeholder::{PLACEHOLDER_PATTERN, extract_variables, has_placeholders, render};
pub use vars::VariableMap;
