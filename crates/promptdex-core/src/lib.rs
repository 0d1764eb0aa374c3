//! Promptdex Core - catalog repository and query engine for a prompt library.
//!
//! This crate owns the canonical, read-only collection of prompt records and
//! the pure query pipeline that presentation layers run on every interaction.
//! The dataset is loaded once, deduplicated by id, and never mutated
//! afterwards.
//!
//! # Architecture
//!
//! - [`error`]: Error types and result type alias
//! - [`record`]: Record and card types matching the dataset schema
//! - [`catalog`]: The deduplicated collection and its derived indexes
//! - [`query`]: Filter/search/sort pipeline and the curated home mix
//! - [`config`]: `promptdex.toml` settings with defaults
//!
//! # Example
//!
//! ```
//! use promptdex_core::{execute, Catalog, Query, SortKey};
//!
//! let catalog = Catalog::from_json_str(r#"[
//!     {"id": "p1", "title": "Standup Summarizer",
//!      "categories": ["Productivity"],
//!      "created_at": "2025-03-01T00:00:00Z"}
//! ]"#)?;
//!
//! let query = Query::new()
//!     .with_categories(vec!["Productivity".to_string()])
//!     .with_sort(SortKey::Newest);
//! let results = execute(catalog.records(), &query);
//! assert_eq!(results.len(), 1);
//! # Ok::<(), promptdex_core::CatalogError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod record;

// Re-export core types for convenience
pub use catalog::{Catalog, MAX_CATEGORY_LEN, PRIORITY_CATEGORIES};
pub use config::{CONFIG_FILE, HomeConfig, LibraryConfig};
pub use error::{CatalogError, Result};
pub use query::{MixPolicy, Query, SortKey, execute, home_mix};
pub use record::{ModelParameters, PromptCard, PromptRecord};
