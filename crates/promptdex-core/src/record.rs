//! Prompt record types.
//!
//! These structures mirror the shape of the bundled `prompts.json` dataset.
//! Deserialization is deliberately lenient: optional fields default rather
//! than error, and unknown fields are ignored, because the dataset is
//! scraped data that occasionally carries malformed or extra entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model parameters attached to a prompt record.
///
/// The dataset nests the compatible-model list under `model_parameters`;
/// only the fields the catalog actually uses are modeled, everything else
/// in the source object is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Model identifiers this prompt is known to work with (may be empty).
    #[serde(default)]
    pub models: Vec<String>,

    /// Suggested sampling temperature, when the author recorded one.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Suggested response token limit, when the author recorded one.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// One catalog entry describing a reusable prompt and its metadata.
///
/// Records are immutable once loaded; the [`Catalog`](crate::Catalog) owns
/// the canonical collection and hands out shared references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Opaque unique identifier (unique after dedup).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Short description shown on cards and in search results.
    #[serde(default)]
    pub description: String,

    /// Full prompt text, possibly containing `{{variable}}` placeholders.
    #[serde(default)]
    pub prompt_text: String,

    /// Category tags as found in the dataset. May contain whitespace-padded
    /// or malformed entries; consumers normalize via [`Self::has_category`].
    #[serde(default)]
    pub categories: Vec<String>,

    /// Nested model parameters, including the compatible-model list.
    #[serde(default)]
    pub model_parameters: ModelParameters,

    /// Community rating, used for rank ordering.
    #[serde(default)]
    pub rating: f64,

    /// Times this prompt was copied, used for popularity ordering.
    #[serde(default)]
    pub copy_count: u64,

    /// Creation timestamp, used for recency ordering.
    pub created_at: DateTime<Utc>,

    /// Whether the prompt is featured on the home page.
    #[serde(default)]
    pub is_featured: bool,
}

impl PromptRecord {
    /// Returns the compatible model identifiers for this record.
    pub fn compatible_models(&self) -> &[String] {
        &self.model_parameters.models
    }

    /// Checks whether any of this record's categories, after trimming,
    /// equals `name` (itself trimmed). Comparison is case-sensitive.
    pub fn has_category(&self, name: &str) -> bool {
        let want = name.trim();
        self.categories.iter().any(|cat| cat.trim() == want)
    }

    /// Case-insensitive substring match against title, description, any
    /// category, or the full prompt text.
    ///
    /// `needle` must already be lowercased; the query engine lowercases the
    /// search text once per query rather than once per record.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .categories
                .iter()
                .any(|cat| cat.to_lowercase().contains(needle))
            || self.prompt_text.to_lowercase().contains(needle)
    }

    /// Produces the flattened card projection used by list views.
    pub fn card(&self) -> PromptCard {
        PromptCard {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            categories: self.categories.clone(),
            models: self.model_parameters.models.clone(),
            is_featured: self.is_featured,
        }
    }
}

/// Flattened projection of a record for card/list rendering.
///
/// Unlike [`PromptRecord`], the model list is hoisted to the top level so
/// presentation code never reaches into `model_parameters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCard {
    /// Record identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Category tags.
    pub categories: Vec<String>,
    /// Compatible model identifiers.
    pub models: Vec<String>,
    /// Whether the prompt is featured.
    pub is_featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_with_categories(categories: &[&str]) -> PromptRecord {
        PromptRecord {
            id: "p1".to_string(),
            title: "Release Notes Writer".to_string(),
            description: "Drafts release notes from a changelog".to_string(),
            prompt_text: "Write release notes for {{product}}".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            model_parameters: ModelParameters::default(),
            rating: 4.5,
            copy_count: 10,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            is_featured: false,
        }
    }

    #[test]
    fn test_should_match_category_after_trimming() {
        let record = record_with_categories(&["  Writing ", "Design"]);
        assert!(record.has_category("Writing"));
        assert!(record.has_category(" Design "));
        assert!(!record.has_category("writing"));
        assert!(!record.has_category("Research"));
    }

    #[test]
    fn test_should_search_across_all_text_fields() {
        let record = record_with_categories(&["Writing"]);
        assert!(record.matches_search("release notes"));
        assert!(record.matches_search("changelog"));
        assert!(record.matches_search("writing"));
        assert!(record.matches_search("{{product}}"));
        assert!(!record.matches_search("kubernetes"));
    }

    #[test]
    fn test_should_deserialize_with_missing_optional_fields() {
        let raw = r#"{
            "id": "p9",
            "title": "Minimal",
            "created_at": "2025-02-01T00:00:00Z",
            "user_id": "ignored",
            "fork_count": 3
        }"#;

        let record: PromptRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "p9");
        assert!(record.description.is_empty());
        assert!(record.categories.is_empty());
        assert!(record.compatible_models().is_empty());
        assert_eq!(record.rating, 0.0);
        assert_eq!(record.copy_count, 0);
        assert!(!record.is_featured);
    }

    #[test]
    fn test_should_flatten_models_into_card() {
        let mut record = record_with_categories(&["Writing"]);
        record.model_parameters.models = vec!["anthropic/claude-sonnet".to_string()];

        let card = record.card();
        assert_eq!(card.id, "p1");
        assert_eq!(card.models, vec!["anthropic/claude-sonnet".to_string()]);
        assert_eq!(card.categories, vec!["Writing".to_string()]);
    }
}
