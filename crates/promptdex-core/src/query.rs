//! Query engine: filter, search, and sort over the catalog's record set.
//!
//! `execute` is a pure function over a borrowed record slice; it never
//! mutates its input and its output is always a subset of the input. The
//! curated home mix is a separate policy (`home_mix`), not a sort variant,
//! so the general pipeline stays independently testable.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::catalog::PRIORITY_CATEGORIES;
use crate::record::PromptRecord;

/// Sort order for query results.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by creation time (most recent first). The default.
    #[default]
    Newest,

    /// Descending by copy count.
    Popular,

    /// Descending by rating.
    Rating,

    /// Ascending by title, case-insensitive.
    Alphabetical,
}

impl SortKey {
    /// Returns the string representation of the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::Alphabetical => "alphabetical",
        }
    }

    /// Parses a sort key from its string form.
    ///
    /// An unrecognized key silently falls back to `Newest`; a bad sort
    /// selection from a caller is not worth failing a browse over.
    pub fn parse(s: &str) -> Self {
        match s {
            "newest" => SortKey::Newest,
            "popular" => SortKey::Popular,
            "rating" => SortKey::Rating,
            "alphabetical" => SortKey::Alphabetical,
            other => {
                debug!(key = other, "unknown sort key, falling back to newest");
                SortKey::Newest
            }
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog query: filter sets, free-text search, and sort order.
///
/// Constructed per interaction and passed to [`execute`]; never persisted.
///
/// # Examples
///
/// ```
/// use promptdex_core::{Query, SortKey};
///
/// let query = Query::new()
///     .with_categories(vec!["Writing".to_string()])
///     .with_search("release notes")
///     .with_sort(SortKey::Rating);
/// assert!(!query.is_unfiltered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Selected categories; a record matches if it carries *any* of them.
    pub categories: Vec<String>,

    /// Selected models; a record matches if it supports *any* of them.
    pub models: Vec<String>,

    /// Free-text search; ignored when empty after trimming.
    pub search: String,

    /// Sort order applied after filtering.
    pub sort: SortKey,
}

impl Query {
    /// Creates an empty query (no filters, default sort).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category filter.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the model filter.
    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether no filter and no search text is active.
    ///
    /// Callers use this to decide between the general pipeline and the
    /// curated home mix.
    pub fn is_unfiltered(&self) -> bool {
        self.categories.is_empty() && self.models.is_empty() && self.search.trim().is_empty()
    }
}

/// Executes a query against a record set.
///
/// Pipeline order is fixed: category filter, model filter, search filter,
/// then a stable sort by the query's sort key. Filters that are empty are
/// skipped entirely. The result borrows from `records` and preserves
/// relative order among equal sort keys, so repeated runs over the same
/// input are deterministic.
pub fn execute<'a>(records: &'a [PromptRecord], query: &Query) -> Vec<&'a PromptRecord> {
    let mut filtered: Vec<&PromptRecord> = records.iter().collect();

    if !query.categories.is_empty() {
        filtered.retain(|record| {
            query
                .categories
                .iter()
                .any(|category| record.has_category(category))
        });
    }

    if !query.models.is_empty() {
        filtered.retain(|record| {
            record
                .compatible_models()
                .iter()
                .any(|model| query.models.contains(model))
        });
    }

    let needle = query.search.trim().to_lowercase();
    if !needle.is_empty() {
        filtered.retain(|record| record.matches_search(&needle));
    }

    sort_records(&mut filtered, query.sort);

    debug!(
        matched = filtered.len(),
        total = records.len(),
        sort = %query.sort,
        "query executed"
    );

    filtered
}

/// Stable sort by the given key. `Vec::sort_by` keeps equal keys in their
/// pre-sort relative order, which makes tie-breaks reproducible.
fn sort_records(records: &mut [&PromptRecord], key: SortKey) {
    match key {
        SortKey::Newest => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Popular => records.sort_by(|a, b| b.copy_count.cmp(&a.copy_count)),
        SortKey::Rating => records.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Alphabetical => records.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

/// Policy for the curated home mix shown when no filters are active.
#[derive(Debug, Clone)]
pub struct MixPolicy {
    /// Categories sampled first, in listed order.
    pub core_categories: Vec<String>,

    /// How many records to take from each core category.
    pub per_category: usize,

    /// Overall cap on the number of records returned.
    pub cap: usize,
}

impl Default for MixPolicy {
    fn default() -> Self {
        Self {
            core_categories: PRIORITY_CATEGORIES
                .iter()
                .take(5)
                .map(|name| name.to_string())
                .collect(),
            per_category: 6,
            cap: 200,
        }
    }
}

/// Selects the curated home mix: up to `per_category` newest records from
/// each core category in order (skipping records already chosen), then the
/// newest remaining records up to `cap` total.
///
/// This exists so an unfiltered first load shows a blend of the core
/// categories instead of the full firehose. The output never contains a
/// record twice.
pub fn home_mix<'a>(records: &'a [PromptRecord], policy: &MixPolicy) -> Vec<&'a PromptRecord> {
    let mut chosen: Vec<&PromptRecord> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    for category in &policy.core_categories {
        let mut bucket: Vec<&PromptRecord> = records
            .iter()
            .filter(|record| record.has_category(category) && !used.contains(record.id.as_str()))
            .collect();
        bucket.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        for record in bucket.into_iter().take(policy.per_category) {
            used.insert(record.id.as_str());
            chosen.push(record);
        }
    }

    let mut rest: Vec<&PromptRecord> = records
        .iter()
        .filter(|record| !used.contains(record.id.as_str()))
        .collect();
    rest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let slots_left = policy.cap.saturating_sub(chosen.len());
    chosen.extend(rest.into_iter().take(slots_left));

    debug!(selected = chosen.len(), "curated home mix assembled");

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ModelParameters;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, title: &str, categories: &[&str]) -> PromptRecord {
        PromptRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            prompt_text: String::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            model_parameters: ModelParameters::default(),
            rating: 0.0,
            copy_count: 0,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            is_featured: false,
        }
    }

    fn dated(id: &str, year: i32, month: u32) -> PromptRecord {
        let mut r = record(id, id, &[]);
        r.created_at = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap();
        r
    }

    #[test]
    fn test_should_parse_sort_keys_with_silent_fallback() {
        assert_eq!(SortKey::parse("newest"), SortKey::Newest);
        assert_eq!(SortKey::parse("popular"), SortKey::Popular);
        assert_eq!(SortKey::parse("rating"), SortKey::Rating);
        assert_eq!(SortKey::parse("alphabetical"), SortKey::Alphabetical);
        assert_eq!(SortKey::parse("bogus"), SortKey::Newest);
        assert_eq!(SortKey::parse(""), SortKey::Newest);
    }

    #[test]
    fn test_should_match_any_selected_category() {
        let records = vec![
            record("a", "A", &["Design", "Writing"]),
            record("b", "B", &["Programming"]),
        ];
        let query = Query::new()
            .with_categories(vec!["Writing".to_string(), "Research".to_string()]);

        let result = execute(&records, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_should_match_any_selected_model() {
        let mut a = record("a", "A", &[]);
        a.model_parameters = ModelParameters {
            models: vec!["openai/gpt-4o".to_string()],
            ..Default::default()
        };
        let b = record("b", "B", &[]);

        let records = vec![a, b];
        let query = Query::new().with_models(vec!["openai/gpt-4o".to_string()]);

        let result = execute(&records, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_should_search_case_insensitively() {
        let mut a = record("a", "Email Drafter", &[]);
        a.description = "Writes short emails".to_string();
        let b = record("b", "B", &["Marketing"]);

        let records = vec![a, b];

        let result = execute(&records, &Query::new().with_search("  EMAIL "));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");

        let result = execute(&records, &Query::new().with_search("marketing"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_should_sort_newest_first() {
        let records = vec![dated("jan", 2025, 1), dated("mar", 2025, 3), dated("feb", 2025, 2)];

        let result = execute(&records, &Query::new().with_sort(SortKey::Newest));
        let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["mar", "feb", "jan"]);
    }

    #[test]
    fn test_should_sort_by_rating_descending() {
        let mut a = record("a", "A", &[]);
        a.rating = 3.5;
        let mut b = record("b", "B", &[]);
        b.rating = 4.8;

        let records = vec![a, b];
        let result = execute(&records, &Query::new().with_sort(SortKey::Rating));
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_should_sort_alphabetically_case_insensitive() {
        let records = vec![
            record("a", "zebra prompt", &[]),
            record("b", "Apple prompt", &[]),
            record("c", "mango Prompt", &[]),
        ];

        let result = execute(&records, &Query::new().with_sort(SortKey::Alphabetical));
        let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_should_be_deterministic_for_equal_keys() {
        // All records share a timestamp; stable sort keeps canonical order.
        let records = vec![record("a", "A", &[]), record("b", "B", &[]), record("c", "C", &[])];
        let query = Query::new().with_sort(SortKey::Newest);

        let first: Vec<&str> = execute(&records, &query).iter().map(|r| r.id.as_str()).collect();
        let second: Vec<&str> = execute(&records, &query).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first, vec!["a", "b", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_return_empty_for_empty_input() {
        let result = execute(&[], &Query::new().with_search("anything"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_should_detect_unfiltered_query() {
        assert!(Query::new().is_unfiltered());
        assert!(Query::new().with_search("   ").is_unfiltered());
        assert!(!Query::new().with_search("x").is_unfiltered());
        assert!(!Query::new().with_categories(vec!["Design".to_string()]).is_unfiltered());
    }

    #[test]
    fn test_should_blend_core_categories_in_home_mix() {
        let mut records = Vec::new();
        // Ten records per core category; only six of each should be taken.
        for (ci, category) in ["Product Management", "Design"].iter().enumerate() {
            for i in 0..10u32 {
                let mut r = record(&format!("{category}-{i}"), "T", &[category]);
                r.created_at = Utc
                    .with_ymd_and_hms(2025, ci as u32 + 1, i + 1, 0, 0, 0)
                    .unwrap();
                records.push(r);
            }
        }

        let policy = MixPolicy {
            core_categories: vec!["Product Management".to_string(), "Design".to_string()],
            per_category: 6,
            cap: 200,
        };
        let mix = home_mix(&records, &policy);

        // Six newest from each core category, then the remaining eight fill.
        assert_eq!(mix.len(), 20);
        assert!(mix[0].id.starts_with("Product Management"));
        assert_eq!(mix[0].id, "Product Management-9");
        assert!(mix[6].id.starts_with("Design"));
    }

    #[test]
    fn test_should_cap_home_mix_without_duplicates() {
        let mut records = Vec::new();
        for i in 0..250u32 {
            let mut r = record(&format!("p{i}"), "T", &["Design"]);
            r.created_at = Utc
                .with_ymd_and_hms(2025, 1, 1, i / 60, i % 60, 0)
                .unwrap();
            records.push(r);
        }

        let mix = home_mix(&records, &MixPolicy::default());
        assert_eq!(mix.len(), 200);

        let mut ids: HashSet<&str> = HashSet::new();
        for record in &mix {
            assert!(ids.insert(record.id.as_str()), "duplicate id in home mix");
        }
    }

    #[test]
    fn test_should_not_fabricate_records() {
        let records = vec![record("a", "A", &["Design"]), record("b", "B", &[])];
        let result = execute(&records, &Query::new().with_categories(vec!["Design".to_string()]));

        for chosen in result {
            assert!(records.iter().any(|r| r.id == chosen.id));
        }
    }
}
