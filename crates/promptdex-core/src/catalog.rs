//! Catalog repository: the canonical, deduplicated record collection.
//!
//! The catalog is loaded once from the dataset and never mutated afterwards,
//! so it is safe to share across any number of readers. All accessors take
//! `&self` and return references or owned copies.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::record::PromptRecord;

/// Category names granted a fixed display-order position ahead of the
/// alphabetically sorted remainder, in this literal order.
pub const PRIORITY_CATEGORIES: [&str; 12] = [
    "Product Management",
    "Design",
    "Productivity",
    "Marketing",
    "Business",
    "Writing",
    "Programming",
    "MetaPrompting",
    "Personal Growth",
    "Cursor Rules",
    "RepoPrompt",
    "Research",
];

/// Category strings at or beyond this length are treated as malformed data
/// and excluded from the index.
pub const MAX_CATEGORY_LEN: usize = 100;

/// The canonical prompt collection.
///
/// Construction deduplicates by id with "insert or overwrite in place"
/// semantics: a repeated id keeps the position of its first occurrence but
/// the field values of its last. That matches how the source dataset was
/// consumed (a map keyed by id, iterated in key-insertion order), so record
/// order is reproducible across implementations.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<PromptRecord>,
}

impl Catalog {
    /// Builds a catalog from raw records, deduplicating by id.
    ///
    /// Later occurrences of an id overwrite earlier ones in place; the slot
    /// position is fixed by the first time the id was seen.
    pub fn load(raw: Vec<PromptRecord>) -> Self {
        let total = raw.len();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut records: Vec<PromptRecord> = Vec::new();

        for record in raw {
            match slots.get(&record.id) {
                Some(&slot) => records[slot] = record,
                None => {
                    slots.insert(record.id.clone(), records.len());
                    records.push(record);
                }
            }
        }

        debug!(
            total,
            unique = records.len(),
            "catalog loaded and deduplicated"
        );

        Self { records }
    }

    /// Parses a catalog from a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DatasetParse` if the JSON does not match the
    /// record schema. Missing optional fields are defaulted, not rejected.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let records: Vec<PromptRecord> = serde_json::from_str(raw)?;
        Ok(Self::load(records))
    }

    /// Loads a catalog from a dataset file on disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DatasetNotFound` if the file does not exist,
    /// `CatalogError::DatasetRead` if reading fails, or
    /// `CatalogError::DatasetParse` if the contents are invalid.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::DatasetNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|source| CatalogError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw)
    }

    /// All records in canonical (post-dedup) order.
    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    /// Number of records after dedup.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    ///
    /// A miss is routine (stale links, mistyped ids) and comes back as
    /// `None`, not an error.
    pub fn by_id(&self, id: &str) -> Option<&PromptRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Records carrying the given category, in canonical order.
    ///
    /// Both sides of the comparison are trimmed; matching is case-sensitive.
    pub fn by_category(&self, name: &str) -> Vec<&PromptRecord> {
        self.records
            .iter()
            .filter(|record| record.has_category(name))
            .collect()
    }

    /// Distinct categories across all records, priority names first.
    ///
    /// Malformed entries (empty after trimming, or at least
    /// [`MAX_CATEGORY_LEN`] characters long) are silently excluded. Names on
    /// [`PRIORITY_CATEGORIES`] come first in that literal order, filtered to
    /// those present in the data; everything else follows lexicographically.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();

        for record in &self.records {
            for category in &record.categories {
                if category.chars().count() >= MAX_CATEGORY_LEN {
                    continue;
                }
                let normalized = category.trim();
                if !normalized.is_empty() {
                    seen.insert(normalized.to_string());
                }
            }
        }

        let mut ordered: Vec<String> = PRIORITY_CATEGORIES
            .iter()
            .filter(|name| seen.contains(**name))
            .map(|name| name.to_string())
            .collect();

        let mut remainder: Vec<String> = seen
            .into_iter()
            .filter(|name| !PRIORITY_CATEGORIES.contains(&name.as_str()))
            .collect();
        remainder.sort();

        ordered.extend(remainder);
        ordered
    }

    /// Distinct compatible-model identifiers, lexicographically sorted.
    pub fn models(&self) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();

        for record in &self.records {
            for model in record.compatible_models() {
                seen.insert(model.clone());
            }
        }

        let mut models: Vec<String> = seen.into_iter().collect();
        models.sort();
        models
    }

    /// Records flagged as featured, in canonical order.
    pub fn featured(&self) -> Vec<&PromptRecord> {
        self.records
            .iter()
            .filter(|record| record.is_featured)
            .collect()
    }

    /// The `limit` most recently created records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&PromptRecord> {
        let mut records: Vec<&PromptRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        records
    }

    /// The `limit` most copied records, most popular first.
    pub fn popular(&self, limit: usize) -> Vec<&PromptRecord> {
        let mut records: Vec<&PromptRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.copy_count.cmp(&a.copy_count));
        records.truncate(limit);
        records
    }
}
