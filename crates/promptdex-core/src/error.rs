//! Error types for catalog operations.
//!
//! Absence is data in this crate: a `by_id` miss or an empty category listing
//! comes back as `Option`/empty `Vec`, never as an error. The variants below
//! cover the things that can actually fail — loading the dataset from disk,
//! parsing it, and parsing configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the catalog or its configuration.
///
/// Each variant carries enough context for a user-facing message without
/// requiring the caller to reconstruct paths or re-read files.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CatalogError {
    // Dataset errors
    /// Dataset file does not exist at the expected location.
    #[error("dataset not found: {0}")]
    DatasetNotFound(PathBuf),

    /// Dataset file exists but could not be read.
    #[error("failed to read dataset: {path}")]
    DatasetRead {
        /// Path to the dataset that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Dataset contents are not valid JSON for the record schema.
    #[error("dataset parse error: {0}")]
    DatasetParse(#[from] serde_json::Error),

    // Config errors
    /// Configuration file exists but could not be read.
    #[error("failed to read config: {path}")]
    ConfigRead {
        /// Path to the config file that failed to load.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file contains invalid TOML.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Lookup errors
    /// No record exists with the requested identifier.
    ///
    /// The catalog itself reports a miss as `None`; this variant exists for
    /// callers (like the CLI) that need to turn a miss into a failure.
    #[error("prompt not found: {0}")]
    PromptNotFound(String),

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
