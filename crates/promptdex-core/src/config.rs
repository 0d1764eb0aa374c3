//! Configuration for the prompt library.
//!
//! Settings live in `promptdex.toml` next to the dataset. Every field has a
//! default, so a missing config file is not an error; an unparseable one is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::query::MixPolicy;

/// Name of the configuration file searched for in the library root.
pub const CONFIG_FILE: &str = "promptdex.toml";

/// Library configuration: where the dataset lives and how the curated home
/// mix is assembled.
///
/// Typically loaded with [`LibraryConfig::load`], which applies defaults for
/// anything the file leaves out.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Library root directory (where `promptdex.toml` was looked up).
    pub root: PathBuf,

    /// Path to the JSON dataset. Relative paths resolve against `root`.
    pub dataset: PathBuf,

    /// Curated home mix settings.
    pub home: HomeConfig,
}

/// Settings for the curated home mix.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Records taken from each core category.
    pub per_category: usize,

    /// Overall cap on the home mix.
    pub cap: usize,

    /// Core categories sampled first, in listed order.
    pub core_categories: Vec<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        let defaults = MixPolicy::default();
        Self {
            per_category: defaults.per_category,
            cap: defaults.cap,
            core_categories: defaults.core_categories,
        }
    }
}

impl HomeConfig {
    /// Converts these settings into a query-engine mix policy.
    pub fn mix_policy(&self) -> MixPolicy {
        MixPolicy {
            core_categories: self.core_categories.clone(),
            per_category: self.per_category,
            cap: self.cap,
        }
    }
}

/// Raw file representation; all fields optional so partial configs work.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    dataset: Option<PathBuf>,
    #[serde(default)]
    home: HomeConfig,
}

impl LibraryConfig {
    /// Creates a configuration with defaults rooted at the given directory.
    ///
    /// The dataset defaults to `prompts.json` inside `root`.
    pub fn new(root: PathBuf) -> Self {
        Self {
            dataset: root.join("prompts.json"),
            root,
            home: HomeConfig::default(),
        }
    }

    /// Loads configuration from `promptdex.toml` in `root`.
    ///
    /// A missing file yields the defaults from [`LibraryConfig::new`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConfigRead` if the file exists but cannot be
    /// read, or `CatalogError::ConfigParse` if it is not valid TOML.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new(root.to_path_buf()));
        }

        let raw = fs::read_to_string(&path).map_err(|source| CatalogError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&raw)?;

        let dataset = match file.dataset {
            Some(p) if p.is_absolute() => p,
            Some(p) => root.join(p),
            None => root.join("prompts.json"),
        };

        debug!(dataset = %dataset.display(), "configuration loaded");

        Ok(Self {
            root: root.to_path_buf(),
            dataset,
            home: file.home,
        })
    }
}
