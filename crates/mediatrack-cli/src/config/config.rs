//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use mediatrack_api::tmdb::{
    CatalogDefaults, Category, DEFAULT_LANGUAGE, DEFAULT_ORIGINAL_LANGUAGE, DEFAULT_REGION,
    MediaKind,
};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Query defaults sent to TMDB.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Initial list shown by the browser.
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Catalog query defaults.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Response language (e.g. "en-US").
    pub language: String,
    /// Region used when no country is selected (ISO 3166-1).
    pub region: String,
    /// Original-language filter (ISO 639-1).
    pub original_language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            region: String::from(DEFAULT_REGION),
            original_language: String::from(DEFAULT_ORIGINAL_LANGUAGE),
        }
    }
}

impl CatalogConfig {
    /// Converts to the client's query defaults.
    #[must_use]
    pub fn to_defaults(&self) -> CatalogDefaults {
        CatalogDefaults {
            language: self.language.clone(),
            region: self.region.clone(),
            original_language: self.original_language.clone(),
        }
    }
}

/// Browser start-up settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowseConfig {
    /// `movie` or `tv`.
    pub media_kind: String,
    /// `now_playing`, `popular`, `top_rated`, or `upcoming`.
    pub category: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            media_kind: MediaKind::default().to_string(),
            category: Category::default().to_string(),
        }
    }
}

impl BrowseConfig {
    /// Parsed media kind.
    ///
    /// # Errors
    ///
    /// Returns an error if `media_kind` is not a known kind.
    pub fn media_kind(&self) -> Result<MediaKind> {
        self.media_kind
            .parse()
            .context("invalid browse.media_kind in config")
    }

    /// Parsed category.
    ///
    /// # Errors
    ///
    /// Returns an error if `category` is not a known category.
    pub fn category(&self) -> Result<Category> {
        self.category
            .parse()
            .context("invalid browse.category in config")
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
