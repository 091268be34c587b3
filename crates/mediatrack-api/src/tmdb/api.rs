//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::models::{Country, MediaDetail, MediaSummary, PageResult};
use super::params::{ListParams, MediaKind, SearchParams};

/// Catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches one page of a category list.
    ///
    /// # Errors
    ///
    /// Returns `ListFetchFailed` on transport, HTTP status, or payload errors.
    async fn list_by_category(
        &self,
        params: &ListParams,
    ) -> Result<PageResult<MediaSummary>, FetchError>;

    /// Fetches one page of free-text search results.
    ///
    /// # Errors
    ///
    /// Returns `SearchFailed` on transport, HTTP status, or payload errors.
    async fn search(&self, params: &SearchParams) -> Result<PageResult<MediaSummary>, FetchError>;

    /// Fetches one item with its videos and images.
    ///
    /// # Errors
    ///
    /// Returns `DetailFetchFailed` on transport, HTTP status, or payload errors.
    async fn detail(&self, kind: MediaKind, id: u64) -> Result<MediaDetail, FetchError>;

    /// Fetches the country reference list.
    ///
    /// # Errors
    ///
    /// Returns `CountryFetchFailed` on transport, HTTP status, or payload errors.
    async fn countries(&self) -> Result<Vec<Country>, FetchError>;
}
