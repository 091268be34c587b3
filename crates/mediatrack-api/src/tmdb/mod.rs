//! TMDB catalog client module.
//!
//! Fetches category lists, search results, details, and the country
//! reference list, and normalizes them into [`MediaSummary`] and
//! [`MediaDetail`].

mod api;
mod assets;
mod client;
mod error;
mod models;
mod params;
mod release_window;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
pub use assets::{IMAGE_BASE_URL, ImageSize, TRAILER_EMBED_BASE_URL, image_url, trailer_embed_url};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use error::{FetchError, FetchErrorKind, FetchFailure, NormalizeError};
pub use models::{
    BACKDROP_PREVIEW_LIMIT, Country, EpisodeRef, Image, ImageSet, MediaAssets, MediaCore,
    MediaDetail, MediaSummary, MovieDetail, MovieSummary, PageResult, ShowDetail, ShowSummary,
    Video,
};
pub use params::{
    CatalogDefaults, Category, DEFAULT_LANGUAGE, DEFAULT_ORIGINAL_LANGUAGE, DEFAULT_REGION,
    ListParams, MediaKind, ParseParamError, SORT_BY_POPULARITY, SearchParams,
};
pub use release_window::{ReleaseWindow, add_month_rolling};
