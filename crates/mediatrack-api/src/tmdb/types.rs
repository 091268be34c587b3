//! Raw TMDB response payloads.
//!
//! Every field the API may omit is optional here; [`super::models`] decides
//! what is required.

use serde::Deserialize;

use super::models::{Image, Video};

/// Paged response from list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    /// Result records, in API order.
    pub results: Vec<RawMediaRecord>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// One movie or TV record as returned by list, search, and detail endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMediaRecord {
    /// TMDB ID.
    pub id: Option<u64>,
    /// Movie title.
    pub title: Option<String>,
    /// TV series name.
    pub name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Movie release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// TV first air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// TV status (e.g. "Returning Series").
    pub status: Option<String>,
}

/// Response from `{kind}/{id}?append_to_response=videos,images`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetail {
    /// Summary fields.
    #[serde(flatten)]
    pub record: RawMediaRecord,
    /// Movie runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Movie genres.
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    /// Next scheduled TV episode.
    #[serde(default)]
    pub next_episode_to_air: Option<RawEpisode>,
    /// Embedded videos.
    #[serde(default)]
    pub videos: Option<RawVideos>,
    /// Embedded images.
    #[serde(default)]
    pub images: Option<RawImages>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGenre {
    /// Genre name.
    pub name: String,
}

/// Next-episode block of a TV detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
}

/// Embedded `videos` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideos {
    /// Videos in API order.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Embedded `images` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImages {
    /// Backdrop images.
    #[serde(default)]
    pub backdrops: Vec<Image>,
    /// Poster images.
    #[serde(default)]
    pub posters: Vec<Image>,
}

/// Entry of `configuration/countries`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    /// ISO 3166-1 alpha-2 code.
    pub iso_3166_1: String,
    /// English display name.
    pub english_name: String,
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
