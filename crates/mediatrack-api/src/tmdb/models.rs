//! Normalized catalog models.
//!
//! Raw payloads from [`super::types`] are converted here so callers never
//! see TMDB field names or the `title`/`name` split.

use serde::Deserialize;

use super::error::NormalizeError;
use super::params::MediaKind;
use super::types::{RawCountry, RawDetail, RawEpisode, RawMediaRecord, RawPage};

/// Number of backdrops shown in the detail view.
pub const BACKDROP_PREVIEW_LIMIT: usize = 5;

/// Video type that marks a trailer.
const TRAILER_TYPE: &str = "Trailer";

/// Fields shared by movies and shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCore {
    /// TMDB ID.
    pub id: u64,
    /// Display title (`title` for movies, `name` for shows).
    pub title: String,
    /// Overview text (empty if absent).
    pub overview: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Popularity score.
    pub popularity: f64,
}

/// Movie list record.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// Shared fields.
    pub core: MediaCore,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
}

/// TV list record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowSummary {
    /// Shared fields.
    pub core: MediaCore,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Production status.
    pub status: Option<String>,
}

/// A list-view record of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSummary {
    /// Movie.
    Movie(MovieSummary),
    /// TV show.
    Show(ShowSummary),
}

impl MediaSummary {
    /// Media kind of this record.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Show(_) => MediaKind::Show,
        }
    }

    /// Shared fields.
    #[must_use]
    pub const fn core(&self) -> &MediaCore {
        match self {
            Self::Movie(m) => &m.core,
            Self::Show(s) => &s.core,
        }
    }

    /// TMDB ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.core().id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.core().title
    }

    /// Release date for movies, first air date for shows.
    #[must_use]
    pub fn date_field(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.release_date.as_deref(),
            Self::Show(s) => s.first_air_date.as_deref(),
        }
    }

    /// Normalizes one raw record as the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no `id` or no title.
    pub(crate) fn from_raw(kind: MediaKind, raw: RawMediaRecord) -> Result<Self, NormalizeError> {
        let (core, dates) = split_record(raw)?;
        Ok(match kind {
            MediaKind::Movie => Self::Movie(MovieSummary {
                core,
                release_date: dates.release_date,
            }),
            MediaKind::Show => Self::Show(ShowSummary {
                core,
                first_air_date: dates.first_air_date,
                status: dates.status,
            }),
        })
    }
}

/// Kind-specific leftovers of a raw record.
struct RecordDates {
    release_date: Option<String>,
    first_air_date: Option<String>,
    status: Option<String>,
}

fn split_record(raw: RawMediaRecord) -> Result<(MediaCore, RecordDates), NormalizeError> {
    let id = raw.id.ok_or(NormalizeError::MissingField("id"))?;
    let title = non_empty(raw.title)
        .or_else(|| non_empty(raw.name))
        .ok_or(NormalizeError::MissingTitle { id })?;
    let core = MediaCore {
        id,
        title,
        overview: raw.overview.unwrap_or_default(),
        poster_path: non_empty(raw.poster_path),
        vote_average: raw.vote_average.unwrap_or_default(),
        popularity: raw.popularity.unwrap_or_default(),
    };
    let dates = RecordDates {
        release_date: non_empty(raw.release_date),
        first_air_date: non_empty(raw.first_air_date),
        status: non_empty(raw.status),
    };
    Ok((core, dates))
}

/// TMDB sends `""` for unknown dates and paths.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// One page of normalized results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// Items in API order.
    pub items: Vec<T>,
    /// Total number of pages (always >= 1).
    pub total_pages: u32,
}

impl PageResult<MediaSummary> {
    /// Normalizes a raw list/search page.
    ///
    /// A `total_pages` of 0 (empty search) is reported as 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `total_pages` is missing or any record fails to normalize.
    pub(crate) fn from_raw(kind: MediaKind, raw: RawPage) -> Result<Self, NormalizeError> {
        let total_pages = raw
            .total_pages
            .ok_or(NormalizeError::MissingField("total_pages"))?
            .max(1);
        let items = raw
            .results
            .into_iter()
            .map(|record| MediaSummary::from_raw(kind, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items, total_pages })
    }
}

/// Video attached to a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// TMDB video ID.
    #[serde(default)]
    pub id: String,
    /// Key on the hosting site (YouTube video ID).
    #[serde(default)]
    pub key: String,
    /// Video title.
    #[serde(default)]
    pub name: String,
    /// Hosting site (e.g. "YouTube").
    #[serde(default)]
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type", default)]
    pub video_type: String,
}

/// Image attached to a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    /// Image path, appended to the image host URL.
    pub file_path: String,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

/// Backdrops and posters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    /// Backdrop images in API order.
    pub backdrops: Vec<Image>,
    /// Poster images in API order.
    pub posters: Vec<Image>,
}

/// Videos and images of a detail record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaAssets {
    /// Videos in API order.
    pub videos: Vec<Video>,
    /// Images.
    pub images: ImageSet,
}

impl MediaAssets {
    /// First video of type "Trailer".
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.video_type == TRAILER_TYPE)
    }

    /// The backdrops shown in the detail view.
    #[must_use]
    pub fn backdrop_preview(&self) -> &[Image] {
        let len = self.images.backdrops.len().min(BACKDROP_PREVIEW_LIMIT);
        self.images.backdrops.get(..len).unwrap_or_default()
    }
}

/// Next scheduled TV episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    /// Air date (YYYY-MM-DD).
    pub air_date: Option<String>,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
}

impl From<RawEpisode> for EpisodeRef {
    fn from(raw: RawEpisode) -> Self {
        Self {
            air_date: non_empty(raw.air_date),
            episode_number: raw.episode_number,
            season_number: raw.season_number,
        }
    }
}

/// Full movie record.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// Summary fields.
    pub summary: MovieSummary,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genre names in API order.
    pub genres: Vec<String>,
    /// Videos and images.
    pub assets: MediaAssets,
}

/// Full TV record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetail {
    /// Summary fields (status comes from the detail payload).
    pub summary: ShowSummary,
    /// Next episode, only if the API provided one.
    pub next_episode_to_air: Option<EpisodeRef>,
    /// Videos and images.
    pub assets: MediaAssets,
}

/// A detail record of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaDetail {
    /// Movie.
    Movie(MovieDetail),
    /// TV show.
    Show(ShowDetail),
}

impl MediaDetail {
    /// Media kind of this record.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movie(_) => MediaKind::Movie,
            Self::Show(_) => MediaKind::Show,
        }
    }

    /// Shared fields.
    #[must_use]
    pub const fn core(&self) -> &MediaCore {
        match self {
            Self::Movie(m) => &m.summary.core,
            Self::Show(s) => &s.summary.core,
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.core().title
    }

    /// Videos and images.
    #[must_use]
    pub const fn assets(&self) -> &MediaAssets {
        match self {
            Self::Movie(m) => &m.assets,
            Self::Show(s) => &s.assets,
        }
    }

    /// First trailer, if any.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        self.assets().trailer()
    }

    /// Normalizes a raw detail response as the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no `id` or no title.
    pub(crate) fn from_raw(kind: MediaKind, raw: RawDetail) -> Result<Self, NormalizeError> {
        let (core, dates) = split_record(raw.record)?;
        let videos = raw.videos.unwrap_or_default();
        let images = raw.images.unwrap_or_default();
        let assets = MediaAssets {
            videos: videos.results,
            images: ImageSet {
                backdrops: images.backdrops,
                posters: images.posters,
            },
        };
        Ok(match kind {
            MediaKind::Movie => Self::Movie(MovieDetail {
                summary: MovieSummary {
                    core,
                    release_date: dates.release_date,
                },
                runtime: raw.runtime,
                genres: raw.genres.into_iter().map(|g| g.name).collect(),
                assets,
            }),
            MediaKind::Show => Self::Show(ShowDetail {
                summary: ShowSummary {
                    core,
                    first_air_date: dates.first_air_date,
                    status: dates.status,
                },
                next_episode_to_air: raw.next_episode_to_air.map(EpisodeRef::from),
                assets,
            }),
        })
    }
}

/// Country reference entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    /// English display name.
    pub name: String,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        Self {
            code: raw.iso_3166_1,
            name: raw.english_name,
        }
    }
}
