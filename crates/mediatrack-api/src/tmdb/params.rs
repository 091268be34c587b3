//! Media kinds, categories, and request parameters.

use std::fmt;
use std::str::FromStr;

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default region (ISO 3166-1).
pub const DEFAULT_REGION: &str = "IN";

/// Default original-language filter (ISO 639-1, Hindi).
pub const DEFAULT_ORIGINAL_LANGUAGE: &str = "hi";

/// Sort order applied to every list and search request.
pub const SORT_BY_POPULARITY: &str = "popularity.desc";

/// Catalog item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    /// Feature films (`/movie`).
    #[default]
    Movie,
    /// TV series (`/tv`).
    Show,
}

impl MediaKind {
    /// API path segment.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "tv",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Show => "TV Show",
        }
    }

    /// Returns the other kind.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Movie => Self::Show,
            Self::Show => Self::Movie,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Error returned when parsing a [`MediaKind`] or [`Category`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value:?} (expected one of: {expected})")]
pub struct ParseParamError {
    what: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for MediaKind {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "tv" | "show" | "shows" => Ok(Self::Show),
            _ => Err(ParseParamError {
                what: "media kind",
                value: String::from(s),
                expected: "movie, tv",
            }),
        }
    }
}

/// One of the four canned list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// Currently in theaters / on the air.
    NowPlaying,
    /// Most popular.
    #[default]
    Popular,
    /// Highest rated.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::TopRated, Self::Upcoming, Self::NowPlaying];

    /// Canonical name (`now_playing`, `popular`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }

    /// API path segment for the given kind.
    ///
    /// TMDB names the two date-driven TV lists differently from the movie ones.
    #[must_use]
    pub const fn path_segment(self, kind: MediaKind) -> &'static str {
        match (kind, self) {
            (MediaKind::Show, Self::NowPlaying) => "on_the_air",
            (MediaKind::Show, Self::Upcoming) => "airing_today",
            _ => self.as_str(),
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "now_playing" => Ok(Self::NowPlaying),
            "popular" => Ok(Self::Popular),
            "top_rated" => Ok(Self::TopRated),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(ParseParamError {
                what: "category",
                value: String::from(s),
                expected: "now_playing, popular, top_rated, upcoming",
            }),
        }
    }
}

/// Query defaults shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDefaults {
    /// Response language.
    pub language: String,
    /// Region sent when a request does not override it.
    pub region: String,
    /// Original-language filter for list and search requests.
    pub original_language: String,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            region: String::from(DEFAULT_REGION),
            original_language: String::from(DEFAULT_ORIGINAL_LANGUAGE),
        }
    }
}

impl CatalogDefaults {
    /// Parameters sent on every call.
    pub(crate) fn base_query(&self, region: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.language.clone()),
            ("region", String::from(region.unwrap_or(&self.region))),
        ]
    }

    /// Parameters sent on list and search calls.
    pub(crate) fn listing_query(
        &self,
        region: Option<&str>,
        page: u32,
    ) -> Vec<(&'static str, String)> {
        let mut query = self.base_query(region);
        query.push(("with_original_language", self.original_language.clone()));
        query.push(("page", page.to_string()));
        query.push(("sort_by", String::from(SORT_BY_POPULARITY)));
        query
    }
}

/// Parameters for a category list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Media kind.
    pub kind: MediaKind,
    /// Category.
    pub category: Category,
    /// Result page (>= 1).
    pub page: u32,
    /// Region override (falls back to the client default).
    pub region: Option<String>,
}

impl ListParams {
    /// Creates params for page 1 of the given list.
    #[must_use]
    pub const fn new(kind: MediaKind, category: Category) -> Self {
        Self {
            kind,
            category,
            page: 1,
            region: None,
        }
    }

    /// Sets the result page. Values below 1 are raised to 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Parameters for a free-text search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Media kind.
    pub kind: MediaKind,
    /// Search text, passed through unmodified.
    pub query: String,
    /// Result page (>= 1).
    pub page: u32,
    /// Region override (falls back to the client default).
    pub region: Option<String>,
}

impl SearchParams {
    /// Creates params for page 1 of a search.
    pub fn new(kind: MediaKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
            page: 1,
            region: None,
        }
    }

    /// Sets the result page. Values below 1 are raised to 1.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}
