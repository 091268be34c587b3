//! Fetch error taxonomy.

use std::fmt;

use super::params::{Category, MediaKind};

/// The operation that failed, with enough context to name it to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// A category list request failed.
    ListFetchFailed {
        /// Requested kind.
        media_kind: MediaKind,
        /// Requested category.
        category: Category,
    },
    /// A search request failed.
    SearchFailed {
        /// Requested kind.
        media_kind: MediaKind,
        /// Search text.
        query: String,
    },
    /// A detail request failed.
    DetailFetchFailed {
        /// Requested kind.
        media_kind: MediaKind,
        /// TMDB item ID.
        id: u64,
    },
    /// The country reference list could not be loaded.
    CountryFetchFailed,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListFetchFailed {
                media_kind,
                category,
            } => write!(f, "failed to fetch {category} {media_kind} list"),
            Self::SearchFailed { media_kind, query } => {
                write!(f, "failed to search {media_kind} for {query:?}")
            }
            Self::DetailFetchFailed { media_kind, id } => {
                write!(f, "failed to fetch {media_kind} details for id {id}")
            }
            Self::CountryFetchFailed => f.write_str("failed to fetch countries"),
        }
    }
}

/// Why a request failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    /// Connection, TLS, or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body.
        message: String,
    },
    /// The body was not the expected JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The JSON parsed but a record could not be normalized.
    #[error("unexpected payload: {0}")]
    Normalize(#[from] NormalizeError),
}

/// A raw record that cannot be turned into a catalog model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A required field is absent or null.
    #[error("record is missing `{0}`")]
    MissingField(&'static str),
    /// Neither `title` nor `name` is present.
    #[error("record {id} has neither `title` nor `name`")]
    MissingTitle {
        /// TMDB item ID.
        id: u64,
    },
}

/// A failed adapter call.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {source}")]
pub struct FetchError {
    /// Which operation failed.
    pub kind: FetchErrorKind,
    /// Underlying cause.
    #[source]
    pub source: FetchFailure,
}

impl FetchError {
    /// Creates a new error.
    pub fn new(kind: FetchErrorKind, source: impl Into<FetchFailure>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// Short message for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match &self.kind {
            FetchErrorKind::ListFetchFailed { media_kind, .. } => {
                format!("Failed to fetch {} items. Please try again.", noun(*media_kind))
            }
            FetchErrorKind::SearchFailed { media_kind, .. } => {
                format!("Failed to search {} items. Please try again.", noun(*media_kind))
            }
            FetchErrorKind::DetailFetchFailed { media_kind, .. } => {
                format!("Failed to fetch {} details. Please try again.", noun(*media_kind))
            }
            FetchErrorKind::CountryFetchFailed => {
                String::from("Failed to fetch countries. Please try again.")
            }
        }
    }
}

const fn noun(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Show => "TV show",
    }
}
