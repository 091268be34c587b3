//! Image and trailer URLs.

use super::models::Video;

/// TMDB image host.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// YouTube embed template.
pub const TRAILER_EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Image size token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// List posters (`w500`).
    Poster,
    /// Detail poster and backdrops (`w300`).
    Thumbnail,
}

impl ImageSize {
    /// Size token used in the URL.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Poster => "w500",
            Self::Thumbnail => "w300",
        }
    }
}

/// Builds an image URL from an API-provided path.
#[must_use]
pub fn image_url(size: ImageSize, path: &str) -> String {
    format!("{IMAGE_BASE_URL}/{}{path}", size.token())
}

/// Builds the embeddable player URL for a trailer.
#[must_use]
pub fn trailer_embed_url(video: &Video) -> String {
    format!("{TRAILER_EMBED_BASE_URL}/{}", video.key)
}
