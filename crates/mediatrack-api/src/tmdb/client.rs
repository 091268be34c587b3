//! `TmdbClient` - TMDB catalog client implementation.

use chrono::NaiveDate;
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::{FetchError, FetchErrorKind, FetchFailure};
use super::models::{Country, MediaDetail, MediaSummary, PageResult};
use super::params::{CatalogDefaults, Category, ListParams, MediaKind, SearchParams};
use super::release_window::ReleaseWindow;
use super::types::{RawCountry, RawDetail, RawPage, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Sub-resources embedded in detail responses.
const DETAIL_APPEND: &str = "videos,images";

/// TMDB catalog client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Static API key, sent as the `api_key` query parameter.
    api_key: String,
    /// Query defaults shared by every request.
    defaults: CatalogDefaults,
    /// Pinned "today" for the upcoming window (local date when `None`).
    today: Option<NaiveDate>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    defaults: CatalogDefaults,
    today: Option<NaiveDate>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            defaults: CatalogDefaults::default(),
            today: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Replaces all query defaults at once.
    #[must_use]
    pub fn defaults(mut self, defaults: CatalogDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.defaults.language = language.into();
        self
    }

    /// Sets the default region (default: "IN").
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.defaults.region = region.into();
        self
    }

    /// Sets the original-language filter (default: "hi").
    #[must_use]
    pub fn original_language(mut self, language: impl Into<String>) -> Self {
        self.defaults.original_language = language.into();
        self
    }

    /// Pins the date used for the upcoming-movie window.
    #[must_use]
    pub const fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> anyhow::Result<TmdbClient> {
        use anyhow::Context;

        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            defaults: self.defaults,
            today: self.today,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Query defaults this client sends.
    #[must_use]
    pub const fn defaults(&self) -> &CatalogDefaults {
        &self.defaults
    }

    /// Date the upcoming window starts from.
    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Sends a GET request with the API key and query params, and decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchFailure> {
        let url = self.base_url.join(path)?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()?;

        tracing::debug!(path, "TMDB API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(body, |e| {
                format!("code={}, message={}", e.status_code, e.status_message)
            });
            return Err(FetchFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches and normalizes one listing page.
    async fn get_page(
        &self,
        kind: MediaKind,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<PageResult<MediaSummary>, FetchFailure> {
        let raw: RawPage = self.get_json(path, query).await?;
        Ok(PageResult::from_raw(kind, raw)?)
    }

    /// Builds the query for a category list.
    fn list_query(&self, params: &ListParams) -> Vec<(&'static str, String)> {
        let mut query = self
            .defaults
            .listing_query(params.region.as_deref(), params.page);
        if params.kind == MediaKind::Movie && params.category == Category::Upcoming {
            let today = self.today();
            match ReleaseWindow::starting(today) {
                Some(window) => query.extend(window.query()),
                None => tracing::warn!(%today, "upcoming window out of date range, sending no filter"),
            }
        }
        query
    }
}

impl CatalogApi for TmdbClient {
    #[instrument(skip_all, fields(kind = %params.kind, category = %params.category, page = params.page))]
    async fn list_by_category(
        &self,
        params: &ListParams,
    ) -> Result<PageResult<MediaSummary>, FetchError> {
        let path = format!(
            "{}/{}",
            params.kind.path_segment(),
            params.category.path_segment(params.kind)
        );
        let query = self.list_query(params);
        self.get_page(params.kind, &path, &query)
            .await
            .map_err(|source| {
                FetchError::new(
                    FetchErrorKind::ListFetchFailed {
                        media_kind: params.kind,
                        category: params.category,
                    },
                    source,
                )
            })
    }

    #[instrument(skip_all, fields(kind = %params.kind, page = params.page))]
    async fn search(&self, params: &SearchParams) -> Result<PageResult<MediaSummary>, FetchError> {
        let path = format!("search/{}", params.kind.path_segment());
        let mut query = vec![("query", params.query.clone())];
        query.extend(
            self.defaults
                .listing_query(params.region.as_deref(), params.page),
        );
        self.get_page(params.kind, &path, &query)
            .await
            .map_err(|source| {
                FetchError::new(
                    FetchErrorKind::SearchFailed {
                        media_kind: params.kind,
                        query: params.query.clone(),
                    },
                    source,
                )
            })
    }

    #[instrument(skip_all, fields(%kind, id))]
    async fn detail(&self, kind: MediaKind, id: u64) -> Result<MediaDetail, FetchError> {
        let path = format!("{}/{id}", kind.path_segment());
        let mut query = self.defaults.base_query(None);
        query.push(("append_to_response", String::from(DETAIL_APPEND)));

        let result: Result<MediaDetail, FetchFailure> = async {
            let raw: RawDetail = self.get_json(&path, &query).await?;
            Ok(MediaDetail::from_raw(kind, raw)?)
        }
        .await;
        result.map_err(|source| {
            FetchError::new(
                FetchErrorKind::DetailFetchFailed {
                    media_kind: kind,
                    id,
                },
                source,
            )
        })
    }

    #[instrument(skip_all)]
    async fn countries(&self) -> Result<Vec<Country>, FetchError> {
        let query = self.defaults.base_query(None);
        let raw: Vec<RawCountry> = self
            .get_json("configuration/countries", &query)
            .await
            .map_err(|source| FetchError::new(FetchErrorKind::CountryFetchFailed, source))?;
        Ok(raw.into_iter().map(Country::from).collect())
    }
}
