//! In-memory catalog for controller and browser tests.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use mediatrack_api::tmdb::{
    CatalogApi, Country, FetchError, ListParams, MediaAssets, MediaCore, MediaDetail, MediaKind,
    MediaSummary, MovieDetail, MovieSummary, PageResult, SearchParams, ShowDetail, ShowSummary,
};

/// Total pages reported when no page was queued.
pub const DEFAULT_TOTAL_PAGES: u32 = 10;

/// One adapter call, as recorded by [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ListParams),
    Search(SearchParams),
    Detail(MediaKind, u64),
    Countries,
}

/// Catalog double with queued responses.
///
/// Without a queued response, lists answer one row titled
/// `"{category}:{page}"` (or `"search:{query}:{page}"`) and details answer a
/// record of the requested kind titled `"detail:{id}"`.
#[derive(Debug, Default)]
pub struct MockApi {
    pages: Mutex<VecDeque<Result<PageResult<MediaSummary>, FetchError>>>,
    details: Mutex<VecDeque<Result<MediaDetail, FetchError>>>,
    countries: Mutex<Option<Result<Vec<Country>, FetchError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn push_page(&self, page: Result<PageResult<MediaSummary>, FetchError>) {
        self.pages.lock().unwrap().push_back(page);
    }

    pub fn push_detail(&self, detail: Result<MediaDetail, FetchError>) {
        self.details.lock().unwrap().push_back(detail);
    }

    pub fn set_countries(&self, countries: Result<Vec<Country>, FetchError>) {
        *self.countries.lock().unwrap() = Some(countries);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_page(&self, kind: MediaKind, title: String) -> Result<PageResult<MediaSummary>, FetchError> {
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| {
            let item = match kind {
                MediaKind::Movie => movie(1, &title),
                MediaKind::Show => show(1, &title),
            };
            Ok(page(vec![item], DEFAULT_TOTAL_PAGES))
        })
    }
}

impl CatalogApi for MockApi {
    async fn list_by_category(
        &self,
        params: &ListParams,
    ) -> Result<PageResult<MediaSummary>, FetchError> {
        self.record(Call::List(params.clone()));
        self.next_page(params.kind, format!("{}:{}", params.category, params.page))
    }

    async fn search(&self, params: &SearchParams) -> Result<PageResult<MediaSummary>, FetchError> {
        self.record(Call::Search(params.clone()));
        self.next_page(
            params.kind,
            format!("search:{}:{}", params.query, params.page),
        )
    }

    async fn detail(&self, kind: MediaKind, id: u64) -> Result<MediaDetail, FetchError> {
        self.record(Call::Detail(kind, id));
        let queued = self.details.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            let title = format!("detail:{id}");
            Ok(match kind {
                MediaKind::Movie => movie_detail(id, &title),
                MediaKind::Show => show_detail(id, &title),
            })
        })
    }

    async fn countries(&self) -> Result<Vec<Country>, FetchError> {
        self.record(Call::Countries);
        let configured = self.countries.lock().unwrap().take();
        configured.unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn core(id: u64, title: &str) -> MediaCore {
    MediaCore {
        id,
        title: String::from(title),
        overview: format!("Overview of {title}"),
        poster_path: Some(format!("/poster{id}.jpg")),
        vote_average: 7.5,
        popularity: 12.0,
    }
}

fn movie_summary(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        core: core(id, title),
        release_date: Some(String::from("2024-08-15")),
    }
}

fn show_summary(id: u64, title: &str) -> ShowSummary {
    ShowSummary {
        core: core(id, title),
        first_air_date: Some(String::from("2020-04-03")),
        status: Some(String::from("Returning Series")),
    }
}

pub fn movie(id: u64, title: &str) -> MediaSummary {
    MediaSummary::Movie(movie_summary(id, title))
}

pub fn show(id: u64, title: &str) -> MediaSummary {
    MediaSummary::Show(show_summary(id, title))
}

pub fn page(items: Vec<MediaSummary>, total_pages: u32) -> PageResult<MediaSummary> {
    PageResult { items, total_pages }
}

pub fn movie_detail(id: u64, title: &str) -> MediaDetail {
    MediaDetail::Movie(MovieDetail {
        summary: movie_summary(id, title),
        runtime: Some(147),
        genres: vec![String::from("Comedy"), String::from("Horror")],
        assets: MediaAssets::default(),
    })
}

pub fn show_detail(id: u64, title: &str) -> MediaDetail {
    MediaDetail::Show(ShowDetail {
        summary: show_summary(id, title),
        next_episode_to_air: None,
        assets: MediaAssets::default(),
    })
}
