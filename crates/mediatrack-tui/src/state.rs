//! Browsing state and its transitions.
//!
//! [`ViewState`] is the single source of truth rendered by the browser.
//! Transitions here are synchronous; the controller decides when they run.

use mediatrack_api::tmdb::{
    Category, Country, ListParams, MediaDetail, MediaKind, MediaSummary, PageResult, SearchParams,
};
use ratatui::widgets::TableState;

/// Fetch lifecycle of the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// At least one list or detail request is in flight.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed; previous data is kept.
    Error(String),
}

/// Where the list rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingSource {
    /// The selected category.
    #[default]
    Category,
    /// A submitted free-text search.
    Search {
        /// Search text.
        query: String,
    },
}

/// A request the controller can issue (and re-issue on retry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Category list page.
    List(ListParams),
    /// Search results page.
    Search(SearchParams),
    /// Item detail.
    Detail {
        /// Kind of the selected item.
        kind: MediaKind,
        /// TMDB item ID.
        id: u64,
    },
}

/// Browsing state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Movie or TV.
    pub media_kind: MediaKind,
    /// Active category.
    pub category: Category,
    /// Category list or search results.
    pub source: ListingSource,
    /// Current page (>= 1).
    pub current_page: u32,
    /// Total pages reported by the last successful list (>= 1).
    pub total_pages: u32,
    /// Rows of the current page.
    pub items: Vec<MediaSummary>,
    /// Open detail record; `Some` means detail mode.
    pub selected_detail: Option<MediaDetail>,
    /// Fetch lifecycle.
    pub status: Status,
    /// Selected country code, sent as `region`.
    pub country_filter: Option<String>,
    /// Country reference list (empty until loaded).
    pub countries: Vec<Country>,
}

impl ViewState {
    /// Creates the initial state for the given list.
    #[must_use]
    pub fn new(media_kind: MediaKind, category: Category) -> Self {
        Self {
            media_kind,
            category,
            current_page: 1,
            total_pages: 1,
            ..Self::default()
        }
    }

    /// Returns `true` while a detail record is open.
    #[must_use]
    pub const fn is_detail_mode(&self) -> bool {
        self.selected_detail.is_some()
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub const fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a next page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Clamps a requested page into `[1, total_pages]`.
    #[must_use]
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Finds a row of the current page by ID.
    #[must_use]
    pub fn item(&self, id: u64) -> Option<&MediaSummary> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Request for the current page of the active listing source.
    #[must_use]
    pub fn listing_request(&self) -> Request {
        self.request_for(self.media_kind, self.category, &self.source, self.current_page)
    }

    /// Request for a listing that is not on screen yet.
    ///
    /// Nothing changes until [`Self::apply_listing`] commits the response.
    #[must_use]
    pub fn request_for(
        &self,
        media_kind: MediaKind,
        category: Category,
        source: &ListingSource,
        page: u32,
    ) -> Request {
        match source {
            ListingSource::Category => {
                let mut params = ListParams::new(media_kind, category).page(page);
                params.region.clone_from(&self.country_filter);
                Request::List(params)
            }
            ListingSource::Search { query } => {
                let mut params = SearchParams::new(media_kind, query.as_str()).page(page);
                params.region.clone_from(&self.country_filter);
                Request::Search(params)
            }
        }
    }

    /// Country code after (or before) the current filter.
    ///
    /// Cycles through "no filter" then each loaded country in order.
    #[must_use]
    pub fn cycle_country(&self, forward: bool) -> Option<String> {
        let codes: Vec<&str> = self.countries.iter().map(|c| c.code.as_str()).collect();
        if codes.is_empty() {
            return None;
        }
        let current = self
            .country_filter
            .as_deref()
            .and_then(|code| codes.iter().position(|c| *c == code));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => codes.len().checked_sub(1),
            (Some(i), true) => Some(i.saturating_add(1)).filter(|n| *n < codes.len()),
            (Some(i), false) => i.checked_sub(1),
        };
        next.and_then(|n| codes.get(n)).map(|c| String::from(*c))
    }

    /// Display name of the current country filter.
    #[must_use]
    pub fn country_label(&self) -> String {
        match &self.country_filter {
            None => String::from("Any"),
            Some(code) => self
                .countries
                .iter()
                .find(|c| &c.code == code)
                .map_or_else(|| code.clone(), |c| format!("{} ({code})", c.name)),
        }
    }

    /// Stores a successful list or search page.
    ///
    /// The kind, category, source and page shown switch to the ones the
    /// page was requested for. The page number is kept even when it is past
    /// the new `total_pages`; the paging keys clamp it.
    pub fn apply_listing(&mut self, request: &Request, page: PageResult<MediaSummary>) {
        match request {
            Request::List(params) => {
                self.media_kind = params.kind;
                self.category = params.category;
                self.source = ListingSource::Category;
                self.current_page = params.page;
            }
            Request::Search(params) => {
                self.media_kind = params.kind;
                self.source = ListingSource::Search {
                    query: params.query.clone(),
                };
                self.current_page = params.page;
            }
            Request::Detail { .. } => return,
        }
        self.items = page.items;
        self.total_pages = page.total_pages.max(1);
    }

    /// Opens a detail record.
    pub fn apply_detail(&mut self, detail: MediaDetail) {
        self.selected_detail = Some(detail);
    }
}

/// Input mode of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation keys.
    #[default]
    Normal,
    /// Typing a search query.
    Search,
}

/// Browser-only state (cursor and search input).
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Table state for the list (selection and scroll).
    pub table_state: TableState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text being typed.
    pub search_input: String,
}

impl BrowserState {
    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Keeps the cursor inside `[0, len)`.
    pub fn sync_selection(&mut self, len: usize) {
        if len == 0 {
            self.table_state.select(None);
        } else {
            let cursor = self.cursor().min(len.saturating_sub(1));
            self.table_state.select(Some(cursor));
        }
    }

    /// Moves cursor up.
    pub fn move_up(&mut self) {
        let current = self.cursor();
        self.table_state.select(Some(current.saturating_sub(1)));
    }

    /// Moves cursor down, stopping at the last row.
    pub fn move_down(&mut self, len: usize) {
        let current = self.cursor();
        if current.saturating_add(1) < len {
            self.table_state.select(Some(current.saturating_add(1)));
        }
    }

    /// Resets the cursor to the first row.
    pub fn reset_cursor(&mut self) {
        self.table_state.select(Some(0));
    }
}
