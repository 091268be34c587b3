//! View-state controller.
//!
//! Turns user actions into adapter calls and applies their results to
//! [`ViewState`]. Each fetch runs on its own task and reports back over a
//! channel; a per-slot sequence number decides whether a completion is
//! still wanted.

use std::sync::Arc;

use mediatrack_api::tmdb::{
    CatalogApi, Category, Country, FetchError, MediaDetail, MediaKind, MediaSummary, PageResult,
};
use tokio::sync::mpsc;

use crate::state::{ListingSource, Request, Status, ViewState};

/// Independent piece of state a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// List or search results.
    List,
    /// Selected item detail.
    Detail,
}

/// Identifies one fetch within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// Target slot.
    pub slot: Slot,
    /// Sequence number within the slot.
    pub seq: u64,
}

/// Result of a finished fetch.
#[derive(Debug)]
pub enum Completion {
    /// List or search page.
    Listing {
        /// Ticket issued for the request.
        ticket: Ticket,
        /// Adapter result.
        result: Result<PageResult<MediaSummary>, FetchError>,
    },
    /// Item detail.
    Detail {
        /// Ticket issued for the request.
        ticket: Ticket,
        /// Adapter result.
        result: Result<MediaDetail, FetchError>,
    },
    /// Country reference list.
    Countries(Result<Vec<Country>, FetchError>),
}

/// Sequence bookkeeping for one slot.
#[derive(Debug, Default, Clone)]
struct SlotTracker {
    /// Latest issued sequence number.
    latest: u64,
    /// Whether the latest request is still outstanding.
    in_flight: bool,
    /// Latest issued request.
    request: Option<Request>,
    /// Message of a failure reported since the last user action.
    error: Option<String>,
}

impl SlotTracker {
    fn issue(&mut self, request: Request) -> u64 {
        self.latest = self.latest.saturating_add(1);
        self.in_flight = true;
        self.request = Some(request);
        self.latest
    }

    fn invalidate(&mut self) {
        self.latest = self.latest.saturating_add(1);
        self.in_flight = false;
        self.error = None;
    }

    /// Accepts a completion if it carries the latest sequence number.
    fn accept(&mut self, seq: u64) -> bool {
        if seq == self.latest && self.in_flight {
            self.in_flight = false;
            true
        } else {
            false
        }
    }
}

/// Drives [`ViewState`] from user actions.
#[derive(Debug)]
pub struct Controller<A> {
    api: Arc<A>,
    state: ViewState,
    list: SlotTracker,
    detail: SlotTracker,
    countries_requested: bool,
    countries_pending: bool,
    last_request: Option<Request>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A> Controller<A>
where
    A: CatalogApi + Send + Sync + 'static,
{
    /// Creates a controller showing page 1 of the given list.
    ///
    /// Nothing is fetched until an action (or [`Self::refresh`]) runs.
    pub fn new(api: Arc<A>, media_kind: MediaKind, category: Category) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: ViewState::new(media_kind, category),
            list: SlotTracker::default(),
            detail: SlotTracker::default(),
            countries_requested: false,
            countries_pending: false,
            last_request: None,
            tx,
            rx,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns `true` while any request is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.list.in_flight || self.detail.in_flight || self.countries_pending
    }

    /// Fetches the current page of the active listing source.
    pub fn refresh(&mut self) {
        let request = self.state.listing_request();
        self.issue(request);
    }

    /// Switches between movies and TV, back to page 1 of the category list.
    ///
    /// The view keeps showing the old kind until the new list arrives.
    pub fn change_media_kind(&mut self, kind: MediaKind) {
        let request = self
            .state
            .request_for(kind, self.state.category, &ListingSource::Category, 1);
        self.issue(request);
    }

    /// Switches category, back to page 1 of the category list.
    pub fn change_category(&mut self, category: Category) {
        let request = self.state.request_for(
            self.state.media_kind,
            category,
            &ListingSource::Category,
            1,
        );
        self.issue(request);
    }

    /// Moves to a page, clamped to `[1, total_pages]`.
    ///
    /// Does nothing if the clamped page is the current one.
    pub fn change_page(&mut self, page: u32) {
        let page = self.state.clamp_page(page);
        if page == self.state.current_page {
            return;
        }
        let request = self.state.request_for(
            self.state.media_kind,
            self.state.category,
            &self.state.source,
            page,
        );
        self.issue(request);
    }

    /// Moves one page forward if possible.
    pub fn next_page(&mut self) {
        if self.state.has_next_page() {
            self.change_page(self.state.current_page.saturating_add(1));
        }
    }

    /// Moves one page back if possible.
    pub fn prev_page(&mut self) {
        if self.state.has_prev_page() {
            self.change_page(self.state.current_page.saturating_sub(1));
        }
    }

    /// Searches the current kind, starting at page 1.
    pub fn submit_search(&mut self, query: impl Into<String>) {
        let source = ListingSource::Search {
            query: query.into(),
        };
        let request = self
            .state
            .request_for(self.state.media_kind, self.state.category, &source, 1);
        self.issue(request);
    }

    /// Opens the detail of a row on the current page.
    pub fn select_item(&mut self, id: u64) {
        let Some(item) = self.state.item(id) else {
            tracing::debug!(id, "select_item ignored, id not on current page");
            return;
        };
        let kind = item.kind();
        self.issue(Request::Detail { kind, id });
    }

    /// Leaves detail mode without a network call.
    ///
    /// A list failure reported since the last action stays visible.
    pub fn go_back(&mut self) {
        self.state.selected_detail = None;
        self.detail.invalidate();
        self.last_request = Some(self.state.listing_request());
        self.update_status();
    }

    /// Sets the country filter used as `region` by later list requests.
    pub fn select_country(&mut self, code: Option<String>) {
        self.state.country_filter = code;
    }

    /// Requests the country list once per session.
    pub fn load_countries(&mut self) {
        if self.countries_requested {
            return;
        }
        self.countries_requested = true;
        self.countries_pending = true;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.countries().await;
            send(&tx, Completion::Countries(result));
        });
    }

    /// Re-issues every request that failed since the last action.
    ///
    /// Without a failure, re-issues the last request.
    pub fn retry(&mut self) {
        let failed: Vec<Request> = [&self.list, &self.detail]
            .into_iter()
            .filter(|tracker| tracker.error.is_some())
            .filter_map(|tracker| tracker.request.clone())
            .collect();
        if failed.is_empty() {
            let request = self
                .last_request
                .clone()
                .unwrap_or_else(|| self.state.listing_request());
            self.issue(request);
        } else {
            for request in failed {
                self.issue(request);
            }
        }
    }

    /// Applies every completion that has already arrived.
    ///
    /// Returns the number of completions applied to the state.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0_usize;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply(completion) {
                applied = applied.saturating_add(1);
            }
        }
        applied
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `false` if it was stale and discarded.
    pub async fn recv_completion(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    /// Waits until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            if self.rx.recv().await.map(|c| self.apply(c)).is_none() {
                break;
            }
        }
    }

    /// Starts one adapter call for `request`.
    ///
    /// A new action clears failures reported so far.
    fn issue(&mut self, request: Request) {
        self.list.error = None;
        self.detail.error = None;
        self.last_request = Some(request.clone());
        let ticket = self.ticket(&request);
        self.update_status();

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        match request {
            Request::List(params) => {
                tracing::debug!(seq = ticket.seq, kind = %params.kind, category = %params.category, page = params.page, "list requested");
                tokio::spawn(async move {
                    let result = api.list_by_category(&params).await;
                    send(&tx, Completion::Listing { ticket, result });
                });
            }
            Request::Search(params) => {
                tracing::debug!(seq = ticket.seq, kind = %params.kind, page = params.page, "search requested");
                tokio::spawn(async move {
                    let result = api.search(&params).await;
                    send(&tx, Completion::Listing { ticket, result });
                });
            }
            Request::Detail { kind, id } => {
                tracing::debug!(seq = ticket.seq, %kind, id, "detail requested");
                tokio::spawn(async move {
                    let result = api.detail(kind, id).await;
                    send(&tx, Completion::Detail { ticket, result });
                });
            }
        }
    }

    fn ticket(&mut self, request: &Request) -> Ticket {
        let slot = match request {
            Request::List(_) | Request::Search(_) => Slot::List,
            Request::Detail { .. } => Slot::Detail,
        };
        let seq = self.tracker(slot).issue(request.clone());
        Ticket { slot, seq }
    }

    fn tracker(&mut self, slot: Slot) -> &mut SlotTracker {
        match slot {
            Slot::List => &mut self.list,
            Slot::Detail => &mut self.detail,
        }
    }

    /// Applies one completion. Returns `false` if it was discarded.
    fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Countries(result) => {
                self.countries_pending = false;
                match result {
                    Ok(countries) => self.state.countries = countries,
                    Err(e) => tracing::warn!(error = %e, "country list unavailable"),
                }
                true
            }
            Completion::Listing { ticket, result } => {
                if !self.accept(ticket) {
                    return false;
                }
                match result {
                    Ok(page) => {
                        if let Some(request) = &self.list.request {
                            self.state.apply_listing(request, page);
                        }
                        self.update_status();
                    }
                    Err(e) => self.finish_error(Slot::List, &e),
                }
                true
            }
            Completion::Detail { ticket, result } => {
                if !self.accept(ticket) {
                    return false;
                }
                match result {
                    Ok(detail) => {
                        self.state.apply_detail(detail);
                        self.update_status();
                    }
                    Err(e) => self.finish_error(Slot::Detail, &e),
                }
                true
            }
        }
    }

    fn accept(&mut self, ticket: Ticket) -> bool {
        let accepted = self.tracker(ticket.slot).accept(ticket.seq);
        if !accepted {
            tracing::debug!(slot = ?ticket.slot, seq = ticket.seq, "stale completion discarded");
        }
        accepted
    }

    /// Derives the status from both slots.
    ///
    /// A failure stays visible until the next action, even when the other
    /// slot succeeds afterwards.
    fn update_status(&mut self) {
        let error = self.list.error.as_ref().or(self.detail.error.as_ref());
        self.state.status = match error {
            Some(message) => Status::Error(message.clone()),
            None if self.list.in_flight || self.detail.in_flight => Status::Loading,
            None => Status::Ready,
        };
    }

    fn finish_error(&mut self, slot: Slot, error: &FetchError) {
        tracing::debug!(error = %error, "fetch failed");
        self.tracker(slot).error = Some(error.user_message());
        self.update_status();
    }
}

fn send(tx: &mpsc::UnboundedSender<Completion>, completion: Completion) {
    if tx.send(completion).is_err() {
        tracing::debug!("controller dropped, completion discarded");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use mediatrack_api::tmdb::{
        Country, FetchErrorKind, FetchFailure, ListParams, NormalizeError, SearchParams,
    };
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::test_support::{Call, MockApi, movie, page, show, show_detail};

    fn controller(api: &Arc<MockApi>) -> Controller<MockApi> {
        Controller::new(Arc::clone(api), MediaKind::Movie, Category::Popular)
    }

    fn list_error() -> FetchError {
        FetchError::new(
            FetchErrorKind::ListFetchFailed {
                media_kind: MediaKind::Movie,
                category: Category::Popular,
            },
            FetchFailure::Status {
                status: 500,
                message: String::from("boom"),
            },
        )
    }

    fn search_error(query: &str) -> FetchError {
        FetchError::new(
            FetchErrorKind::SearchFailed {
                media_kind: MediaKind::Movie,
                query: String::from(query),
            },
            NormalizeError::MissingField("results"),
        )
    }

    fn detail_error(id: u64) -> FetchError {
        FetchError::new(
            FetchErrorKind::DetailFetchFailed {
                media_kind: MediaKind::Movie,
                id,
            },
            FetchFailure::Status {
                status: 404,
                message: String::from("not found"),
            },
        )
    }

    #[tokio::test]
    async fn test_show_popular_page_one_is_ready() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![show(1, "Panchayat"), show(2, "Kota Factory")], 5)));
        let mut controller = controller(&api);

        // Act
        controller.change_media_kind(MediaKind::Show);
        assert_eq!(controller.state().status, Status::Loading);
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total_pages, 5);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.status, Status::Ready);
        assert_eq!(
            api.calls(),
            vec![Call::List(ListParams::new(MediaKind::Show, Category::Popular))]
        );
    }

    #[tokio::test]
    async fn test_failed_list_keeps_previous_items() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A"), movie(2, "B")], 3)));
        api.push_page(Err(list_error()));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.next_page();
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].title(), "A");
        assert_eq!(
            state.status,
            Status::Error(String::from(
                "Failed to fetch movie items. Please try again."
            ))
        );
    }

    #[tokio::test]
    async fn test_select_then_back_restores_list_without_fetch() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![show(5, "Gullak")], 4)));
        api.push_page(Ok(page(vec![show(7, "Panchayat"), show(8, "Kota")], 4)));
        api.push_detail(Ok(show_detail(7, "Panchayat")));
        let mut controller = controller(&api);
        controller.change_media_kind(MediaKind::Show);
        controller.settle().await;
        controller.change_page(2);
        controller.settle().await;
        let items_before = controller.state().items.clone();

        // Act
        controller.select_item(7);
        controller.settle().await;
        assert!(controller.state().is_detail_mode());
        controller.go_back();

        // Assert
        let state = controller.state();
        assert!(!state.is_detail_mode());
        assert_eq!(state.status, Status::Ready);
        assert_eq!(state.items, items_before);
        assert_eq!(state.current_page, 2);
        assert_eq!(api.calls().len(), 3);
        assert_eq!(api.calls()[2], Call::Detail(MediaKind::Show, 7));
    }

    #[tokio::test]
    async fn test_change_page_clamps_and_skips_same_page() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 3)));
        api.push_page(Ok(page(vec![movie(2, "B")], 3)));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.change_page(0);
        controller.prev_page();
        controller.change_page(99);
        controller.settle().await;
        controller.next_page();

        // Assert
        assert_eq!(controller.state().current_page, 3);
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1],
            Call::List(ListParams::new(MediaKind::Movie, Category::Popular).page(3))
        );
    }

    #[tokio::test]
    async fn test_category_change_resets_page_and_source() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 4)));
        let mut controller = controller(&api);
        controller.submit_search("stree");
        controller.settle().await;
        controller.change_page(3);
        controller.settle().await;

        // Act
        controller.change_category(Category::TopRated);
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.source, ListingSource::Category);
        assert_eq!(
            api.calls().last(),
            Some(&Call::List(ListParams::new(
                MediaKind::Movie,
                Category::TopRated
            )))
        );
    }

    #[tokio::test]
    async fn test_paging_after_search_keeps_searching() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 3)));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;
        controller.change_page(2);
        controller.settle().await;

        // Act
        controller.submit_search("dangal");
        controller.settle().await;
        controller.next_page();
        controller.settle().await;

        // Assert
        let calls = api.calls();
        assert_eq!(
            calls[2],
            Call::Search(SearchParams::new(MediaKind::Movie, "dangal"))
        );
        assert_eq!(
            calls[3],
            Call::Search(SearchParams::new(MediaKind::Movie, "dangal").page(2))
        );
        assert_eq!(controller.state().current_page, 2);
    }

    #[tokio::test]
    async fn test_selected_country_is_sent_as_region() {
        // Arrange
        let api = Arc::new(MockApi::default());
        let mut controller = controller(&api);

        // Act
        controller.select_country(Some(String::from("US")));
        assert!(api.calls().is_empty());
        controller.change_category(Category::NowPlaying);
        controller.settle().await;

        // Assert
        assert_eq!(
            api.calls(),
            vec![Call::List(
                ListParams::new(MediaKind::Movie, Category::NowPlaying).region("US")
            )]
        );
    }

    #[test]
    fn test_superseded_list_response_is_discarded() {
        // Arrange
        let api = Arc::new(MockApi::default());
        let mut controller = controller(&api);
        let request = controller.state().listing_request();
        let stale = controller.ticket(&request);
        let current = controller.ticket(&request);

        // Act
        let applied_current = controller.apply(Completion::Listing {
            ticket: current,
            result: Ok(page(vec![movie(2, "New")], 1)),
        });
        let applied_stale = controller.apply(Completion::Listing {
            ticket: stale,
            result: Ok(page(vec![movie(1, "Old")], 9)),
        });

        // Assert
        assert!(applied_current);
        assert!(!applied_stale);
        assert_eq!(controller.state().items[0].title(), "New");
        assert_eq!(controller.state().total_pages, 1);
    }

    #[tokio::test]
    async fn test_late_list_response_after_new_request_is_discarded() {
        // Arrange
        let api = Arc::new(MockApi::default());
        let mut controller = controller(&api);

        // Act
        controller.refresh();
        controller.change_category(Category::TopRated);
        let first = controller.recv_completion().await;
        let second = controller.recv_completion().await;

        // Assert
        assert_eq!([first, second].iter().filter(|applied| **applied).count(), 1);
        assert_eq!(controller.state().items[0].title(), "top_rated:1");
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_detail_response_after_go_back_is_discarded() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![show(7, "Panchayat")], 1)));
        api.push_detail(Ok(show_detail(7, "Panchayat")));
        let mut controller = controller(&api);
        controller.change_media_kind(MediaKind::Show);
        controller.settle().await;

        // Act
        controller.select_item(7);
        controller.go_back();
        let applied = controller.recv_completion().await;

        // Assert
        assert!(!applied);
        assert!(!controller.state().is_detail_mode());
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_status_stays_loading_while_other_slot_is_pending() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 2)));
        api.push_detail(Ok(show_detail(1, "A")));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.select_item(1);
        controller.next_page();
        controller.recv_completion().await;

        // Assert
        assert_eq!(controller.state().status, Status::Loading);
        controller.settle().await;
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_select_unknown_item_does_nothing() {
        // Arrange
        let api = Arc::new(MockApi::default());
        let mut controller = controller(&api);

        // Act
        controller.select_item(404);

        // Assert
        assert!(api.calls().is_empty());
        assert_eq!(controller.state().status, Status::Idle);
    }

    #[tokio::test]
    async fn test_failed_next_page_keeps_current_page() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A"), movie(2, "B")], 3)));
        api.push_page(Err(list_error()));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.next_page();
        controller.settle().await;
        assert_eq!(controller.state().current_page, 1);
        controller.next_page();
        controller.settle().await;

        // Assert
        assert_eq!(
            api.calls().last(),
            Some(&Call::List(
                ListParams::new(MediaKind::Movie, Category::Popular).page(2)
            ))
        );
        assert_eq!(controller.state().current_page, 2);
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_failed_kind_change_keeps_previous_kind() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "Stree 2")], 3)));
        api.push_page(Err(list_error()));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.change_media_kind(MediaKind::Show);
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert_eq!(state.media_kind, MediaKind::Movie);
        assert_eq!(state.items[0].kind(), MediaKind::Movie);
        assert!(matches!(state.status, Status::Error(_)));
    }

    #[tokio::test]
    async fn test_list_failure_survives_later_detail_success() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 3)));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;
        api.push_page(Err(list_error()));

        // Act
        controller.next_page();
        controller.select_item(1);
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert!(state.is_detail_mode());
        assert_eq!(state.current_page, 1);
        assert_eq!(
            state.status,
            Status::Error(String::from(
                "Failed to fetch movie items. Please try again."
            ))
        );
    }

    #[tokio::test]
    async fn test_failed_detail_stays_in_list_mode() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 1)));
        api.push_detail(Err(detail_error(1)));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.select_item(1);
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert!(!state.is_detail_mode());
        assert_eq!(state.items.len(), 1);
        assert_eq!(
            state.status,
            Status::Error(String::from(
                "Failed to fetch movie details. Please try again."
            ))
        );
    }

    #[tokio::test]
    async fn test_failed_search_keeps_category_items() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A"), movie(2, "B")], 2)));
        api.push_page(Err(search_error("stree")));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;

        // Act
        controller.submit_search("stree");
        controller.settle().await;

        // Assert
        let state = controller.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.source, ListingSource::Category);
        assert_eq!(
            state.status,
            Status::Error(String::from(
                "Failed to search movie items. Please try again."
            ))
        );
    }

    #[tokio::test]
    async fn test_retry_after_failed_page_requests_that_page() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Ok(page(vec![movie(1, "A")], 3)));
        api.push_page(Err(list_error()));
        let mut controller = controller(&api);
        controller.refresh();
        controller.settle().await;
        controller.next_page();
        controller.settle().await;

        // Act
        controller.retry();
        controller.settle().await;

        // Assert
        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], calls[2]);
        assert_eq!(controller.state().current_page, 2);
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_retry_reissues_last_request() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.push_page(Err(list_error()));
        let mut controller = controller(&api);
        controller.submit_search("stree");
        controller.settle().await;
        assert!(matches!(controller.state().status, Status::Error(_)));

        // Act
        controller.retry();
        controller.settle().await;

        // Assert
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(controller.state().status, Status::Ready);
    }

    #[tokio::test]
    async fn test_countries_load_once() {
        // Arrange
        let api = Arc::new(MockApi::default());
        api.set_countries(Ok(vec![Country {
            code: String::from("IN"),
            name: String::from("India"),
        }]));
        let mut controller = controller(&api);

        // Act
        controller.load_countries();
        controller.load_countries();
        controller.settle().await;

        // Assert
        assert_eq!(controller.state().countries.len(), 1);
        assert_eq!(api.calls(), vec![Call::Countries]);
        assert_eq!(controller.state().status, Status::Idle);
    }

    #[test]
    fn test_country_failure_warns_and_keeps_status() {
        // Arrange
        let api = Arc::new(MockApi::default());
        let mut controller = controller(&api);
        controller.state.status = Status::Ready;
        let error = FetchError::new(
            FetchErrorKind::CountryFetchFailed,
            NormalizeError::MissingField("iso_3166_1"),
        );
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .with_target("mediatrack_tui::controller")
                    .at_level(tracing::Level::WARN),
            )
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            controller.apply(Completion::Countries(Err(error)));
        });

        // Assert
        handle.assert_finished();
        assert!(controller.state().countries.is_empty());
        assert_eq!(controller.state().status, Status::Ready);
    }
}
