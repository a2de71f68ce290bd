//! Search view controller
//!
//! Owns the active [`FilterState`] and the accumulated [`ResultSet`], and
//! drives the fetch → reduce loop: a submitted query string is decoded into
//! filters, the first page is fetched, and "show more" appends follow-up
//! pages. All transitions go through the pure reducer in
//! `haven-search-state`; this type only performs the I/O the reducer asks
//! for.
//!
//! Fetch errors are absorbed into the state (empty first page, or untouched
//! results on a failed append) and surfaced through [`SearchController::last_error`]
//! rather than returned, matching how the view renders them as inert text.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::Listing;
use haven_search_state::{codec, FetchRequest, FilterEvent, FilterState, PageEvent, ResultSet};
use tracing::warn;

pub struct SearchController {
    api: ApiClient,
    filters: FilterState,
    results: ResultSet<Listing>,
    last_error: Option<Error>,
}

impl SearchController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filters: FilterState::default(),
            results: ResultSet::new(),
            last_error: None,
        }
    }

    /// The active filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Apply one filter form edit without triggering a fetch; the edited
    /// state takes effect on the next [`submit`](Self::submit).
    pub fn edit_filters(&mut self, event: FilterEvent) {
        self.filters = self.filters.clone().apply(event);
    }

    /// Listings to display, in server order.
    pub fn listings(&self) -> &[Listing] {
        self.results.items()
    }

    /// True when the "show more" affordance should be offered.
    pub fn has_more(&self) -> bool {
        self.results.has_more() && !self.results.is_loading()
    }

    /// Error from the most recent fetch, if it failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// The query string for the current filters, for pushing into the URL.
    pub fn query_string(&self) -> String {
        codec::encode(&self.filters)
    }

    /// Enter the view from a URL: decode the query string and load the
    /// first page.
    pub async fn submit_query(&mut self, query: &str) {
        self.submit(codec::decode(query)).await;
    }

    /// Submit a new search, discarding the current results wholesale.
    pub async fn submit(&mut self, filters: FilterState) {
        self.filters = filters;
        self.step(PageEvent::SearchStarted).await;
    }

    /// Load the next page and append it. No-op unless idle with more
    /// results available.
    pub async fn show_more(&mut self) {
        self.step(PageEvent::MoreRequested).await;
    }

    /// Run one reducer step and perform the fetch it requests, feeding the
    /// completion back in under the request's generation.
    async fn step(&mut self, event: PageEvent<Listing>) {
        let (results, request) = std::mem::take(&mut self.results).apply(event);
        self.results = results;

        let Some(FetchRequest {
            generation,
            start_index,
        }) = request
        else {
            return;
        };

        self.last_error = None;
        let completion = match self.api.fetch_page(&self.filters, start_index).await {
            Ok(batch) => PageEvent::BatchLoaded { generation, batch },
            Err(err) => {
                warn!(error = %err, start_index, "listings fetch failed");
                self.last_error = Some(err);
                PageEvent::FetchFailed { generation }
            }
        };

        let (results, request) = std::mem::take(&mut self.results).apply(completion);
        debug_assert!(request.is_none());
        self.results = results;
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("filters", &self.filters)
            .field("results", &self.results.items().len())
            .field("has_more", &self.results.has_more())
            .finish()
    }
}
