//! Accumulated search results and the "show more" state machine.
//!
//! [`ResultSet`] is a pure reducer: callers feed it [`PageEvent`]s and issue
//! the [`FetchRequest`] a transition hands back. Every fetch carries the
//! generation it was issued under; a completion from an older generation is
//! discarded, so a slow "show more" response can never clobber the results of
//! a search submitted after it.

use tracing::debug;

/// Number of items requested per page.
///
/// One more than the initial page displays: the ninth item is fetched purely
/// as a "more results exist" probe and withheld from the first page.
pub const PAGE_SIZE: usize = 9;

/// Whether a fetch is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
}

/// A fetch the caller must issue as a consequence of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Generation the fetch was issued under; echo it back in the
    /// completion event.
    pub generation: u64,
    /// Offset to request, always the current number of accumulated items.
    pub start_index: usize,
}

/// Events driving the pagination state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent<T> {
    /// A new search was submitted; the cache is discarded wholesale and any
    /// in-flight fetch becomes stale.
    SearchStarted,
    /// The "show more" control was triggered.
    MoreRequested,
    /// A fetch completed with the server's batch.
    BatchLoaded { generation: u64, batch: Vec<T> },
    /// A fetch failed (network error or server error envelope).
    FetchFailed { generation: u64 },
}

/// The in-memory accumulated results for the active filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet<T> {
    items: Vec<T>,
    has_more: bool,
    phase: SearchPhase,
    generation: u64,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
            phase: SearchPhase::Idle,
            generation: 0,
        }
    }
}

impl<T> ResultSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items to display, in server order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// True when a further page may exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one event, returning the next state and the fetch to issue, if
    /// any. Stale completions and triggers from the wrong phase are no-ops.
    pub fn apply(mut self, event: PageEvent<T>) -> (Self, Option<FetchRequest>) {
        match event {
            PageEvent::SearchStarted => {
                self.generation += 1;
                self.items.clear();
                self.has_more = false;
                self.phase = SearchPhase::Loading;
                let request = FetchRequest {
                    generation: self.generation,
                    start_index: 0,
                };
                (self, Some(request))
            }

            PageEvent::MoreRequested => {
                // Only reachable from Idle with more results available; the
                // control surfacing it is disabled while loading.
                if self.phase != SearchPhase::Idle || !self.has_more {
                    return (self, None);
                }
                self.phase = SearchPhase::Loading;
                let request = FetchRequest {
                    generation: self.generation,
                    start_index: self.items.len(),
                };
                (self, Some(request))
            }

            PageEvent::BatchLoaded { generation, batch } => {
                if !self.accepts(generation) {
                    debug!(
                        stale = generation,
                        current = self.generation,
                        "discarding stale batch"
                    );
                    return (self, None);
                }

                if self.items.is_empty() {
                    // Initial page: a full batch signals more results may
                    // exist, and the probe item is withheld from display.
                    let mut batch = batch;
                    if batch.len() == PAGE_SIZE {
                        self.has_more = true;
                        batch.truncate(PAGE_SIZE - 1);
                    } else {
                        self.has_more = false;
                    }
                    self.items = batch;
                } else {
                    // Append step: the whole batch is shown; a short batch
                    // means the results are exhausted. The probe truncation
                    // is deliberately not re-applied here.
                    if batch.len() < PAGE_SIZE {
                        self.has_more = false;
                    }
                    self.items.extend(batch);
                }
                self.phase = SearchPhase::Idle;
                (self, None)
            }

            PageEvent::FetchFailed { generation } => {
                if !self.accepts(generation) {
                    debug!(
                        stale = generation,
                        current = self.generation,
                        "discarding stale failure"
                    );
                    return (self, None);
                }
                // Initial-search failure leaves the (already cleared) cache
                // empty; a "show more" failure keeps previously loaded items.
                self.has_more = false;
                self.phase = SearchPhase::Idle;
                (self, None)
            }
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        self.phase == SearchPhase::Loading && generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(range: std::ops::Range<usize>) -> Vec<usize> {
        range.collect()
    }

    fn loaded(set: ResultSet<usize>, items: Vec<usize>) -> ResultSet<usize> {
        let generation = set.generation();
        let (set, request) = set.apply(PageEvent::BatchLoaded {
            generation,
            batch: items,
        });
        assert_eq!(request, None);
        set
    }

    fn searching() -> ResultSet<usize> {
        let (set, request) = ResultSet::new().apply(PageEvent::SearchStarted);
        let request = request.unwrap();
        assert_eq!(request.start_index, 0);
        assert_eq!(request.generation, set.generation());
        set
    }

    #[test]
    fn full_initial_batch_withholds_probe_item() {
        let set = loaded(searching(), batch(0..9));
        assert_eq!(set.items().len(), 8);
        assert!(set.has_more());
        assert!(!set.is_loading());
    }

    #[test]
    fn short_initial_batch_shows_everything() {
        let set = loaded(searching(), batch(0..5));
        assert_eq!(set.items().len(), 5);
        assert!(!set.has_more());
    }

    #[test]
    fn show_more_appends_whole_batch_without_truncation() {
        let set = loaded(searching(), batch(0..9));
        let (set, request) = set.apply(PageEvent::MoreRequested);
        let request = request.unwrap();
        assert_eq!(request.start_index, 8);

        let set = loaded(set, batch(8..17));
        assert_eq!(set.items().len(), 17);
        assert!(set.has_more(), "full follow-up batch keeps has_more");
    }

    #[test]
    fn short_follow_up_batch_exhausts_results() {
        let set = loaded(searching(), batch(0..9));
        let (set, _) = set.apply(PageEvent::MoreRequested);
        let set = loaded(set, batch(8..11));
        assert_eq!(set.items().len(), 11);
        assert!(!set.has_more());
    }

    #[test]
    fn show_more_is_noop_while_loading() {
        let set = loaded(searching(), batch(0..9));
        let (set, first) = set.apply(PageEvent::MoreRequested);
        assert!(first.is_some());
        let (set, second) = set.apply(PageEvent::MoreRequested);
        assert_eq!(second, None);
        assert!(set.is_loading());
    }

    #[test]
    fn show_more_is_noop_when_exhausted() {
        let set = loaded(searching(), batch(0..3));
        let (_, request) = set.apply(PageEvent::MoreRequested);
        assert_eq!(request, None);
    }

    #[test]
    fn stale_show_more_batch_is_discarded_after_new_search() {
        // "Show more" goes in flight...
        let set = loaded(searching(), batch(0..9));
        let (set, stale) = set.apply(PageEvent::MoreRequested);
        let stale = stale.unwrap();

        // ...a new search is submitted and resolves first...
        let (set, fresh) = set.apply(PageEvent::SearchStarted);
        let fresh = fresh.unwrap();
        assert!(set.items().is_empty(), "new search discards the cache");
        let (set, _) = set.apply(PageEvent::BatchLoaded {
            generation: fresh.generation,
            batch: batch(100..104),
        });

        // ...then the slow "show more" response finally lands.
        let before = set.clone();
        let (set, request) = set.apply(PageEvent::BatchLoaded {
            generation: stale.generation,
            batch: batch(8..17),
        });
        assert_eq!(set, before, "stale batch must not touch the cache");
        assert_eq!(request, None);
    }

    #[test]
    fn initial_failure_leaves_empty_results() {
        let set = searching();
        let generation = set.generation();
        let (set, _) = set.apply(PageEvent::FetchFailed { generation });
        assert!(set.items().is_empty());
        assert!(!set.has_more());
        assert!(!set.is_loading());
    }

    #[test]
    fn show_more_failure_keeps_loaded_items() {
        let set = loaded(searching(), batch(0..9));
        let (set, _) = set.apply(PageEvent::MoreRequested);
        let generation = set.generation();
        let (set, _) = set.apply(PageEvent::FetchFailed { generation });
        assert_eq!(set.items().len(), 8);
        assert!(!set.has_more());
        assert!(!set.is_loading());
    }

    #[test]
    fn stale_failure_is_discarded() {
        let set = loaded(searching(), batch(0..9));
        let (set, stale) = set.apply(PageEvent::MoreRequested);
        let stale = stale.unwrap();
        let (set, _) = set.apply(PageEvent::SearchStarted);
        let (set, _) = set.apply(PageEvent::FetchFailed {
            generation: stale.generation,
        });
        assert!(set.is_loading(), "stale failure must not clear the new load");
    }

    #[test]
    fn new_search_resets_accumulated_results() {
        let set = loaded(searching(), batch(0..9));
        let (set, _) = set.apply(PageEvent::MoreRequested);
        let set = loaded(set, batch(8..17));
        assert_eq!(set.items().len(), 17);

        let (set, request) = set.apply(PageEvent::SearchStarted);
        assert!(set.items().is_empty());
        assert!(!set.has_more());
        assert_eq!(request.unwrap().start_index, 0);
    }
}
