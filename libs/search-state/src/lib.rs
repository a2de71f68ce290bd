//! Search state for the haven marketplace client.
//!
//! Pure, I/O-free building blocks of the search view: the filter state with
//! its URL query-string codec, and the pagination reducer that owns the
//! accumulated result set. The HTTP layer lives in `haven-api-client`; this
//! crate is deliberately runtime-agnostic so every transition is unit-testable
//! without a network or a rendering environment.
//!
//! # Examples
//!
//! ```rust
//! use haven_search_state::{codec, FilterState};
//!
//! let filters = codec::decode("type=rent&offer=true");
//! assert!(filters.offer);
//! assert_eq!(codec::decode(&codec::encode(&filters)), filters);
//! ```

pub mod codec;
pub mod filters;
pub mod page;

pub use filters::{
    parse_sort_order, FilterEvent, FilterState, ListingType, SortField, SortOrder,
};
pub use page::{FetchRequest, PageEvent, ResultSet, SearchPhase, PAGE_SIZE};
