//! Search filter state and its input events.

/// Listing type filter. `All` matches both rentals and sales and is the
/// no-op value omitted from encoded query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingType {
    #[default]
    All,
    Rent,
    Sale,
}

impl ListingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "rent" => Some(Self::Rent),
            "sale" => Some(Self::Sale),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Rent => "rent",
            Self::Sale => "sale",
        }
    }
}

/// Field the server sorts results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    RegularPrice,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(Self::CreatedAt),
            "regularPrice" => Some(Self::RegularPrice),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::RegularPrice => "regularPrice",
        }
    }
}

/// Sort direction. Defaults to descending (newest / most expensive first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The user's current search criteria.
///
/// Invariant: always fully populated — decoding fills every field absent from
/// the query string with its default, so no downstream code has to handle a
/// partial filter set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text term matched against listing name/description.
    pub search_term: String,
    pub listing_type: ListingType,
    pub parking: bool,
    pub furnished: bool,
    pub offer: bool,
    pub sort: SortField,
    pub order: SortOrder,
}

/// A single edit to the filter form.
///
/// Sort and order arrive together because the form exposes them as one
/// combined `<sort>_<order>` selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    SearchTerm(String),
    Type(ListingType),
    Parking(bool),
    Furnished(bool),
    Offer(bool),
    SortOrder(SortField, SortOrder),
}

impl FilterState {
    /// Apply one form edit, returning the next filter state.
    pub fn apply(mut self, event: FilterEvent) -> Self {
        match event {
            FilterEvent::SearchTerm(term) => self.search_term = term,
            FilterEvent::Type(t) => self.listing_type = t,
            FilterEvent::Parking(v) => self.parking = v,
            FilterEvent::Furnished(v) => self.furnished = v,
            FilterEvent::Offer(v) => self.offer = v,
            FilterEvent::SortOrder(sort, order) => {
                self.sort = sort;
                self.order = order;
            }
        }
        self
    }
}

/// Parse a combined `<sort>_<order>` selection value (e.g. `regularPrice_desc`).
pub fn parse_sort_order(value: &str) -> Option<(SortField, SortOrder)> {
    let (sort, order) = value.split_once('_')?;
    Some((SortField::parse(sort)?, SortOrder::parse(order)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_state_matches_documented_defaults() {
        let f = FilterState::default();
        assert_eq!(f.search_term, "");
        assert_eq!(f.listing_type, ListingType::All);
        assert!(!f.parking);
        assert!(!f.furnished);
        assert!(!f.offer);
        assert_eq!(f.sort, SortField::CreatedAt);
        assert_eq!(f.order, SortOrder::Desc);
    }

    #[test]
    fn apply_updates_single_fields() {
        let f = FilterState::default()
            .apply(FilterEvent::SearchTerm("lake house".to_string()))
            .apply(FilterEvent::Type(ListingType::Sale))
            .apply(FilterEvent::Parking(true));
        assert_eq!(f.search_term, "lake house");
        assert_eq!(f.listing_type, ListingType::Sale);
        assert!(f.parking);
        assert!(!f.furnished);
    }

    #[test]
    fn combined_sort_order_selection_parses_and_applies() {
        let (sort, order) = parse_sort_order("regularPrice_asc").unwrap();
        let f = FilterState::default().apply(FilterEvent::SortOrder(sort, order));
        assert_eq!(f.sort, SortField::RegularPrice);
        assert_eq!(f.order, SortOrder::Asc);
    }

    #[test]
    fn malformed_sort_order_selection_is_rejected() {
        assert!(parse_sort_order("regularPrice").is_none());
        assert!(parse_sort_order("price_desc").is_none());
        assert!(parse_sort_order("createdAt_down").is_none());
    }
}
