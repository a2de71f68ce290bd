//! Bidirectional mapping between [`FilterState`] and URL query strings.
//!
//! Encoding omits keys whose value equals the no-op default (empty search
//! term, `all` type, unset flags) so default-filtered URLs stay short; `sort`
//! and `order` are always emitted. Decoding fills missing keys with defaults,
//! so `decode(encode(f)) == f` for every reachable filter state.

use crate::filters::{FilterState, ListingType, SortField, SortOrder};
use std::borrow::Cow;

/// Serialize a filter state to a query string (no leading `?`).
pub fn encode(filters: &FilterState) -> String {
    let mut query = Vec::new();

    if !filters.search_term.is_empty() {
        query.push(format!(
            "searchTerm={}",
            urlencoding::encode(&filters.search_term)
        ));
    }
    if filters.listing_type != ListingType::All {
        query.push(format!("type={}", filters.listing_type.as_str()));
    }
    if filters.parking {
        query.push("parking=true".to_string());
    }
    if filters.furnished {
        query.push("furnished=true".to_string());
    }
    if filters.offer {
        query.push("offer=true".to_string());
    }
    query.push(format!("sort={}", filters.sort.as_str()));
    query.push(format!("order={}", filters.order.as_str()));

    query.join("&")
}

/// Parse a query string (with or without leading `?`) into a filter state.
///
/// Total: unknown keys are ignored, unrecognized enum values fall back to the
/// field default, and booleans are true only for the literal `true`.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterState::default();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let value = percent_decode(value);

        match key {
            "searchTerm" => filters.search_term = value.into_owned(),
            "type" => {
                filters.listing_type = ListingType::parse(&value).unwrap_or_default();
            }
            "parking" => filters.parking = value == "true",
            "furnished" => filters.furnished = value == "true",
            "offer" => filters.offer = value == "true",
            "sort" => filters.sort = SortField::parse(&value).unwrap_or_default(),
            "order" => filters.order = SortOrder::parse(&value).unwrap_or_default(),
            _ => {}
        }
    }

    filters
}

/// Percent-decode a query value. `+` is a space in form-encoded query
/// strings; undecodable sequences are kept verbatim.
fn percent_decode(value: &str) -> Cow<'_, str> {
    if value.contains('+') {
        let spaced = value.replace('+', " ");
        match urlencoding::decode(&spaced) {
            Ok(decoded) => Cow::Owned(decoded.into_owned()),
            Err(_) => Cow::Owned(spaced),
        }
    } else {
        match urlencoding::decode(value) {
            Ok(decoded) => decoded,
            Err(_) => Cow::Borrowed(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterEvent, FilterState};

    #[test]
    fn empty_query_decodes_to_defaults() {
        assert_eq!(decode(""), FilterState::default());
        assert_eq!(decode("?"), FilterState::default());
    }

    #[test]
    fn defaults_encode_to_sort_and_order_only() {
        assert_eq!(encode(&FilterState::default()), "sort=createdAt&order=desc");
    }

    #[test]
    fn non_default_fields_are_emitted() {
        let f = FilterState::default()
            .apply(FilterEvent::SearchTerm("lake view".to_string()))
            .apply(FilterEvent::Type(ListingType::Rent))
            .apply(FilterEvent::Offer(true));
        assert_eq!(
            encode(&f),
            "searchTerm=lake%20view&type=rent&offer=true&sort=createdAt&order=desc"
        );
    }

    #[test]
    fn round_trip_preserves_every_reachable_state() {
        let terms = ["", "loft", "lake view", "3BR & garage"];
        let types = [ListingType::All, ListingType::Rent, ListingType::Sale];
        let sorts = [SortField::CreatedAt, SortField::RegularPrice];
        let orders = [SortOrder::Asc, SortOrder::Desc];
        let flags = [false, true];

        for term in terms {
            for listing_type in types {
                for parking in flags {
                    for furnished in flags {
                        for offer in flags {
                            for sort in sorts {
                                for order in orders {
                                    let f = FilterState {
                                        search_term: term.to_string(),
                                        listing_type,
                                        parking,
                                        furnished,
                                        offer,
                                        sort,
                                        order,
                                    };
                                    assert_eq!(decode(&encode(&f)), f, "state: {:?}", f);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn booleans_parse_true_only_for_literal_true() {
        assert!(decode("parking=true").parking);
        assert!(!decode("parking=1").parking);
        assert!(!decode("parking=TRUE").parking);
        assert!(!decode("parking=").parking);
        assert!(!decode("parking").parking);
    }

    #[test]
    fn unrecognized_enum_values_fall_back_to_defaults() {
        let f = decode("type=castle&sort=price&order=sideways");
        assert_eq!(f.listing_type, ListingType::All);
        assert_eq!(f.sort, SortField::CreatedAt);
        assert_eq!(f.order, SortOrder::Desc);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let f = decode("searchTerm=cabin&utm_source=mail&page=3");
        assert_eq!(f.search_term, "cabin");
        assert_eq!(decode("limit=9&startIndex=8"), FilterState::default());
    }

    #[test]
    fn plus_decodes_as_space() {
        assert_eq!(decode("searchTerm=lake+view").search_term, "lake view");
    }
}
