//! Turns the search view's filter selections into `/raindrops` request parameters.
//!
//! Only the `type:` operator is ever added programmatically. Every other
//! search operator (`#tag`, `-#tag`, `created:>`, `link:`, `match:OR`, ...) is
//! typed by the user and passed through verbatim.

use crate::services::api_client::QueryParam;
use crate::types::filter::{SearchFilters, SortOrder};
use crate::types::raindrop::RaindropType;

/// Sort key the API uses for relevance ordering.
pub const SCORE_SORT: &str = "score";
/// Sort key used when relevance has no query to rank against.
pub const NEWEST_SORT: &str = "-created";

const TYPE_OPERATOR: &str = "type:";

/// Appends a `type:` clause for a concrete type filter unless the user already typed one.
pub fn compose_search(search_text: &str, type_filter: Option<RaindropType>) -> String {
    let Some(kind) = type_filter else {
        return search_text.to_string();
    };

    if search_text.is_empty() {
        format!("{}{}", TYPE_OPERATOR, kind)
    } else if search_text.contains(TYPE_OPERATOR) {
        search_text.to_string()
    } else {
        format!("{} {}{}", search_text, TYPE_OPERATOR, kind)
    }
}

/// Picks the API sort key for a selection and an already composed search string.
pub fn resolve_sort(sort: Option<SortOrder>, composed_search: &str) -> &'static str {
    match sort {
        Some(order) if order != SortOrder::Relevance => order.as_str(),
        _ if composed_search.is_empty() => NEWEST_SORT,
        _ => SCORE_SORT,
    }
}

/// Fully resolved parameters of one `/raindrops/{collectionId}` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaindropQuery {
    pub collection_id: i64,
    pub search: String,
    pub sort: &'static str,
    pub page: u32,
    pub per_page: u32,
    /// Include bookmarks of nested collections; only meaningful for real collections.
    pub nested: bool,
}

impl RaindropQuery {
    pub fn compose(filters: &SearchFilters, page: u32, per_page: u32) -> Self {
        let search = compose_search(&filters.search_text, filters.type_filter);
        let sort = resolve_sort(filters.sort, &search);
        Self {
            collection_id: filters.collection_id,
            search,
            sort,
            page,
            per_page,
            nested: filters.collection_id > 0,
        }
    }

    /// Same query for another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn to_params(&self) -> Vec<QueryParam<'static>> {
        vec![
            ("page", Some(self.page.to_string())),
            ("perpage", Some(self.per_page.to_string())),
            ("search", Some(self.search.clone())),
            ("sort", Some(self.sort.to_string())),
            ("nested", Some(self.nested.to_string())),
        ]
    }
}
