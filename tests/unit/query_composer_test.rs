//! Unit tests for search string composition, sort resolution and request parameters.

use raindrop_search::services::query_composer::{compose_search, resolve_sort, RaindropQuery, NEWEST_SORT, SCORE_SORT};
use raindrop_search::types::filter::{parse_sort_filter, parse_type_filter, SearchFilters, SortOrder};
use raindrop_search::types::raindrop::RaindropType;
use rstest::rstest;

#[rstest]
#[case("", None, "")]
#[case("rust", None, "rust")]
#[case("", Some(RaindropType::Article), "type:article")]
#[case("rust", Some(RaindropType::Video), "rust type:video")]
#[case("foo type:video", Some(RaindropType::Article), "foo type:video")]
#[case("#design -#old", Some(RaindropType::Image), "#design -#old type:image")]
fn test_compose_search(
    #[case] text: &str,
    #[case] type_filter: Option<RaindropType>,
    #[case] expected: &str,
) {
    assert_eq!(compose_search(text, type_filter), expected);
}

#[rstest]
#[case(None, "", NEWEST_SORT)]
#[case(None, "foo", SCORE_SORT)]
#[case(Some(SortOrder::Relevance), "", NEWEST_SORT)]
#[case(Some(SortOrder::Relevance), "foo", SCORE_SORT)]
#[case(Some(SortOrder::TitleAsc), "foo", "title")]
#[case(Some(SortOrder::TitleAsc), "", "title")]
#[case(Some(SortOrder::OldestFirst), "foo", "created")]
#[case(Some(SortOrder::DomainDesc), "", "-domain")]
fn test_resolve_sort(#[case] sort: Option<SortOrder>, #[case] search: &str, #[case] expected: &str) {
    assert_eq!(resolve_sort(sort, search), expected);
}

/// A type filter alone makes the search non-empty, so relevance ranks by score.
#[test]
fn test_type_filter_alone_uses_score_sort() {
    let filters = SearchFilters::all_bookmarks().with_type(Some(RaindropType::Article));
    let query = RaindropQuery::compose(&filters, 0, 25);
    assert_eq!(query.search, "type:article");
    assert_eq!(query.sort, SCORE_SORT);
}

#[rstest]
#[case(0, false)]
#[case(-1, false)]
#[case(-99, false)]
#[case(42, true)]
fn test_nested_only_for_real_collections(#[case] collection_id: i64, #[case] nested: bool) {
    let query = RaindropQuery::compose(&SearchFilters::new(collection_id, ""), 0, 25);
    assert_eq!(query.nested, nested);
}

#[test]
fn test_params_and_paging() {
    let query = RaindropQuery::compose(&SearchFilters::new(7, "rust"), 0, 25).with_page(3);
    let params: Vec<(&str, String)> = query
        .to_params()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect();
    assert_eq!(
        params,
        vec![
            ("page", "3".to_string()),
            ("perpage", "25".to_string()),
            ("search", "rust".to_string()),
            ("sort", "score".to_string()),
            ("nested", "true".to_string()),
        ]
    );
}

#[test]
fn test_dropdown_values_parse() {
    assert_eq!(parse_type_filter("all").unwrap(), None);
    assert_eq!(parse_type_filter("").unwrap(), None);
    assert_eq!(parse_type_filter("audio").unwrap(), Some(RaindropType::Audio));
    assert!(parse_type_filter("gif").is_err());

    assert_eq!(parse_sort_filter("").unwrap(), None);
    assert_eq!(parse_sort_filter("-title").unwrap(), Some(SortOrder::TitleDesc));
    assert_eq!(parse_sort_filter("relevance").unwrap(), Some(SortOrder::Relevance));
    assert!(parse_sort_filter("random").is_err());
}

#[test]
fn test_relevance_sort_equals_no_sort() {
    let implicit = SearchFilters::new(4, "rust");
    let explicit = SearchFilters::new(4, "rust").with_sort(Some(SortOrder::Relevance));
    assert_eq!(explicit, implicit);
    assert_eq!(explicit.sort, None);

    let titled = SearchFilters::new(4, "rust").with_sort(Some(SortOrder::TitleAsc));
    assert_ne!(titled, implicit);
}
