//! Property-based tests for search string composition and sort resolution.

use proptest::prelude::*;
use raindrop_search::services::api_client::build_url;
use raindrop_search::services::query_composer::{compose_search, resolve_sort, RaindropQuery, NEWEST_SORT, SCORE_SORT};
use raindrop_search::types::filter::{SearchFilters, SortOrder};
use raindrop_search::types::raindrop::RaindropType;

fn arb_type() -> impl Strategy<Value = RaindropType> {
    proptest::sample::select(RaindropType::ALL.to_vec())
}

fn arb_sort() -> impl Strategy<Value = SortOrder> {
    proptest::sample::select(SortOrder::ALL.to_vec())
}

fn arb_search_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z#:> -]{0,20}",
        "[a-z ]{0,10}".prop_map(|s| format!("{}type:video", s)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn no_type_filter_leaves_search_untouched(text in arb_search_text()) {
        prop_assert_eq!(compose_search(&text, None), text);
    }

    #[test]
    fn user_typed_type_operator_wins(prefix in "[a-z ]{0,10}", kind in arb_type()) {
        let text = format!("{}type:image", prefix);
        prop_assert_eq!(compose_search(&text, Some(kind)), text);
    }

    #[test]
    fn type_filter_is_appended_once(text in "[a-z#]{0,15}", kind in arb_type()) {
        let composed = compose_search(&text, Some(kind));
        let clause = format!("type:{}", kind);
        prop_assert!(composed.starts_with(text.as_str()));
        prop_assert!(composed.ends_with(clause.as_str()));
        prop_assert_eq!(composed.matches("type:").count(), 1);
    }

    #[test]
    fn explicit_sort_ignores_search_text(text in arb_search_text(), sort in arb_sort()) {
        prop_assume!(sort != SortOrder::Relevance);
        prop_assert_eq!(resolve_sort(Some(sort), &text), sort.as_str());
    }

    #[test]
    fn relevance_depends_only_on_composed_search(text in arb_search_text(), explicit in any::<bool>()) {
        let sort = if explicit { Some(SortOrder::Relevance) } else { None };
        let expected = if text.is_empty() { NEWEST_SORT } else { SCORE_SORT };
        prop_assert_eq!(resolve_sort(sort, &text), expected);
    }

    #[test]
    fn request_url_never_carries_empty_search(
        collection_id in -99i64..1000,
        page in 0u32..50,
        kind in proptest::option::of(arb_type()),
    ) {
        let filters = SearchFilters::new(collection_id, "").with_type(kind);
        let query = RaindropQuery::compose(&filters, page, 25);
        let url = build_url("https://api.raindrop.io/rest/v1", "/raindrops/0", &query.to_params()).unwrap();
        let has_search = url.query_pairs().any(|(k, _)| k == "search");

        prop_assert_eq!(has_search, kind.is_some());
        prop_assert_eq!(query.nested, collection_id > 0);
    }
}
