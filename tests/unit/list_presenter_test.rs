//! Tests for the list, detail and help view models.

use raindrop_search::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use raindrop_search::services::list_presenter::*;
use raindrop_search::types::raindrop::{Raindrop, RaindropType};
use rstest::rstest;
use serde_json::json;

fn article() -> Raindrop {
    serde_json::from_value(json!({
        "_id": 501,
        "title": "Pin and suffering",
        "link": "https://fasterthanli.me/articles/pin-and-suffering",
        "excerpt": "Let's talk about async Rust.",
        "domain": "fasterthanli.me",
        "type": "article",
        "tags": ["rust", "async", "rust"],
        "important": true,
        "collection": {"$id": 42},
        "created": "2024-03-01T10:00:00.000Z",
        "lastUpdate": "2024-03-02T10:00:00.000Z"
    }))
    .unwrap()
}

fn bare_link() -> Raindrop {
    serde_json::from_value(json!({
        "_id": 7,
        "link": "https://example.com/untitled",
        "domain": "example.com",
        "cover": "https://example.com/cover.png",
        "collection": {"$id": -1}
    }))
    .unwrap()
}

#[test]
fn test_list_item_for_favorite_article() {
    let item = list_item(&article(), Some("Reading"));

    assert_eq!(item.id, "501");
    assert_eq!(item.title, "Pin and suffering");
    assert_eq!(item.url, "https://fasterthanli.me/articles/pin-and-suffering");
    assert_eq!(item.app_url, "https://app.raindrop.io/my/42/item/501");
    assert_eq!(
        item.icon_url,
        "https://www.google.com/s2/favicons?domain=fasterthanli.me&sz=64"
    );
    assert_eq!(item.fallback_icon, Icon::Globe);
    assert_eq!(
        item.accessories,
        vec![
            Accessory::Icon { icon: Icon::Star, tooltip: "Favorite".to_string() },
            Accessory::Icon { icon: Icon::Document, tooltip: "article".to_string() },
            Accessory::Tag { tag: "rust".to_string() },
            Accessory::Text { text: "Reading".to_string(), tooltip: "Collection".to_string() },
        ]
    );
}

#[test]
fn test_list_item_without_title_uses_link_and_cover() {
    let item = list_item(&bare_link(), None);
    assert_eq!(item.title, "https://example.com/untitled");
    assert_eq!(item.icon_url, "https://example.com/cover.png");
    assert_eq!(
        item.accessories,
        vec![Accessory::Icon { icon: Icon::Link, tooltip: "link".to_string() }]
    );
    assert_eq!(item.detail_markdown, "# https://example.com/untitled");
}

#[test]
fn test_detail_markdown_with_excerpt() {
    assert_eq!(
        detail_markdown(&article()),
        "# Pin and suffering\n\n---\n\nLet's talk about async Rust."
    );
}

#[test]
fn test_detail_metadata_keeps_tag_order_and_duplicates() {
    let entries = detail_metadata(&article(), Some("Reading"));
    assert_eq!(
        entries[0],
        MetadataEntry::TagList {
            title: "Tags".to_string(),
            tags: vec!["rust".to_string(), "async".to_string(), "rust".to_string()],
        }
    );
    assert!(entries.contains(&MetadataEntry::Label {
        title: "Collection".to_string(),
        text: "Reading".to_string()
    }));
    assert!(entries.contains(&MetadataEntry::Label {
        title: "Favorite".to_string(),
        text: "Yes".to_string()
    }));
}

#[test]
fn test_detail_metadata_minimal() {
    let entries = detail_metadata(&bare_link(), None);
    assert_eq!(
        entries,
        vec![
            MetadataEntry::Label { title: "Domain".to_string(), text: "example.com".to_string() },
            MetadataEntry::Label { title: "Type".to_string(), text: "link".to_string() },
        ]
    );
}

#[rstest]
#[case(RaindropType::Link, Icon::Link)]
#[case(RaindropType::Article, Icon::Document)]
#[case(RaindropType::Image, Icon::Image)]
#[case(RaindropType::Video, Icon::Video)]
#[case(RaindropType::Document, Icon::BlankDocument)]
#[case(RaindropType::Audio, Icon::Music)]
fn test_type_icons(#[case] kind: RaindropType, #[case] icon: Icon) {
    assert_eq!(type_icon(kind), icon);
}

#[test]
fn test_help_lists_operators_and_current_shortcuts() {
    let mut shortcuts = ShortcutManager::new();
    shortcuts.register_shortcut("show_help", "F1").unwrap();

    let help = help_markdown(&shortcuts);
    assert!(help.starts_with("# Search Help"));
    assert!(help.contains("| `#tag` | `#design` | Filter by tag |"));
    assert!(help.contains("| **F1** | Show this help |"));
    assert!(help.contains("| **Tab** | Switch filter dropdown |"));
    assert!(help.contains("## Examples"));
}

#[test]
fn test_list_item_serializes_for_the_host() {
    let value = serde_json::to_value(list_item(&article(), None)).unwrap();
    assert_eq!(value["fallback_icon"], "globe");
    assert_eq!(value["accessories"][0]["kind"], "icon");
    assert_eq!(value["accessories"][0]["icon"], "star");
    assert_eq!(value["accessories"][2], json!({"kind": "tag", "tag": "rust"}));
}
