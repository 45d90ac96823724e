//! View models for the host launcher's list, detail panel and help screen.
//!
//! Nothing here renders; the host maps these values onto its own widgets.

use serde::Serialize;

use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait, SHORTCUT_ACTIONS};
use crate::types::raindrop::{Raindrop, RaindropType};

/// Icons the host is asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Link,
    Document,
    Image,
    Video,
    BlankDocument,
    Music,
    Globe,
    Star,
    QuestionMark,
}

pub fn type_icon(kind: RaindropType) -> Icon {
    match kind {
        RaindropType::Article => Icon::Document,
        RaindropType::Image => Icon::Image,
        RaindropType::Video => Icon::Video,
        RaindropType::Document => Icon::BlankDocument,
        RaindropType::Audio => Icon::Music,
        RaindropType::Link => Icon::Link,
    }
}

pub fn favicon_url(domain: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={}&sz=64", domain)
}

/// Web app URL of a bookmark.
pub fn raindrop_app_url(raindrop: &Raindrop) -> String {
    format!(
        "https://app.raindrop.io/my/{}/item/{}",
        raindrop.collection_id(),
        raindrop.id
    )
}

/// Right-hand side decorations of a list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Accessory {
    Icon { icon: Icon, tooltip: String },
    Tag { tag: String },
    Text { text: String, tooltip: String },
}

/// Key/value rows of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataEntry {
    TagList { title: String, tags: Vec<String> },
    Label { title: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemView {
    pub id: String,
    pub title: String,
    pub icon_url: String,
    pub fallback_icon: Icon,
    pub accessories: Vec<Accessory>,
    pub detail_markdown: String,
    pub metadata: Vec<MetadataEntry>,
    pub url: String,
    pub app_url: String,
}

/// Builds the list row for a bookmark. `collection_title` is already resolved by the caller.
pub fn list_item(raindrop: &Raindrop, collection_title: Option<&str>) -> ListItemView {
    let mut accessories = Vec::new();
    if raindrop.important {
        accessories.push(Accessory::Icon {
            icon: Icon::Star,
            tooltip: "Favorite".to_string(),
        });
    }
    accessories.push(Accessory::Icon {
        icon: type_icon(raindrop.kind),
        tooltip: raindrop.kind.to_string(),
    });
    // Only the first tag fits in the row; the detail panel lists all of them.
    if let Some(tag) = raindrop.tags.first() {
        accessories.push(Accessory::Tag { tag: tag.clone() });
    }
    if let Some(title) = collection_title {
        accessories.push(Accessory::Text {
            text: title.to_string(),
            tooltip: "Collection".to_string(),
        });
    }

    let icon_url = if raindrop.cover.is_empty() {
        favicon_url(&raindrop.domain)
    } else {
        raindrop.cover.clone()
    };

    ListItemView {
        id: raindrop.id.to_string(),
        title: raindrop.display_title().to_string(),
        icon_url,
        fallback_icon: Icon::Globe,
        accessories,
        detail_markdown: detail_markdown(raindrop),
        metadata: detail_metadata(raindrop, collection_title),
        url: raindrop.link.clone(),
        app_url: raindrop_app_url(raindrop),
    }
}

pub fn detail_markdown(raindrop: &Raindrop) -> String {
    let heading = format!("# {}", raindrop.display_title());
    if raindrop.excerpt.is_empty() {
        heading
    } else {
        format!("{}\n\n---\n\n{}", heading, raindrop.excerpt)
    }
}

pub fn detail_metadata(raindrop: &Raindrop, collection_title: Option<&str>) -> Vec<MetadataEntry> {
    let mut entries = Vec::new();
    if !raindrop.tags.is_empty() {
        entries.push(MetadataEntry::TagList {
            title: "Tags".to_string(),
            tags: raindrop.tags.clone(),
        });
    }
    if let Some(title) = collection_title {
        entries.push(MetadataEntry::Label {
            title: "Collection".to_string(),
            text: title.to_string(),
        });
    }
    entries.push(MetadataEntry::Label {
        title: "Domain".to_string(),
        text: raindrop.domain.clone(),
    });
    entries.push(MetadataEntry::Label {
        title: "Type".to_string(),
        text: raindrop.kind.to_string(),
    });
    if raindrop.important {
        entries.push(MetadataEntry::Label {
            title: "Favorite".to_string(),
            text: "Yes".to_string(),
        });
    }
    entries
}

pub const SEARCH_PLACEHOLDER: &str = "Search... (#tag, type:article, Ctrl+H for help)";
pub const EMPTY_TITLE: &str = "No results found";
pub const EMPTY_DESCRIPTION: &str = "Try a different search term or collection (Ctrl+H for help)";

const HELP_FILTERS: &str = "\
# Search Help

## Dropdown Filters
Press **Tab** to cycle between filter dropdowns:
- **Collection**: Filter by collection
- **Type**: Filter by bookmark type
- **Sort**: Change sort order
";

const HELP_OPERATORS: &str = "\
## Search Operators
Type these in the search box:

| Operator | Example | Description |
|----------|---------|-------------|
| `#tag` | `#design` | Filter by tag |
| `-#tag` | `-#archive` | Exclude tag |
| `type:` | `type:article` | Filter by type (link, article, image, video, document, audio) |
| `created:` | `created:2024-01-01` | Filter by creation date |
| `created:>` | `created:>2024-01-01` | Created after date |
| `created:<` | `created:<2024-01-01` | Created before date |
| `link:` | `link:github.com` | Filter by URL/domain |
| `title:` | `title:React` | Search in title only |
| `❤️` or `important` | `❤️` | Show favorites only |
| `match:OR` | `react match:OR vue` | Match any term (default is AND) |
| `\"phrase\"` | `\"exact phrase\"` | Exact phrase match |
";

const HELP_EXAMPLES: &str = "\
## Examples
- `#design type:article` - Articles tagged \"design\"
- `react -#old created:>2024-01-01` - React bookmarks, not tagged \"old\", from 2024
- `link:github.com type:link` - GitHub links
";

/// Help screen markdown; the shortcut table reflects the current bindings.
pub fn help_markdown(shortcuts: &ShortcutManager) -> String {
    let mut table = String::from("## Keyboard Shortcuts\n| Shortcut | Action |\n|----------|--------|\n");
    for (action, label) in SHORTCUT_ACTIONS {
        if let Some(keys) = shortcuts.get_shortcut(action) {
            table.push_str(&format!("| **{}** | {} |\n", keys, label));
        }
    }
    format!("{}\n{}\n{}\n{}", HELP_FILTERS, HELP_OPERATORS, table, HELP_EXAMPLES)
}
