use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collection::EntityRef;
use super::errors::FilterError;

/// Kind of content a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaindropType {
    #[default]
    Link,
    Article,
    Image,
    Video,
    Document,
    Audio,
}

impl RaindropType {
    pub const ALL: [RaindropType; 6] = [
        RaindropType::Link,
        RaindropType::Article,
        RaindropType::Image,
        RaindropType::Video,
        RaindropType::Document,
        RaindropType::Audio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RaindropType::Link => "link",
            RaindropType::Article => "article",
            RaindropType::Image => "image",
            RaindropType::Video => "video",
            RaindropType::Document => "document",
            RaindropType::Audio => "audio",
        }
    }

    /// Capitalised label for dropdowns.
    pub fn label(self) -> &'static str {
        match self {
            RaindropType::Link => "Link",
            RaindropType::Article => "Article",
            RaindropType::Image => "Image",
            RaindropType::Video => "Video",
            RaindropType::Document => "Document",
            RaindropType::Audio => "Audio",
        }
    }
}

impl fmt::Display for RaindropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaindropType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RaindropType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FilterError::UnknownType(s.to_string()))
    }
}

/// A media attachment of a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaindropMedia {
    pub link: String,
}

/// A bookmark ("raindrop") as returned by `/raindrops/{collectionId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raindrop {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "type", default)]
    pub kind: RaindropType,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Favorite flag.
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub broken: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub media: Vec<RaindropMedia>,
    pub collection: EntityRef,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_update: String,
}

impl Raindrop {
    pub fn collection_id(&self) -> i64 {
        self.collection.id
    }

    /// Title to show; bookmarks saved without a title fall back to their URL.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.link
        } else {
            &self.title
        }
    }
}

/// Envelope of `/raindrops/{collectionId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaindropsResponse {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub items: Vec<Raindrop>,
    /// Total number of matches across all pages.
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub collection_id: i64,
}
