use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collection::ALL_COLLECTION_ID;
use super::errors::FilterError;
use super::raindrop::RaindropType;

/// Sort selection offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
    DomainAsc,
    DomainDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        SortOrder::Relevance,
        SortOrder::NewestFirst,
        SortOrder::OldestFirst,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
        SortOrder::DomainAsc,
        SortOrder::DomainDesc,
    ];

    /// Value used by the dropdown and, except for `Relevance`, by the API `sort` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::NewestFirst => "-created",
            SortOrder::OldestFirst => "created",
            SortOrder::TitleAsc => "title",
            SortOrder::TitleDesc => "-title",
            SortOrder::DomainAsc => "domain",
            SortOrder::DomainDesc => "-domain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Relevance => "Relevance",
            SortOrder::NewestFirst => "Newest First",
            SortOrder::OldestFirst => "Oldest First",
            SortOrder::TitleAsc => "Title A-Z",
            SortOrder::TitleDesc => "Title Z-A",
            SortOrder::DomainAsc => "Domain A-Z",
            SortOrder::DomainDesc => "Domain Z-A",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| FilterError::UnknownSort(s.to_string()))
    }
}

/// Parses the type dropdown value; `"all"` and `""` mean no type filter.
pub fn parse_type_filter(value: &str) -> Result<Option<RaindropType>, FilterError> {
    match value {
        "" | "all" => Ok(None),
        other => other.parse().map(Some),
    }
}

/// Parses the sort dropdown value; `""` means no explicit selection.
pub fn parse_sort_filter(value: &str) -> Result<Option<SortOrder>, FilterError> {
    match value {
        "" => Ok(None),
        other => other.parse().map(Some),
    }
}

/// The filter combination a result list is fetched for.
///
/// Any change to one of these fields resets the accumulated results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub collection_id: i64,
    pub search_text: String,
    pub type_filter: Option<RaindropType>,
    pub sort: Option<SortOrder>,
}

impl SearchFilters {
    pub fn new(collection_id: i64, search_text: &str) -> Self {
        Self {
            collection_id,
            search_text: search_text.to_string(),
            type_filter: None,
            sort: None,
        }
    }

    pub fn all_bookmarks() -> Self {
        Self::new(ALL_COLLECTION_ID, "")
    }

    pub fn with_type(mut self, type_filter: Option<RaindropType>) -> Self {
        self.type_filter = type_filter;
        self
    }

    /// `Relevance` is stored as `None`: both let the query decide the order.
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort.filter(|order| *order != SortOrder::Relevance);
        self
    }
}

/// The search bar accessory dropdown currently shown; Tab cycles through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Collection,
    Type,
    Sort,
}

impl FilterKind {
    pub fn next(self) -> Self {
        match self {
            FilterKind::Collection => FilterKind::Type,
            FilterKind::Type => FilterKind::Sort,
            FilterKind::Sort => FilterKind::Collection,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Collection => "collection",
            FilterKind::Type => "type",
            FilterKind::Sort => "sort",
        }
    }

    /// Dropdown tooltip.
    pub fn tooltip(self) -> &'static str {
        match self {
            FilterKind::Collection => "Collection Filter (Tab to switch)",
            FilterKind::Type => "Type Filter (Tab to switch)",
            FilterKind::Sort => "Sort Filter (Tab to switch)",
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(FilterKind::Collection),
            "type" => Ok(FilterKind::Type),
            "sort" => Ok(FilterKind::Sort),
            other => Err(FilterError::UnknownFilter(other.to_string())),
        }
    }
}
