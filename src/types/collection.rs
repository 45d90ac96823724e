use serde::{Deserialize, Serialize};

/// Collection id meaning "all bookmarks".
pub const ALL_COLLECTION_ID: i64 = 0;
/// Collection id of the built-in "Unsorted" collection.
pub const UNSORTED_COLLECTION_ID: i64 = -1;
/// Collection id of the built-in "Trash" collection.
pub const TRASH_COLLECTION_ID: i64 = -99;

/// Reference to another entity as encoded by the Raindrop.io API (`{"$id": 42}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "$id")]
    pub id: i64,
}

/// A Raindrop.io collection as returned by `/collections` and `/collections/childrens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Ordering key among siblings.
    #[serde(default)]
    pub sort: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityRef>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub cover: Vec<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_update: String,
}

impl Collection {
    /// Minimal constructor used when only the tree-relevant fields matter.
    pub fn new(id: i64, title: &str, sort: i64, parent_id: Option<i64>) -> Self {
        Self {
            id,
            title: title.to_string(),
            sort,
            parent: parent_id.map(|id| EntityRef { id }),
            count: 0,
            cover: Vec::new(),
            color: String::new(),
            view: String::new(),
            public: false,
            expanded: false,
            created: String::new(),
            last_update: String::new(),
        }
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent.map(|p| p.id)
    }
}

/// Envelope of the collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsResponse {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub items: Vec<Collection>,
}

/// A collection placed in the tree.
///
/// `children` are owned by this node and ordered by `sort`; `depth` is 0 for roots.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNode {
    pub collection: Collection,
    pub children: Vec<CollectionNode>,
    pub depth: usize,
}

impl CollectionNode {
    pub fn id(&self) -> i64 {
        self.collection.id
    }

    pub fn title(&self) -> &str {
        &self.collection.title
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CollectionNode::subtree_len).sum::<usize>()
    }
}

/// Pseudo-collections that are never returned by the API but can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticCollection {
    All,
    Unsorted,
    Trash,
}

impl SyntheticCollection {
    pub const ALL: [SyntheticCollection; 3] = [
        SyntheticCollection::All,
        SyntheticCollection::Unsorted,
        SyntheticCollection::Trash,
    ];

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            ALL_COLLECTION_ID => Some(SyntheticCollection::All),
            UNSORTED_COLLECTION_ID => Some(SyntheticCollection::Unsorted),
            TRASH_COLLECTION_ID => Some(SyntheticCollection::Trash),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            SyntheticCollection::All => ALL_COLLECTION_ID,
            SyntheticCollection::Unsorted => UNSORTED_COLLECTION_ID,
            SyntheticCollection::Trash => TRASH_COLLECTION_ID,
        }
    }

    /// Key used for this entry in the collection dropdown.
    pub fn key(self) -> &'static str {
        match self {
            SyntheticCollection::All => "all",
            SyntheticCollection::Unsorted => "unsorted",
            SyntheticCollection::Trash => "trash",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SyntheticCollection::All => "All Bookmarks",
            SyntheticCollection::Unsorted => "Unsorted",
            SyntheticCollection::Trash => "Trash",
        }
    }
}

/// One entry of the collection filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDropdownItem {
    pub id: String,
    pub title: String,
    pub collection_id: i64,
}
