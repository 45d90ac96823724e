//! Collection Manager.
//!
//! Loads root and nested collections, rebuilds the tree on every refresh and
//! resolves dropdown selections and collection ids for the search view. The
//! last successfully loaded tree is kept when a refresh fails.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::api_client::RaindropApi;
use crate::services::collection_tree::{build_tree, dropdown_items, flatten};
use crate::services::notifier::{report_failure, Notifier};
use crate::types::collection::{
    CollectionDropdownItem, CollectionNode, SyntheticCollection, ALL_COLLECTION_ID,
};
use crate::types::errors::ApiError;

pub struct CollectionManager {
    api: Arc<dyn RaindropApi>,
    notifier: Arc<dyn Notifier>,
    roots: Vec<CollectionNode>,
    titles: HashMap<i64, String>,
    loaded: bool,
}

impl CollectionManager {
    pub fn new(api: Arc<dyn RaindropApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            roots: Vec::new(),
            titles: HashMap::new(),
            loaded: false,
        }
    }

    /// Fetches both collection endpoints and rebuilds the tree.
    ///
    /// On failure the previous tree stays in place and the user is notified once.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.get_all_collections().await {
            Ok(collections) => {
                debug!(count = collections.len(), "collections loaded");
                self.titles = collections
                    .iter()
                    .map(|c| (c.id, c.title.clone()))
                    .collect();
                self.roots = build_tree(&collections);
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "collection refresh failed");
                report_failure(self.notifier.as_ref(), &err);
                Err(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn roots(&self) -> &[CollectionNode] {
        &self.roots
    }

    /// The tree in dropdown order.
    pub fn flattened(&self) -> Vec<&CollectionNode> {
        flatten(&self.roots)
    }

    pub fn dropdown_items(&self) -> Vec<CollectionDropdownItem> {
        dropdown_items(&self.flattened())
    }

    /// Maps a dropdown selection to the id sent to the API; unknown selections mean "all".
    pub fn resolve_collection_id(&self, selected: &str) -> i64 {
        self.dropdown_items()
            .into_iter()
            .find(|item| item.id == selected)
            .map(|item| item.collection_id)
            .unwrap_or(ALL_COLLECTION_ID)
    }

    /// Display title of a collection id, including the pseudo-collections.
    pub fn collection_title(&self, collection_id: i64) -> Option<&str> {
        if let Some(synthetic) = SyntheticCollection::from_id(collection_id) {
            return Some(synthetic.title());
        }
        self.titles.get(&collection_id).map(String::as_str)
    }
}
