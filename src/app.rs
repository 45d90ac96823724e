//! App Core for raindrop-search.
//!
//! Central struct holding the managers and services of one search view and
//! translating raw host selections into fetcher filters.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::managers::collection_manager::CollectionManager;
use crate::managers::raindrop_fetcher::{FetchPhase, FetchSnapshot, FetcherConfig, RaindropFetcher};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::services::api_client::{ApiClient, RaindropApi};
use crate::services::list_presenter::{self, ListItemView, EMPTY_DESCRIPTION, EMPTY_TITLE};
use crate::services::notifier::Notifier;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{FilterError, SettingsError};
use crate::types::filter::{parse_sort_filter, parse_type_filter, FilterKind, SearchFilters};

/// Raw dropdown and search bar values as the host reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Collection dropdown id: `all`, `unsorted`, `trash` or a numeric collection id.
    pub collection: String,
    pub search: String,
    /// Type dropdown value; `all` means no type filter.
    pub type_filter: String,
    /// Sort dropdown value; `relevance` (or empty) lets the query decide.
    pub sort: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            collection: "all".to_string(),
            search: String::new(),
            type_filter: "all".to_string(),
            sort: "relevance".to_string(),
        }
    }
}

/// Placeholder shown when a settled search returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyView {
    pub title: &'static str,
    pub description: &'static str,
}

/// Render-ready state of the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub items: Vec<ListItemView>,
    pub page: u32,
    pub total_count: u64,
    pub has_more: bool,
    pub is_loading: bool,
    pub phase: FetchPhase,
    pub revision: u64,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_view: Option<EmptyView>,
}

/// Central application struct holding all managers and services.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub api: Arc<dyn RaindropApi>,
    pub collections: CollectionManager,
    pub fetcher: RaindropFetcher,
    pub shortcut_manager: ShortcutManager,
    pub active_filter: FilterKind,
}

impl App {
    /// Builds the app around a real HTTP client for `token`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(
        settings_engine: SettingsEngine,
        token: &str,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut api_settings = settings_engine.get_settings().api.clone();
        api_settings.token = token.to_string();
        let client = ApiClient::new(&api_settings)?;
        Ok(Self::with_api(settings_engine, Arc::new(client), notifier))
    }

    /// Builds the app around any gateway implementation, using the engine's loaded settings.
    pub fn with_api(settings_engine: SettingsEngine, api: Arc<dyn RaindropApi>, notifier: Arc<dyn Notifier>) -> Self {
        let settings = settings_engine.get_settings();
        let collections = CollectionManager::new(api.clone(), notifier.clone());
        let fetcher = RaindropFetcher::new(api.clone(), notifier, FetcherConfig::from(&settings.search));
        let shortcut_manager = ShortcutManager::with_overrides(&settings.shortcuts);

        Self {
            settings_engine,
            api,
            collections,
            fetcher,
            shortcut_manager,
            active_filter: FilterKind::default(),
        }
    }

    /// Initial load: all bookmarks plus the collection tree.
    ///
    /// A failed collection load has already been reported; the dropdown then only
    /// offers the pseudo-collections.
    pub async fn startup(&mut self) {
        self.fetcher.set_filters(SearchFilters::all_bookmarks());
        if self.collections.refresh().await.is_err() {
            debug!("starting without collections");
        }
    }

    /// Resolves a host selection and hands it to the fetcher.
    ///
    /// Returns whether the filters changed.
    pub fn apply_selection(&mut self, selection: &FilterSelection) -> Result<bool, FilterError> {
        let filters = SearchFilters::new(
            self.collections.resolve_collection_id(&selection.collection),
            &selection.search,
        )
        .with_type(parse_type_filter(&selection.type_filter)?)
        .with_sort(parse_sort_filter(&selection.sort)?);

        Ok(self.fetcher.set_filters(filters))
    }

    /// Moves the search bar accessory to the next dropdown.
    pub fn cycle_filter(&mut self) -> FilterKind {
        self.active_filter = self.active_filter.next();
        self.active_filter
    }

    pub fn list_items(&self, snapshot: &FetchSnapshot) -> Vec<ListItemView> {
        snapshot
            .raindrops
            .iter()
            .map(|r| list_presenter::list_item(r, self.collections.collection_title(r.collection_id())))
            .collect()
    }

    pub fn results_view(&self) -> ResultsView {
        let snapshot = self.fetcher.snapshot();
        let items = self.list_items(&snapshot);
        let settled = !snapshot.is_loading && snapshot.phase != FetchPhase::Debouncing;
        let empty_view = (settled && items.is_empty()).then_some(EmptyView {
            title: EMPTY_TITLE,
            description: EMPTY_DESCRIPTION,
        });

        ResultsView {
            items,
            page: snapshot.page,
            total_count: snapshot.total_count,
            has_more: snapshot.has_more,
            is_loading: snapshot.is_loading,
            phase: snapshot.phase,
            revision: snapshot.revision,
            page_size: self.fetcher.page_size(),
            empty_view,
        }
    }

    pub fn help_markdown(&self) -> String {
        list_presenter::help_markdown(&self.shortcut_manager)
    }

    /// Persists one dot-path setting.
    ///
    /// Shortcut overrides apply immediately. Returns `true` when the change
    /// only takes effect after a restart.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<bool, SettingsError> {
        self.settings_engine.set_value(key, value)?;
        if key.starts_with("shortcuts.") {
            self.shortcut_manager = ShortcutManager::with_overrides(&self.settings_engine.get_settings().shortcuts);
            return Ok(false);
        }
        debug!(key, "setting saved, applies on next start");
        Ok(true)
    }

    /// Restores and persists the default settings; shortcuts revert immediately.
    pub fn reset_settings(&mut self) -> Result<(), SettingsError> {
        self.settings_engine.reset()?;
        self.shortcut_manager.reset_to_defaults();
        Ok(())
    }
}
