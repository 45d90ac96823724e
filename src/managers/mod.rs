// Raindrop search state managers
// Managers own mutable state: the collection tree, the incremental result list, keyboard shortcuts.

pub mod collection_manager;
pub mod raindrop_fetcher;
pub mod shortcut_manager;
