// Raindrop search services
// Stateless building blocks: REST gateway, collection tree, query composition, presentation, notifications, settings.

pub mod api_client;
pub mod collection_tree;
pub mod list_presenter;
pub mod notifier;
pub mod query_composer;
pub mod settings_engine;
