//! RPC method handler for the raindrop-search JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! managers and services of the `App` struct.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::{App, FilterSelection};
use crate::managers::shortcut_manager::ShortcutManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::filter::FilterKind;

/// Stands in for a configured token in `settings.get` responses.
const REDACTED_TOKEN: &str = "********";

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

fn selection_from(params: &Value) -> FilterSelection {
    let defaults = FilterSelection::default();
    FilterSelection {
        collection: str_param(params, "collection")
            .map(str::to_string)
            .unwrap_or(defaults.collection),
        search: str_param(params, "search")
            .map(str::to_string)
            .unwrap_or(defaults.search),
        type_filter: str_param(params, "type")
            .map(str::to_string)
            .unwrap_or(defaults.type_filter),
        sort: str_param(params, "sort")
            .map(str::to_string)
            .unwrap_or(defaults.sort),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Collections ───
        "collections.refresh" => {
            let mut a = app.lock().await;
            a.collections.refresh().await.map_err(|e| e.to_string())?;
            Ok(json!(a.collections.dropdown_items()))
        }
        "collections.list" => {
            let a = app.lock().await;
            Ok(json!(a.collections.dropdown_items()))
        }

        // ─── Search ───
        "search.set" => {
            let selection = selection_from(params);
            let mut a = app.lock().await;
            let changed = a.apply_selection(&selection).map_err(|e| e.to_string())?;
            Ok(json!({"changed": changed}))
        }
        "search.refresh" => {
            let mut a = app.lock().await;
            a.fetcher.refresh();
            Ok(json!({"ok": true}))
        }
        "search.load_more" => {
            let a = app.lock().await;
            Ok(json!({"started": a.fetcher.load_more()}))
        }
        "search.state" => {
            let a = app.lock().await;
            serde_json::to_value(a.results_view()).map_err(|e| e.to_string())
        }

        // ─── Search bar accessory ───
        "filter.next" => {
            let mut a = app.lock().await;
            if let Some(current) = str_param(params, "current") {
                a.active_filter = current.parse::<FilterKind>().map_err(|e| e.to_string())?;
            }
            let next = a.cycle_filter();
            Ok(json!({"filter": next.as_str(), "tooltip": next.tooltip()}))
        }

        // ─── Help & shortcuts ───
        "help" => {
            let a = app.lock().await;
            Ok(json!({"markdown": a.help_markdown()}))
        }
        "shortcuts.list" => {
            let a = app.lock().await;
            let sorted: BTreeMap<&String, &String> = a.shortcut_manager.list_shortcuts().iter().collect();
            Ok(json!(sorted))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            let mut settings = a.settings_engine.get_settings().clone();
            if !settings.api.token.is_empty() {
                settings.api.token = REDACTED_TOKEN.to_string();
            }
            serde_json::to_value(settings).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key").ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            let restart_required = a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "restart_required": restart_required}))
        }
        "settings.reset" => {
            let mut a = app.lock().await;
            a.reset_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
