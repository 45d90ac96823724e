//! Shortcut Manager for the search view.
//!
//! Manages keyboard shortcut bindings of the bookmark list actions with
//! conflict detection and platform-specific modifier key adaptation.

use std::collections::HashMap;

use tracing::warn;

use crate::types::errors::ShortcutError;

/// Bindable actions with their help-screen labels, in display order.
pub const SHORTCUT_ACTIONS: &[(&str, &str)] = &[
    ("open_in_browser", "Open in browser"),
    ("open_in_raindrop", "Open in Raindrop.io"),
    ("switch_filter", "Switch filter dropdown"),
    ("show_help", "Show this help"),
    ("toggle_detail", "Toggle detail panel"),
];

/// Trait defining shortcut management operations.
pub trait ShortcutManagerTrait {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError>;
    fn get_shortcut(&self, action: &str) -> Option<&str>;
    fn list_shortcuts(&self) -> &HashMap<String, String>;
    fn reset_to_defaults(&mut self);
    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String>;
    fn get_default_shortcuts(&self) -> HashMap<String, String>;
}

/// Shortcut manager with in-memory storage and platform adaptation.
pub struct ShortcutManager {
    shortcuts: HashMap<String, String>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        let mut mgr = Self {
            shortcuts: HashMap::new(),
        };
        mgr.shortcuts = mgr.get_default_shortcuts();
        mgr
    }

    /// Defaults with the user's overrides applied; invalid overrides are logged and skipped.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut mgr = Self::new();
        let mut actions: Vec<&String> = overrides.keys().collect();
        actions.sort();
        for action in actions {
            if let Err(e) = mgr.register_shortcut(action, &overrides[action]) {
                warn!(action = %action, error = %e, "ignoring shortcut override");
            }
        }
        mgr
    }

    fn is_known_action(action: &str) -> bool {
        SHORTCUT_ACTIONS.iter().any(|(a, _)| *a == action)
    }

    /// Adapts modifier keys for the current platform.
    fn adapt_for_platform(keys: &str) -> String {
        if cfg!(target_os = "macos") {
            keys.replace("Ctrl+", "Cmd+")
        } else {
            keys.to_string()
        }
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn register_shortcut(&mut self, action: &str, keys: &str) -> Result<(), ShortcutError> {
        if !Self::is_known_action(action) {
            return Err(ShortcutError::NotFound(action.to_string()));
        }
        if keys.trim().is_empty() {
            return Err(ShortcutError::InvalidKeys("Keys cannot be empty".to_string()));
        }

        if let Some(conflicting_action) = self.has_conflict(keys, Some(action)) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, conflicting_action
            )));
        }

        self.shortcuts
            .insert(action.to_string(), Self::adapt_for_platform(keys));
        Ok(())
    }

    fn get_shortcut(&self, action: &str) -> Option<&str> {
        self.shortcuts.get(action).map(|s| s.as_str())
    }

    fn list_shortcuts(&self) -> &HashMap<String, String> {
        &self.shortcuts
    }

    fn reset_to_defaults(&mut self) {
        self.shortcuts = self.get_default_shortcuts();
    }

    fn has_conflict(&self, keys: &str, exclude_action: Option<&str>) -> Option<String> {
        let adapted = Self::adapt_for_platform(keys);
        self.shortcuts
            .iter()
            .filter(|(action, _)| Some(action.as_str()) != exclude_action)
            .find(|(_, bound)| **bound == adapted)
            .map(|(action, _)| action.clone())
    }

    fn get_default_shortcuts(&self) -> HashMap<String, String> {
        let defaults = [
            ("open_in_browser", "Enter"),
            ("open_in_raindrop", "Ctrl+O"),
            ("switch_filter", "Tab"),
            ("show_help", "Ctrl+H"),
            ("toggle_detail", "Ctrl+D"),
        ];

        defaults
            .into_iter()
            .map(|(a, k)| (a.to_string(), Self::adapt_for_platform(k)))
            .collect()
    }
}
