// Raindrop search platform paths
// Only the configuration directory is needed: no bookmark data is persisted locally.
//
// Linux:   $XDG_CONFIG_HOME/raindrop-search or ~/.config/raindrop-search
// macOS:   ~/Library/Application Support/raindrop-search
// Windows: %APPDATA%/raindrop-search

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "raindrop-search";

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific configuration directory.
#[cfg(target_os = "macos")]
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join(APP_DIR)
}

/// Returns the platform-specific configuration directory.
#[cfg(target_os = "windows")]
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join(APP_DIR)
}

/// Returns the platform-specific configuration directory.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join(APP_DIR),
        _ => home_dir().join(".config").join(APP_DIR),
    }
}
