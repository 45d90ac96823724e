use std::fmt;

// === ApiError ===

/// Errors returned by the Raindrop.io REST gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The bearer token was rejected (HTTP 401).
    Unauthorized,
    /// The service is throttling this client (HTTP 429).
    RateLimited,
    /// The service is temporarily down (HTTP 500/502/503/504).
    ServerUnavailable(u16),
    /// Any other non-success HTTP status.
    RequestFailed(u16),
    /// The request was superseded by a newer one. Not a user-facing failure.
    Cancelled,
    /// A connection-level failure: DNS, refused connection, timeout.
    NetworkUnreachable(String),
    /// Any other transport failure reported by the HTTP client.
    Transport(String),
    /// The response body could not be decoded.
    Decode(String),
    /// The request URL could not be built.
    InvalidUrl(String),
}

impl ApiError {
    /// Maps a non-success HTTP status to its error kind.
    ///
    /// Returns `None` for 2xx statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(ApiError::Unauthorized),
            429 => Some(ApiError::RateLimited),
            500 | 502 | 503 | 504 => Some(ApiError::ServerUnavailable(status)),
            other => Some(ApiError::RequestFailed(other)),
        }
    }

    /// Classifies a transport failure message.
    pub fn from_transport_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_like_network_failure(&message) {
            ApiError::NetworkUnreachable(message)
        } else {
            ApiError::Transport(message)
        }
    }

    /// Whether this error is the expected outcome of request supersession.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::RateLimited => Some(429),
            ApiError::ServerUnavailable(s) | ApiError::RequestFailed(s) => Some(*s),
            _ => None,
        }
    }
}

fn looks_like_network_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["fetch", "network", "connect", "dns", "timed out"]
        .iter()
        .any(|needle| lower.contains(needle))
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Invalid test token"),
            ApiError::RateLimited => write!(f, "Rate limit exceeded"),
            ApiError::ServerUnavailable(status) => write!(f, "Server error ({})", status),
            ApiError::RequestFailed(status) => {
                write!(f, "Request failed with status {}", status)
            }
            ApiError::Cancelled => write!(f, "Request cancelled"),
            ApiError::NetworkUnreachable(msg) => write!(f, "Network error: {}", msg),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Response decode error: {}", msg),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid request URL: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        if err.is_connect() || err.is_timeout() {
            return ApiError::NetworkUnreachable(err.to_string());
        }
        ApiError::from_transport_message(err.to_string())
    }
}

// === FilterError ===

/// Errors raised while parsing filter selections coming from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The bookmark type is not one of the six known types (or `all`).
    UnknownType(String),
    /// The sort key is not one of the supported sort orders.
    UnknownSort(String),
    /// The filter dropdown name is not recognised.
    UnknownFilter(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownType(value) => write!(f, "Unknown bookmark type: {}", value),
            FilterError::UnknownSort(value) => write!(f, "Unknown sort order: {}", value),
            FilterError::UnknownFilter(value) => write!(f, "Unknown filter: {}", value),
        }
    }
}

impl std::error::Error for FilterError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// Shortcut for the given action was not found.
    NotFound(String),
    /// The shortcut keys conflict with an existing binding.
    Conflict(String),
    /// The provided key combination is invalid.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::NotFound(action) => {
                write!(f, "Shortcut not found for action: {}", action)
            }
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
        }
    }
}

impl std::error::Error for ShortcutError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
    /// No bearer token is configured in the settings file or environment.
    MissingToken,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
            SettingsError::MissingToken => write!(
                f,
                "No Raindrop.io token configured (set api.token or RAINDROP_TOKEN)"
            ),
        }
    }
}

impl std::error::Error for SettingsError {}
