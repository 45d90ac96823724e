use serde::{Deserialize, Serialize};

use super::errors::ApiError;

/// Visual style of a host toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStyle {
    Failure,
    Success,
}

/// A message for the host launcher's toast primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub style: ToastStyle,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn failure(title: &str, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// The toast a failed request should raise, if the failure is user-facing.
    ///
    /// Cancellation, undecodable bodies and unclassified transport errors are not shown.
    pub fn for_api_error(err: &ApiError) -> Option<Self> {
        match err {
            ApiError::Unauthorized => Some(Self::failure(
                "Authentication Failed",
                "Invalid test token. Please check your token in extension preferences.",
            )),
            ApiError::RateLimited => Some(Self::failure(
                "Rate Limit Exceeded",
                "Please wait a moment and try again.",
            )),
            ApiError::ServerUnavailable(_) => Some(Self::failure(
                "Server Error",
                "Raindrop.io is temporarily unavailable. Please try again later.",
            )),
            ApiError::RequestFailed(status) => Some(Self::failure(
                "Request Failed",
                format!("An error occurred ({})", status),
            )),
            ApiError::NetworkUnreachable(_) => Some(Self::failure(
                "Connection Error",
                "Unable to connect to Raindrop.io. Check your internet connection.",
            )),
            ApiError::Cancelled
            | ApiError::Transport(_)
            | ApiError::Decode(_)
            | ApiError::InvalidUrl(_) => None,
        }
    }
}
