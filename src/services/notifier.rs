//! Delivery of toasts to the host launcher.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::types::errors::ApiError;
use crate::types::notification::{Notification, ToastStyle};

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Raises the toast for a failed request, if it has one.
///
/// Returns whether a notification was emitted. Cancellation never is.
pub fn report_failure(notifier: &dyn Notifier, err: &ApiError) -> bool {
    match Notification::for_api_error(err) {
        Some(notification) => {
            notifier.notify(notification);
            true
        }
        None => false,
    }
}

/// Forwards notifications over a channel, e.g. to the RPC writer task.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            warn!("notification dropped: receiver closed");
        }
    }
}

/// Writes notifications to the log; used by the one-shot CLI.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.style {
            ToastStyle::Failure => warn!(title = %notification.title, "{}", notification.message),
            ToastStyle::Success => info!(title = %notification.title, "{}", notification.message),
        }
    }
}
