use std::sync::Arc;

use alertgate_bridge::notification::{Notification, NotificationBehavior};
use futures_util::future::BoxFuture;

/// Failure reported by the platform presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentationError {
    /// The user disabled notifications for the application.
    #[error("notifications are disabled for this application")]
    NotificationsDisabled,
    /// The notification refers to a channel the platform does not know.
    #[error("notification channel {0} does not exist")]
    UnknownChannel(String),
    #[error("platform failed to present notification: {0}")]
    Platform(String),
}

/// Outcome of a single presentation attempt.
pub type PresentationResult = Result<(), PresentationError>;

/// Presents notifications through the platform notification service.
///
/// Presentation is asynchronous and runs to completion once started; the
/// returned future is not cancelled when the requesting task stops.
pub trait NotificationPresenter: Send + Sync {
    fn present(
        &self,
        notification: Arc<Notification>,
        behavior: NotificationBehavior,
    ) -> BoxFuture<'static, PresentationResult>;
}
