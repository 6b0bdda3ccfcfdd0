use crate::services::presenter::PresentationError;

/// Errors reported to the caller of
/// [`HandlerHandle::handle_notification`](crate::HandlerHandle::handle_notification).
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The platform failed to present the notification. Carries the cause
    /// reported by the presentation layer.
    #[error("Notification presentation failed.")]
    NotificationPresentationFailed(#[source] PresentationError),
    /// No task is waiting for a response for this notification, either
    /// because it was never received or because it was already handled or
    /// timed out.
    #[error("Failed to handle notification {identifier}, it has already been handled.")]
    NotificationAlreadyHandled { identifier: String },
    /// The task was stopped before it resolved the response.
    #[error("notification task was stopped before the response was applied")]
    Dropped,
    /// The handler is no longer running.
    #[error("notification handler is not running")]
    Closed,
}

impl HandlerError {
    /// Machine-readable code of the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotificationPresentationFailed(_) => "ERR_NOTIFICATION_PRESENTATION_FAILED",
            Self::NotificationAlreadyHandled { .. } => "ERR_NOTIFICATION_HANDLED",
            Self::Dropped => "ERR_NOTIFICATION_DROPPED",
            Self::Closed => "ERR_NOTIFICATION_HANDLER_CLOSED",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn presentation_failure_keeps_cause() {
        let error = HandlerError::NotificationPresentationFailed(PresentationError::Platform(
            "channel missing".to_string(),
        ));
        assert_eq!(error.code(), "ERR_NOTIFICATION_PRESENTATION_FAILED");
        assert_eq!(error.to_string(), "Notification presentation failed.");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("platform failed to present notification: channel missing")
        );
    }

    #[test]
    fn already_handled_names_identifier() {
        let error = HandlerError::NotificationAlreadyHandled {
            identifier: "n1".to_string(),
        };
        assert_eq!(error.code(), "ERR_NOTIFICATION_HANDLED");
        assert_eq!(
            error.to_string(),
            "Failed to handle notification n1, it has already been handled."
        );
    }
}
