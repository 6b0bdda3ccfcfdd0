use std::sync::Arc;

use alertgate_bridge::notification::{Notification, NotificationBehavior};
use alertgate_handler::{NotificationPresenter, PresentationResult};
use futures_util::future::BoxFuture;

/// Presenter standing in for the platform notification service: it writes
/// the presented notification to the log.
pub struct LogPresenter;

impl NotificationPresenter for LogPresenter {
    fn present(
        &self,
        notification: Arc<Notification>,
        behavior: NotificationBehavior,
    ) -> BoxFuture<'static, PresentationResult> {
        Box::pin(async move {
            let content = &notification.request.content;
            log::info!(
                "[{}] {} - {} (sound: {}, badge: {}, priority: {:?})",
                notification.identifier(),
                content.title.as_deref().unwrap_or("<untitled>"),
                content.body.as_deref().unwrap_or_default(),
                behavior.should_play_sound,
                behavior.should_set_badge,
                behavior.priority.unwrap_or_default(),
            );
            Ok(())
        })
    }
}
