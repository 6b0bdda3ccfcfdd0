//! Application side of the bridge: answers handler events the way an
//! embedding application would.

use alertgate_bridge::event::NotificationEvent;
use alertgate_bridge::notification::NotificationBehavior;
use alertgate_handler::HandlerHandle;
use serde_json::Value;
use tokio::sync::mpsc::Receiver;

/// Picks the behavior stored under `data.behavior` of the serialized
/// notification. Notifications without one are left unanswered.
fn choose_behavior(notification: &Value) -> Option<NotificationBehavior> {
    let behavior = notification
        .pointer("/request/content/data/behavior")?
        .clone();
    match serde_json::from_value(behavior) {
        Ok(behavior) => Some(behavior),
        Err(e) => {
            log::error!("Notification carries an invalid behavior: {e}");
            None
        }
    }
}

/// Read events from the handler until the channel closes, answering each
/// request on its own task.
pub async fn respond_to_events(mut rx: Receiver<NotificationEvent>, handler: HandlerHandle) {
    while let Some(event) = rx.recv().await {
        log::debug!("Got a handler event {}: {}", event.name(), event.body());
        match event {
            NotificationEvent::HandleNotification { id, notification } => {
                let Some(behavior) = choose_behavior(&notification) else {
                    log::info!("Leaving notification {id} unanswered");
                    continue;
                };

                let handler = handler.clone();
                tokio::spawn(async move {
                    match handler.handle_notification(id.clone(), behavior).await {
                        Ok(()) => log::info!("Notification {id} handled"),
                        Err(e) => log::error!("Notification {id} failed ({}): {e}", e.code()),
                    }
                });
            }
            NotificationEvent::HandleNotificationTimeout { id, .. } => {
                log::warn!("Notification {id} was dropped, no behavior was chosen in time");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn behavior_is_read_from_notification_data() {
        let notification = json!({
            "request": {
                "identifier": "n1",
                "content": { "data": { "behavior": {
                    "shouldShowAlert": true,
                    "shouldPlaySound": false,
                    "shouldSetBadge": false
                } } }
            },
            "date": 0
        });
        assert_eq!(
            choose_behavior(&notification),
            Some(NotificationBehavior::alert())
        );
    }

    #[test]
    fn missing_or_invalid_behavior_is_left_unanswered() {
        let missing = json!({ "request": { "identifier": "n1", "content": { "data": {} } } });
        assert_eq!(choose_behavior(&missing), None);

        let invalid = json!({
            "request": { "identifier": "n1", "content": { "data": { "behavior": "loud" } } }
        });
        assert_eq!(choose_behavior(&invalid), None);
    }
}
