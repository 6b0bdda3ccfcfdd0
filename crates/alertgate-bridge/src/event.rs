use serde_json::{Value, json};

/// Name of the event asking the application how to handle a notification.
pub const HANDLE_NOTIFICATION_EVENT_NAME: &str = "onHandleNotification";

/// Name of the event emitted when the application did not respond in time.
pub const HANDLE_NOTIFICATION_TIMEOUT_EVENT_NAME: &str = "onHandleNotificationTimeout";

/// Events pushed from the handler to the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// The application is asked to respond with a behavior for the
    /// notification.
    HandleNotification {
        /// Identifier the response must refer to.
        id: String,
        /// Serialized notification.
        notification: Value,
    },
    /// No behavior was received in time; the notification was not presented.
    HandleNotificationTimeout { id: String, notification: Value },
}

impl NotificationEvent {
    /// Name of the event on the application's event channel.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HandleNotification { .. } => HANDLE_NOTIFICATION_EVENT_NAME,
            Self::HandleNotificationTimeout { .. } => HANDLE_NOTIFICATION_TIMEOUT_EVENT_NAME,
        }
    }

    /// Identifier of the notification the event refers to.
    pub fn id(&self) -> &str {
        match self {
            Self::HandleNotification { id, .. } | Self::HandleNotificationTimeout { id, .. } => id,
        }
    }

    /// Key-value body of the event.
    pub fn body(&self) -> Value {
        match self {
            Self::HandleNotification { id, notification }
            | Self::HandleNotificationTimeout { id, notification } => json!({
                "id": id,
                "notification": notification,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_carry_name_and_body() {
        let request = NotificationEvent::HandleNotification {
            id: "n1".to_string(),
            notification: json!({ "date": 1 }),
        };
        assert_eq!(request.name(), "onHandleNotification");
        assert_eq!(request.body(), json!({ "id": "n1", "notification": { "date": 1 } }));

        let timeout = NotificationEvent::HandleNotificationTimeout {
            id: "n1".to_string(),
            notification: Value::Null,
        };
        assert_eq!(timeout.name(), "onHandleNotificationTimeout");
        assert_eq!(timeout.id(), "n1");
        assert_eq!(timeout.body()["notification"], Value::Null);
    }
}
