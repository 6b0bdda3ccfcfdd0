use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Displayable content of a notification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    /// Title shown in the notification header.
    pub title: Option<String>,
    /// Secondary line shown below the title.
    pub subtitle: Option<String>,
    /// Main text of the notification.
    pub body: Option<String>,
    /// Arbitrary application data attached to the notification.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Badge count the application icon should display, if any.
    pub badge: Option<u32>,
    /// Name of the sound to play, if any.
    pub sound: Option<String>,
}

/// The request a notification was created from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Unique identifier of the notification.
    pub identifier: String,
    pub content: NotificationContent,
}

/// A notification about to be presented to the user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub request: NotificationRequest,
    /// Delivery time in milliseconds since the Unix epoch.
    pub date: i64,
}

impl Notification {
    /// Creates a notification with the given identifier and content.
    pub fn new(identifier: impl Into<String>, content: NotificationContent, date: i64) -> Self {
        Self {
            request: NotificationRequest {
                identifier: identifier.into(),
                content,
            },
            date,
        }
    }

    /// Identifier of the underlying request.
    pub fn identifier(&self) -> &str {
        &self.request.identifier
    }

    /// Serializes the notification into the form sent along with events.
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Priority requested for a presented notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Min,
    Low,
    #[default]
    Default,
    High,
    Max,
}

/// How the application wants a notification to be presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBehavior {
    /// Whether the notification should be shown to the user at all. When
    /// `false` the notification is suppressed and nothing is presented.
    pub should_show_alert: bool,
    pub should_play_sound: bool,
    pub should_set_badge: bool,
    /// Overrides the priority of the presented notification.
    #[serde(default)]
    pub priority: Option<NotificationPriority>,
}

impl NotificationBehavior {
    /// Behavior that suppresses the notification.
    pub fn suppress() -> Self {
        Self::default()
    }

    /// Behavior that shows the notification as an alert, without sound or
    /// badge.
    pub fn alert() -> Self {
        Self {
            should_show_alert: true,
            ..Self::default()
        }
    }
}
