use alertgate_bridge::event::NotificationEvent;
use tokio::sync::mpsc::{Sender, error::TrySendError};

/// Publishes events to the embedding application.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: NotificationEvent);
}

/// Pushes events onto the bridge channel. Emission never waits: if the
/// application is not draining the channel, the event is dropped and logged.
impl EventEmitter for Sender<NotificationEvent> {
    fn emit(&self, event: NotificationEvent) {
        log::debug!("Emitting {} for notification {}", event.name(), event.id());
        match self.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                log::warn!(
                    "Event channel is full, dropping {} for notification {}",
                    event.name(),
                    event.id()
                );
            }
            Err(TrySendError::Closed(event)) => {
                log::warn!(
                    "Event channel is closed, dropping {} for notification {}",
                    event.name(),
                    event.id()
                );
            }
        }
    }
}
