//! Communication bridge between the notification handler and the embedding
//! application.
//!
//! This crate defines the types exchanged when a notification is about to be
//! shown:
//! - The handler pushes events (see [`event::NotificationEvent`]) asking the
//!   application how a notification should be handled, or telling it that it
//!   did not answer in time.
//! - The application answers with a [`notification::NotificationBehavior`].
//!
//! Events travel over a bounded [`tokio::sync::mpsc`] channel wrapped in
//! [`BridgeChannels`], providing back-pressure and async compatibility.

pub mod config;
pub mod event;
pub mod notification;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::event::NotificationEvent;

/// Paired ends of the `tokio::mpsc` channel carrying events from the handler
/// to the application.
pub struct BridgeChannels {
    /// Receiver used by the application to get events from the handler.
    pub app_rx: Receiver<NotificationEvent>,
    /// Sender used by the handler to push events to the application.
    pub handler_tx: Sender<NotificationEvent>,
}

impl BridgeChannels {
    /// Creates a new channel pair with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (handler_tx, app_rx) = mpsc::channel(buffer);
        Self { app_rx, handler_tx }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
