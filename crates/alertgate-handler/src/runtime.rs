//! Handler runtime setup and the public handle used to talk to it.
//!
//! This module wires the collaborators into a [`NotificationsHandler`] and
//! starts the command loop, either on the current tokio runtime or on a
//! dedicated thread.

use std::sync::Arc;
use std::thread;

use alertgate_bridge::notification::{Notification, NotificationBehavior};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::completion::CompletionHandle;
use crate::context::{Command, ExecutionContext};
use crate::error::HandlerError;
use crate::handler::NotificationsHandler;
use crate::services::TaskServices;
use crate::services::emitter::EventEmitter;
use crate::services::presenter::NotificationPresenter;

/// Cloneable entry point into a running handler. Every call is posted onto
/// the handler loop, regardless of the thread or runtime it is made from.
#[derive(Debug, Clone)]
pub struct HandlerHandle {
    context: ExecutionContext,
}

impl HandlerHandle {
    /// Informs the handler that `notification` is about to be shown. The
    /// application is asked for a behavior through the event channel.
    pub fn notification_received(&self, notification: Notification) -> Result<(), HandlerError> {
        if self
            .context
            .post(Command::NotificationReceived(notification))
        {
            Ok(())
        } else {
            Err(HandlerError::Closed)
        }
    }

    /// Applies the behavior the application chose for the notification
    /// `identifier` and waits until it has been applied.
    pub async fn handle_notification(
        &self,
        identifier: impl Into<String>,
        behavior: NotificationBehavior,
    ) -> Result<(), HandlerError> {
        let (completion, rx) = CompletionHandle::new();
        let posted = self.context.post(Command::HandleResponse {
            identifier: identifier.into(),
            behavior,
            completion,
        });
        if !posted {
            return Err(HandlerError::Closed);
        }

        // a closed receiver means the task was stopped before resolving
        rx.await.unwrap_or(Err(HandlerError::Dropped))
    }

    /// Stops every pending task and ends the handler loop.
    pub fn shutdown(&self) {
        log::info!("Shutting down notification handler");
        self.context.post(Command::Shutdown);
    }
}

fn setup_handler(
    emitter: Arc<dyn EventEmitter>,
    presenter: Arc<dyn NotificationPresenter>,
) -> (HandlerHandle, NotificationsHandler, UnboundedReceiver<Command>) {
    let (context, rx) = ExecutionContext::new();
    let services = TaskServices {
        emitter,
        presenter,
        delegate: Arc::new(context.clone()),
    };
    let handler = NotificationsHandler::new(context.clone(), services);
    (HandlerHandle { context }, handler, rx)
}

/// Start the handler loop on the current tokio runtime.
pub fn spawn(
    emitter: Arc<dyn EventEmitter>,
    presenter: Arc<dyn NotificationPresenter>,
) -> HandlerHandle {
    let (handle, handler, rx) = setup_handler(emitter, presenter);
    tokio::spawn(handler.consume_commands(rx));
    handle
}

/// Spawn a dedicated thread with its own tokio runtime and run the handler
/// loop on it.
pub fn run(
    emitter: Arc<dyn EventEmitter>,
    presenter: Arc<dyn NotificationPresenter>,
) -> std::io::Result<HandlerHandle> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("alertgate-handler")
        .build()?;
    let (handle, handler, rx) = setup_handler(emitter, presenter);
    thread::Builder::new()
        .name("alertgate-handler".to_string())
        .spawn(move || runtime.block_on(handler.consume_commands(rx)))?;
    Ok(handle)
}
