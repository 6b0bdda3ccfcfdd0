//! A task responsible for the response to a single notification.
//!
//! The task asks the application how the notification should be handled,
//! waits up to [`RESPONSE_TIMEOUT`] for an answer, and applies the answer to
//! the presentation layer. It reaches [`TaskState::Finished`] exactly once:
//! after a suppressing response, after presentation succeeded or failed,
//! after the timeout elapsed, or when stopped. Finishing always cancels the
//! pending timeout and informs the [`TaskDelegate`].

use std::sync::Arc;
use std::time::Duration;

use alertgate_bridge::event::NotificationEvent;
use alertgate_bridge::notification::{Notification, NotificationBehavior};
use serde_json::Value;

use crate::completion::CompletionHandle;
use crate::context::{Command, ExecutionContext, TimeoutHandle};
use crate::error::HandlerError;
use crate::services::TaskServices;
use crate::services::presenter::PresentationResult;

/// Time the application has to respond after being asked for a behavior.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Owner of a task, informed once the task has finished.
pub(crate) trait TaskDelegate: Send + Sync {
    /// Called exactly once per task. The task is inert afterwards.
    fn on_task_finished(&self, task: &NotificationHandlerTask);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskState {
    Created,
    /// Waiting for the application's response, timeout armed.
    Started,
    /// Response accepted, waiting for the presentation outcome.
    Presenting,
    Finished,
}

pub(crate) struct NotificationHandlerTask {
    generation: u64,
    notification: Arc<Notification>,
    behavior: Option<NotificationBehavior>,
    state: TaskState,
    timeout: Option<TimeoutHandle>,
    pending: Option<CompletionHandle>,
    context: ExecutionContext,
    services: TaskServices,
}

impl NotificationHandlerTask {
    pub fn new(
        generation: u64,
        notification: Notification,
        context: ExecutionContext,
        services: TaskServices,
    ) -> Self {
        Self {
            generation,
            notification: Arc::new(notification),
            behavior: None,
            state: TaskState::Created,
            timeout: None,
            pending: None,
            context,
            services,
        }
    }

    /// Identifier of the handled notification.
    pub fn identifier(&self) -> &str {
        self.notification.identifier()
    }

    /// Sequence number telling apart tasks created for the same identifier.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Behavior supplied by the application, once it responded.
    pub fn behavior(&self) -> Option<&NotificationBehavior> {
        self.behavior.as_ref()
    }

    /// Asks the application for a behavior and arms the response timeout.
    pub fn start(&mut self) {
        if self.state != TaskState::Created {
            log::debug!("Task {} already started", self.identifier());
            return;
        }

        let event = NotificationEvent::HandleNotification {
            id: self.identifier().to_string(),
            notification: self.payload(),
        };
        self.services.emitter.emit(event);

        self.timeout = Some(self.context.schedule(
            RESPONSE_TIMEOUT,
            Command::TimeoutElapsed {
                identifier: self.identifier().to_string(),
                generation: self.generation,
            },
        ));
        self.state = TaskState::Started;
    }

    /// Finishes the task without applying any behavior or emitting events.
    /// A completion handle awaiting the presentation outcome is dropped
    /// unresolved.
    pub fn stop(&mut self) {
        if self.state == TaskState::Finished {
            return;
        }
        log::debug!("Stopping task {}", self.identifier());
        self.pending = None;
        self.finish();
    }

    /// Applies the behavior requested by the application and reports the
    /// outcome to `completion`.
    ///
    /// Only the first response is applied. Later ones are rejected with
    /// [`HandlerError::NotificationAlreadyHandled`].
    pub fn handle_response(&mut self, behavior: NotificationBehavior, completion: CompletionHandle) {
        if matches!(self.state, TaskState::Presenting | TaskState::Finished) {
            log::debug!("Ignoring late response for task {}", self.identifier());
            completion.fail(HandlerError::NotificationAlreadyHandled {
                identifier: self.identifier().to_string(),
            });
            return;
        }

        self.behavior = Some(behavior.clone());
        if !behavior.should_show_alert {
            log::debug!("Suppressing notification {}", self.identifier());
            completion.succeed();
            self.finish();
            return;
        }

        // the response won the race, the timeout must not fire anymore
        self.cancel_timeout();
        self.pending = Some(completion);
        self.state = TaskState::Presenting;

        let presentation = self
            .services
            .presenter
            .present(self.notification.clone(), behavior);
        let context = self.context.clone();
        let identifier = self.identifier().to_string();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = presentation.await;
            context.post(Command::PresentationFinished {
                identifier,
                generation,
                result,
            });
        });
    }

    /// Reports the outcome of the presentation started by
    /// [`Self::handle_response`] and finishes the task.
    pub fn on_presentation_finished(&mut self, result: PresentationResult) {
        if self.state != TaskState::Presenting {
            return;
        }

        if let Some(completion) = self.pending.take() {
            match result {
                Ok(()) => completion.succeed(),
                Err(cause) => {
                    log::warn!(
                        "Failed to present notification {}: {cause}",
                        self.identifier()
                    );
                    completion.fail(HandlerError::NotificationPresentationFailed(cause));
                }
            }
        }
        self.finish();
    }

    /// Tells the application it did not respond in time and finishes the
    /// task without presenting the notification.
    pub fn handle_timeout(&mut self) {
        if self.state != TaskState::Started {
            return;
        }

        log::info!("Notification {} was not handled in time", self.identifier());
        let event = NotificationEvent::HandleNotificationTimeout {
            id: self.identifier().to_string(),
            notification: self.payload(),
        };
        self.services.emitter.emit(event);
        self.finish();
    }

    fn finish(&mut self) {
        if self.state == TaskState::Finished {
            return;
        }
        self.state = TaskState::Finished;
        self.cancel_timeout();

        let delegate = self.services.delegate.clone();
        delegate.on_task_finished(self);
    }

    fn cancel_timeout(&mut self) {
        if let Some(timeout) = self.timeout.take() {
            timeout.cancel();
        }
    }

    fn payload(&self) -> Value {
        self.notification.to_payload().unwrap_or_else(|error| {
            log::error!(
                "Failed to serialize notification {}: {error}",
                self.identifier()
            );
            Value::Null
        })
    }
}
