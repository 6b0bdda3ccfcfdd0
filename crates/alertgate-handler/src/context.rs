//! The serial execution context every task runs on.
//!
//! All task state is owned by a single loop consuming [`Command`]s. Anything
//! that happens elsewhere (a response arriving from the application, a timer
//! elapsing, a presentation finishing) is posted to that loop as a command
//! instead of touching task state directly.

use std::time::Duration;

use alertgate_bridge::notification::{Notification, NotificationBehavior};
use tokio::{sync::mpsc, task::AbortHandle};

use crate::completion::CompletionHandle;
use crate::services::presenter::PresentationResult;
use crate::task::{NotificationHandlerTask, TaskDelegate};

/// Work items processed by the handler loop.
#[derive(Debug)]
pub(crate) enum Command {
    /// A notification is about to be shown and needs a behavior.
    NotificationReceived(Notification),
    /// The application responded with a behavior.
    HandleResponse {
        identifier: String,
        behavior: NotificationBehavior,
        completion: CompletionHandle,
    },
    /// The response timeout of a task elapsed.
    TimeoutElapsed { identifier: String, generation: u64 },
    /// Presentation requested by a task finished.
    PresentationFinished {
        identifier: String,
        generation: u64,
        result: PresentationResult,
    },
    /// A task reached its terminal state and can be dropped.
    TaskFinished { identifier: String, generation: u64 },
    /// Stop all tasks and end the loop.
    Shutdown,
}

/// Cloneable handle for posting commands onto the handler loop.
#[derive(Debug, Clone)]
pub(crate) struct ExecutionContext {
    tx: mpsc::UnboundedSender<Command>,
}

impl ExecutionContext {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues `command` on the loop. Returns `false` if the loop is gone.
    pub fn post(&self, command: Command) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(mpsc::error::SendError(command)) => {
                log::debug!("Handler loop is gone, dropping {command:?}");
                false
            }
        }
    }

    /// Posts `command` once `delay` elapses, unless the returned handle is
    /// cancelled first.
    pub fn schedule(&self, delay: Duration, command: Command) -> TimeoutHandle {
        let context = self.clone();
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            context.post(command);
        });
        TimeoutHandle {
            abort: handle.abort_handle(),
        }
    }
}

impl TaskDelegate for ExecutionContext {
    fn on_task_finished(&self, task: &NotificationHandlerTask) {
        self.post(Command::TaskFinished {
            identifier: task.identifier().to_string(),
            generation: task.generation(),
        });
    }
}

/// Handle to a command scheduled with [`ExecutionContext::schedule`].
#[derive(Debug)]
pub(crate) struct TimeoutHandle {
    abort: AbortHandle,
}

impl TimeoutHandle {
    /// Prevents the scheduled command from being posted. Cancelling a handle
    /// that already fired or was already cancelled does nothing.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}
