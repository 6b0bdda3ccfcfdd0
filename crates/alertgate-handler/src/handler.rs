//! Registry of in-flight notification tasks and the loop dispatching commands
//! to them.
//!
//! The registry is owned by the loop, so every task mutation happens on the
//! same serial context.

use std::collections::HashMap;
use std::ops::ControlFlow;

use alertgate_bridge::notification::{Notification, NotificationBehavior};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::completion::CompletionHandle;
use crate::context::{Command, ExecutionContext};
use crate::error::HandlerError;
use crate::services::TaskServices;
use crate::task::NotificationHandlerTask;

pub(crate) struct NotificationsHandler {
    /// Tasks waiting for a response or a presentation outcome, keyed by
    /// notification identifier.
    tasks: HashMap<String, NotificationHandlerTask>,
    next_generation: u64,
    context: ExecutionContext,
    services: TaskServices,
}

impl NotificationsHandler {
    pub fn new(context: ExecutionContext, services: TaskServices) -> Self {
        Self {
            tasks: HashMap::new(),
            next_generation: 0,
            context,
            services,
        }
    }

    /// Read and dispatch commands until shutdown is requested or every
    /// sender is gone.
    pub async fn consume_commands(mut self, mut rx: UnboundedReceiver<Command>) {
        while let Some(command) = rx.recv().await {
            log::trace!("Got a handler command: {command:?}");
            if self.dispatch_command(command).is_break() {
                break;
            }
        }
        log::info!("Notification handler stopped");
    }

    fn dispatch_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::NotificationReceived(notification) => {
                self.on_notification_received(notification);
            }
            Command::HandleResponse {
                identifier,
                behavior,
                completion,
            } => {
                self.handle_notification(identifier, behavior, completion);
            }
            Command::TimeoutElapsed {
                identifier,
                generation,
            } => {
                if let Some(task) = self.task_mut(&identifier, generation) {
                    task.handle_timeout();
                }
            }
            Command::PresentationFinished {
                identifier,
                generation,
                result,
            } => {
                if let Some(task) = self.task_mut(&identifier, generation) {
                    task.on_presentation_finished(result);
                }
            }
            Command::TaskFinished {
                identifier,
                generation,
            } => {
                self.on_task_finished(&identifier, generation);
            }
            Command::Shutdown => {
                self.stop_all();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Creates and starts a task for `notification`. A task still registered
    /// under the same identifier is stopped and replaced.
    fn on_notification_received(&mut self, notification: Notification) {
        self.next_generation += 1;
        let identifier = notification.identifier().to_string();
        let task = NotificationHandlerTask::new(
            self.next_generation,
            notification,
            self.context.clone(),
            self.services.clone(),
        );

        if let Some(mut previous) = self.tasks.insert(identifier.clone(), task) {
            log::warn!("Notification {identifier} received again, replacing its pending task");
            previous.stop();
        }
        if let Some(task) = self.tasks.get_mut(&identifier) {
            task.start();
        }
    }

    fn handle_notification(
        &mut self,
        identifier: String,
        behavior: NotificationBehavior,
        completion: CompletionHandle,
    ) {
        match self.tasks.get_mut(&identifier) {
            Some(task) => task.handle_response(behavior, completion),
            None => {
                log::debug!("No pending task for notification {identifier}");
                completion.fail(HandlerError::NotificationAlreadyHandled { identifier });
            }
        }
    }

    fn on_task_finished(&mut self, identifier: &str, generation: u64) {
        if self.task_mut(identifier, generation).is_none() {
            return;
        }
        if let Some(task) = self.tasks.remove(identifier) {
            log::debug!(
                "Task {identifier} finished in state {:?} with behavior {:?}",
                task.state(),
                task.behavior()
            );
        }
    }

    fn stop_all(&mut self) {
        log::info!("Stopping {} pending notification task(-s)", self.tasks.len());
        for task in self.tasks.values_mut() {
            task.stop();
        }
        self.tasks.clear();
    }

    /// Returns the registered task for `identifier` if it is the one created
    /// with `generation`. Commands from replaced tasks resolve to `None`.
    fn task_mut(&mut self, identifier: &str, generation: u64) -> Option<&mut NotificationHandlerTask> {
        self.tasks
            .get_mut(identifier)
            .filter(|task| task.generation() == generation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use alertgate_bridge::event::NotificationEvent;
    use alertgate_bridge::notification::NotificationContent;
    use futures_util::future::BoxFuture;

    use super::*;
    use crate::services::emitter::EventEmitter;
    use crate::services::presenter::{NotificationPresenter, PresentationResult};
    use crate::task::{RESPONSE_TIMEOUT, TaskState};

    #[derive(Default)]
    struct RecordingEmitter {
        events: Mutex<Vec<NotificationEvent>>,
    }

    impl EventEmitter for RecordingEmitter {
        fn emit(&self, event: NotificationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct ImmediatePresenter;

    impl NotificationPresenter for ImmediatePresenter {
        fn present(
            &self,
            _notification: Arc<Notification>,
            _behavior: NotificationBehavior,
        ) -> BoxFuture<'static, PresentationResult> {
            Box::pin(async { Ok(()) })
        }
    }

    fn handler() -> (
        NotificationsHandler,
        UnboundedReceiver<Command>,
        Arc<RecordingEmitter>,
    ) {
        let (context, rx) = ExecutionContext::new();
        let emitter = Arc::new(RecordingEmitter::default());
        let services = TaskServices {
            emitter: emitter.clone(),
            presenter: Arc::new(ImmediatePresenter),
            delegate: Arc::new(context.clone()),
        };
        (NotificationsHandler::new(context, services), rx, emitter)
    }

    fn notification(identifier: &str) -> Notification {
        Notification::new(identifier, NotificationContent::default(), 0)
    }

    /// Dispatches every queued command, the way the loop would.
    fn drain(handler: &mut NotificationsHandler, rx: &mut UnboundedReceiver<Command>) {
        while let Ok(command) = rx.try_recv() {
            let _ = handler.dispatch_command(command);
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn finished_task_is_removed_from_registry() {
        let (mut handler, mut rx, _emitter) = handler();
        let _ = handler.dispatch_command(Command::NotificationReceived(notification("n1")));
        assert_eq!(handler.tasks.len(), 1);

        let (completion, mut completion_rx) = CompletionHandle::new();
        let _ = handler.dispatch_command(Command::HandleResponse {
            identifier: "n1".to_string(),
            behavior: NotificationBehavior::suppress(),
            completion,
        });
        assert!(matches!(completion_rx.try_recv(), Ok(Ok(()))));

        drain(&mut handler, &mut rx);
        assert!(handler.tasks.is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn response_without_task_is_rejected() {
        let (mut handler, _rx, _emitter) = handler();

        let (completion, mut completion_rx) = CompletionHandle::new();
        let _ = handler.dispatch_command(Command::HandleResponse {
            identifier: "missing".to_string(),
            behavior: NotificationBehavior::alert(),
            completion,
        });

        match completion_rx.try_recv() {
            Ok(Err(HandlerError::NotificationAlreadyHandled { identifier })) => {
                assert_eq!(identifier, "missing");
            }
            other => panic!("unexpected completion {other:?}"),
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn replaced_task_does_not_evict_its_successor() {
        let (mut handler, mut rx, emitter) = handler();
        let _ = handler.dispatch_command(Command::NotificationReceived(notification("n1")));
        let _ = handler.dispatch_command(Command::NotificationReceived(notification("n1")));

        // the stopped predecessor posted its finish notice
        drain(&mut handler, &mut rx);
        let task = handler.tasks.get("n1").expect("successor must stay registered");
        assert_eq!(task.generation(), 2);
        assert_eq!(task.state(), TaskState::Started);
        assert_eq!(emitter.events.lock().unwrap().len(), 2);

        // only the successor's timeout fires
        tokio::time::sleep(RESPONSE_TIMEOUT * 2).await;
        drain(&mut handler, &mut rx);
        assert!(handler.tasks.is_empty());
        let events = emitter.events.lock().unwrap();
        let timeouts = events
            .iter()
            .filter(|event| matches!(event, NotificationEvent::HandleNotificationTimeout { .. }))
            .count();
        assert_eq!(timeouts, 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn shutdown_stops_every_task() {
        let (mut handler, mut rx, emitter) = handler();
        let _ = handler.dispatch_command(Command::NotificationReceived(notification("n1")));
        let _ = handler.dispatch_command(Command::NotificationReceived(notification("n2")));

        assert!(handler.dispatch_command(Command::Shutdown).is_break());
        assert!(handler.tasks.is_empty());

        tokio::time::sleep(RESPONSE_TIMEOUT * 2).await;
        while let Ok(command) = rx.try_recv() {
            assert!(matches!(command, Command::TaskFinished { .. }));
        }
        assert_eq!(emitter.events.lock().unwrap().len(), 2);
    }
}
