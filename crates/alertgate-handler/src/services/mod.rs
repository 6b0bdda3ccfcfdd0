//! Collaborators a notification task delegates its side effects to.
//!
//! Tasks never talk to the application or the platform directly: events go
//! through an [`emitter::EventEmitter`], presentation through a
//! [`presenter::NotificationPresenter`], and completion is reported to a
//! [`crate::task::TaskDelegate`].

pub mod emitter;
pub mod presenter;

use std::sync::Arc;

use crate::task::TaskDelegate;

/// Shared set of collaborators handed to every task.
#[derive(Clone)]
pub(crate) struct TaskServices {
    /// Outbound channel to the application.
    pub emitter: Arc<dyn emitter::EventEmitter>,
    /// Platform notification presentation.
    pub presenter: Arc<dyn presenter::NotificationPresenter>,
    /// Owner informed when a task finishes.
    pub delegate: Arc<dyn TaskDelegate>,
}
