//! Handler runtime entry point and public API surface.
//!
//! When a notification is about to be shown, the handler asks the embedding
//! application how to handle it, waits a bounded time for a reply and applies
//! the reply to the platform presentation layer. Each notification is driven
//! by its own task; all tasks live on one serial command loop started with
//! [`spawn`] or [`run`] and are reached through a [`HandlerHandle`].

pub mod config;

mod completion;
mod context;
mod error;
mod handler;
mod runtime;
mod services;
mod task;

pub use crate::error::HandlerError;
pub use crate::runtime::{HandlerHandle, run, spawn};
pub use crate::services::emitter::EventEmitter;
pub use crate::services::presenter::{NotificationPresenter, PresentationError, PresentationResult};
pub use crate::task::RESPONSE_TIMEOUT;
