use tokio::sync::oneshot;

use crate::error::HandlerError;

/// Receiving side of a [`CompletionHandle`].
pub type CompletionReceiver = oneshot::Receiver<Result<(), HandlerError>>;

/// One-shot handle used to report the outcome of applying a behavior back to
/// whoever supplied it. Both terminal operations consume the handle, so it can
/// be resolved at most once. Dropping it unresolved closes the receiver.
#[derive(Debug)]
pub struct CompletionHandle {
    tx: oneshot::Sender<Result<(), HandlerError>>,
}

impl CompletionHandle {
    pub fn new() -> (Self, CompletionReceiver) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Resolves the handle successfully.
    pub fn succeed(self) {
        if self.tx.send(Ok(())).is_err() {
            log::debug!("Completion receiver went away before success was reported");
        }
    }

    /// Resolves the handle with `error`.
    pub fn fail(self, error: HandlerError) {
        if let Err(Err(error)) = self.tx.send(Err(error)) {
            log::debug!("Completion receiver went away before failure was reported: {error}");
        }
    }
}
