use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{FutureExt, ready};
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::ModalError;
use super::resolver::Outcome;

/// Future returned by [`AsyncModal::show_modal`](super::AsyncModal::show_modal).
///
/// Resolves to the value the dialog passed to `resolve`. It stays pending for
/// as long as the dialog stays open; there is no timeout.
///
/// The outcome is handed out once, through either `.await` or
/// [`try_result`](Self::try_result). Polling again afterwards yields
/// [`ModalError::Taken`].
#[must_use = "the modal result is only observable through this future"]
pub struct ModalFuture<R> {
    id: u64,
    receiver: Option<oneshot::Receiver<Outcome<R>>>,
}

impl<R> ModalFuture<R> {
    pub(crate) const fn new(id: u64, receiver: oneshot::Receiver<Outcome<R>>) -> Self {
        Self {
            id,
            receiver: Some(receiver),
        }
    }

    /// Id of the `show_modal` call, matching [`Resolver::id`](super::Resolver::id).
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Check for a result without waiting.
    ///
    /// Returns `None` while the modal is pending and after the outcome has
    /// already been returned once.
    pub fn try_result(&mut self) -> Option<Result<R, ModalError>> {
        let outcome = match self.receiver.as_mut()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(ModalError::Dropped),
        };
        self.receiver = None;
        Some(outcome)
    }
}

impl<R> Future for ModalFuture<R> {
    type Output = Result<R, ModalError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(Err(ModalError::Taken));
        };
        let outcome = ready!(receiver.poll_unpin(cx)).unwrap_or(Err(ModalError::Dropped));
        self.receiver = None;
        Poll::Ready(outcome)
    }
}

impl<R> std::fmt::Debug for ModalFuture<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalFuture").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_result_pending_then_ready() {
        let (sender, receiver) = oneshot::channel();
        let mut future = ModalFuture::<u8>::new(0, receiver);

        assert_eq!(future.try_result(), None);
        sender.send(Ok(42)).unwrap();
        assert_eq!(future.try_result(), Some(Ok(42)));
    }

    #[tokio::test]
    async fn test_dropped_sender_yields_error() {
        let (sender, receiver) = oneshot::channel::<Outcome<u8>>();
        drop(sender);

        assert_eq!(ModalFuture::new(0, receiver).await, Err(ModalError::Dropped));
    }

    #[test]
    fn test_try_result_only_once() {
        let (sender, receiver) = oneshot::channel();
        let mut future = ModalFuture::<u8>::new(0, receiver);

        sender.send(Ok(7)).unwrap();
        assert_eq!(future.try_result(), Some(Ok(7)));
        assert_eq!(future.try_result(), None);
        assert_eq!(future.try_result(), None);
    }

    #[tokio::test]
    async fn test_await_after_try_result_does_not_panic() {
        let (sender, receiver) = oneshot::channel();
        let mut future = ModalFuture::<u8>::new(0, receiver);

        sender.send(Ok(7)).unwrap();
        assert_eq!(future.try_result(), Some(Ok(7)));
        assert_eq!(future.await, Err(ModalError::Taken));
    }

    #[tokio::test]
    async fn test_poll_after_completion() {
        let (sender, receiver) = oneshot::channel();
        let mut future = ModalFuture::<u8>::new(0, receiver);

        sender.send(Ok(7)).unwrap();
        assert_eq!((&mut future).await, Ok(7));
        assert_eq!((&mut future).await, Err(ModalError::Taken));
        assert_eq!(future.try_result(), None);
    }
}
