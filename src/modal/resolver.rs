use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;
use tracing::debug;

use super::ModalError;

pub(crate) type Outcome<R> = Result<R, ModalError>;

/// Single-use capability that settles one modal.
///
/// A `Resolver` is handed to the dialog inside
/// [`AsyncModalProps`](super::AsyncModalProps). The first call to
/// [`resolve`](Self::resolve) closes the modal and fulfills the future
/// returned by `show_modal`. Every later call, on this resolver or on any of
/// its clones, is a no-op.
pub struct Resolver<R> {
    settlement: Arc<Settlement<R>>,
}

struct Settlement<R> {
    id: u64,
    sender: Mutex<Option<oneshot::Sender<Outcome<R>>>>,
    on_resolve: Box<dyn Fn(u64) + Send + Sync>,
}

impl<R> Settlement<R> {
    fn take_sender(&self) -> Option<oneshot::Sender<Outcome<R>>> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<R> Resolver<R> {
    pub(crate) fn new(
        id: u64,
        sender: oneshot::Sender<Outcome<R>>,
        on_resolve: impl Fn(u64) + Send + Sync + 'static,
    ) -> Self {
        Self {
            settlement: Arc::new(Settlement {
                id,
                sender: Mutex::new(Some(sender)),
                on_resolve: Box::new(on_resolve),
            }),
        }
    }

    /// Settle the modal with `result`.
    ///
    /// The container is closed before the waiting future is woken, so code
    /// running after `.await` observes a closed modal.
    ///
    /// Returns `false` if this modal was already settled.
    pub fn resolve(&self, result: R) -> bool {
        let id = self.settlement.id;
        let Some(sender) = self.settlement.take_sender() else {
            debug!(modal_id = id, "Ignoring resolve on an already settled modal");
            return false;
        };

        (self.settlement.on_resolve)(id);

        if sender.send(Ok(result)).is_err() {
            debug!(modal_id = id, "Modal resolved after its future was dropped");
        } else {
            debug!(modal_id = id, "Modal resolved");
        }
        true
    }

    /// Settle the modal with an error without touching the container.
    pub(crate) fn fail(&self, error: ModalError) -> bool {
        let Some(sender) = self.settlement.take_sender() else {
            return false;
        };
        // The future may already be gone; nothing else is waiting on it.
        let _ = sender.send(Err(error));
        true
    }

    /// Whether this modal has already been settled.
    pub fn is_settled(&self) -> bool {
        self.settlement
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Id of the `show_modal` call this resolver belongs to.
    pub fn id(&self) -> u64 {
        self.settlement.id
    }
}

impl<R> Clone for Resolver<R> {
    fn clone(&self) -> Self {
        Self {
            settlement: Arc::clone(&self.settlement),
        }
    }
}

impl<R> fmt::Debug for Resolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("id", &self.id())
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    type Receiver = oneshot::Receiver<Outcome<&'static str>>;

    fn resolver_with_counter(id: u64) -> (Resolver<&'static str>, Receiver, Arc<AtomicUsize>) {
        let (sender, receiver) = oneshot::channel();
        let closes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closes);
        let resolver = Resolver::new(id, sender, move |closed_id| {
            assert_eq!(closed_id, id);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (resolver, receiver, closes)
    }

    #[test]
    fn test_resolve_once() {
        let (resolver, mut receiver, closes) = resolver_with_counter(7);

        assert!(!resolver.is_settled());
        assert!(resolver.resolve("ok"));
        assert!(resolver.is_settled());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(receiver.try_recv().unwrap(), Ok("ok"));
    }

    #[test]
    fn test_closes_before_fulfilling() {
        let (sender, receiver) = oneshot::channel::<Outcome<&'static str>>();
        let receiver = Arc::new(Mutex::new(receiver));
        let pending_during_close = Arc::new(Mutex::new(None));

        let shared_receiver = Arc::clone(&receiver);
        let observed = Arc::clone(&pending_during_close);
        let resolver = Resolver::new(0, sender, move |_| {
            let pending = matches!(
                shared_receiver.lock().unwrap().try_recv(),
                Err(oneshot::error::TryRecvError::Empty)
            );
            *observed.lock().unwrap() = Some(pending);
        });

        assert!(resolver.resolve("ok"));
        assert_eq!(*pending_during_close.lock().unwrap(), Some(true));
        assert_eq!(receiver.lock().unwrap().try_recv().unwrap(), Ok("ok"));
    }

    #[test]
    fn test_second_resolve_is_ignored() {
        let (resolver, mut receiver, closes) = resolver_with_counter(1);

        assert!(resolver.resolve("ok"));
        assert!(!resolver.resolve("cancel"));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(receiver.try_recv().unwrap(), Ok("ok"));
    }

    #[test]
    fn test_clones_share_settlement() {
        let (resolver, mut receiver, closes) = resolver_with_counter(3);
        let clone = resolver.clone();

        assert!(clone.resolve("cancel"));
        assert!(resolver.is_settled());
        assert!(!resolver.resolve("ok"));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(receiver.try_recv().unwrap(), Ok("cancel"));
    }

    #[test]
    fn test_fail_makes_resolve_inert() {
        let (resolver, mut receiver, closes) = resolver_with_counter(2);

        assert!(resolver.fail(ModalError::Superseded));
        assert!(!resolver.resolve("ok"));
        assert!(!resolver.fail(ModalError::AlreadyOpen));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
        assert_eq!(receiver.try_recv().unwrap(), Err(ModalError::Superseded));
    }

    #[test]
    fn test_resolve_after_future_dropped() {
        let (resolver, receiver, closes) = resolver_with_counter(4);
        drop(receiver);

        assert!(resolver.resolve("ok"));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_output() {
        let (resolver, _receiver, _closes) = resolver_with_counter(9);
        assert_eq!(format!("{resolver:?}"), "Resolver { id: 9, settled: false }");
    }
}
