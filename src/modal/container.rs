use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{oneshot, watch};
use tracing::{debug, trace};

use super::{
    AsyncModalProps, DoubleOpenPolicy, ModalError, ModalFuture, ModalOptions, ModalState, Resolver,
};

/// Receiver that yields a new [`ModalState`] on every transition.
pub type ModalWatch<V, R> = watch::Receiver<ModalState<V, R>>;

/// Create a modal container and a receiver observing it.
///
/// The receiver always holds the current snapshot; `changed().await` waits
/// for the next open or close.
pub fn async_modal_state<V, R>() -> (ModalWatch<V, R>, AsyncModal<V, R>) {
    let modal = AsyncModal::new();
    (modal.subscribe(), modal)
}

/// State container for a single modal whose result can be awaited.
///
/// `AsyncModal` is a cheap handle; clones refer to the same container.
/// Separate calls to [`AsyncModal::new`] never share state.
///
/// Do not hold a borrowed snapshot (`watch::Ref`) from [`subscribe`](Self::subscribe)
/// while calling [`show_modal`](Self::show_modal) or `resolve`. Clone the
/// props out of the snapshot first.
pub struct AsyncModal<V, R> {
    shared: Arc<Shared<V, R>>,
}

struct Shared<V, R> {
    state: watch::Sender<ModalState<V, R>>,
    next_id: AtomicU64,
    options: ModalOptions,
}

impl<V, R> Shared<V, R> {
    fn close(&self, id: u64) {
        let closed = self.state.send_if_modified(|state| {
            if state.modal_id() == Some(id) {
                *state = ModalState::closed();
                true
            } else {
                false
            }
        });

        if closed {
            debug!(modal_id = id, "Modal closed");
        } else {
            trace!(modal_id = id, "Resolver no longer owns the open modal");
        }
    }
}

impl<V, R> AsyncModal<V, R> {
    pub fn new() -> Self {
        Self::with_options(ModalOptions::default())
    }

    pub fn with_options(options: ModalOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: watch::Sender::new(ModalState::closed()),
                next_id: AtomicU64::new(0),
                options,
            }),
        }
    }

    pub fn options(&self) -> ModalOptions {
        self.shared.options
    }

    pub fn is_open(&self) -> bool {
        self.shared.state.borrow().is_open()
    }

    /// Inspect the current state without cloning it.
    ///
    /// The state stays locked while `f` runs. Calling `show_modal` or
    /// `resolve` from inside `f` deadlocks.
    pub fn with_state<T>(&self, f: impl FnOnce(&ModalState<V, R>) -> T) -> T {
        f(&self.shared.state.borrow())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ModalState<V, R>
    where
        V: Clone,
    {
        self.shared.state.borrow().clone()
    }

    /// Subscribe to state changes.
    ///
    /// The returned receiver has already seen the current state.
    pub fn subscribe(&self) -> ModalWatch<V, R> {
        self.shared.state.subscribe()
    }
}

impl<V, R> AsyncModal<V, R>
where
    V: Send + Sync + 'static,
    R: Send + 'static,
{
    /// Open the modal with `value` and return a future for its result.
    ///
    /// The state is `Open` by the time this returns, unless a modal was
    /// already open and the container rejects double opens. See
    /// [`DoubleOpenPolicy`].
    pub fn show_modal(&self, value: V) -> ModalFuture<R> {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();

        let shared = Arc::downgrade(&self.shared);
        let resolve = Resolver::new(id, sender, move |id| {
            if let Some(shared) = shared.upgrade() {
                shared.close(id);
            }
        });

        let props = AsyncModalProps {
            value,
            resolve: resolve.clone(),
        };
        let policy = self.shared.options.on_double_open;
        let mut superseded = None;

        let opened = self.shared.state.send_if_modified(|state| {
            if let Some(current) = state.props() {
                if policy == DoubleOpenPolicy::Reject {
                    return false;
                }
                superseded = Some(current.resolve.clone());
            }
            *state = ModalState::open(props);
            true
        });

        if opened {
            if let Some(previous) = superseded {
                debug!(modal_id = previous.id(), superseded_by = id, "Modal superseded");
                previous.fail(ModalError::Superseded);
            }
            debug!(modal_id = id, "Modal opened");
        } else {
            debug!(modal_id = id, "Rejected modal while another one is open");
            resolve.fail(ModalError::AlreadyOpen);
        }

        ModalFuture::new(id, receiver)
    }
}

impl<V, R> Default for AsyncModal<V, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, R> Clone for AsyncModal<V, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<V, R> fmt::Debug for AsyncModal<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncModal")
            .field("is_open", &self.is_open())
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Answer {
        Ok,
        Cancel,
    }

    fn open_props<V: Clone, R>(modal: &AsyncModal<V, R>) -> AsyncModalProps<V, R> {
        modal.state().into_props().expect("modal should be open")
    }

    #[test]
    fn test_initially_closed() {
        let (state, modal) = async_modal_state::<String, Answer>();

        assert!(!state.borrow().is_open());
        assert!(state.borrow().props().is_none());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_show_modal_opens_with_value() {
        let modal = AsyncModal::<String, Answer>::new();
        let _future = modal.show_modal("world".to_string());

        let state = modal.state();
        assert!(state.is_open());
        assert_eq!(state.value().map(String::as_str), Some("world"));
    }

    #[test]
    fn test_show_modal_without_value() {
        let modal = AsyncModal::<(), Answer>::new();
        let _future = modal.show_modal(());

        assert!(modal.is_open());
    }

    #[tokio::test]
    async fn test_resolve_fulfills_and_closes() {
        let (state, modal) = async_modal_state::<String, Answer>();
        let future = modal.show_modal("world".to_string());

        let props = state.borrow().props().cloned().unwrap();
        assert_eq!(props.value, "world");
        assert!(props.resolve.resolve(Answer::Ok));

        assert_eq!(future.await, Ok(Answer::Ok));
        assert!(!state.borrow().is_open());
        assert!(state.borrow().props().is_none());
    }

    #[tokio::test]
    async fn test_closed_before_await_returns() {
        let modal = AsyncModal::<u32, u32>::new();
        let future = modal.show_modal(1);
        let props = open_props(&modal);

        let observer = modal.clone();
        let waiter = tokio::spawn(async move {
            let result = future.await;
            (result, observer.is_open())
        });

        tokio::task::yield_now().await;
        props.resolve.resolve(2);

        let (result, still_open) = waiter.await.unwrap();
        assert_eq!(result, Ok(2));
        assert!(!still_open);
    }

    #[tokio::test]
    async fn test_resolve_from_another_task() {
        let modal = AsyncModal::<String, Answer>::new();
        let future = modal.show_modal("async".to_string());
        let props = open_props(&modal);

        tokio::spawn(async move {
            tokio::task::yield_now().await;
            props.resolve.resolve(Answer::Cancel);
        });

        assert_eq!(future.await, Ok(Answer::Cancel));
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn test_second_resolve_has_no_effect() {
        let modal = AsyncModal::<String, Answer>::new();
        let future = modal.show_modal("once".to_string());
        let props = open_props(&modal);

        assert!(props.resolve.resolve(Answer::Ok));
        assert!(!props.resolve.resolve(Answer::Cancel));

        assert_eq!(future.await, Ok(Answer::Ok));
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn test_stale_resolver_does_not_close_next_modal() {
        let modal = AsyncModal::<&str, Answer>::new();

        let first = modal.show_modal("first");
        let stale = open_props(&modal);
        stale.resolve.resolve(Answer::Ok);
        assert_eq!(first.await, Ok(Answer::Ok));

        let mut second = modal.show_modal("second");
        assert!(!stale.resolve.resolve(Answer::Cancel));

        assert!(modal.is_open());
        assert_eq!(modal.state().value(), Some(&"second"));
        assert_eq!(second.try_result(), None);
    }

    #[tokio::test]
    async fn test_supersede_policy() {
        let modal = AsyncModal::<&str, Answer>::new();

        let first = modal.show_modal("first");
        let first_props = open_props(&modal);
        let second = modal.show_modal("second");

        assert_eq!(first.await, Err(ModalError::Superseded));
        assert_eq!(modal.state().value(), Some(&"second"));

        // The superseded dialog can no longer settle or close anything.
        assert!(!first_props.resolve.resolve(Answer::Ok));
        assert!(modal.is_open());

        open_props(&modal).resolve.resolve(Answer::Cancel);
        assert_eq!(second.await, Ok(Answer::Cancel));
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn test_reject_policy() {
        let options = ModalOptions::default().with_double_open(DoubleOpenPolicy::Reject);
        let modal = AsyncModal::<&str, Answer>::with_options(options);

        let first = modal.show_modal("first");
        let second = modal.show_modal("second");

        assert_eq!(second.await, Err(ModalError::AlreadyOpen));
        assert_eq!(modal.state().value(), Some(&"first"));

        open_props(&modal).resolve.resolve(Answer::Ok);
        assert_eq!(first.await, Ok(Answer::Ok));
    }

    #[tokio::test]
    async fn test_subscribers_see_open_and_close() {
        let (mut state, modal) = async_modal_state::<String, Answer>();
        let future = modal.show_modal("watched".to_string());

        state.changed().await.unwrap();
        let props = {
            let snapshot = state.borrow_and_update();
            assert!(snapshot.is_open());
            snapshot.props().cloned().unwrap()
        };

        props.resolve.resolve(Answer::Ok);
        state.changed().await.unwrap();
        assert!(!state.borrow_and_update().is_open());
        assert_eq!(future.await, Ok(Answer::Ok));
    }

    #[tokio::test]
    async fn test_rejected_open_does_not_notify() {
        let options = ModalOptions::default().with_double_open(DoubleOpenPolicy::Reject);
        let modal = AsyncModal::<u8, u8>::with_options(options);
        let _first = modal.show_modal(1);

        let state = modal.subscribe();
        let _second = modal.show_modal(2);
        assert!(!state.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_dropping_container_and_props_yields_dropped() {
        let modal = AsyncModal::<u8, u8>::new();
        let future = modal.show_modal(1);
        drop(modal);

        assert_eq!(future.await, Err(ModalError::Dropped));
    }

    #[tokio::test]
    async fn test_dialog_outlives_container() {
        let modal = AsyncModal::<u8, u8>::new();
        let future = modal.show_modal(1);
        let props = open_props(&modal);
        drop(modal);

        assert!(props.resolve.resolve(3));
        assert_eq!(future.await, Ok(3));
    }

    #[test]
    fn test_independent_instances() {
        let a = AsyncModal::<&str, Answer>::new();
        let b = AsyncModal::<&str, Answer>::new();

        let _future = a.show_modal("a");
        assert!(a.is_open());
        assert!(!b.is_open());

        open_props(&a).resolve.resolve(Answer::Ok);
        let _future = b.show_modal("b");
        assert!(!a.is_open());
        assert_eq!(b.state().value(), Some(&"b"));
    }

    #[test]
    fn test_clones_share_state() {
        let modal = AsyncModal::<&str, Answer>::new();
        let handle = modal.clone();

        let _future = handle.show_modal("shared");
        assert_eq!(modal.state().value(), Some(&"shared"));
        assert!(modal.with_state(ModalState::is_open));
    }

    #[test]
    fn test_future_ids_increase() {
        let modal = AsyncModal::<u8, u8>::new();
        let first = modal.show_modal(1);
        let second = modal.show_modal(2);

        assert_eq!(first.id() + 1, second.id());
        assert_eq!(open_props(&modal).resolve.id(), second.id());
    }
}
