use std::fmt;

use super::Resolver;

/// What a dialog collaborator receives while its modal is open.
pub struct AsyncModalProps<V, R> {
    /// The value passed to `show_modal`, unchanged.
    pub value: V,
    /// Settles the modal. Only the first call has an effect.
    pub resolve: Resolver<R>,
}

impl<V: Clone, R> Clone for AsyncModalProps<V, R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            resolve: self.resolve.clone(),
        }
    }
}

impl<V: fmt::Debug, R> fmt::Debug for AsyncModalProps<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncModalProps")
            .field("value", &self.value)
            .field("resolve", &self.resolve)
            .finish()
    }
}

/// Snapshot of an [`AsyncModal`](super::AsyncModal).
///
/// A modal is open exactly when it carries props, so the two can never
/// disagree.
pub struct ModalState<V, R> {
    props: Option<AsyncModalProps<V, R>>,
}

impl<V, R> ModalState<V, R> {
    pub const fn closed() -> Self {
        Self { props: None }
    }

    pub(crate) const fn open(props: AsyncModalProps<V, R>) -> Self {
        Self { props: Some(props) }
    }

    pub const fn is_open(&self) -> bool {
        self.props.is_some()
    }

    /// Props to render the dialog with, `None` while closed.
    pub const fn props(&self) -> Option<&AsyncModalProps<V, R>> {
        self.props.as_ref()
    }

    pub fn value(&self) -> Option<&V> {
        self.props.as_ref().map(|props| &props.value)
    }

    pub fn into_props(self) -> Option<AsyncModalProps<V, R>> {
        self.props
    }

    pub(crate) fn modal_id(&self) -> Option<u64> {
        self.props.as_ref().map(|props| props.resolve.id())
    }
}

impl<V, R> Default for ModalState<V, R> {
    fn default() -> Self {
        Self::closed()
    }
}

impl<V: Clone, R> Clone for ModalState<V, R> {
    fn clone(&self) -> Self {
        Self {
            props: self.props.clone(),
        }
    }
}

impl<V: fmt::Debug, R> fmt::Debug for ModalState<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalState")
            .field("is_open", &self.is_open())
            .field("props", &self.props)
            .finish()
    }
}
