//! Await the result of a modal dialog.
//!
//! [`AsyncModal`] is a small state container that opens one modal at a time
//! and hands the caller a [`ModalFuture`] which settles when the rendered
//! dialog calls [`Resolver::resolve`]. The host observes [`ModalState`]
//! snapshots and renders whatever collaborator it likes from the
//! [`AsyncModalProps`] they carry.
//!
//! ```ignore
//! let (mut state, modal) = async_modal::async_modal_state::<String, bool>();
//! let answer = modal.show_modal("Delete everything?".to_string());
//!
//! // Somewhere in the render loop:
//! let props = state.borrow_and_update().props().cloned();
//! if let Some(props) = props {
//!     props.resolve.resolve(true);
//! }
//!
//! assert_eq!(answer.await, Ok(true));
//! ```

pub mod modal;

pub use modal::{
    AsyncModal, AsyncModalProps, DoubleOpenPolicy, ModalError, ModalFuture, ModalOptions,
    ModalState, ModalWatch, Resolver, async_modal_state,
};
