//! Modal state container and its open/resolve/close protocol.
//!
//! This module defines the pieces of the protocol:
//! - [`AsyncModal`] - the container and its imperative `show_modal` handle
//! - [`ModalState`] - an immutable snapshot of the container
//! - [`AsyncModalProps`] - what a dialog collaborator receives while open
//! - [`Resolver`] - the single-use settle capability inside the props
//! - [`ModalFuture`] - what `show_modal` returns

mod container;
mod error;
mod future;
mod options;
mod resolver;
mod state;

pub use container::{AsyncModal, ModalWatch, async_modal_state};
pub use error::ModalError;
pub use future::ModalFuture;
pub use options::{DoubleOpenPolicy, ModalOptions};
pub use resolver::Resolver;
pub use state::{AsyncModalProps, ModalState};
