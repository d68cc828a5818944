use thiserror::Error;

/// Reason a [`ModalFuture`](super::ModalFuture) settled without a result.
///
/// None of these occur when the dialog calls `resolve` exactly once for every
/// `show_modal` and each future is awaited once. They describe the
/// double-open policy, abandoned settlements and reuse of a finished future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModalError {
    /// A newer `show_modal` call replaced this modal before it was resolved.
    #[error("modal was superseded by a newer modal before it was resolved")]
    Superseded,
    /// `show_modal` was called while another modal was open and the
    /// container is configured to reject such calls.
    #[error("a modal is already open")]
    AlreadyOpen,
    /// Every resolver for this modal was dropped without being called.
    #[error("modal was dropped without being resolved")]
    Dropped,
    /// The outcome was already returned by an earlier poll or `try_result`.
    #[error("modal result was already taken")]
    Taken,
}
