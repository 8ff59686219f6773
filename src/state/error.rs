//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The network thread is gone; requests can no longer be sent
    #[error("Network channel closed")]
    ChannelClosed,

    /// The selection does not point at an entry
    #[error("Nothing selected")]
    NothingSelected,
}
