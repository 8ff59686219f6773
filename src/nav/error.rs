//! Navigation-specific error types.

use crate::trello::FetchError;

/// Errors surfaced by navigation, refresh and mutation operations.
///
/// None of them is fatal; the user recovers by navigating again or
/// refreshing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// No access token is stored, nothing was fetched
    #[error("Access token not configured")]
    NotConfigured,

    /// A request or its decoding failed; view state and cache are unchanged
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// One of the concurrent sub-requests of a combined view failed
    #[error("Could not load all {expected} lists: {source}")]
    AggregateIncomplete { expected: usize, source: FetchError },

    /// A move or check/uncheck request failed and was rolled back
    #[error("Update failed: {source}")]
    MutationFailed { source: FetchError },

    /// The entity is not part of any loaded view
    #[error("Not loaded: {id}")]
    UnknownItem { id: String },

    /// A check/uncheck request for the item is still in flight
    #[error("Item {id} is still being updated")]
    MutationInFlight { id: String },

    /// The move target does not belong to the card's board
    #[error("List {list_id} is not part of board {board_id}")]
    ForeignList { list_id: String, board_id: String },
}
