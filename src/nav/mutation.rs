//! Checklist item mutation state.
//!
//! An item is either `Confirmed` with the last server-acknowledged state, or
//! `Pending` while a PUT is in flight. Only confirmed values reach the cache.

use crate::trello::CheckState;

/// Lifecycle of a single checklist item across a toggle.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemPhase {
    Confirmed(CheckState),
    Pending { prior: CheckState, target: CheckState },
}

impl ItemPhase {
    /// Start a mutation towards `target`.
    ///
    pub fn begin(self, target: CheckState) -> Self {
        ItemPhase::Pending {
            prior: self.confirmed(),
            target,
        }
    }

    /// Server acknowledged the mutation.
    ///
    pub fn confirm(self) -> Self {
        match self {
            ItemPhase::Pending { target, .. } => ItemPhase::Confirmed(target),
            confirmed => confirmed,
        }
    }

    /// Server rejected the mutation.
    ///
    pub fn rollback(self) -> Self {
        match self {
            ItemPhase::Pending { prior, .. } => ItemPhase::Confirmed(prior),
            confirmed => confirmed,
        }
    }

    /// Returns the last confirmed state, used for any subsequent toggle.
    ///
    pub fn confirmed(self) -> CheckState {
        match self {
            ItemPhase::Confirmed(state) => state,
            ItemPhase::Pending { prior, .. } => prior,
        }
    }

    /// Returns the state to display, including an in-flight change.
    ///
    pub fn displayed(self) -> CheckState {
        match self {
            ItemPhase::Confirmed(state) => state,
            ItemPhase::Pending { target, .. } => target,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, ItemPhase::Pending { .. })
    }
}
