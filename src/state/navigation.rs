//! Navigation-related state types.
//!
//! This module contains the main menu entries, the card actions and the
//! overlays shown on top of the current view.

use crate::nav::{BoardFilter, Item, ViewState};

/// Specifying the entries of the main menu.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MenuEntry {
    StarredBoards,
    MyBoards,
    Organizations,
    AllBoards,
    MyCards,
    SendToTimeline,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 6] = [
        MenuEntry::StarredBoards,
        MenuEntry::MyBoards,
        MenuEntry::Organizations,
        MenuEntry::AllBoards,
        MenuEntry::MyCards,
        MenuEntry::SendToTimeline,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuEntry::StarredBoards => "Starred boards",
            MenuEntry::MyBoards => "My boards",
            MenuEntry::Organizations => "Organizations",
            MenuEntry::AllBoards => "All boards",
            MenuEntry::MyCards => "My cards",
            MenuEntry::SendToTimeline => "Send to timeline",
        }
    }

    /// Returns the location the entry opens, or `None` for entries that run
    /// an action instead.
    ///
    pub fn target(self) -> Option<ViewState> {
        match self {
            MenuEntry::StarredBoards => Some(ViewState::boards(BoardFilter::Starred)),
            MenuEntry::MyBoards => Some(ViewState::boards(BoardFilter::Private)),
            MenuEntry::Organizations => Some(ViewState::organizations()),
            MenuEntry::AllBoards => Some(ViewState::boards(BoardFilter::Open)),
            MenuEntry::MyCards => Some(ViewState::my_cards()),
            MenuEntry::SendToTimeline => None,
        }
    }
}

/// Specifying the actions offered for a card.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardAction {
    Move,
    Checklists,
}

impl CardAction {
    pub fn title(self) -> &'static str {
        match self {
            CardAction::Move => "Move card",
            CardAction::Checklists => "Checklists",
        }
    }
}

/// Specifying the modals drawn over the current view.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Overlay {
    CardActions {
        card_id: String,
        board_id: String,
        actions: Vec<CardAction>,
    },
    ItemDetail {
        card_id: String,
        item: Item,
    },
    Message {
        title: String,
        text: String,
    },
}

impl Overlay {
    /// Returns the number of selectable entries.
    ///
    pub fn len(&self) -> usize {
        match self {
            Overlay::CardActions { actions, .. } => actions.len(),
            Overlay::ItemDetail { .. } | Overlay::Message { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Feedback pattern flashed in the status bar after an action completes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pulse {
    /// After a successful mutation.
    Short,
    /// After a refresh.
    Double,
}

impl Pulse {
    /// Returns how many ticks the flash stays visible.
    ///
    pub fn ticks(self) -> usize {
        match self {
            Pulse::Short => 6,
            Pulse::Double => 12,
        }
    }

    /// Returns true if the flash is lit with `remaining` ticks to go.
    ///
    pub fn lit(self, remaining: usize) -> bool {
        match self {
            Pulse::Short => remaining > 0,
            Pulse::Double => remaining > 8 || (remaining > 0 && remaining <= 4),
        }
    }
}
