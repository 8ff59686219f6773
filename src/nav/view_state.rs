//! Navigation locations and the current-location tracker.
//!
//! A `ContextKey` identifies cache-equivalent requests; a `ViewState` is a key
//! plus the label shown for it. The tracker holds the single committed location
//! and the trail of locations that led to it.

use std::fmt;

/// Which subset of the member's boards the Boards view shows.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoardFilter {
    /// Starred boards only.
    Starred,
    /// Boards without an organization.
    Private,
    /// Every open board.
    Open,
    /// Boards of a single organization.
    Organization(String),
}

impl BoardFilter {
    /// Returns the `filter` query value sent to the API.
    ///
    pub fn query_filter(&self) -> &'static str {
        match self {
            BoardFilter::Starred => "starred",
            BoardFilter::Private | BoardFilter::Open | BoardFilter::Organization(_) => "open",
        }
    }
}

/// Identifies a navigation request: view kind, filter mode and parent id.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextKey {
    Organizations,
    Boards { filter: BoardFilter },
    Lists { board_id: String },
    List { list_id: String },
    Card { card_id: String },
    Checklists { card_id: String },
    MoveTargets { card_id: String, board_id: String },
    MyCards,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Organizations => write!(f, "organizations"),
            ContextKey::Boards { filter } => match filter {
                BoardFilter::Organization(id) => write!(f, "boards(organization {})", id),
                other => write!(f, "boards({})", other.query_filter_label()),
            },
            ContextKey::Lists { board_id } => write!(f, "lists(board {})", board_id),
            ContextKey::List { list_id } => write!(f, "list {}", list_id),
            ContextKey::Card { card_id } => write!(f, "card {}", card_id),
            ContextKey::Checklists { card_id } => write!(f, "checklists(card {})", card_id),
            ContextKey::MoveTargets { card_id, board_id } => {
                write!(f, "move targets(card {}, board {})", card_id, board_id)
            }
            ContextKey::MyCards => write!(f, "my cards"),
        }
    }
}

impl BoardFilter {
    fn query_filter_label(&self) -> &str {
        match self {
            BoardFilter::Starred => "starred",
            BoardFilter::Private => "private",
            BoardFilter::Open => "open",
            BoardFilter::Organization(id) => id,
        }
    }
}

/// A location the user can be in: the context key plus its display label.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub key: ContextKey,
    pub label: String,
}

impl ViewState {
    pub fn organizations() -> Self {
        ViewState {
            key: ContextKey::Organizations,
            label: "Organizations".to_string(),
        }
    }

    pub fn boards(filter: BoardFilter) -> Self {
        let label = match &filter {
            BoardFilter::Starred => "Starred boards",
            BoardFilter::Private => "My boards",
            BoardFilter::Open => "All boards",
            BoardFilter::Organization(_) => "Boards",
        };
        ViewState {
            key: ContextKey::Boards { filter },
            label: label.to_string(),
        }
    }

    pub fn lists(board_id: &str, board_name: &str) -> Self {
        ViewState {
            key: ContextKey::Lists {
                board_id: board_id.to_owned(),
            },
            label: format!("Lists in {}", board_name),
        }
    }

    pub fn list(list_id: &str, list_name: &str) -> Self {
        ViewState {
            key: ContextKey::List {
                list_id: list_id.to_owned(),
            },
            label: format!("Cards in {}", list_name),
        }
    }

    pub fn card(card_id: &str) -> Self {
        ViewState {
            key: ContextKey::Card {
                card_id: card_id.to_owned(),
            },
            label: "Card".to_string(),
        }
    }

    pub fn checklists(card_id: &str) -> Self {
        ViewState {
            key: ContextKey::Checklists {
                card_id: card_id.to_owned(),
            },
            label: "Checklists".to_string(),
        }
    }

    pub fn move_targets(card_id: &str, board_id: &str) -> Self {
        ViewState {
            key: ContextKey::MoveTargets {
                card_id: card_id.to_owned(),
                board_id: board_id.to_owned(),
            },
            label: "Move card to...".to_string(),
        }
    }

    pub fn my_cards() -> Self {
        ViewState {
            key: ContextKey::MyCards,
            label: "My cards".to_string(),
        }
    }
}

/// Holds the committed location and the trail that led to it.
///
/// `commit` replaces the whole location at once; no field is ever updated on
/// its own.
///
#[derive(Debug, Default)]
pub struct ViewStateTracker {
    current: Option<ViewState>,
    trail: Vec<ViewState>,
}

impl ViewStateTracker {
    pub fn new() -> Self {
        ViewStateTracker::default()
    }

    /// Returns the committed location, or `None` before the first navigation.
    ///
    pub fn current(&self) -> Option<&ViewState> {
        self.current.as_ref()
    }

    /// Returns the location `back` would return to.
    ///
    pub fn previous(&self) -> Option<&ViewState> {
        self.trail.last()
    }

    /// Replace the current location.
    ///
    /// Re-committing the current key keeps the trail as it is. Committing a key
    /// already on the trail rewinds the trail to that point.
    ///
    pub fn commit(&mut self, state: ViewState) {
        let same_key = self
            .current
            .as_ref()
            .map(|c| c.key == state.key)
            .unwrap_or(false);
        if !same_key {
            if let Some(pos) = self.trail.iter().position(|s| s.key == state.key) {
                self.trail.truncate(pos);
            } else if let Some(previous) = self.current.take() {
                self.trail.push(previous);
            }
        }
        self.current = Some(state);
    }

    /// Return to the initial, unset state.
    ///
    pub fn clear(&mut self) {
        self.current = None;
        self.trail.clear();
    }
}
