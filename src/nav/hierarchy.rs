//! Hierarchy building.
//!
//! Pure transformations from the flat resources returned by the API into the
//! ordered groups the presentation layer displays. Every builder drops closed
//! entities and keeps the API's own ordering within a group.

use super::view_state::BoardFilter;
use crate::trello::{Board, Card, CheckState, Checklist, List, Organization};
use chrono::{DateTime, Local, Utc};
use log::*;
use std::collections::{HashMap, HashSet};

/// Longest description shown in the card detail view.
///
pub const DESCRIPTION_LIMIT: usize = 420;

/// Appended to descriptions cut at `DESCRIPTION_LIMIT`.
///
pub const TRUNCATION_MARKER: &str = "...";

/// Title of the group holding boards without an organization.
///
pub const PRIVATE_GROUP_TITLE: &str = "My Boards";

/// Icons shown next to items and in the detail view.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Board,
    Organization,
    Card,
    Calendar,
    Checked,
    Unchecked,
    List,
}

impl Icon {
    /// Returns the icon for a checklist item state.
    ///
    pub fn for_state(state: CheckState) -> Self {
        match state {
            CheckState::Complete => Icon::Checked,
            CheckState::Incomplete => Icon::Unchecked,
        }
    }
}

/// A selectable entry of a group.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub icon: Option<Icon>,
    /// Confirmed state, for checklist items only.
    pub state: Option<CheckState>,
}

impl Item {
    fn new(id: &str, title: &str, icon: Icon) -> Self {
        Item {
            id: id.to_owned(),
            title: title.to_owned(),
            icon: Some(icon),
            state: None,
        }
    }
}

/// A titled section of items, keyed by the id of its parent entity.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub title: String,
    pub key: Option<String>,
    pub items: Vec<Item>,
}

/// Card detail as displayed: title, due subtitle and truncated description.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDetail {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub icon: Option<Icon>,
    pub board_id: String,
    pub list_id: String,
    pub check_items: u32,
}

/// A built view, as stored in the navigation cache.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Groups(Vec<Group>),
    Card(CardDetail),
}

impl View {
    /// Returns the groups of a list view, or an empty slice for a detail view.
    ///
    pub fn groups(&self) -> &[Group] {
        match self {
            View::Groups(groups) => groups,
            View::Card(_) => &[],
        }
    }

    /// Returns the item with the given id from any group.
    ///
    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.groups()
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|i| i.id == item_id)
    }
}

/// Cut a description to `DESCRIPTION_LIMIT` characters, appending a marker
/// when anything was removed.
///
pub fn truncate_description(desc: &str) -> String {
    match desc.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{}", &desc[..cut], TRUNCATION_MARKER),
        None => desc.to_owned(),
    }
}

/// Parse an API timestamp, logging and ignoring malformed values.
///
pub fn parse_due(due: Option<&str>) -> Option<DateTime<Utc>> {
    let due = due.filter(|d| !d.is_empty())?;
    match DateTime::parse_from_rfc3339(due) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!("Ignoring malformed due date '{}': {}", due, e);
            None
        }
    }
}

/// Groups of items keyed by parent id, in order of first appearance.
///
#[derive(Default)]
struct Grouper {
    index: HashMap<Option<String>, usize>,
    groups: Vec<Group>,
}

impl Grouper {
    fn push(&mut self, key: Option<&str>, title: impl FnOnce() -> String, item: Item) {
        let key = key.map(str::to_owned);
        let pos = match self.index.get(&key) {
            Some(pos) => *pos,
            None => {
                self.groups.push(Group {
                    title: title(),
                    key: key.clone(),
                    items: vec![],
                });
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[pos].items.push(item);
    }

    fn finish(self) -> Vec<Group> {
        self.groups
    }
}

/// Build the Organizations view.
///
pub fn organizations(organizations: Vec<Organization>) -> Vec<Group> {
    vec![Group {
        title: "Organizations".to_string(),
        key: None,
        items: organizations
            .iter()
            .map(|o| Item::new(&o.id, &o.display_name, Icon::Organization))
            .collect(),
    }]
}

/// Build the Boards view: open boards grouped by organization.
///
pub fn boards(boards: Vec<Board>, filter: &BoardFilter) -> Vec<Group> {
    let mut grouper = Grouper::default();
    for board in boards.iter().filter(|b| !b.closed) {
        let org_id = board.organization_id();
        let keep = match (filter, org_id) {
            (BoardFilter::Private, Some(_)) => false,
            (BoardFilter::Organization(wanted), Some(id)) => wanted == id,
            (BoardFilter::Organization(_), None) => false,
            _ => true,
        };
        if !keep {
            continue;
        }
        let title = || match (&board.organization, org_id) {
            (Some(org), _) if !org.display_name.is_empty() => org.display_name.clone(),
            (_, Some(id)) => id.to_owned(),
            (_, None) => PRIVATE_GROUP_TITLE.to_string(),
        };
        grouper.push(org_id, title, Item::new(&board.id, &board.name, Icon::Board));
    }
    grouper.finish()
}

/// Build the Lists view of a board: open cards grouped by list.
///
/// A list is emitted only if at least one open card belongs to it.
///
pub fn lists(lists: Vec<List>, cards: Vec<Card>) -> Vec<Group> {
    let mut by_list: HashMap<&str, Vec<Item>> = HashMap::new();
    for card in cards.iter().filter(|c| !c.closed) {
        by_list
            .entry(card.id_list.as_str())
            .or_default()
            .push(Item::new(&card.id, &card.name, Icon::Card));
    }
    lists
        .iter()
        .filter(|l| !l.closed)
        .filter_map(|l| {
            let items = by_list.remove(l.id.as_str())?;
            Some(Group {
                title: l.name.clone(),
                key: Some(l.id.clone()),
                items,
            })
        })
        .collect()
}

/// Build the List view: the open cards of a single list.
///
pub fn list_cards(title: &str, list_id: &str, cards: Vec<Card>) -> Vec<Group> {
    vec![Group {
        title: title.to_owned(),
        key: Some(list_id.to_owned()),
        items: cards
            .iter()
            .filter(|c| !c.closed)
            .map(|c| Item::new(&c.id, &c.name, Icon::Card))
            .collect(),
    }]
}

/// Build the move-target view: every open list of the board, empty or not.
///
pub fn move_targets(board_id: &str, lists: Vec<List>) -> Vec<Group> {
    vec![Group {
        title: "Move card to...".to_string(),
        key: Some(board_id.to_owned()),
        items: lists
            .iter()
            .filter(|l| !l.closed)
            .map(|l| Item::new(&l.id, &l.name, Icon::List))
            .collect(),
    }]
}

/// Build the Checklists view: one group per checklist.
///
pub fn checklists(checklists: Vec<Checklist>) -> Vec<Group> {
    checklists
        .into_iter()
        .map(|checklist| Group {
            title: checklist.name,
            key: Some(checklist.id),
            items: checklist
                .check_items
                .into_iter()
                .map(|item| Item {
                    icon: Some(Icon::for_state(item.state)),
                    state: Some(item.state),
                    id: item.id,
                    title: item.name,
                })
                .collect(),
        })
        .collect()
}

/// Build the My cards view: open cards grouped by list, titled with the
/// resolved `<board> > <list>` names.
///
pub fn my_cards(cards: Vec<Card>, titles: &HashMap<String, String>) -> Vec<Group> {
    let mut grouper = Grouper::default();
    for card in cards.iter().filter(|c| !c.closed) {
        let title = || titles.get(&card.id_list).cloned().unwrap_or_default();
        grouper.push(
            Some(card.id_list.as_str()),
            title,
            Item::new(&card.id, &card.name, Icon::Card),
        );
    }
    grouper.finish()
}

/// Return the distinct list ids of the open cards, in order of first appearance.
///
pub fn distinct_list_ids(cards: &[Card]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = vec![];
    for card in cards.iter().filter(|c| !c.closed) {
        if seen.insert(card.id_list.as_str()) {
            ids.push(card.id_list.clone());
        }
    }
    ids
}

/// Build the card detail view.
///
pub fn card_detail(card: Card) -> CardDetail {
    let due = parse_due(card.due.as_deref());
    CardDetail {
        subtitle: due.map(|d| {
            format!(
                "Due {}",
                d.with_timezone(&Local).format("%a, %b %e %Y %H:%M")
            )
        }),
        icon: due.map(|_| Icon::Calendar),
        body: truncate_description(card.desc.as_deref().unwrap_or_default()),
        check_items: card.check_item_count(),
        id: card.id,
        title: card.name,
        board_id: card.id_board,
        list_id: card.id_list,
    }
}
