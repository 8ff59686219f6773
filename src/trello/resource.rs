use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines organization (workspace) data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Defines board data structure.
///
/// The organization is embedded when boards are requested with
/// `organization=true`; otherwise only `idOrganization` is known.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub id_organization: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
}

impl Board {
    /// Returns the id of the owning organization, if any.
    ///
    pub fn organization_id(&self) -> Option<&str> {
        self.organization
            .as_ref()
            .map(|o| o.id.as_str())
            .or(self.id_organization.as_deref())
    }
}

/// Defines list data structure.
///
/// Cards are nested when lists are requested with `cards=open`, and the board
/// is nested when a single list is requested with `board=true`.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub id_board: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub board: Option<Board>,
}

/// Defines card badge counters.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    #[serde(default)]
    pub check_items: u32,
}

/// Defines card data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub id_board: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub badges: Option<Badges>,
}

impl Card {
    /// Returns the number of checklist items on the card.
    ///
    pub fn check_item_count(&self) -> u32 {
        self.badges.as_ref().map(|b| b.check_items).unwrap_or(0)
    }
}

/// Completion state of a checklist item.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Complete,
    Incomplete,
}

impl CheckState {
    /// Returns the opposite state.
    ///
    pub fn toggled(self) -> Self {
        match self {
            CheckState::Complete => CheckState::Incomplete,
            CheckState::Incomplete => CheckState::Complete,
        }
    }

    /// Returns the wire representation used in query parameters.
    ///
    pub fn as_str(self) -> &'static str {
        match self {
            CheckState::Complete => "complete",
            CheckState::Incomplete => "incomplete",
        }
    }
}

/// Defines checklist item data structure.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub state: CheckState,
    #[serde(default)]
    pub id_checklist: String,
}

/// Defines checklist data structure.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id_card: String,
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_board_organization_id() {
        let board: Board = serde_json::from_value(json!({
            "id": "b1",
            "name": "Roadmap",
            "closed": false,
            "idOrganization": "o1",
            "organization": { "id": "o2", "displayName": "Team" }
        }))
        .unwrap();
        assert_eq!(board.organization_id(), Some("o2"));

        let board: Board =
            serde_json::from_value(json!({ "id": "b2", "idOrganization": "o1" })).unwrap();
        assert_eq!(board.organization_id(), Some("o1"));

        let board: Board = serde_json::from_value(json!({ "id": "b3", "idOrganization": null }))
            .unwrap();
        assert_eq!(board.organization_id(), None);
    }

    #[test]
    fn test_card_check_item_count() {
        let card: Card = serde_json::from_value(json!({
            "id": "c1",
            "name": "Ship it",
            "badges": { "checkItems": 3, "votes": 0 }
        }))
        .unwrap();
        assert_eq!(card.check_item_count(), 3);
        assert!(!card.closed);

        let card: Card = serde_json::from_value(json!({ "id": "c2" })).unwrap();
        assert_eq!(card.check_item_count(), 0);
    }

    #[test]
    fn test_check_state() {
        let item: CheckItem = serde_json::from_value(json!({
            "id": "i1",
            "name": "Write tests",
            "state": "complete",
            "idChecklist": "cl1"
        }))
        .unwrap();
        assert_eq!(item.state, CheckState::Complete);
        assert_eq!(item.state.toggled(), CheckState::Incomplete);
        assert_eq!(CheckState::Incomplete.as_str(), "incomplete");
    }
}
