//! Request descriptors for the Trello resources used by the client.
//!
//! An `Endpoint` names the resource path, HTTP method and query parameters of
//! one call. Credentials are not part of the descriptor; the client appends
//! them when the request is sent.

use super::CheckState;
use reqwest::Method;

/// Fully-formed description of one API call.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Endpoint {
    /// Return a GET descriptor for the path.
    ///
    pub fn get(path: impl Into<String>) -> Self {
        Endpoint {
            method: Method::GET,
            path: path.into(),
            params: vec![],
        }
    }

    /// Return a PUT descriptor for the path.
    ///
    pub fn put(path: impl Into<String>) -> Self {
        Endpoint {
            method: Method::PUT,
            path: path.into(),
            params: vec![],
        }
    }

    /// Append a query parameter.
    ///
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    /// Return the value of a query parameter, if present.
    ///
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Boards of the authenticated member, with their organization embedded.
    ///
    pub fn my_boards(filter: &str) -> Self {
        Endpoint::get("members/me/boards")
            .param("fields", "name,idOrganization,closed")
            .param("filter", filter)
            .param("organization", "true")
            .param("organization_fields", "displayName")
    }

    /// Organizations the authenticated member belongs to.
    ///
    pub fn my_organizations() -> Self {
        Endpoint::get("members/me/organizations").param("fields", "displayName")
    }

    /// Open cards of the authenticated member.
    ///
    pub fn my_cards() -> Self {
        Endpoint::get("members/me/cards")
            .param("filter", "open")
            .param("fields", "name,idBoard,idList,due,desc,closed")
    }

    /// Open lists of a board, optionally with their open cards nested.
    ///
    pub fn board_lists(board_id: &str, with_cards: bool) -> Self {
        let endpoint = Endpoint::get(format!("boards/{}/lists", board_id))
            .param("filter", "open")
            .param("fields", "name,idBoard,closed");
        if with_cards {
            endpoint
                .param("cards", "open")
                .param("card_fields", "name,idList,idBoard,closed,due")
        } else {
            endpoint
        }
    }

    /// Open cards of a list.
    ///
    pub fn list_cards(list_id: &str) -> Self {
        Endpoint::get(format!("lists/{}/cards", list_id))
            .param("filter", "open")
            .param("fields", "name,idList,idBoard,closed,due")
    }

    /// A single list with the name of its board.
    ///
    pub fn list_with_board(list_id: &str) -> Self {
        Endpoint::get(format!("lists/{}", list_id))
            .param("fields", "name,idBoard")
            .param("board", "true")
            .param("board_fields", "name")
    }

    /// A single card with the fields shown in the detail view.
    ///
    pub fn card(card_id: &str) -> Self {
        Endpoint::get(format!("cards/{}", card_id))
            .param("fields", "name,desc,due,idList,idBoard,closed,badges")
    }

    /// Checklists of a card with their items.
    ///
    pub fn card_checklists(card_id: &str) -> Self {
        Endpoint::get(format!("cards/{}/checklists", card_id))
            .param("checkItem_fields", "name,state,idChecklist")
    }

    /// Move a card to another list.
    ///
    pub fn move_card(card_id: &str, list_id: &str) -> Self {
        Endpoint::put(format!("cards/{}", card_id)).param("idList", list_id)
    }

    /// Set the state of a checklist item.
    ///
    pub fn set_check_item(card_id: &str, item_id: &str, state: CheckState) -> Self {
        Endpoint::put(format!("cards/{}/checkItem/{}", card_id, item_id))
            .param("state", state.as_str())
    }
}
