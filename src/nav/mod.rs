//! Navigation core.
//!
//! This module turns navigation requests into built, cached views:
//! - `hierarchy`: pure builders from API resources to ordered groups
//! - `cache`: one built view per context key
//! - `view_state`: locations and the current-location tracker
//! - `mutation`: checklist item toggle state
//! - `Navigator`: navigation, refresh, back, mutations and pin export
//!
//! The navigator is driven from a single-threaded event loop. Its state lock is
//! never held across a network call; every commit re-checks that its request is
//! still the most recent one before touching the cache or the view state.

pub mod cache;
mod error;
pub mod hierarchy;
pub mod mutation;
pub mod view_state;

pub use error::NavError;
pub use hierarchy::{CardDetail, Group, Icon, Item, View};
pub use view_state::{BoardFilter, ContextKey, ViewState};

use crate::timeline::{self, ExportSummary, PinSink};
use crate::trello::{decode, Card, CheckState, Checklist, Endpoint, Fetch, FetchError, List};
use cache::NavigationCache;
use chrono::{DateTime, Utc};
use log::*;
use mutation::ItemPhase;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use view_state::ViewStateTracker;

/// Result of a navigation request.
///
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The view was built (or served from cache) and is now current.
    Committed {
        location: ViewState,
        view: Arc<View>,
        cached: bool,
    },
    /// A newer request was issued before this one completed; nothing changed.
    Superseded,
    /// There was nothing to do (no current view to refresh, or back past the
    /// first view).
    Idle,
}

/// Mutable navigation state shared by all in-flight requests.
///
#[derive(Default)]
struct NavState {
    cache: NavigationCache,
    tracker: ViewStateTracker,
    issued: u64,
    latest: Option<ContextKey>,
    committed: u64,
    pending: HashMap<String, ItemPhase>,
}

impl NavState {
    /// Register a new request and return its sequence number.
    ///
    fn issue(&mut self, key: &ContextKey) -> u64 {
        self.issued += 1;
        self.latest = Some(key.clone());
        self.issued
    }

    /// A response may commit only if its key is still the most recently
    /// requested one and nothing newer has committed.
    ///
    fn accepts(&self, seq: u64, key: &ContextKey) -> bool {
        self.latest.as_ref() == Some(key) && seq > self.committed
    }

    fn commit(&mut self, seq: u64, location: ViewState) {
        info!("Now viewing {} ({})", location.key, location.label);
        self.committed = seq;
        self.tracker.commit(location);
    }

    /// Returns the last confirmed state of a checklist item.
    ///
    fn confirmed_state(&self, card_id: &str, item_id: &str) -> Option<CheckState> {
        if let Some(phase) = self.pending.get(item_id) {
            return Some(phase.confirmed());
        }
        let key = ContextKey::Checklists {
            card_id: card_id.to_owned(),
        };
        self.cache.lookup(&key)?.find_item(item_id)?.state
    }

    /// Returns true if the card or its move targets are the current view and
    /// no other navigation has been requested since.
    ///
    fn still_on_card(&self, card_id: &str) -> bool {
        let current = match self.tracker.current() {
            Some(current) => &current.key,
            None => return false,
        };
        let on_card = match current {
            ContextKey::Card { card_id: c } | ContextKey::MoveTargets { card_id: c, .. } => {
                c == card_id
            }
            _ => false,
        };
        on_card && self.latest.as_ref() == Some(current)
    }

    /// Returns board and list of a card from its cached detail view.
    ///
    fn card_location(&self, card_id: &str) -> Option<(String, String)> {
        let view = self.cache.lookup(&ContextKey::Card {
            card_id: card_id.to_owned(),
        })?;
        match &*view {
            View::Card(card) => Some((card.board_id.clone(), card.list_id.clone())),
            View::Groups(_) => None,
        }
    }

    /// Returns true if a loaded view of the board contains the list.
    ///
    fn board_has_list(&self, board_id: &str, list_id: &str) -> bool {
        self.cache.iter().any(|(key, view)| match key {
            ContextKey::MoveTargets { board_id: b, .. } if b == board_id => {
                view.find_item(list_id).is_some()
            }
            ContextKey::Lists { board_id: b } if b == board_id => view
                .groups()
                .iter()
                .any(|g| g.key.as_deref() == Some(list_id)),
            _ => false,
        })
    }
}

/// Drives navigation over a resource fetcher.
///
pub struct Navigator<F> {
    fetcher: F,
    state: Mutex<NavState>,
}

impl<F: Fetch> Navigator<F> {
    /// Returns a new instance with an empty cache and unset view state.
    ///
    pub fn new(fetcher: F) -> Self {
        Navigator {
            fetcher,
            state: Mutex::new(NavState::default()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the committed location, if any.
    ///
    pub async fn current(&self) -> Option<ViewState> {
        self.state.lock().await.tracker.current().cloned()
    }

    /// Returns the cached view for the key, if any.
    ///
    pub async fn cached(&self, key: &ContextKey) -> Option<Arc<View>> {
        self.state.lock().await.cache.lookup(key)
    }

    /// Returns the mutation phase of a checklist item of a cached card.
    ///
    pub async fn item_phase(&self, card_id: &str, item_id: &str) -> Option<ItemPhase> {
        let state = self.state.lock().await;
        if let Some(phase) = state.pending.get(item_id) {
            return Some(*phase);
        }
        state
            .confirmed_state(card_id, item_id)
            .map(ItemPhase::Confirmed)
    }

    /// Navigate to a location, serving it from cache when possible.
    ///
    pub async fn navigate(&self, target: ViewState) -> Result<Outcome, NavError> {
        self.ensure_configured()?;
        let seq = {
            let mut state = self.state.lock().await;
            let seq = state.issue(&target.key);
            let hit = state
                .cache
                .entry(&target.key)
                .map(|entry| (Arc::clone(&entry.view), entry.built_at));
            if let Some((view, built_at)) = hit {
                debug!(
                    "Serving {} from cache, built {}s ago",
                    target.key,
                    (Utc::now() - built_at).num_seconds()
                );
                state.commit(seq, target.clone());
                return Ok(Outcome::Committed {
                    location: target,
                    view,
                    cached: true,
                });
            }
            seq
        };

        debug!("Fetching {} (request {})", target.key, seq);
        let built = self.build(&target).await;

        let mut state = self.state.lock().await;
        if !state.accepts(seq, &target.key) {
            warn!("Discarding stale response for {} (request {})", target.key, seq);
            return Ok(Outcome::Superseded);
        }
        let view = Arc::new(built?);
        state.cache.store(target.key.clone(), Arc::clone(&view));
        state.commit(seq, target.clone());
        Ok(Outcome::Committed {
            location: target,
            view,
            cached: false,
        })
    }

    /// Evict the current view and navigate to it again.
    ///
    pub async fn refresh(&self) -> Result<Outcome, NavError> {
        let current = {
            let mut state = self.state.lock().await;
            let current = match state.tracker.current() {
                Some(current) => current.clone(),
                None => {
                    debug!("Ignoring refresh without a current view");
                    return Ok(Outcome::Idle);
                }
            };
            state.cache.evict(&current.key);
            current
        };
        info!("Refreshing {}", current.key);
        self.navigate(current).await
    }

    /// Navigate to the previous location, or reset to the initial state when
    /// there is none.
    ///
    pub async fn back(&self) -> Result<Outcome, NavError> {
        let previous = self.state.lock().await.tracker.previous().cloned();
        match previous {
            Some(previous) => self.navigate(previous).await,
            None => {
                self.home().await;
                Ok(Outcome::Idle)
            }
        }
    }

    /// Reset the view state; in-flight navigations will no longer commit.
    ///
    pub async fn home(&self) {
        let mut state = self.state.lock().await;
        state.tracker.clear();
        state.latest = None;
    }

    /// Move a card to another list of its board.
    ///
    /// On success the views showing either list, the board and the card are
    /// invalidated and the card is shown again, unless the user has moved on
    /// in the meantime. On failure nothing local changes.
    ///
    pub async fn move_card(&self, card_id: &str, list_id: &str) -> Result<Outcome, NavError> {
        self.ensure_configured()?;
        let (board_id, source_list) = {
            let state = self.state.lock().await;
            let (board_id, source_list) =
                state
                    .card_location(card_id)
                    .ok_or_else(|| NavError::UnknownItem {
                        id: card_id.to_owned(),
                    })?;
            if !state.board_has_list(&board_id, list_id) {
                return Err(NavError::ForeignList {
                    list_id: list_id.to_owned(),
                    board_id,
                });
            }
            (board_id, source_list)
        };

        info!("Moving card {} from list {} to list {}...", card_id, source_list, list_id);
        if let Err(e) = self
            .fetcher
            .fetch(&Endpoint::move_card(card_id, list_id))
            .await
        {
            error!("Failed to move card {}: {}", card_id, e);
            return Err(NavError::MutationFailed { source: e });
        }
        info!("Card {} moved to list {}.", card_id, list_id);

        {
            let mut state = self.state.lock().await;
            let stale = [
                ContextKey::List {
                    list_id: source_list,
                },
                ContextKey::List {
                    list_id: list_id.to_owned(),
                },
                ContextKey::Lists {
                    board_id: board_id.clone(),
                },
                ContextKey::Card {
                    card_id: card_id.to_owned(),
                },
                ContextKey::MoveTargets {
                    card_id: card_id.to_owned(),
                    board_id,
                },
                ContextKey::MyCards,
            ];
            for key in stale.iter() {
                state.cache.evict(key);
            }
            if !state.still_on_card(card_id) {
                info!("Not showing card {} again, the view has changed.", card_id);
                return Ok(Outcome::Superseded);
            }
        }
        self.navigate(ViewState::card(card_id)).await
    }

    /// Toggle a checklist item relative to its last confirmed state.
    ///
    pub async fn toggle_check_item(
        &self,
        card_id: &str,
        item_id: &str,
    ) -> Result<CheckState, NavError> {
        let confirmed = self
            .state
            .lock()
            .await
            .confirmed_state(card_id, item_id)
            .ok_or_else(|| NavError::UnknownItem {
                id: item_id.to_owned(),
            })?;
        self.set_check_item(card_id, item_id, confirmed.toggled())
            .await
    }

    /// Set a checklist item to `target`.
    ///
    /// The item is pending until the server answers; on success the cached
    /// checklist takes the new state, on failure the item returns to its prior
    /// confirmed state. Only one change per item may be in flight.
    ///
    pub async fn set_check_item(
        &self,
        card_id: &str,
        item_id: &str,
        target: CheckState,
    ) -> Result<CheckState, NavError> {
        self.ensure_configured()?;
        let phase = {
            let mut state = self.state.lock().await;
            if state.pending.contains_key(item_id) {
                debug!("Item {} already has a change in flight", item_id);
                return Err(NavError::MutationInFlight {
                    id: item_id.to_owned(),
                });
            }
            let confirmed =
                state
                    .confirmed_state(card_id, item_id)
                    .ok_or_else(|| NavError::UnknownItem {
                        id: item_id.to_owned(),
                    })?;
            let phase = ItemPhase::Confirmed(confirmed).begin(target);
            state.pending.insert(item_id.to_owned(), phase);
            phase
        };

        debug!("Setting item {} of card {} to {}", item_id, card_id, target.as_str());
        let result = self
            .fetcher
            .fetch(&Endpoint::set_check_item(card_id, item_id, target))
            .await;

        let mut state = self.state.lock().await;
        state.pending.remove(item_id);
        match result {
            Ok(_) => {
                let confirmed = phase.confirm().confirmed();
                let key = ContextKey::Checklists {
                    card_id: card_id.to_owned(),
                };
                state.cache.update(&key, |view| {
                    if let View::Groups(groups) = view {
                        for item in groups.iter_mut().flat_map(|g| g.items.iter_mut()) {
                            if item.id == item_id {
                                item.state = Some(confirmed);
                                item.icon = Some(Icon::for_state(confirmed));
                            }
                        }
                    }
                });
                info!("Item {} is now {}.", item_id, confirmed.as_str());
                Ok(confirmed)
            }
            Err(e) => {
                let restored = phase.rollback().confirmed();
                error!(
                    "Failed to update item {}, keeping {}: {}",
                    item_id,
                    restored.as_str(),
                    e
                );
                Err(NavError::MutationFailed { source: e })
            }
        }
    }

    /// Send a pin for every open card of the member due within the window.
    ///
    pub async fn export_due_pins<S: PinSink>(
        &self,
        sink: &S,
        now: DateTime<Utc>,
    ) -> Result<ExportSummary, NavError> {
        self.ensure_configured()?;
        info!("Exporting due cards to the timeline...");
        let cards: Vec<Card> = self.get(&Endpoint::my_cards()).await?;
        let mut summary = ExportSummary::default();
        for card in cards.iter().filter(|c| !c.closed) {
            summary.evaluated += 1;
            let due = match hierarchy::parse_due(card.due.as_deref()) {
                Some(due) if timeline::within_window(due, now) => due,
                _ => continue,
            };
            let pin = timeline::pin_for(card, due);
            if let Err(e) = sink.insert_pin(&pin).await {
                warn!("Pin for card {} was not accepted: {}", card.id, e);
            }
            summary.pinned += 1;
        }
        info!(
            "Evaluated {} cards, sent {} pins.",
            summary.evaluated, summary.pinned
        );
        Ok(summary)
    }

    fn ensure_configured(&self) -> Result<(), NavError> {
        if self.fetcher.is_configured() {
            Ok(())
        } else {
            warn!("Skipping request, access token not configured.");
            Err(NavError::NotConfigured)
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, FetchError> {
        decode(self.fetcher.fetch(endpoint).await?)
    }

    /// Fetch and build the view for a location.
    ///
    async fn build(&self, target: &ViewState) -> Result<View, NavError> {
        let view = match &target.key {
            ContextKey::Organizations => {
                let organizations = self.get(&Endpoint::my_organizations()).await?;
                View::Groups(hierarchy::organizations(organizations))
            }
            ContextKey::Boards { filter } => {
                let boards = self.get(&Endpoint::my_boards(filter.query_filter())).await?;
                View::Groups(hierarchy::boards(boards, filter))
            }
            ContextKey::Lists { board_id } => {
                let mut lists: Vec<List> = self.get(&Endpoint::board_lists(board_id, true)).await?;
                let cards = lists
                    .iter_mut()
                    .flat_map(|l| std::mem::take(&mut l.cards))
                    .collect();
                View::Groups(hierarchy::lists(lists, cards))
            }
            ContextKey::List { list_id } => {
                let cards = self.get(&Endpoint::list_cards(list_id)).await?;
                View::Groups(hierarchy::list_cards(&target.label, list_id, cards))
            }
            ContextKey::Card { card_id } => {
                let card = self.get(&Endpoint::card(card_id)).await?;
                View::Card(hierarchy::card_detail(card))
            }
            ContextKey::Checklists { card_id } => {
                let checklists: Vec<Checklist> =
                    self.get(&Endpoint::card_checklists(card_id)).await?;
                View::Groups(hierarchy::checklists(checklists))
            }
            ContextKey::MoveTargets { board_id, .. } => {
                let lists = self.get(&Endpoint::board_lists(board_id, false)).await?;
                View::Groups(hierarchy::move_targets(board_id, lists))
            }
            ContextKey::MyCards => self.build_my_cards().await?,
        };
        Ok(view)
    }

    /// Fetch the member's cards, then the titles of all their lists
    /// concurrently. The view is built only once every title has arrived.
    ///
    async fn build_my_cards(&self) -> Result<View, NavError> {
        let cards: Vec<Card> = self.get(&Endpoint::my_cards()).await?;
        let list_ids = hierarchy::distinct_list_ids(&cards);
        let expected = list_ids.len();
        debug!("Resolving titles of {} lists", expected);

        let lookups = list_ids.iter().map(|id| async move {
            let list: List = self.get(&Endpoint::list_with_board(id)).await?;
            let title = match &list.board {
                Some(board) => format!("{} > {}", board.name, list.name),
                None => list.name.clone(),
            };
            Ok::<_, FetchError>((id.clone(), title))
        });
        let titles: HashMap<String, String> = futures::future::try_join_all(lookups)
            .await
            .map_err(|source| {
                error!("Abandoning my cards, a list lookup failed: {}", source);
                NavError::AggregateIncomplete { expected, source }
            })?
            .into_iter()
            .collect();

        Ok(View::Groups(hierarchy::my_cards(cards, &titles)))
    }
}

#[cfg(test)]
mod tests;
