use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::nav::mutation::ItemPhase;
use crate::nav::{BoardFilter, ContextKey, Group, Item, View, ViewState};
use crate::trello::CheckState;
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::StateError;
use super::navigation::{CardAction, MenuEntry, Overlay, Pulse};

/// Houses data representative of application state.
///
/// The location and view are only ever replaced together, from committed
/// navigation outcomes. Without a location the main menu is shown.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    log: LogBuffer,
    location: Option<ViewState>,
    view: Option<Arc<View>>,
    overlay: Option<Overlay>,
    overlay_index: usize,
    menu_index: usize,
    item_index: usize,
    positions: HashMap<ContextKey, usize>,
    pending: HashMap<String, ItemPhase>,
    loading: Option<String>,
    spinner_index: usize,
    status: Option<String>,
    flash: Option<(Pulse, usize)>,
    show_log: bool,
    terminal_size: Rect,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            log: LogBuffer::default(),
            location: None,
            view: None,
            overlay: None,
            overlay_index: 0,
            menu_index: 0,
            item_index: 0,
            positions: HashMap::new(),
            pending: HashMap::new(),
            loading: None,
            spinner_index: 0,
            status: None,
            flash: None,
            show_log: false,
            terminal_size: Rect::default(),
        }
    }
}

impl State {
    /// Return new state with the sender used to dispatch network events and
    /// the buffer shown in the log panel.
    ///
    pub fn new(net_sender: Option<NetworkEventSender>, log: LogBuffer) -> Self {
        State {
            net_sender,
            log,
            ..State::default()
        }
    }

    pub fn location(&self) -> Option<&ViewState> {
        self.location.as_ref()
    }

    pub fn view(&self) -> Option<&Arc<View>> {
        self.view.as_ref()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_index(&self) -> usize {
        self.overlay_index
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Returns the label of the request in flight, if any.
    ///
    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    /// Returns the last error shown in the status bar.
    ///
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    /// Advance the spinner while loading and count down the feedback flash.
    ///
    pub fn tick(&mut self) -> &mut Self {
        if self.loading.is_some() {
            self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        }
        self.flash = match self.flash {
            Some((pulse, remaining)) if remaining > 1 => Some((pulse, remaining - 1)),
            _ => None,
        };
        self
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Returns true while the feedback flash is lit.
    ///
    pub fn is_flash_lit(&self) -> bool {
        self.flash
            .map(|(pulse, remaining)| pulse.lit(remaining))
            .unwrap_or(false)
    }

    pub fn flash(&mut self, pulse: Pulse) -> &mut Self {
        self.flash = Some((pulse, pulse.ticks()));
        self
    }

    /// Returns the items of the current view in display order.
    ///
    pub fn items(&self) -> Vec<(&Group, &Item)> {
        self.view
            .as_ref()
            .map(|view| {
                view.groups()
                    .iter()
                    .flat_map(|g| g.items.iter().map(move |i| (g, i)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the selected item and its group.
    ///
    pub fn selected_item(&self) -> Option<(&Group, &Item)> {
        self.items().into_iter().nth(self.item_index)
    }

    /// Returns the mutation phase shown for an item while a toggle is in flight.
    ///
    pub fn pending_phase(&self, item_id: &str) -> Option<ItemPhase> {
        self.pending.get(item_id).copied()
    }

    /// Returns the state to display for a checklist item.
    ///
    pub fn displayed_state(&self, item: &Item) -> Option<CheckState> {
        match self.pending.get(&item.id) {
            Some(phase) => Some(phase.displayed()),
            None => item.state,
        }
    }

    pub fn set_pending(&mut self, item_id: &str, phase: ItemPhase) -> &mut Self {
        self.pending.insert(item_id.to_owned(), phase);
        self
    }

    pub fn clear_pending(&mut self, item_id: &str) -> &mut Self {
        self.pending.remove(item_id);
        self
    }

    /// Show a committed location and its view.
    ///
    pub fn show(&mut self, location: ViewState, view: Arc<View>) -> &mut Self {
        if let Some(previous) = &self.location {
            self.positions.insert(previous.key.clone(), self.item_index);
        }
        let count = view.groups().iter().map(|g| g.items.len()).sum::<usize>();
        let remembered = self.positions.get(&location.key).copied().unwrap_or(0);
        self.item_index = remembered.min(count.saturating_sub(1));
        self.location = Some(location);
        self.view = Some(view);
        self.close_overlay();
        self.loading = None;
        self.status = None;
        self
    }

    /// Replace the view of the current location, keeping the selection.
    ///
    pub fn replace_view(&mut self, key: &ContextKey, view: Arc<View>) -> &mut Self {
        if self.location.as_ref().map(|l| &l.key) == Some(key) {
            self.view = Some(view);
        }
        self
    }

    /// Return to the main menu.
    ///
    pub fn show_menu(&mut self) -> &mut Self {
        self.location = None;
        self.view = None;
        self.positions.clear();
        self.item_index = 0;
        self.close_overlay();
        self.loading = None;
        self
    }

    pub fn clear_loading(&mut self) -> &mut Self {
        self.loading = None;
        self
    }

    pub fn show_error(&mut self, message: &str) -> &mut Self {
        self.loading = None;
        self.status = Some(message.to_owned());
        self
    }

    pub fn show_message(&mut self, title: &str, text: &str) -> &mut Self {
        self.loading = None;
        self.overlay = Some(Overlay::Message {
            title: title.to_owned(),
            text: text.to_owned(),
        });
        self.overlay_index = 0;
        self
    }

    fn close_overlay(&mut self) {
        self.overlay = None;
        self.overlay_index = 0;
    }

    /// Select the next entry, wrapping around.
    ///
    pub fn next(&mut self) -> &mut Self {
        let len = self.entry_count();
        if len > 0 {
            let index = self.index_mut();
            *index = (*index + 1) % len;
        }
        self
    }

    /// Select the previous entry, wrapping around.
    ///
    pub fn previous(&mut self) -> &mut Self {
        let len = self.entry_count();
        if len > 0 {
            let index = self.index_mut();
            *index = (*index + len - 1) % len;
        }
        self
    }

    fn entry_count(&self) -> usize {
        match (&self.overlay, &self.view) {
            (Some(overlay), _) => overlay.len(),
            (None, None) => MenuEntry::ALL.len(),
            (None, Some(_)) => self.items().len(),
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match (&self.overlay, &self.view) {
            (Some(_), _) => &mut self.overlay_index,
            (None, None) => &mut self.menu_index,
            (None, Some(_)) => &mut self.item_index,
        }
    }

    /// Act on the selected entry. A long select opens the alternative target
    /// where one exists (the list of a card, the detail of a checklist item).
    ///
    pub fn select(&mut self, long: bool) -> Result<(), StateError> {
        if let Some(overlay) = self.overlay.clone() {
            return self.select_overlay(overlay);
        }
        let location = match self.location.clone() {
            Some(location) => location,
            None => return self.select_menu(),
        };

        if let Some(View::Card(card)) = self.view.as_deref() {
            let mut actions = vec![CardAction::Move];
            if card.check_items > 0 {
                actions.push(CardAction::Checklists);
            }
            self.overlay = Some(Overlay::CardActions {
                card_id: card.id.clone(),
                board_id: card.board_id.clone(),
                actions,
            });
            self.overlay_index = 0;
            return Ok(());
        }

        let (group, item) = self
            .selected_item()
            .map(|(g, i)| (g.clone(), i.clone()))
            .ok_or(StateError::NothingSelected)?;
        let event = match location.key {
            ContextKey::Organizations => NetworkEvent::Navigate(ViewState {
                label: format!("Boards of {}", item.title),
                ..ViewState::boards(BoardFilter::Organization(item.id))
            }),
            ContextKey::Boards { .. } => {
                NetworkEvent::Navigate(ViewState::lists(&item.id, &item.title))
            }
            ContextKey::Lists { .. } if long => match &group.key {
                Some(list_id) => NetworkEvent::Navigate(ViewState::list(list_id, &group.title)),
                None => return Err(StateError::NothingSelected),
            },
            ContextKey::Lists { .. } | ContextKey::List { .. } | ContextKey::MyCards => {
                NetworkEvent::Navigate(ViewState::card(&item.id))
            }
            ContextKey::MoveTargets { card_id, .. } => NetworkEvent::MoveCard {
                card_id,
                list_id: item.id,
            },
            ContextKey::Checklists { card_id } if long => {
                self.overlay = Some(Overlay::ItemDetail { card_id, item });
                self.overlay_index = 0;
                return Ok(());
            }
            ContextKey::Checklists { card_id } => NetworkEvent::ToggleCheckItem {
                card_id,
                item_id: item.id,
            },
            ContextKey::Card { .. } => return Err(StateError::NothingSelected),
        };
        self.dispatch(event)
    }

    fn select_menu(&mut self) -> Result<(), StateError> {
        let entry = MenuEntry::ALL
            .get(self.menu_index)
            .copied()
            .ok_or(StateError::NothingSelected)?;
        match entry.target() {
            Some(target) => self.dispatch(NetworkEvent::Navigate(target)),
            None => self.dispatch(NetworkEvent::ExportTimeline),
        }
    }

    fn select_overlay(&mut self, overlay: Overlay) -> Result<(), StateError> {
        match overlay {
            Overlay::CardActions {
                card_id,
                board_id,
                actions,
            } => {
                let action = actions
                    .get(self.overlay_index)
                    .copied()
                    .ok_or(StateError::NothingSelected)?;
                self.close_overlay();
                let target = match action {
                    CardAction::Move => ViewState::move_targets(&card_id, &board_id),
                    CardAction::Checklists => ViewState::checklists(&card_id),
                };
                self.dispatch(NetworkEvent::Navigate(target))
            }
            Overlay::ItemDetail { card_id, item } => {
                self.dispatch(NetworkEvent::ToggleCheckItem {
                    card_id,
                    item_id: item.id,
                })
            }
            Overlay::Message { .. } => {
                self.close_overlay();
                Ok(())
            }
        }
    }

    /// Close the overlay, or go back to the previous location.
    ///
    pub fn back(&mut self) -> Result<(), StateError> {
        if self.overlay.is_some() {
            self.close_overlay();
            return Ok(());
        }
        if self.location.is_none() {
            return Ok(());
        }
        self.dispatch(NetworkEvent::Back)
    }

    /// Refetch the current location.
    ///
    pub fn refresh(&mut self) -> Result<(), StateError> {
        if self.location.is_none() {
            debug!("Nothing to refresh on the main menu.");
            return Ok(());
        }
        self.dispatch(NetworkEvent::Refresh)
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&mut self, event: NetworkEvent) -> Result<(), StateError> {
        self.loading = Some(event.label());
        self.status = None;
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Recieved error from network dispatch: {}", err);
                self.loading = None;
                return Err(StateError::ChannelClosed);
            }
        }
        Ok(())
    }
}
