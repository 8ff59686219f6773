use crate::nav::{ContextKey, NavError, Navigator, Outcome, ViewState};
use crate::state::{Pulse, State};
use crate::timeline::PinSink;
use crate::trello::Fetch;
use anyhow::Result;
use chrono::Utc;
use log::*;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(ViewState),
    Refresh,
    Back,
    MoveCard { card_id: String, list_id: String },
    ToggleCheckItem { card_id: String, item_id: String },
    ExportTimeline,
}

impl Event {
    /// Returns the text shown while the event is processed.
    ///
    pub fn label(&self) -> String {
        match self {
            Event::Navigate(target) => format!("Loading {}", target.label),
            Event::Refresh => "Refreshing".to_string(),
            Event::Back => "Going back".to_string(),
            Event::MoveCard { .. } => "Moving card".to_string(),
            Event::ToggleCheckItem { .. } => "Updating item".to_string(),
            Event::ExportTimeline => "Sending pins to the timeline".to_string(),
        }
    }
}

/// Specify struct for managing state with network events.
///
/// Handlers are cheap to clone; every event is processed on its own local
/// task so that a slow request never blocks a newer one.
///
pub struct Handler<F, S> {
    state: Arc<Mutex<State>>,
    navigator: Rc<Navigator<F>>,
    sink: Rc<S>,
}

impl<F, S> Clone for Handler<F, S> {
    fn clone(&self) -> Self {
        Handler {
            state: Arc::clone(&self.state),
            navigator: Rc::clone(&self.navigator),
            sink: Rc::clone(&self.sink),
        }
    }
}

impl<F: Fetch, S: PinSink> Handler<F, S> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &Arc<Mutex<State>>, navigator: Navigator<F>, sink: S) -> Self {
        Handler {
            state: Arc::clone(state),
            navigator: Rc::new(navigator),
            sink: Rc::new(sink),
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Navigate(target) => {
                let outcome = self.navigator.navigate(target).await;
                self.apply(outcome, None).await
            }
            Event::Refresh => {
                let outcome = self.navigator.refresh().await;
                self.apply(outcome, Some(Pulse::Double)).await
            }
            Event::Back => match self.navigator.back().await {
                Ok(Outcome::Idle) => {
                    self.state.lock().await.show_menu();
                    Ok(())
                }
                outcome => self.apply(outcome, None).await,
            },
            Event::MoveCard { card_id, list_id } => {
                let outcome = self.navigator.move_card(&card_id, &list_id).await;
                self.apply(outcome, Some(Pulse::Short)).await
            }
            Event::ToggleCheckItem { card_id, item_id } => self.toggle(card_id, item_id).await,
            Event::ExportTimeline => self.export().await,
        }
    }

    /// Show the outcome of a navigation in the state. A committed view is
    /// only shown while it is still the navigator's current location.
    ///
    async fn apply(&self, outcome: Result<Outcome, NavError>, pulse: Option<Pulse>) -> Result<()> {
        let current = match &outcome {
            Ok(Outcome::Committed { .. }) => self.navigator.current().await,
            _ => None,
        };
        let mut state = self.state.lock().await;
        match outcome {
            Ok(Outcome::Committed { location, view, .. })
                if current.as_ref() == Some(&location) =>
            {
                state.show(location, view);
                if let Some(pulse) = pulse {
                    state.flash(pulse);
                }
                Ok(())
            }
            Ok(Outcome::Committed { location, .. }) => {
                debug!("Not showing {}, no longer the current view.", location.label);
                Ok(())
            }
            Ok(Outcome::Superseded) => {
                debug!("Response superseded by a newer request.");
                Ok(())
            }
            Ok(Outcome::Idle) => {
                state.clear_loading();
                Ok(())
            }
            Err(e) => {
                state.show_error(&e.to_string());
                Err(e.into())
            }
        }
    }

    /// Toggle a checklist item, showing its new state while the request is in
    /// flight and reverting the display if it fails.
    ///
    async fn toggle(&self, card_id: String, item_id: String) -> Result<()> {
        if let Some(phase) = self.navigator.item_phase(&card_id, &item_id).await {
            if !phase.is_pending() {
                let target = phase.confirmed().toggled();
                self.state
                    .lock()
                    .await
                    .set_pending(&item_id, phase.begin(target));
            }
        }
        let result = self.navigator.toggle_check_item(&card_id, &item_id).await;
        if let Err(NavError::MutationInFlight { .. }) = result {
            debug!("Ignoring toggle of item {}, a change is in flight.", item_id);
            self.state.lock().await.clear_loading();
            return Ok(());
        }
        let key = ContextKey::Checklists { card_id };
        let view = self.navigator.cached(&key).await;

        let mut state = self.state.lock().await;
        state.clear_pending(&item_id);
        if let Some(view) = view {
            state.replace_view(&key, view);
        }
        match result {
            Ok(_) => {
                state.clear_loading();
                state.flash(Pulse::Short);
                Ok(())
            }
            Err(e) => {
                state.show_error(&e.to_string());
                Err(e.into())
            }
        }
    }

    /// Send pins for the member's due cards and show the summary.
    ///
    async fn export(&self) -> Result<()> {
        let summary = self.navigator.export_due_pins(&*self.sink, Utc::now()).await;
        let mut state = self.state.lock().await;
        match summary {
            Ok(summary) => {
                state.show_message("Timeline", &summary.message());
                state.flash(Pulse::Short);
                Ok(())
            }
            Err(e) => {
                state.show_error(&e.to_string());
                Err(e.into())
            }
        }
    }
}
