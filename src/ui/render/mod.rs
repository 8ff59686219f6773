mod footer;
mod log;
mod main;
mod overlay;

use super::*;
use crate::state::State;
use footer::footer;
use main::main;
use overlay::overlay;
use ratatui::layout::{Constraint, Direction, Layout};

use self::log::log;

/// Height of the log panel when visible.
///
const LOG_HEIGHT: u16 = 10;

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &State) {
    let mut constraints = vec![Constraint::Min(3)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    main(frame, chunks[0], state);
    if state.is_log_visible() {
        log(frame, chunks[1], state);
    }
    footer(frame, chunks[chunks.len() - 1], state);
    if state.overlay().is_some() {
        overlay(frame, chunks[0], state);
    }
}
