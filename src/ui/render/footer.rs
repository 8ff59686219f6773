use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

const MENU_HINTS: &str = "j/k: move  enter: open  `: log  q: quit";
const VIEW_HINTS: &str = "j/k: move  enter: open  o: open list/item  esc: back  r: refresh  q: quit";
const OVERLAY_HINTS: &str = "enter: select  esc: close";

/// Render the status line: feedback flash, loading spinner, last error or
/// key hints.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let mut spans = vec![];
    if state.is_flash_lit() {
        spans.push(Span::styled("● ", styling::flash_style()));
    }
    if let Some(label) = state.loading() {
        spans.push(Span::styled(
            format!("{} {}...", spinner::frame(state.spinner_index()), label),
            styling::normal_text_style(),
        ));
    } else if let Some(status) = state.status() {
        spans.push(Span::styled(status.to_string(), styling::error_text_style()));
    } else {
        let hints = match (state.overlay(), state.location()) {
            (Some(_), _) => OVERLAY_HINTS,
            (None, None) => MENU_HINTS,
            (None, Some(_)) => VIEW_HINTS,
        };
        spans.push(Span::styled(hints, styling::muted_text_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}
