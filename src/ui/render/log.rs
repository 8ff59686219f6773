use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let block = Block::default()
        .title("Log (` to hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style());

    let visible = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .log()
        .tail(visible)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .style(styling::muted_text_style())
        .block(block);
    frame.render_widget(list, size);
}
