use super::main::glyph;
use super::Frame;
use crate::nav::Icon;
use crate::state::{Overlay, State};
use crate::trello::CheckState;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Returns a rectangle centered in `area` using the given percentages.
///
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the overlay drawn over the main area, if any.
///
pub fn overlay(frame: &mut Frame, area: Rect, state: &State) {
    let overlay = match state.overlay() {
        Some(overlay) => overlay,
        None => return,
    };
    let size = centered(area, 70, 60);
    frame.render_widget(Clear, size);
    let block = |title: &str| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style())
            .title(Span::styled(
                title.to_string(),
                styling::active_block_title_style(),
            ))
    };

    match overlay {
        Overlay::CardActions { actions, .. } => {
            let items: Vec<ListItem> = actions
                .iter()
                .map(|action| ListItem::new(action.title()))
                .collect();
            let list = List::new(items)
                .style(styling::normal_text_style())
                .highlight_style(styling::active_list_item_style())
                .block(block("Card"));
            let mut list_state = ListState::default().with_selected(Some(state.overlay_index()));
            frame.render_stateful_widget(list, size, &mut list_state);
        }
        Overlay::ItemDetail { item, .. } => {
            let current = state
                .view()
                .and_then(|v| v.find_item(&item.id))
                .unwrap_or(item);
            let (icon, label) = match state.displayed_state(current) {
                Some(CheckState::Complete) => (Icon::Checked, "Complete"),
                _ => (Icon::Unchecked, "Incomplete"),
            };
            let lines = vec![
                Line::from(Span::styled(
                    current.title.clone(),
                    styling::normal_text_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} {}", glyph(icon), label),
                    styling::normal_text_style(),
                )),
                Line::from(""),
                Line::from(Span::styled("Enter: toggle", styling::muted_text_style())),
            ];
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(block("Checklist item"));
            frame.render_widget(paragraph, size);
        }
        Overlay::Message { title, text } => {
            let paragraph = Paragraph::new(text.clone())
                .style(styling::normal_text_style())
                .wrap(Wrap { trim: true })
                .block(block(title.as_str()));
            frame.render_widget(paragraph, size);
        }
    }
}
