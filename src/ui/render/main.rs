use super::Frame;
use crate::nav::{CardDetail, Group, Icon, View};
use crate::state::{MenuEntry, State};
use crate::trello::CheckState;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

const MENU_TITLE: &str = "Trello Pocket";
const EMPTY_TEXT: &str = "Nothing here.";

/// Returns the glyph drawn for an icon.
///
pub fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Board => "▦",
        Icon::Organization => "◆",
        Icon::Card => "▭",
        Icon::Calendar => "◷",
        Icon::Checked => "☑",
        Icon::Unchecked => "☐",
        Icon::List => "≡",
    }
}

/// Render the main area: the menu, a grouped view or a card.
///
pub fn main(frame: &mut Frame, size: Rect, state: &State) {
    let title = state
        .location()
        .map(|l| l.label.clone())
        .unwrap_or_else(|| MENU_TITLE.to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(title, styling::active_block_title_style()));

    match state.view().map(|v| &**v) {
        None => menu(frame, size, state, block),
        Some(View::Groups(groups)) => groups_view(frame, size, state, groups, block),
        Some(View::Card(card)) => card_view(frame, size, card, block),
    }
}

fn menu(frame: &mut Frame, size: Rect, state: &State, block: Block) {
    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| ListItem::new(entry.title()))
        .collect();
    let list = List::new(items)
        .style(styling::normal_text_style())
        .highlight_style(styling::active_list_item_style())
        .block(block);
    let mut list_state = ListState::default().with_selected(Some(state.menu_index()));
    frame.render_stateful_widget(list, size, &mut list_state);
}

fn groups_view(frame: &mut Frame, size: Rect, state: &State, groups: &[Group], block: Block) {
    if groups.iter().all(|g| g.items.is_empty()) {
        let paragraph = Paragraph::new(EMPTY_TEXT)
            .style(styling::muted_text_style())
            .block(block);
        frame.render_widget(paragraph, size);
        return;
    }

    let mut rows = vec![];
    let mut selected_row = None;
    let mut item_index = 0;
    for group in groups.iter().filter(|g| !g.items.is_empty()) {
        rows.push(ListItem::new(Line::from(Span::styled(
            group.title.clone(),
            styling::group_title_style(),
        ))));
        for item in &group.items {
            if item_index == state.item_index() {
                selected_row = Some(rows.len());
            }
            item_index += 1;

            let pending = state
                .pending_phase(&item.id)
                .map(|p| p.is_pending())
                .unwrap_or(false);
            let icon = match state.displayed_state(item) {
                Some(CheckState::Complete) => Some(Icon::Checked),
                Some(CheckState::Incomplete) => Some(Icon::Unchecked),
                None => item.icon,
            };
            let style = if pending {
                styling::pending_item_style()
            } else {
                styling::normal_text_style()
            };
            let text = match icon {
                Some(icon) => format!("  {} {}", glyph(icon), item.title),
                None => format!("  {}", item.title),
            };
            rows.push(ListItem::new(Line::from(Span::styled(text, style))));
        }
    }

    let list = List::new(rows)
        .highlight_style(styling::active_list_item_style())
        .block(block);
    let mut list_state = ListState::default().with_selected(selected_row);
    frame.render_stateful_widget(list, size, &mut list_state);
}

fn card_view(frame: &mut Frame, size: Rect, card: &CardDetail, block: Block) {
    let mut lines = vec![Line::from(Span::styled(
        card.title.clone(),
        styling::active_block_title_style(),
    ))];
    if let Some(subtitle) = &card.subtitle {
        let icon = card.icon.map(glyph).unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("{} {}", icon, subtitle),
            styling::muted_text_style(),
        )));
    }
    lines.push(Line::from(""));
    for line in card.body.lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            styling::normal_text_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: actions",
        styling::muted_text_style(),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, size);
}
