use ratatui::style::{Color, Modifier, Style};

const PRIMARY: Color = Color::Rgb(0, 121, 191);
const TEXT: Color = Color::Rgb(220, 223, 228);
const MUTED: Color = Color::Rgb(128, 134, 145);
const BORDER_ACTIVE: Color = Color::Rgb(97, 189, 79);
const BORDER_NORMAL: Color = Color::Rgb(80, 84, 92);
const ERROR: Color = Color::Rgb(235, 90, 70);
const FLASH: Color = Color::Rgb(242, 214, 0);

/// Return the border style for active blocks.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(BORDER_ACTIVE)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(BORDER_NORMAL)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for group headers.
///
pub fn group_title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style() -> Style {
    Style::default()
        .fg(PRIMARY)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Return the style for items waiting on the server.
///
pub fn pending_item_style() -> Style {
    normal_text_style().add_modifier(Modifier::ITALIC)
}

/// Return the style for normal text.
///
pub fn normal_text_style() -> Style {
    Style::default().fg(TEXT)
}

/// Return the style for hints and secondary text.
///
pub fn muted_text_style() -> Style {
    Style::default().fg(MUTED)
}

/// Return the style for error messages.
///
pub fn error_text_style() -> Style {
    Style::default().fg(ERROR)
}

/// Return the style for the feedback flash.
///
pub fn flash_style() -> Style {
    Style::default().fg(FLASH).add_modifier(Modifier::BOLD)
}
