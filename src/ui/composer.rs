//! Composer field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::{composer_state::ComposerState, theme::Theme};

use super::styles;

const PLACEHOLDER_TEXT: &str = "Type your message here...";
const WAITING_TITLE: &str = "Waiting for reply...";
const IDLE_TITLE: &str = "Message";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

/// Renders the composer and places the terminal cursor inside it.
pub fn render_composer(
    frame: &mut Frame<'_>,
    area: Rect,
    composer: &ComposerState,
    composing: bool,
    theme: Theme,
) {
    let border_style = if composing {
        styles::border_style(theme)
    } else {
        styles::active_border_style(theme)
    };
    let title = if composing { WAITING_TITLE } else { IDLE_TITLE };

    let text_width = usize::from(area.width)
        .saturating_sub(2)
        .saturating_sub(PROMPT_SYMBOL.len());
    let (visible, cursor_col) =
        visible_window(composer.text(), composer.cursor_position(), text_width);

    let paragraph = Paragraph::new(build_input_line(&visible, theme)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(PROMPT_SYMBOL.len() as u16)
        .saturating_add(cursor_col.min(u16::MAX as usize) as u16);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn build_input_line(visible: &str, theme: Theme) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style(theme));

    if visible.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(
                PLACEHOLDER_TEXT.to_owned(),
                styles::input_placeholder_style(theme),
            ),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(visible.to_owned(), styles::input_text_style(theme)),
        ])
    }
}

/// Slice of `text` that fits in `width` columns with the cursor in view,
/// plus the cursor column inside that slice.
fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let width = width.max(1);

    let mut start = 0;
    let mut cursor_col: usize = chars[..cursor].iter().map(|&ch| char_width(ch)).sum();
    while cursor_col >= width && start < cursor {
        cursor_col -= char_width(chars[start]);
        start += 1;
    }

    let mut used = 0;
    let visible = chars[start..]
        .iter()
        .take_while(|&&ch| {
            used += char_width(ch);
            used <= width
        })
        .collect();

    (visible, cursor_col)
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}
