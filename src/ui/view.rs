use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    prompt_templates::{TemplatePickerState, TEMPLATE_CATEGORIES},
    shell_state::{Overlay, ShellState},
    theme::Theme,
};

use super::composer::render_composer;
use super::message_rendering::{build_message_list_elements, element_to_list_item, tail_offset};
use super::styles;

const APP_TITLE: &str = "chatterm";
const KEY_HINTS: &str = "Enter: send | Up/Down: history | ^T: templates | ^L: clear | ^D: theme | ^E/^S: export txt/json | ^O: logout | ^Q: quit";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let theme = state.theme();
    frame.render_widget(Block::default().style(styles::base_style(theme)), frame.area());

    // Composer takes 3 lines: 1 border + 1 text + 1 border
    let [header_area, transcript_area, composer_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(
        Paragraph::new(header_line(state)).style(styles::header_style(theme)),
        header_area,
    );
    render_transcript(frame, transcript_area, state);
    render_composer(
        frame,
        composer_area,
        state.composer(),
        state.chat().is_composing(),
        theme,
    );

    let status_style = if state.notice().is_some() {
        styles::notice_style(theme)
    } else {
        styles::hint_style(theme)
    };
    frame.render_widget(
        Paragraph::new(status_line(state)).style(status_style),
        status_area,
    );

    match state.overlay() {
        Overlay::None => {}
        Overlay::Templates(picker) => render_template_picker(frame, picker, theme),
        Overlay::ConfirmClear => render_confirm_clear(frame, theme),
    }
}

fn header_line(state: &ShellState) -> String {
    format!(
        "{APP_TITLE} | Welcome, {}! | theme: {}",
        state.display_name(),
        state.theme().as_label()
    )
}

fn render_transcript(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let theme = state.theme();
    let block = Block::default()
        .title("Chat")
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme));

    let chat = state.chat();
    let elements = build_message_list_elements(chat.messages(), chat.is_composing());
    if elements.is_empty() {
        let panel = Paragraph::new("No messages yet. Say hello!")
            .style(styles::hint_style(theme))
            .block(block);
        frame.render_widget(panel, area);
        return;
    }

    // Inner size = area minus borders
    let inner_width = usize::from(area.width.saturating_sub(2));
    let viewport_height = usize::from(area.height.saturating_sub(2));

    let items: Vec<ListItem<'static>> = elements
        .iter()
        .map(|element| element_to_list_item(element, theme, inner_width))
        .collect();
    let heights: Vec<usize> = items.iter().map(ListItem::height).collect();

    let mut list_state = ListState::default();
    *list_state.offset_mut() = tail_offset(&heights, viewport_height);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}

fn status_line(state: &ShellState) -> String {
    if let Some(notice) = state.notice() {
        return notice.to_owned();
    }

    match state.overlay() {
        Overlay::Templates(_) => {
            "Left/Right: category | Up/Down: select | Enter: use prompt | Esc: close".to_owned()
        }
        Overlay::ConfirmClear => "y: clear chat | any other key: cancel".to_owned(),
        Overlay::None if state.chat().is_composing() => format!("Bot is typing... | {KEY_HINTS}"),
        Overlay::None => KEY_HINTS.to_owned(),
    }
}

fn render_template_picker(frame: &mut Frame<'_>, picker: TemplatePickerState, theme: Theme) {
    let area = centered_rect(frame.area(), 60, 10);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title("Prompt templates")
        .borders(Borders::ALL)
        .border_style(styles::active_border_style(theme))
        .style(styles::base_style(theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, list_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .areas(inner);

    frame.render_widget(Paragraph::new(category_tabs(picker, theme)), tabs_area);

    let items: Vec<ListItem<'static>> = picker
        .category()
        .prompts
        .iter()
        .map(|prompt| ListItem::new(format!("  {prompt}")))
        .collect();
    let list = List::new(items).highlight_style(styles::selection_style());
    let mut list_state = ListState::default();
    list_state.select(Some(picker.prompt_index()));
    frame.render_stateful_widget(list, list_area, &mut list_state);
}

fn category_tabs(picker: TemplatePickerState, theme: Theme) -> Line<'static> {
    let spans = TEMPLATE_CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(index, category)| {
            let style = if index == picker.category_index() {
                styles::selection_style()
            } else {
                styles::hint_style(theme)
            };
            [
                Span::styled(format!(" {} ", category.name), style),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn render_confirm_clear(frame: &mut Frame<'_>, theme: Theme) {
    let area = centered_rect(frame.area(), 44, 3);
    frame.render_widget(Clear, area);

    let dialog = Paragraph::new("Clear all messages? (y/n)")
        .style(styles::base_style(theme))
        .block(
            Block::default()
                .title("Confirm")
                .borders(Borders::ALL)
                .border_style(styles::active_border_style(theme)),
        );
    frame.render_widget(dialog, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}
