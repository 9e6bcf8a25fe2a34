//! Transcript rendering logic.
//!
//! Handles visual formatting of the chat log including:
//! - Multi-line message display (time + sender on first line, text below)
//! - Sender grouping (consecutive messages from one side show the label once)
//! - Date separators between messages from different days
//! - The typing row shown while a reply is pending

use chrono::{DateTime, Local, NaiveDate, Utc};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::{message::Message, theme::Theme};

use super::styles;

const INDENT: &str = "      ";
const TYPING_TEXT: &str = "Bot is typing...";

/// Represents a visual element in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// Date separator line (e.g., "——— 14 Feb 2026 ———").
    DateSeparator(String),
    Message {
        time: String,
        sender: Option<&'static str>,
        is_from_bot: bool,
        content: String,
    },
    Typing,
}

/// Builds the transcript elements, appending the typing placeholder while a
/// reply is pending.
pub fn build_message_list_elements(messages: &[Message], composing: bool) -> Vec<MessageListElement> {
    let placeholder = composing.then(Message::composing_placeholder);
    let mut elements = Vec::new();
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_sender: Option<&'static str> = None;

    for message in messages.iter().chain(placeholder.as_ref()) {
        if message.is_placeholder() {
            elements.push(MessageListElement::Typing);
            continue;
        }

        let local_time = to_local(message.created_at);
        let msg_date = local_time.date_naive();

        if prev_date != Some(msg_date) {
            elements.push(MessageListElement::DateSeparator(format_date(msg_date)));
            prev_sender = None;
        }

        let sender_label = message.sender_label();
        let sender = (prev_sender != Some(sender_label)).then_some(sender_label);

        elements.push(MessageListElement::Message {
            time: local_time.format("%H:%M").to_string(),
            sender,
            is_from_bot: message.is_from_bot,
            content: message.text.clone(),
        });

        prev_date = Some(msg_date);
        prev_sender = Some(sender_label);
    }

    elements
}

/// Converts an element to a list item, wrapping text to `width` columns.
pub fn element_to_list_item(
    element: &MessageListElement,
    theme: Theme,
    width: usize,
) -> ListItem<'static> {
    match element {
        MessageListElement::DateSeparator(date) => date_separator_item(date, theme),
        MessageListElement::Message {
            time,
            sender,
            is_from_bot,
            content,
        } => message_item(time, *sender, *is_from_bot, content, theme, width),
        MessageListElement::Typing => ListItem::new(Line::from(vec![
            Span::raw(INDENT.to_owned()),
            Span::styled(TYPING_TEXT.to_owned(), styles::typing_indicator_style(theme)),
        ])),
    }
}

/// First item index that keeps the newest items visible in `viewport` rows.
pub fn tail_offset(item_heights: &[usize], viewport: usize) -> usize {
    let mut used = 0;

    for (index, height) in item_heights.iter().enumerate().rev() {
        used += height;
        if used > viewport {
            return (index + 1).min(item_heights.len().saturating_sub(1));
        }
    }

    0
}

fn date_separator_item(date: &str, theme: Theme) -> ListItem<'static> {
    let line = Line::from(vec![Span::styled(
        format!("——— {date} ———"),
        styles::date_separator_style(theme),
    )])
    .alignment(Alignment::Center);
    ListItem::new(vec![Line::default(), line])
}

fn message_item(
    time: &str,
    sender: Option<&'static str>,
    is_from_bot: bool,
    content: &str,
    theme: Theme,
    width: usize,
) -> ListItem<'static> {
    let mut lines = Vec::new();

    if let Some(label) = sender {
        let sender_style = if is_from_bot {
            styles::bot_sender_style(theme)
        } else {
            styles::user_sender_style(theme)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{time:>5} "), styles::message_time_style(theme)),
            Span::styled(format!("{label}:"), sender_style),
        ]));
    }

    let text_width = width.saturating_sub(INDENT.len()).max(1);
    for text_line in content.lines() {
        for chunk in wrap_line(text_line, text_width) {
            lines.push(Line::from(vec![
                Span::raw(INDENT.to_owned()),
                Span::styled(chunk, styles::message_text_style(theme)),
            ]));
        }
    }

    ListItem::new(lines)
}

/// Breaks a line at word boundaries by display width. Words longer than
/// `width` are split mid-word.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        let word_width: usize = word.chars().map(char_width).sum();
        let gap = usize::from(!current.is_empty());

        if current_width + gap + word_width <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for ch in word.chars() {
            let ch_width = char_width(ch);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    rows.push(current);
    rows
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

fn to_local(timestamp: DateTime<Utc>) -> DateTime<Local> {
    timestamp.with_timezone(&Local)
}

fn format_date(date: NaiveDate) -> String {
    // Format: "14 Feb 2026"
    date.format("%-d %b %Y").to_string()
}
