//! Style definitions for the UI components, one palette per theme.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::theme::Theme;

// =============================================================================
// Frame styles
// =============================================================================

/// Background and default foreground for the whole screen.
pub fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
    }
}

pub fn header_style(theme: Theme) -> Style {
    base_style(theme).add_modifier(Modifier::BOLD)
}

pub fn border_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Gray),
        Theme::Dark => Style::default().fg(Color::DarkGray),
    }
}

/// Border of the focused widget (composer, popups).
pub fn active_border_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Blue),
        Theme::Dark => Style::default().fg(Color::Cyan),
    }
}

pub fn hint_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
    }
}

/// Status notices such as export results.
pub fn notice_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Green),
        Theme::Dark => Style::default().fg(Color::LightGreen),
    }
}

pub fn selection_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

// =============================================================================
// Transcript styles
// =============================================================================

pub fn bot_sender_style(theme: Theme) -> Style {
    let color = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn user_sender_style(theme: Theme) -> Style {
    let color = match theme {
        Theme::Light => Color::Magenta,
        Theme::Dark => Color::LightMagenta,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn message_time_style(theme: Theme) -> Style {
    hint_style(theme)
}

pub fn message_text_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black),
        Theme::Dark => Style::default().fg(Color::White),
    }
}

pub fn typing_indicator_style(theme: Theme) -> Style {
    hint_style(theme).add_modifier(Modifier::ITALIC)
}

/// Style for date separator line.
pub fn date_separator_style(theme: Theme) -> Style {
    hint_style(theme)
}

// =============================================================================
// Composer styles
// =============================================================================

pub fn input_prompt_style(theme: Theme) -> Style {
    active_border_style(theme).add_modifier(Modifier::BOLD)
}

pub fn input_text_style(theme: Theme) -> Style {
    message_text_style(theme)
}

pub fn input_placeholder_style(theme: Theme) -> Style {
    hint_style(theme).add_modifier(Modifier::ITALIC)
}
