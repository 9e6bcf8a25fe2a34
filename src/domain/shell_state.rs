use super::{
    chat_session::ChatSession, composer_state::ComposerState,
    prompt_templates::TemplatePickerState, theme::Theme,
};

/// Modal layer drawn over the chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Templates(TemplatePickerState),
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    exit: Option<ShellExit>,
    display_name: String,
    theme: Theme,
    chat: ChatSession,
    composer: ComposerState,
    overlay: Overlay,
    notice: Option<String>,
}

impl ShellState {
    pub fn new(display_name: impl Into<String>, theme: Theme) -> Self {
        Self {
            exit: None,
            display_name: display_name.into(),
            theme,
            chat: ChatSession::with_greeting(),
            composer: ComposerState::default(),
            overlay: Overlay::None,
            notice: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.exit.is_none()
    }

    pub fn exit(&self) -> Option<ShellExit> {
        self.exit
    }

    pub fn stop(&mut self, reason: ShellExit) {
        self.exit = Some(reason);
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub fn composer(&self) -> &ComposerState {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut ComposerState {
        &mut self.composer
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
