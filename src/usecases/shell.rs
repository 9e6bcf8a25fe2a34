use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use crate::{
    domain::{
        events::{AppEvent, KeyInput, ReplyDelivery},
        prompt_templates::TemplatePickerState,
        shell_state::{Overlay, ShellExit, ShellState},
    },
    infra::kv_store::KeyValueStore,
    usecases::{
        contracts::{ReplyDispatcher, ShellOrchestrator},
        export::{export_to_dir, ExportError, ExportFormat},
        session_store::SessionStore,
        theme_store::ThemeStore,
    },
};

const GUEST_NAME: &str = "guest";

pub struct DefaultShellOrchestrator<S, D>
where
    S: KeyValueStore,
    D: ReplyDispatcher,
{
    state: ShellState,
    sessions: SessionStore<S>,
    themes: ThemeStore<S>,
    dispatcher: D,
    export_dir: PathBuf,
}

impl<S, D> DefaultShellOrchestrator<S, D>
where
    S: KeyValueStore,
    D: ReplyDispatcher,
{
    /// Expects both stores to be restored already.
    pub fn new(
        sessions: SessionStore<S>,
        themes: ThemeStore<S>,
        dispatcher: D,
        export_dir: PathBuf,
    ) -> Self {
        let display_name = sessions
            .current()
            .map(|identity| identity.display_name.clone())
            .unwrap_or_else(|| GUEST_NAME.to_owned());
        let state = ShellState::new(display_name, themes.theme());

        Self {
            state,
            sessions,
            themes,
            dispatcher,
            export_dir,
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        match self.state.overlay() {
            Overlay::ConfirmClear => self.handle_confirm_clear_key(&key),
            Overlay::Templates(picker) => self.handle_template_key(picker, &key),
            Overlay::None if key.ctrl => self.handle_command_key(&key),
            Overlay::None => self.handle_composer_key(&key),
        }
    }

    fn handle_confirm_clear_key(&mut self, key: &KeyInput) {
        self.state.set_overlay(Overlay::None);

        if !key.ctrl && key.key.eq_ignore_ascii_case("y") {
            self.state.chat_mut().clear();
            self.state.set_notice("Chat cleared");
            tracing::info!("chat cleared");
        }
    }

    fn handle_template_key(&mut self, mut picker: TemplatePickerState, key: &KeyInput) {
        if key.ctrl {
            if matches!(key.key.as_str(), "t" | "q") {
                self.state.set_overlay(Overlay::None);
            }
            return;
        }

        match key.key.as_str() {
            "left" => picker.previous_category(),
            "right" | "tab" => picker.next_category(),
            "up" => picker.select_previous(),
            "down" => picker.select_next(),
            "enter" => {
                if let Some(prompt) = picker.selected_prompt() {
                    self.state.composer_mut().set_text(prompt);
                }
                self.state.set_overlay(Overlay::None);
                return;
            }
            "esc" => {
                self.state.set_overlay(Overlay::None);
                return;
            }
            _ => {}
        }

        self.state.set_overlay(Overlay::Templates(picker));
    }

    fn handle_command_key(&mut self, key: &KeyInput) {
        self.state.clear_notice();

        match key.key.as_str() {
            "t" => self
                .state
                .set_overlay(Overlay::Templates(TemplatePickerState::default())),
            "l" => {
                if !self.state.chat().messages().is_empty() {
                    self.state.set_overlay(Overlay::ConfirmClear);
                }
            }
            "d" => {
                let theme = self.themes.toggle();
                self.state.set_theme(theme);
            }
            "e" => self.export(ExportFormat::Text),
            "s" => self.export(ExportFormat::Json),
            "o" => {
                self.sessions.logout();
                self.state.stop(ShellExit::LoggedOut);
            }
            "q" | "c" => self.state.stop(ShellExit::Quit),
            _ => {}
        }
    }

    fn handle_composer_key(&mut self, key: &KeyInput) {
        self.state.clear_notice();
        if key.key == "enter" {
            self.submit();
            return;
        }

        let composer = self.state.composer_mut();
        match key.key.as_str() {
            "backspace" => composer.delete_char_before(),
            "delete" => composer.delete_char_at(),
            "left" => composer.move_cursor_left(),
            "right" => composer.move_cursor_right(),
            "home" => composer.move_cursor_home(),
            "end" => composer.move_cursor_end(),
            "up" => composer.history_previous(),
            "down" => composer.history_next(),
            other => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    composer.insert_char(ch);
                }
            }
        }
    }

    /// Sending is disabled while a reply is pending; the draft is kept.
    fn submit(&mut self) {
        if self.state.chat().is_composing() {
            return;
        }

        let Some(text) = self.state.composer_mut().submit() else {
            return;
        };

        match self.state.chat_mut().begin_send(&text) {
            Ok(ticket) => {
                tracing::debug!(chars = text.chars().count(), "message sent");
                self.dispatcher.dispatch(ticket);
            }
            Err(rejected) => tracing::debug!(reason = ?rejected, "send ignored"),
        }
    }

    fn deliver_reply(&mut self, delivery: ReplyDelivery) {
        self.state
            .chat_mut()
            .complete_reply(&delivery.ticket, delivery.text);
    }

    fn export(&mut self, format: ExportFormat) {
        match export_to_dir(
            &self.export_dir,
            self.state.chat().messages(),
            format,
            Local::now(),
        ) {
            Ok(path) => self
                .state
                .set_notice(format!("Exported to {}", path.display())),
            Err(ExportError::EmptyTranscript) => self.state.set_notice("Nothing to export yet"),
            Err(error) => {
                tracing::warn!(error = %error, "transcript export failed");
                self.state.set_notice(format!("Export failed: {error}"));
            }
        }
    }
}

impl<S, D> ShellOrchestrator for DefaultShellOrchestrator<S, D>
where
    S: KeyValueStore,
    D: ReplyDispatcher,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(ShellExit::Quit),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::ReplyReady(delivery) => self.deliver_reply(delivery),
        }

        Ok(())
    }
}
