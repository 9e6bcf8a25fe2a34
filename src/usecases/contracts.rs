use anyhow::Result;

use crate::domain::{chat_session::ReplyTicket, events::AppEvent, shell_state::ShellState};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Starts reply generation for a ticket; the result comes back later as
/// `AppEvent::ReplyReady`.
pub trait ReplyDispatcher {
    fn dispatch(&mut self, ticket: ReplyTicket);
}
