use super::chat_session::ReplyTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    ReplyReady(ReplyDelivery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// A generated reply travelling back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDelivery {
    pub ticket: ReplyTicket,
    pub text: String,
}
