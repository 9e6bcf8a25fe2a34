//! Chat transcript and the send lifecycle.
//!
//! A session is either idle or composing exactly one reply. `begin_send`
//! moves it to composing and hands out a [`ReplyTicket`]; `complete_reply`
//! with that ticket appends the bot reply and returns it to idle.

use super::message::Message;

pub const GREETING_MESSAGE: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Handle for the single in-flight reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTicket {
    seq: u64,
    prompt: String,
}

impl ReplyTicket {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Why a send was not started. Callers treat both as silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    EmptyText,
    AlreadyComposing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    composing: bool,
    pending_seq: Option<u64>,
    next_seq: u64,
}

impl ChatSession {
    /// Session seeded with the assistant's opening message.
    pub fn with_greeting() -> Self {
        let mut session = Self::default();
        session.append(GREETING_MESSAGE, true);
        session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn append(&mut self, text: impl Into<String>, is_from_bot: bool) -> &Message {
        self.messages.push(Message::new(text, is_from_bot));
        let index = self.messages.len() - 1;
        &self.messages[index]
    }

    /// Empties the log. A pending reply stays in flight and lands in the
    /// cleared log when it completes.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn begin_send(&mut self, text: &str) -> Result<ReplyTicket, SendRejected> {
        if text.trim().is_empty() {
            return Err(SendRejected::EmptyText);
        }

        if self.composing {
            return Err(SendRejected::AlreadyComposing);
        }

        self.append(text, false);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending_seq = Some(seq);
        self.composing = true;

        Ok(ReplyTicket {
            seq,
            prompt: text.to_owned(),
        })
    }

    /// Returns `false` when the ticket is not the in-flight one; the reply
    /// is dropped in that case.
    pub fn complete_reply(&mut self, ticket: &ReplyTicket, reply: impl Into<String>) -> bool {
        if self.pending_seq != Some(ticket.seq) {
            tracing::warn!(
                ticket = ticket.seq,
                pending = ?self.pending_seq,
                "dropping reply for a ticket that is not in flight"
            );
            return false;
        }

        self.pending_seq = None;
        self.composing = false;
        self.append(reply, true);
        true
    }
}
