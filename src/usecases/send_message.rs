//! Use case for sending a message to the assistant.
//!
//! The reply itself comes from a [`ReplyGenerator`]; the mock generator waits a
//! random delay and then synthesizes a canned or echoed answer.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::{
    domain::{
        chat_session::{ChatSession, SendRejected},
        reply::synthesize_reply,
    },
    infra::config::ChatConfig,
};

/// Produces the assistant's answer to a prompt.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn reply(&self, prompt: &str) -> String;
}

/// Stand-in for a real assistant backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReplyGenerator {
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl MockReplyGenerator {
    pub fn new(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            min_delay_ms: min_delay_ms.min(max_delay_ms),
            max_delay_ms: max_delay_ms.max(min_delay_ms),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.reply_delay_min_ms, config.reply_delay_max_ms)
    }

    fn pick_delay(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms);
        Duration::from_millis(millis)
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn reply(&self, prompt: &str) -> String {
        let delay = self.pick_delay();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "mock reply scheduled");
        tokio::time::sleep(delay).await;

        synthesize_reply(prompt, &mut rand::thread_rng())
    }
}

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    Rejected(SendRejected),
}

/// Appends the prompt, waits for the generator, then appends the reply.
/// The chat shell runs the same lifecycle split across threads.
#[cfg_attr(not(test), allow(dead_code))]
pub async fn send_message(
    session: &mut ChatSession,
    generator: &dyn ReplyGenerator,
    text: &str,
) -> SendOutcome {
    let ticket = match session.begin_send(text) {
        Ok(ticket) => ticket,
        Err(rejected) => {
            tracing::debug!(reason = ?rejected, "send ignored");
            return SendOutcome::Rejected(rejected);
        }
    };

    let reply = generator.reply(ticket.prompt()).await;
    session.complete_reply(&ticket, reply);

    SendOutcome::Replied
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::{
        chat_session::GREETING_MESSAGE,
        reply::{GREETING_REPLY, WEATHER_REPLY},
    };

    /// Zero-delay generator that records prompts.
    #[derive(Default)]
    struct InstantGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReplyGenerator for InstantGenerator {
        async fn reply(&self, prompt: &str) -> String {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_owned());
            }
            synthesize_reply(prompt, &mut rand::thread_rng())
        }
    }

    fn instant() -> MockReplyGenerator {
        MockReplyGenerator::new(0, 0)
    }

    #[tokio::test]
    async fn non_empty_send_adds_prompt_then_reply() {
        let mut session = ChatSession::default();
        let generator = InstantGenerator::default();

        let outcome = send_message(&mut session, &generator, "tell me a story").await;

        assert_eq!(outcome, SendOutcome::Replied);
        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "tell me a story");
        assert!(!messages[0].is_from_bot);
        assert!(messages[1].is_from_bot);
        assert!(!session.is_composing());
        assert_eq!(
            *generator.prompts.lock().expect("prompts lock"),
            vec!["tell me a story".to_owned()]
        );
    }

    #[tokio::test]
    async fn blank_sends_change_nothing() {
        let mut session = ChatSession::with_greeting();
        let before = session.clone();

        for text in ["", "   "] {
            let outcome = send_message(&mut session, &instant(), text).await;
            assert_eq!(outcome, SendOutcome::Rejected(SendRejected::EmptyText));
        }

        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn keyword_prompts_get_canned_replies() {
        let mut session = ChatSession::default();

        send_message(&mut session, &instant(), "hello").await;
        assert_eq!(session.messages()[1].text, GREETING_REPLY);

        send_message(&mut session, &instant(), "what's the weather").await;
        assert_eq!(session.messages()[3].text, WEATHER_REPLY);
    }

    #[tokio::test]
    async fn other_prompts_are_echoed() {
        let mut session = ChatSession::default();

        send_message(&mut session, &instant(), "Plan a weekend activity").await;

        let reply = &session.messages()[1].text;
        assert!(reply.contains("Plan a weekend activity"));
    }

    #[tokio::test]
    async fn seeded_session_scenario() {
        let mut session = ChatSession::with_greeting();

        send_message(&mut session, &instant(), "hi").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text, GREETING_MESSAGE);
        assert_eq!(messages[1].text, "hi");
        assert!(!messages[1].is_from_bot);
        assert!(messages[2].is_from_bot);
        assert_eq!(messages[2].text, GREETING_REPLY);
        assert!(!session.is_composing());
    }

    #[test]
    fn mock_generator_orders_inverted_bounds() {
        let generator = MockReplyGenerator::new(3_000, 1_000);

        for _ in 0..20 {
            let delay = generator.pick_delay();
            assert!(delay >= Duration::from_millis(1_000));
            assert!(delay <= Duration::from_millis(3_000));
        }
    }
}
