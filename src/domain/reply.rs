//! Canned reply synthesis for the mock assistant.
//!
//! Prompts are routed to a keyword category first; anything unrecognized gets
//! a random acknowledgement followed by an echo of the prompt.

use rand::{seq::SliceRandom, Rng};

pub const GREETING_REPLY: &str =
    "Hello there! It's great to meet you. What would you like to chat about today?";

pub const HELP_REPLY: &str = "I'm here to help! You can ask me questions, have a conversation, \
     or press Ctrl+T to pick a prompt template. What do you need assistance with?";

pub const WEATHER_REPLY: &str = "I don't have access to real-time weather data, but I'd be happy \
     to discuss weather patterns, climate, or help you find weather resources!";

pub const ACKNOWLEDGEMENTS: [&str; 8] = [
    "That's an interesting question! Let me think about that...",
    "I understand what you're asking. Here's what I think...",
    "Great point! From my perspective...",
    "I can help you with that. Here's my suggestion...",
    "That's a complex topic. Let me break it down for you...",
    "I see what you mean. Here's how I would approach that...",
    "Excellent question! Based on what I know...",
    "I appreciate you asking that. Here's my take...",
];

const GREETING_WORDS: [&str; 2] = ["hi", "hey"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Greeting,
    Help,
    Weather,
}

impl ReplyCategory {
    pub fn canned_reply(self) -> &'static str {
        match self {
            Self::Greeting => GREETING_REPLY,
            Self::Help => HELP_REPLY,
            Self::Weather => WEATHER_REPLY,
        }
    }
}

/// First matching category wins: greeting, then help, then weather.
pub fn classify(prompt: &str) -> Option<ReplyCategory> {
    let lowered = prompt.to_lowercase();

    let has_greeting_word = lowered
        .split(|ch: char| !ch.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word));

    if lowered.contains("hello") || has_greeting_word {
        Some(ReplyCategory::Greeting)
    } else if lowered.contains("help") {
        Some(ReplyCategory::Help)
    } else if lowered.contains("weather") {
        Some(ReplyCategory::Weather)
    } else {
        None
    }
}

pub fn synthesize_reply<R: Rng + ?Sized>(prompt: &str, rng: &mut R) -> String {
    if let Some(category) = classify(prompt) {
        return category.canned_reply().to_owned();
    }

    let acknowledgement = ACKNOWLEDGEMENTS
        .choose(rng)
        .copied()
        .unwrap_or(ACKNOWLEDGEMENTS[0]);

    echo_reply(acknowledgement, prompt)
}

fn echo_reply(acknowledgement: &str, prompt: &str) -> String {
    format!("{acknowledgement} Your message was: '{prompt}'. How else can I assist you?")
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn hello_routes_to_greeting() {
        assert_eq!(synthesize_reply("hello", &mut rng()), GREETING_REPLY);
        assert_eq!(synthesize_reply("Hello, bot!", &mut rng()), GREETING_REPLY);
    }

    #[test]
    fn short_greeting_words_match_as_whole_words() {
        assert_eq!(classify("hi"), Some(ReplyCategory::Greeting));
        assert_eq!(classify("Hey there"), Some(ReplyCategory::Greeting));
        assert_eq!(classify("tell me about this thing"), None);
    }

    #[test]
    fn help_routes_to_help_reply() {
        assert_eq!(synthesize_reply("can you help me?", &mut rng()), HELP_REPLY);
    }

    #[test]
    fn weather_question_routes_to_weather_reply() {
        assert_eq!(
            synthesize_reply("what's the weather", &mut rng()),
            WEATHER_REPLY
        );
    }

    #[test]
    fn greeting_takes_precedence_over_help() {
        assert_eq!(classify("hello, I need help"), Some(ReplyCategory::Greeting));
    }

    #[test]
    fn unrecognized_prompt_is_echoed_after_an_acknowledgement() {
        let reply = synthesize_reply("Explain quantum physics", &mut rng());

        assert!(reply.contains("Explain quantum physics"));
        assert!(ACKNOWLEDGEMENTS.iter().any(|ack| reply.starts_with(ack)));
        assert!(reply.ends_with("How else can I assist you?"));
    }
}
