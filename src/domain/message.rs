use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single transcript entry. Created only through [`Message::new`] so every
/// entry gets a fresh id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_from_bot: bool,
    pub created_at: DateTime<Utc>,
    /// Only set on the transient typing placeholder, never on log entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_composing: Option<bool>,
}

impl Message {
    pub fn new(text: impl Into<String>, is_from_bot: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_from_bot,
            created_at: Utc::now(),
            is_composing: None,
        }
    }

    /// Placeholder bot entry rendered while a reply is pending.
    pub fn composing_placeholder() -> Self {
        Self {
            is_composing: Some(true),
            ..Self::new(String::new(), true)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_composing == Some(true)
    }

    /// Author label used by the transcript view and text export.
    pub fn sender_label(&self) -> &'static str {
        if self.is_from_bot {
            "Bot"
        } else {
            "You"
        }
    }
}
