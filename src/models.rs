//! Core data models for the support chat assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Candidate Intents =================
//

/// Fixed candidate label set offered to the zero-shot intent classifier.
/// Ordered, constant for the lifetime of the process.
pub const DEFAULT_INTENT_LABELS: [&str; 5] =
    ["complaint", "query", "feedback", "request", "greeting"];

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Normalize a raw classifier label into one of the three buckets.
    ///
    /// Case-insensitive substring match; anything neither positive nor
    /// negative falls back to neutral, so the mapping is total over
    /// arbitrary label spaces.
    pub fn from_raw_label(raw: &str) -> Self {
        let raw = raw.to_lowercase();
        if raw.contains("positive") {
            Sentiment::Positive
        } else if raw.contains("negative") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Classifier Output =================
//

/// One (label, confidence) pair in a ranked classifier result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

//
// ================= Turns =================
//

/// A user submission with its derived labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTurn {
    pub turn_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f32,
    pub intent: String,
    pub intent_score: f32,
}

impl UserTurn {
    pub fn new(
        text: String,
        sentiment: Sentiment,
        sentiment_score: f32,
        intent: String,
        intent_score: f32,
    ) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            text,
            sentiment,
            sentiment_score,
            intent,
            intent_score,
        }
    }
}

/// The assistant's reply to the immediately preceding user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotTurn {
    pub turn_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl BotTurn {
    pub fn new(text: String) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            text,
        }
    }
}

/// One logged exchange unit.
///
/// A `User` turn is always immediately followed in the log by exactly one
/// `Bot` turn produced from it; the pairing is positional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Turn {
    User(UserTurn),
    Bot(BotTurn),
}

impl Turn {
    pub fn as_user(&self) -> Option<&UserTurn> {
        match self {
            Turn::User(turn) => Some(turn),
            Turn::Bot(_) => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Turn::User(_))
    }
}

//
// ================= Exchange =================
//

/// Result of one end-to-end submission: the logged user turn and the bot
/// turn derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user_turn: UserTurn,
    pub bot_turn: BotTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_normalization() {
        assert_eq!(Sentiment::from_raw_label("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_raw_label("NEGATIVE"), Sentiment::Negative);
        assert_eq!(Sentiment::from_raw_label("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_raw_label("Very Positive"), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_normalization_is_total() {
        // Labels outside the current model's binary space still map somewhere.
        assert_eq!(Sentiment::from_raw_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_raw_label(""), Sentiment::Neutral);
        assert_eq!(Sentiment::from_raw_label("mixed"), Sentiment::Neutral);
    }

    #[test]
    fn test_turn_as_user() {
        let user = Turn::User(UserTurn::new(
            "hi".to_string(),
            Sentiment::Neutral,
            0.5,
            "greeting".to_string(),
            0.9,
        ));
        let bot = Turn::Bot(BotTurn::new("Hello!".to_string()));

        assert!(user.as_user().is_some());
        assert!(bot.as_user().is_none());
        assert!(user.is_user());
        assert!(!bot.is_user());
    }
}
