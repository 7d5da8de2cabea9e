//! Conversation log
//!
//! Append-only record of the running session's turns. Entries are never
//! mutated, reordered, or removed; the log lives exactly as long as the
//! process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::models::{Turn, UserTurn};

/// Ordered, append-only sequence of turns for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    turns: VecDeque<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            updated_at: Utc::now(),
            turns: VecDeque::new(),
        }
    }

    /// Append a turn at the end of the log.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        self.updated_at = Utc::now();
    }

    // =============================
    // Iterators (ZERO ALLOCATION)
    // =============================

    /// Iterate over all turns in submission order
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Iterate over user turns only, order preserved
    pub fn user_turns(&self) -> impl Iterator<Item = &UserTurn> {
        self.turns.iter().filter_map(Turn::as_user)
    }

    /// Get turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BotTurn, Sentiment};

    fn user_turn(text: &str) -> Turn {
        Turn::User(UserTurn::new(
            text.to_string(),
            Sentiment::Neutral,
            0.5,
            "query".to_string(),
            0.8,
        ))
    }

    fn bot_turn(text: &str) -> Turn {
        Turn::Bot(BotTurn::new(text.to_string()))
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        assert!(log.is_empty());

        log.append(user_turn("first"));
        log.append(bot_turn("reply one"));
        log.append(user_turn("second"));
        log.append(bot_turn("reply two"));

        assert_eq!(log.len(), 4);

        let texts: Vec<&str> = log
            .turns()
            .map(|turn| match turn {
                Turn::User(t) => t.text.as_str(),
                Turn::Bot(t) => t.text.as_str(),
            })
            .collect();
        assert_eq!(texts, vec!["first", "reply one", "second", "reply two"]);
    }

    #[test]
    fn test_user_turns_filter() {
        let mut log = ConversationLog::new();
        log.append(user_turn("a"));
        log.append(bot_turn("b"));
        log.append(user_turn("c"));
        log.append(bot_turn("d"));

        let user_texts: Vec<&str> =
            log.user_turns().map(|turn| turn.text.as_str()).collect();
        assert_eq!(user_texts, vec!["a", "c"]);
    }
}
