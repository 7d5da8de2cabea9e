//! On-demand analytics over the conversation log
//!
//! Frequency counts of sentiment and intent labels across user turns.
//! Recomputed fresh on every call; an empty log yields empty mappings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::history::ConversationLog;

/// Which derived label of a user turn to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsField {
    Sentiment,
    Intent,
}

/// Aggregated label counts for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub sentiment_counts: BTreeMap<String, usize>,
    pub intent_counts: BTreeMap<String, usize>,
}

impl AnalyticsReport {
    /// Derive both count mappings from the log.
    pub fn from_log(log: &ConversationLog) -> Self {
        Self {
            sentiment_counts: count_by(log, AnalyticsField::Sentiment),
            intent_counts: count_by(log, AnalyticsField::Intent),
        }
    }
}

/// Count user-turn labels by `field`. Bot turns never contribute.
pub fn count_by(log: &ConversationLog, field: AnalyticsField) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for turn in log.user_turns() {
        let label = match field {
            AnalyticsField::Sentiment => turn.sentiment.as_str().to_string(),
            AnalyticsField::Intent => turn.intent.clone(),
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    counts
}
