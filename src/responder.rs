//! Reply selection
//!
//! Maps (intent, sentiment) to a canned reply through an ordered rule
//! table. First match wins, and the order is part of the observable
//! contract: a complaint with positive sentiment falls through to the
//! generic acknowledgment, not the escalation path.

use crate::models::Sentiment;

pub const ESCALATION_REPLY: &str =
    "I understand your frustration 😟. Let me escalate this to our support team.";
pub const INFORMATIONAL_REPLY: &str =
    "Thanks for your question! I'll provide the best possible answer.";
pub const APPRECIATION_REPLY: &str =
    "We really appreciate your feedback 💡. It helps us improve.";
pub const GREETING_REPLY: &str = "Hello 👋! How can I assist you today?";
pub const ACKNOWLEDGMENT_REPLY: &str = "Got it ✅. I'll make sure this is noted.";

/// Ordered (predicate, reply) rules, evaluated top to bottom. The last
/// rule always matches.
const REPLY_RULES: &[(fn(&str, Sentiment) -> bool, &str)] = &[
    (
        |intent, sentiment| intent == "complaint" && sentiment == Sentiment::Negative,
        ESCALATION_REPLY,
    ),
    (|intent, _| intent == "query", INFORMATIONAL_REPLY),
    (|intent, _| intent == "feedback", APPRECIATION_REPLY),
    (|intent, _| intent == "greeting", GREETING_REPLY),
    (|_, _| true, ACKNOWLEDGMENT_REPLY),
];

/// Select the canned reply for a classified user message. Pure and total.
pub fn select_reply(intent: &str, sentiment: Sentiment) -> &'static str {
    REPLY_RULES
        .iter()
        .find(|(matches, _)| matches(intent, sentiment))
        .map(|(_, reply)| *reply)
        .unwrap_or(ACKNOWLEDGMENT_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_complaint_escalates() {
        assert_eq!(
            select_reply("complaint", Sentiment::Negative),
            ESCALATION_REPLY
        );
    }

    #[test]
    fn test_non_negative_complaint_falls_through() {
        // First-match priority: without negative sentiment, a complaint is
        // acknowledged, never escalated.
        assert_eq!(
            select_reply("complaint", Sentiment::Positive),
            ACKNOWLEDGMENT_REPLY
        );
        assert_eq!(
            select_reply("complaint", Sentiment::Neutral),
            ACKNOWLEDGMENT_REPLY
        );
    }

    #[test]
    fn test_query_ignores_sentiment() {
        for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            assert_eq!(select_reply("query", sentiment), INFORMATIONAL_REPLY);
        }
    }

    #[test]
    fn test_feedback_and_greeting() {
        assert_eq!(select_reply("feedback", Sentiment::Positive), APPRECIATION_REPLY);
        assert_eq!(select_reply("greeting", Sentiment::Neutral), GREETING_REPLY);
    }

    #[test]
    fn test_request_gets_generic_acknowledgment() {
        assert_eq!(
            select_reply("request", Sentiment::Negative),
            ACKNOWLEDGMENT_REPLY
        );
    }

    #[test]
    fn test_unknown_intent_is_still_answered() {
        assert_eq!(
            select_reply("escalation", Sentiment::Negative),
            ACKNOWLEDGMENT_REPLY
        );
    }
}
