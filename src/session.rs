//! Session pipeline
//!
//! One `ChatSession` owns the classifier adapter and the conversation log
//! and processes each submission end-to-end:
//!
//! MESSAGE → SENTIMENT → INTENT → SELECT REPLY → APPEND USER + BOT TURN

use tracing::{debug, info};

use crate::analytics::AnalyticsReport;
use crate::classifier::MessageAnalyzer;
use crate::error::AssistantError;
use crate::history::ConversationLog;
use crate::models::{BotTurn, ChatExchange, Turn, UserTurn};
use crate::responder::select_reply;
use crate::Result;

/// The running chat session: classifier handles plus the append-only log.
pub struct ChatSession {
    analyzer: MessageAnalyzer,
    log: ConversationLog,
}

impl ChatSession {
    pub fn new(analyzer: MessageAnalyzer) -> Self {
        Self {
            analyzer,
            log: ConversationLog::new(),
        }
    }

    /// Process one user submission end-to-end.
    ///
    /// Empty or whitespace-only input is rejected before any model call.
    /// If either classification fails, nothing is appended to the log;
    /// a failed submission never produces a partial turn.
    pub async fn handle_message(&mut self, text: &str) -> Result<ChatExchange> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistantError::InvalidInput(
                "submission text is empty".to_string(),
            ));
        }

        let (sentiment, sentiment_score) = self.analyzer.analyze_sentiment(text).await?;
        let (intent, intent_score) = self.analyzer.detect_intent(text).await?;

        info!(
            %sentiment,
            sentiment_score,
            %intent,
            intent_score,
            "Message classified"
        );

        let reply = select_reply(&intent, sentiment);

        let user_turn = UserTurn::new(
            text.to_string(),
            sentiment,
            sentiment_score,
            intent,
            intent_score,
        );
        let bot_turn = BotTurn::new(reply.to_string());

        self.log.append(Turn::User(user_turn.clone()));
        self.log.append(Turn::Bot(bot_turn.clone()));

        debug!(log_len = self.log.len(), "Turns appended");

        Ok(ChatExchange {
            user_turn,
            bot_turn,
        })
    }

    /// Read access to the full ordered history.
    pub fn history(&self) -> &ConversationLog {
        &self.log
    }

    /// Fresh label counts over the logged user turns.
    pub fn analytics(&self) -> AnalyticsReport {
        AnalyticsReport::from_log(&self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{KeywordClassifier, TextClassifier};
    use crate::models::{LabelScore, Sentiment, DEFAULT_INTENT_LABELS};
    use crate::responder::{ACKNOWLEDGMENT_REPLY, ESCALATION_REPLY, GREETING_REPLY};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn test_session() -> ChatSession {
        let analyzer = MessageAnalyzer::new(
            Arc::new(KeywordClassifier::sentiment()),
            Arc::new(KeywordClassifier::zero_shot()),
            DEFAULT_INTENT_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        );
        ChatSession::new(analyzer)
    }

    /// Classifier stub that always fails.
    struct FailingClassifier;

    #[async_trait]
    impl TextClassifier for FailingClassifier {
        async fn classify(
            &self,
            _text: &str,
            _candidate_labels: Option<&[String]>,
        ) -> crate::Result<Vec<LabelScore>> {
            Err(AssistantError::ClassificationFailure(
                "model unavailable".to_string(),
            ))
        }
    }

    #[tokio::test]
    async fn test_angry_complaint_is_escalated() {
        let mut session = test_session();
        let exchange = session
            .handle_message("This is broken and I'm furious")
            .await
            .unwrap();

        assert_eq!(exchange.user_turn.sentiment, Sentiment::Negative);
        assert_eq!(exchange.user_turn.intent, "complaint");
        assert_eq!(exchange.bot_turn.text, ESCALATION_REPLY);

        assert_eq!(session.history().len(), 2);
        let report = session.analytics();
        assert_eq!(report.sentiment_counts.get("negative"), Some(&1));
        assert_eq!(report.intent_counts.get("complaint"), Some(&1));
    }

    #[tokio::test]
    async fn test_greeting_gets_greeting_reply() {
        let mut session = test_session();
        let exchange = session.handle_message("Hello there").await.unwrap();

        assert_eq!(exchange.user_turn.intent, "greeting");
        assert_eq!(exchange.bot_turn.text, GREETING_REPLY);
    }

    #[tokio::test]
    async fn test_request_gets_generic_acknowledgment() {
        let mut session = test_session();
        let exchange = session
            .handle_message("Please send me a copy of my invoice")
            .await
            .unwrap();

        assert_eq!(exchange.user_turn.intent, "request");
        assert_eq!(exchange.bot_turn.text, ACKNOWLEDGMENT_REPLY);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_before_logging() {
        let mut session = test_session();

        for input in ["", "   ", "\t\n"] {
            let result = session.handle_message(input).await;
            assert!(matches!(result, Err(AssistantError::InvalidInput(_))));
        }

        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_alternates_user_and_bot_turns() {
        let mut session = test_session();
        let messages = [
            "Hello there",
            "How do I reset my password?",
            "This is broken and I'm furious",
        ];

        for message in messages {
            session.handle_message(message).await.unwrap();
        }

        assert_eq!(session.history().len(), 2 * messages.len());
        for (i, turn) in session.history().turns().enumerate() {
            assert_eq!(turn.is_user(), i % 2 == 0);
        }

        // Positional pairing: each user turn's text matches submission order.
        let user_texts: Vec<&str> = session
            .history()
            .user_turns()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(user_texts, messages);
    }

    #[tokio::test]
    async fn test_analytics_idempotent_between_appends() {
        let mut session = test_session();
        session.handle_message("Hello there").await.unwrap();

        let first = session.analytics();
        let second = session.analytics();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_classification_failure_logs_nothing() {
        let analyzer = MessageAnalyzer::new(
            Arc::new(FailingClassifier),
            Arc::new(FailingClassifier),
            DEFAULT_INTENT_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        );
        let mut session = ChatSession::new(analyzer);

        let result = session.handle_message("Hello there").await;
        assert!(matches!(
            result,
            Err(AssistantError::ClassificationFailure(_))
        ));
        assert!(session.history().is_empty());
        assert!(session.analytics().sentiment_counts.is_empty());
    }

    #[tokio::test]
    async fn test_intent_failure_after_sentiment_success_logs_nothing() {
        let analyzer = MessageAnalyzer::new(
            Arc::new(KeywordClassifier::sentiment()),
            Arc::new(FailingClassifier),
            DEFAULT_INTENT_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        );
        let mut session = ChatSession::new(analyzer);

        let result = session.handle_message("Hello there").await;
        assert!(result.is_err());
        assert!(session.history().is_empty());
    }
}
