//! Text classification layer
//!
//! The assistant depends on its two pretrained models only through the
//! `TextClassifier` trait: text in, labels ranked by confidence out.
//! `MessageAnalyzer` adapts the raw rankings into the shapes the rest of
//! the pipeline consumes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AssistantError;
use crate::models::{LabelScore, Sentiment};
use crate::Result;

pub mod hf;
pub mod mock;

pub use hf::HfClassifier;
pub use mock::KeywordClassifier;

/// Trait for pretrained text classification (model controlled)
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify `text`, returning labels ranked descending by confidence.
    ///
    /// Sentiment-style classifiers ignore `candidate_labels`; zero-shot
    /// classifiers rank exactly the supplied candidates.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<Vec<LabelScore>>;
}

/// Adapter over the two pretrained classifiers.
///
/// Holds the model handles (constructed once, reused for every call) and
/// the fixed candidate intent set supplied at construction.
pub struct MessageAnalyzer {
    sentiment_model: Arc<dyn TextClassifier>,
    intent_model: Arc<dyn TextClassifier>,
    intent_labels: Vec<String>,
}

impl MessageAnalyzer {
    pub fn new(
        sentiment_model: Arc<dyn TextClassifier>,
        intent_model: Arc<dyn TextClassifier>,
        intent_labels: Vec<String>,
    ) -> Self {
        Self {
            sentiment_model,
            intent_model,
            intent_labels,
        }
    }

    /// Candidate labels the intent classifier ranks.
    pub fn intent_labels(&self) -> &[String] {
        &self.intent_labels
    }

    /// Sentiment of `text`: the normalized bucket plus the confidence of
    /// the top-ranked raw label, passed through unchanged.
    pub async fn analyze_sentiment(&self, text: &str) -> Result<(Sentiment, f32)> {
        let ranked = self.sentiment_model.classify(text, None).await?;
        let top = ranked.first().ok_or_else(|| {
            AssistantError::ClassificationFailure(
                "sentiment model returned no labels".to_string(),
            )
        })?;

        let sentiment = Sentiment::from_raw_label(&top.label);
        debug!(raw_label = %top.label, score = top.score, "Sentiment classified");

        Ok((sentiment, top.score))
    }

    /// Intent of `text`: the highest-ranked candidate label and its
    /// confidence. Tie-breaking is the model's own ranking.
    pub async fn detect_intent(&self, text: &str) -> Result<(String, f32)> {
        let ranked = self
            .intent_model
            .classify(text, Some(&self.intent_labels))
            .await?;
        let top = ranked.into_iter().next().ok_or_else(|| {
            AssistantError::ClassificationFailure(
                "intent model returned no labels".to_string(),
            )
        })?;

        debug!(intent = %top.label, score = top.score, "Intent classified");

        Ok((top.label, top.score))
    }
}
