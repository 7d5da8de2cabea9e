//! Hugging Face hosted-inference classifier
//!
//! Reaches the two pretrained models over the hosted inference API.
//! Uses a long-lived reqwest::Client for connection pooling; the handle
//! is built once per process and reused for every classification call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::classifier::TextClassifier;
use crate::error::AssistantError;
use crate::models::LabelScore;
use crate::Result;

const SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";
const ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Bound on a single inference call. Model cold starts on the hosted API
/// can take tens of seconds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which inference task the model serves. The two tasks use different
/// request parameters and different response encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    SentimentAnalysis,
    ZeroShotClassification,
}

/// Reusable hosted-inference classifier (connection-pooled)
pub struct HfClassifier {
    client: Client,
    api_token: String,
    model_url: String,
    task: Task,
}

impl HfClassifier {
    /// Sentiment-analysis classifier (binary POSITIVE/NEGATIVE model).
    pub fn sentiment(api_token: String) -> Self {
        Self::with_base_url(api_token, DEFAULT_BASE_URL, SENTIMENT_MODEL, Task::SentimentAnalysis)
    }

    /// Zero-shot classifier ranking caller-supplied candidate labels.
    pub fn zero_shot(api_token: String) -> Self {
        Self::with_base_url(api_token, DEFAULT_BASE_URL, ZERO_SHOT_MODEL, Task::ZeroShotClassification)
    }

    fn with_base_url(api_token: String, base_url: &str, model: &str, task: Task) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_token,
            model_url: format!("{}/{}", base_url, model),
            task,
        }
    }
}

#[async_trait]
impl TextClassifier for HfClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<Vec<LabelScore>> {
        let parameters = match (self.task, candidate_labels) {
            (Task::ZeroShotClassification, Some(labels)) => {
                Some(InferenceParameters { candidate_labels: labels })
            }
            (Task::ZeroShotClassification, None) => {
                return Err(AssistantError::ClassificationFailure(
                    "zero-shot classification requires candidate labels".to_string(),
                ));
            }
            (Task::SentimentAnalysis, _) => None,
        };

        let request = InferenceRequest { inputs: text, parameters };

        info!(model_url = %self.model_url, "Calling inference API");

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Inference request failed: {}", e);
                AssistantError::ClassificationFailure(format!(
                    "inference request failed: {}",
                    e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Inference API error response ({}): {}", status, error_text);
            return Err(AssistantError::ClassificationFailure(format!(
                "inference API returned {}: {}",
                status, error_text
            )));
        }

        match self.task {
            Task::SentimentAnalysis => {
                let parsed: SentimentResponse = response.json().await.map_err(|e| {
                    error!("Failed to parse sentiment response: {}", e);
                    AssistantError::ClassificationFailure(format!(
                        "sentiment response parse error: {}",
                        e
                    ))
                })?;

                let ranked = match parsed {
                    SentimentResponse::Nested(mut batches) => {
                        if batches.is_empty() {
                            Vec::new()
                        } else {
                            batches.remove(0)
                        }
                    }
                    SentimentResponse::Flat(ranking) => ranking,
                };

                Ok(ranked
                    .into_iter()
                    .map(|entry| LabelScore {
                        label: entry.label,
                        score: entry.score,
                    })
                    .collect())
            }
            Task::ZeroShotClassification => {
                let parsed: ZeroShotResponse = response.json().await.map_err(|e| {
                    error!("Failed to parse zero-shot response: {}", e);
                    AssistantError::ClassificationFailure(format!(
                        "zero-shot response parse error: {}",
                        e
                    ))
                })?;

                if parsed.labels.len() != parsed.scores.len() {
                    return Err(AssistantError::ClassificationFailure(
                        "zero-shot response labels and scores differ in length".to_string(),
                    ));
                }

                Ok(parsed
                    .labels
                    .into_iter()
                    .zip(parsed.scores)
                    .map(|(label, score)| LabelScore { label, score })
                    .collect())
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<InferenceParameters<'a>>,
}

#[derive(Debug, Serialize)]
struct InferenceParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Debug, Deserialize)]
struct RawLabelScore {
    label: String,
    score: f32,
}

/// The sentiment task encodes a single input either as a flat ranking or
/// wrapped in an outer single-element array, depending on API version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<RawLabelScore>>),
    Flat(Vec<RawLabelScore>),
}

/// Zero-shot results arrive as parallel arrays, ranked descending;
/// labels and scores pair positionally.
#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}
