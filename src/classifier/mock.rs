//! Keyword-scoring mock classifier
//!
//! Deterministic offline stand-in for the hosted models. Keeps the
//! assistant functional (and its pipeline testable) without an inference
//! token. Emits the same label spaces and output shapes as the real
//! models so everything downstream is exercised unchanged.

use async_trait::async_trait;

use crate::classifier::TextClassifier;
use crate::error::AssistantError;
use crate::models::LabelScore;
use crate::Result;

/// Static keyword lists — zero allocation
const POSITIVE_MARKERS: &[&str] = &[
    "great", "love", "awesome", "excellent", "amazing", "fantastic",
    "helpful", "happy", "perfect", "thank", "thanks", "wonderful",
];

const NEGATIVE_MARKERS: &[&str] = &[
    "broken", "furious", "angry", "terrible", "worst", "awful", "hate",
    "refund", "frustrated", "useless", "unacceptable", "not working",
];

/// Keyword hits per candidate intent label. A candidate without an entry
/// only scores when its own name appears in the text.
const INTENT_MARKERS: &[(&str, &[&str])] = &[
    (
        "complaint",
        &[
            "broken", "not working", "terrible", "furious", "angry", "worst",
            "refund", "problem", "issue", "unacceptable",
        ],
    ),
    (
        "query",
        &["how", "what", "when", "where", "why", "which", "?", "do you"],
    ),
    (
        "feedback",
        &["feedback", "suggestion", "suggest", "improve", "love", "great", "liked"],
    ),
    (
        "request",
        &["please", "need", "want", "could you", "would like", "send me"],
    ),
    (
        "greeting",
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening", "greetings"],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sentiment,
    ZeroShot,
}

/// Keyword classifier
pub struct KeywordClassifier {
    mode: Mode,
}

impl KeywordClassifier {
    /// Sentiment mode: emits the hosted model's POSITIVE/NEGATIVE label
    /// space, or NEUTRAL when no marker matches.
    pub fn sentiment() -> Self {
        Self { mode: Mode::Sentiment }
    }

    /// Zero-shot mode: ranks the caller-supplied candidate labels.
    pub fn zero_shot() -> Self {
        Self { mode: Mode::ZeroShot }
    }
}

fn hit_count(text: &str, markers: &[&str]) -> usize {
    markers
        .iter()
        .filter(|marker| contains_marker(text, marker))
        .count()
}

/// Single-word markers match on word boundaries ("hi" must not fire on
/// "this"); phrases and punctuation markers match as substrings.
fn contains_marker(text: &str, marker: &str) -> bool {
    if marker.chars().all(|c| c.is_alphanumeric()) {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|word| word == marker)
    } else {
        text.contains(marker)
    }
}

fn markers_for(label: &str) -> &'static [&'static str] {
    INTENT_MARKERS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, markers)| *markers)
        .unwrap_or(&[])
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<Vec<LabelScore>> {
        let lowered = text.to_lowercase();

        match self.mode {
            Mode::Sentiment => {
                let positive = hit_count(&lowered, POSITIVE_MARKERS);
                let negative = hit_count(&lowered, NEGATIVE_MARKERS);

                let (label, hits) = if positive == 0 && negative == 0 {
                    ("NEUTRAL", 0)
                } else if negative >= positive {
                    ("NEGATIVE", negative)
                } else {
                    ("POSITIVE", positive)
                };

                let score = (0.55 + 0.1 * hits as f32).min(0.99);

                Ok(vec![LabelScore {
                    label: label.to_string(),
                    score,
                }])
            }
            Mode::ZeroShot => {
                let candidates = candidate_labels.ok_or_else(|| {
                    AssistantError::ClassificationFailure(
                        "zero-shot classification requires candidate labels".to_string(),
                    )
                })?;

                // One smoothing hit per candidate keeps every score non-zero
                // and the ranking stable for marker-free inputs.
                let weights: Vec<f32> = candidates
                    .iter()
                    .map(|label| {
                        let mut hits = hit_count(&lowered, markers_for(label));
                        if lowered.contains(&label.to_lowercase()) {
                            hits += 1;
                        }
                        1.0 + hits as f32
                    })
                    .collect();
                let total: f32 = weights.iter().sum();

                let mut ranked: Vec<LabelScore> = candidates
                    .iter()
                    .zip(weights)
                    .map(|(label, weight)| LabelScore {
                        label: label.clone(),
                        score: weight / total,
                    })
                    .collect();

                // Stable sort: equal scores keep candidate-set order.
                ranked.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

                Ok(ranked)
            }
        }
    }
}
