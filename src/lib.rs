//! Customer Support Chat Assistant
//!
//! A minimal support-desk chat engine that:
//! - Classifies each user message for sentiment and intent via pretrained
//!   text-classification models
//! - Picks a canned reply from an ordered rule table
//! - Keeps an append-only, session-scoped conversation log
//! - Derives sentiment/intent frequency analytics from the log on demand
//!
//! PIPELINE:
//! MESSAGE → SENTIMENT → INTENT → SELECT REPLY → LOG → ANALYTICS

pub mod analytics;
pub mod api;
pub mod classifier;
pub mod error;
pub mod history;
pub mod models;
pub mod responder;
pub mod session;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{MessageAnalyzer, TextClassifier};
pub use session::ChatSession;
