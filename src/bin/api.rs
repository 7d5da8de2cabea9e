use std::sync::Arc;

use support_assistant::{
    api::start_server,
    classifier::{HfClassifier, KeywordClassifier, MessageAnalyzer, TextClassifier},
    models::DEFAULT_INTENT_LABELS,
    session::ChatSession,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("🚀 Customer Support Assistant - API Server");
    info!("📍 Port: {}", api_port);

    // Load the classifier backends once; they are reused for every call
    let (sentiment_model, intent_model): (Arc<dyn TextClassifier>, Arc<dyn TextClassifier>) =
        match std::env::var("HF_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                info!("Classifier backend: hosted inference API");
                (
                    Arc::new(HfClassifier::sentiment(token.clone())),
                    Arc::new(HfClassifier::zero_shot(token)),
                )
            }
            _ => {
                warn!("HF_API_TOKEN not set - falling back to offline keyword classifiers");
                (
                    Arc::new(KeywordClassifier::sentiment()),
                    Arc::new(KeywordClassifier::zero_shot()),
                )
            }
        };

    let analyzer = MessageAnalyzer::new(
        sentiment_model,
        intent_model,
        DEFAULT_INTENT_LABELS
            .iter()
            .map(|label| label.to_string())
            .collect(),
    );
    let session = Arc::new(Mutex::new(ChatSession::new(analyzer)));

    info!("✅ Session initialized");
    info!("📡 Starting API server...");

    start_server(session, api_port).await?;

    Ok(())
}
