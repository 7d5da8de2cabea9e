use std::io::Write;
use std::sync::Arc;

use support_assistant::{
    classifier::{HfClassifier, KeywordClassifier, MessageAnalyzer, TextClassifier},
    models::{Turn, DEFAULT_INTENT_LABELS},
    session::ChatSession,
};
use tokio::io::AsyncBufReadExt;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (quiet by default so the chat stays readable)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let (sentiment_model, intent_model): (Arc<dyn TextClassifier>, Arc<dyn TextClassifier>) =
        match std::env::var("HF_API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => (
                Arc::new(HfClassifier::sentiment(token.clone())),
                Arc::new(HfClassifier::zero_shot(token)),
            ),
            _ => {
                warn!("HF_API_TOKEN not set - using offline keyword classifiers");
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
    let mut session = ChatSession::new(analyzer);

    println!("🤖 Customer Support Chat");
    println!("Type a message, or /history, /analytics, /quit\n");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            // Send is a no-op on empty text
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => render_history(&session),
            "/analytics" => render_analytics(&session),
            _ => match session.handle_message(input).await {
                Ok(exchange) => {
                    println!(
                        "🤖 Bot: {} (sentiment: {} | intent: {})\n",
                        exchange.bot_turn.text,
                        exchange.user_turn.sentiment,
                        exchange.user_turn.intent
                    );
                }
                Err(e) => eprintln!("⚠️  {}\n", e),
            },
        }
    }

    Ok(())
}

fn render_history(session: &ChatSession) {
    if session.history().is_empty() {
        println!("No chat history yet.\n");
        return;
    }

    for turn in session.history().turns() {
        match turn {
            Turn::User(t) => println!(
                "🧑 You: {} (sentiment: {} | intent: {})",
                t.text, t.sentiment, t.intent
            ),
            Turn::Bot(t) => println!("🤖 Bot: {}", t.text),
        }
    }
    println!();
}

fn render_analytics(session: &ChatSession) {
    let report = session.analytics();
    if report.sentiment_counts.is_empty() {
        println!("No chat data yet. Start chatting!\n");
        return;
    }

    println!("Sentiment distribution:");
    for (label, count) in &report.sentiment_counts {
        println!("  {:<10} {}", label, count);
    }
    println!("Intent distribution:");
    for (label, count) in &report.intent_counts {
        println!("  {:<10} {}", label, count);
    }
    println!();
}
