//! Grocery chatbot API - Entry Point
//!
//! Minimal entry point that delegates to the server module.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    chatbot_api::run().await
}
