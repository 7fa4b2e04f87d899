use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use ragchat_backend::core::config::Settings;
use ragchat_backend::embedding::GeminiEmbedder;
use ragchat_backend::index::PineconeIndex;
use ragchat_backend::llm::OpenAiProvider;
use ragchat_backend::rag::{ChatPipeline, Retriever};
use ragchat_backend::state::AppState;
use ragchat_backend::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init();

    let settings = Settings::from_env();

    let embedder = GeminiEmbedder::from_settings(&settings)?;
    let chat = OpenAiProvider::from_settings(&settings)?;
    let index = PineconeIndex::connect(&settings).await?;

    let retriever = Retriever::new(Arc::new(embedder), Arc::new(index));
    let pipeline = ChatPipeline::new(retriever, Arc::new(chat), settings.top_k);
    let state = Arc::new(AppState { pipeline });

    let port = env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(0);
    let bind_addr = format!("127.0.0.1:{}", port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!("Listening on {}", addr);

    let app: Router = server::router::router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
