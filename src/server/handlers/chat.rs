use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures_util::stream::Stream;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::PipelineError;
use crate::llm::types::ConversationTurn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

/// Streams one chat turn as server-sent events.
///
/// Each `message` event carries `{"answer": <accumulated text so far>}`, so
/// the client can re-render the full answer on every event. A turn that
/// fails mid-stream ends with an `error` event; text already sent stands.
/// The caller appends the finished turn to its own history.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatTurnRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, PipelineError> {
    let rx = state.pipeline.handle_turn(&req.message, &req.history).await?;

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        match rx.recv().await {
            Some(Ok(answer)) => {
                let event = Event::default().data(json!({ "answer": answer }).to_string());
                Some((Ok(event), rx))
            }
            Some(Err(err)) => {
                tracing::warn!("chat turn aborted: {}", err);
                let event = Event::default()
                    .event("error")
                    .data(json!({ "error": err.to_string() }).to_string());
                Some((Ok(event), rx))
            }
            None => None,
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
