use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::ChatRequest;
use crate::core::errors::PipelineError;

/// Streaming chat-completion seam.
///
/// `stream_chat` yields raw content deltas as the provider emits them; the
/// channel closing signals end-of-stream. An `Err` item means the stream was
/// interrupted and no further items follow. Dropping the receiver abandons
/// the underlying network stream.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn stream_chat(
        &self,
        request: ChatRequest,
    ) -> Result<mpsc::Receiver<Result<String, PipelineError>>, PipelineError>;
}
