use std::sync::Arc;

use tokio::sync::mpsc;

use super::prompt::build_prompt;
use super::retriever::Retriever;
use crate::core::errors::PipelineError;
use crate::llm::provider::ChatProvider;
use crate::llm::types::{ChatRequest, ConversationTurn};

/// One-turn orchestrator: retrieve context, assemble the prompt, stream the
/// answer. Stateless across turns; the caller owns the conversation history
/// and appends the finished turn itself.
#[derive(Clone)]
pub struct ChatPipeline {
    retriever: Retriever,
    chat: Arc<dyn ChatProvider>,
    top_k: usize,
}

impl ChatPipeline {
    pub fn new(retriever: Retriever, chat: Arc<dyn ChatProvider>, top_k: usize) -> Self {
        Self {
            retriever,
            chat,
            top_k: top_k.max(1),
        }
    }

    /// Run one chat turn.
    ///
    /// The returned receiver yields the accumulated answer so far after each
    /// provider fragment, so every item is a prefix-extension of the one
    /// before it and the final item is the complete answer. A mid-stream
    /// provider failure arrives as a trailing `Err`; fragments already
    /// yielded stand.
    pub async fn handle_turn(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<mpsc::Receiver<Result<String, PipelineError>>, PipelineError> {
        let context = self.retriever.retrieve(message, self.top_k).await?;
        let messages = build_prompt(&context, history, message);
        let deltas = self.chat.stream_chat(ChatRequest::new(messages)).await?;
        Ok(accumulate(deltas))
    }
}

/// Adapt a stream of content deltas into a stream of growing answer
/// snapshots. The forwarding task exits when the consumer stops pulling,
/// which drops the delta receiver and abandons the provider stream.
pub fn accumulate(
    mut deltas: mpsc::Receiver<Result<String, PipelineError>>,
) -> mpsc::Receiver<Result<String, PipelineError>> {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut answer = String::new();
        while let Some(item) = deltas.recv().await {
            match item {
                Ok(delta) => {
                    answer.push_str(&delta);
                    if tx.send(Ok(answer.clone())).await.is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            }
        }
    });

    rx
}
