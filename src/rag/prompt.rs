use crate::llm::types::{ChatMessage, ConversationTurn};

/// Build the message sequence for one turn: a single system message with
/// the retrieved context interpolated, the history flattened in
/// chronological order, then the current user message.
///
/// Pure read + transform; `history` is never mutated. The template stays
/// well-formed for an empty context and tells the model to fall back to
/// general knowledge when the context is irrelevant.
pub fn build_prompt(
    context: &str,
    history: &[ConversationTurn],
    message: &str,
) -> Vec<ChatMessage> {
    let system = format!(
        "You are a helpful AI assistant with access to recent tech news. \
Use the following context to answer questions:\n\n{context}\n\nAnswer based \
on the provided context when relevant, but you can also use your general \
knowledge for other questions."
    );

    let mut messages = Vec::with_capacity(2 * history.len() + 2);
    messages.push(ChatMessage::system(system));

    for turn in history {
        messages.push(ChatMessage::user(turn.user.clone()));
        messages.push(ChatMessage::assistant(turn.assistant.clone()));
    }

    messages.push(ChatMessage::user(message));
    messages
}
