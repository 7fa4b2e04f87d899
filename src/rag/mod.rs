//! RAG (Retrieval-Augmented Generation) query pipeline.
//!
//! Per turn: embed the user message, fetch the top-k most similar stored
//! documents, fold them into a system prompt together with the conversation
//! history, and stream the model's answer back as a growing prefix.

pub mod pipeline;
pub mod prompt;
pub mod retriever;

pub use pipeline::ChatPipeline;
pub use retriever::Retriever;
