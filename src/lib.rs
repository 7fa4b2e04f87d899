//! Minimal RAG chatbot backend.
//!
//! Per chat turn: embed the user message (Gemini), retrieve the top-k most
//! similar stored documents (Pinecone), assemble a prompt from the retrieved
//! context plus the caller-owned conversation history, and stream the
//! generated answer (OpenAI-compatible endpoint) as a growing prefix.

pub mod core;
pub mod embedding;
pub mod index;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod server;
pub mod state;

pub use self::core::config::Settings;
pub use self::core::errors::PipelineError;
pub use self::rag::{ChatPipeline, Retriever};
