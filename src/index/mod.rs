//! Vector index access.
//!
//! The index is an opaque external dependency: the pipeline only queries an
//! existing index, never creates or manages schema. Ranking and tie-breaks
//! are the index's business; matches are consumed in the order returned.

mod pinecone;

pub use pinecone::PineconeIndex;

use async_trait::async_trait;

use crate::core::errors::PipelineError;

/// A single similarity-search hit with its stored text payload.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    pub text: String,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` nearest records to `vector`, best first.
    /// Fewer matches than requested (including none) is not an error.
    async fn query(&self, vector: &[f32], top_k: usize)
        -> Result<Vec<IndexMatch>, PipelineError>;
}
