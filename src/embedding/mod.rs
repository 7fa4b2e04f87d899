//! Text embedding.
//!
//! `Embedder` is the seam between the pipeline and the embedding provider:
//! production code injects `GeminiEmbedder`, tests inject fakes returning
//! fixed vectors.

mod gemini;

pub use gemini::GeminiEmbedder;

use async_trait::async_trait;

use crate::core::errors::PipelineError;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Convert `text` into a dense vector of the model's fixed
    /// dimensionality. One network call per invocation; no caching.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in with a fixed dimensionality, the shape real
    /// embedding models guarantee.
    struct HashEmbedder {
        dim: usize,
    }

    #[async_trait]
    impl Embedder for HashEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
            let seed = text.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
            Ok((0..self.dim)
                .map(|i| ((seed.wrapping_add(i as u32)) % 97) as f32 / 97.0)
                .collect())
        }
    }

    #[tokio::test]
    async fn dimensionality_is_stable_across_inputs_and_repeats() {
        let embedder = HashEmbedder { dim: 768 };

        let a = embedder.embed("Tell me about cats").await.unwrap();
        let b = embedder.embed("Paris is in France.").await.unwrap();
        let a_again = embedder.embed("Tell me about cats").await.unwrap();

        assert_eq!(a.len(), 768);
        assert_eq!(b.len(), 768);
        assert_eq!(a.len(), a_again.len());
        assert_eq!(a, a_again);
    }
}
