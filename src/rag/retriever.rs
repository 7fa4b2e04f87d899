use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::embedding::Embedder;
use crate::index::VectorIndex;

/// Fetches the context block for a query: embed, similarity-search, join
/// the matched document texts with a blank line, in index order.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Zero matches is legitimate and yields an empty context block; the
    /// system prompt's general-knowledge fallback covers that case.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<String, PipelineError> {
        let query_vector = self.embedder.embed(query).await?;
        let matches = self.index.query(&query_vector, top_k).await?;

        tracing::debug!("retrieved {} matches for query", matches.len());

        let context = matches
            .into_iter()
            .map(|m| m.text)
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexMatch;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedEmbedder {
        vector: Vec<f32>,
    }

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, PipelineError> {
            Ok(self.vector.clone())
        }
    }

    struct RecordingIndex {
        matches: Vec<IndexMatch>,
        seen_top_k: Mutex<Option<usize>>,
    }

    impl RecordingIndex {
        fn new(matches: Vec<IndexMatch>) -> Self {
            Self {
                matches,
                seen_top_k: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl VectorIndex for RecordingIndex {
        async fn query(
            &self,
            _vector: &[f32],
            top_k: usize,
        ) -> Result<Vec<IndexMatch>, PipelineError> {
            *self.seen_top_k.lock().unwrap() = Some(top_k);
            Ok(self.matches.iter().take(top_k).cloned().collect())
        }
    }

    fn doc(id: &str, score: f32, text: &str) -> IndexMatch {
        IndexMatch {
            id: id.to_string(),
            score,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn passes_top_k_through_and_caps_segments() {
        let index = Arc::new(RecordingIndex::new(vec![
            doc("a", 0.9, "one"),
            doc("b", 0.8, "two"),
            doc("c", 0.7, "three"),
        ]));
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { vector: vec![1.0, 0.0] }),
            index.clone(),
        );

        let context = retriever.retrieve("query", 2).await.unwrap();

        assert_eq!(*index.seen_top_k.lock().unwrap(), Some(2));
        let segments: Vec<&str> = context.split("\n\n").collect();
        assert!(segments.len() <= 2);
        assert_eq!(context, "one\n\ntwo");
    }

    #[tokio::test]
    async fn zero_matches_yields_empty_context() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { vector: vec![1.0] }),
            Arc::new(RecordingIndex::new(vec![])),
        );

        let context = retriever.retrieve("anything", 3).await.unwrap();
        assert_eq!(context, "");
    }

    #[tokio::test]
    async fn single_best_match_comes_back_verbatim() {
        let retriever = Retriever::new(
            Arc::new(FixedEmbedder { vector: vec![0.5, 0.5] }),
            Arc::new(RecordingIndex::new(vec![
                doc("cats", 0.95, "Cats are mammals."),
                doc("paris", 0.2, "Paris is in France."),
            ])),
        );

        let context = retriever.retrieve("Tell me about cats", 1).await.unwrap();
        assert_eq!(context, "Cats are mammals.");
    }

    #[tokio::test]
    async fn embedding_failure_propagates() {
        struct FailingEmbedder;

        #[async_trait]
        impl Embedder for FailingEmbedder {
            async fn embed(&self, _text: &str) -> Result<Vec<f32>, PipelineError> {
                Err(PipelineError::Provider("embed down".to_string()))
            }
        }

        let retriever = Retriever::new(
            Arc::new(FailingEmbedder),
            Arc::new(RecordingIndex::new(vec![])),
        );

        let err = retriever.retrieve("query", 3).await.unwrap_err();
        assert!(matches!(err, PipelineError::Provider(_)));
    }
}
