use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::Embedder;
use crate::core::config::Settings;
use crate::core::errors::PipelineError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini embedding client.
///
/// Calls the `batchEmbedContents` endpoint with a single request and uses
/// the first vector of the response.
#[derive(Clone)]
#[derive(Debug)]
pub struct GeminiEmbedder {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiEmbedder {
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        Ok(Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: settings.gemini_api_key()?.to_string(),
            model: settings.embedding_model.clone(),
            client: Client::new(),
        })
    }

}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        let url = format!(
            "{}/models/{}:batchEmbedContents?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "requests": [{
                "model": format!("models/{}", self.model),
                "content": { "parts": [{ "text": text }] },
            }],
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Provider(format!(
                "Gemini embed error ({status}): {text}"
            )));
        }

        let payload: BatchEmbedResponse = res.json().await.map_err(PipelineError::provider)?;

        let vector = payload
            .embeddings
            .into_iter()
            .next()
            .map(|emb| emb.values)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| {
                PipelineError::Provider("Gemini embed response contained no vector".to_string())
            })?;

        Ok(vector)
    }
}
