use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{IndexMatch, VectorIndex};
use crate::core::config::Settings;
use crate::core::errors::PipelineError;

const PINECONE_CONTROL_PLANE: &str = "https://api.pinecone.io";

/// Pinecone serverless index client.
///
/// The control plane is consulted once at `connect` to resolve the index
/// host; queries then go straight to the data plane.
#[derive(Clone)]
#[derive(Debug)]
pub struct PineconeIndex {
    host: String,
    api_key: String,
    client: Client,
}

#[derive(Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl PineconeIndex {
    /// Resolve the configured index name to its data-plane host.
    ///
    /// Missing key or index name fails with a `Config` error before any
    /// network traffic; an unknown index fails with a `Provider` error.
    pub async fn connect(settings: &Settings) -> Result<Self, PipelineError> {
        let api_key = settings.pinecone_api_key()?.to_string();
        let index_name = settings.pinecone_index()?;
        let client = Client::new();

        let url = format!("{PINECONE_CONTROL_PLANE}/indexes/{index_name}");
        let res = client
            .get(&url)
            .header("Api-Key", &api_key)
            .send()
            .await
            .map_err(PipelineError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Provider(format!(
                "Pinecone describe_index '{index_name}' failed ({status}): {text}"
            )));
        }

        let described: DescribeIndexResponse =
            res.json().await.map_err(PipelineError::provider)?;

        tracing::info!("Connected to Pinecone index '{}'", index_name);

        Ok(Self {
            host: format!("https://{}", described.host.trim_start_matches("https://")),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, PipelineError> {
        let url = format!("{}/query", self.host);

        let body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let res = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Provider(format!(
                "Pinecone query failed ({status}): {text}"
            )));
        }

        let payload: QueryResponse = res.json().await.map_err(PipelineError::provider)?;

        let matches = payload
            .matches
            .into_iter()
            .filter_map(|m| {
                let text = m
                    .metadata
                    .as_ref()
                    .and_then(|meta| meta.get("text"))
                    .and_then(|t| t.as_str())
                    .map(|t| t.to_string());
                match text {
                    Some(text) => Some(IndexMatch {
                        id: m.id,
                        score: m.score,
                        text,
                    }),
                    None => {
                        tracing::warn!("Pinecone match '{}' has no text metadata, skipping", m.id);
                        None
                    }
                }
            })
            .collect();

        Ok(matches)
    }
}
