use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use super::provider::ChatProvider;
use super::types::ChatRequest;
use crate::core::config::Settings;
use crate::core::errors::PipelineError;

/// OpenAI-compatible streaming chat client.
///
/// Works against any endpoint speaking the `/chat/completions` SSE protocol;
/// the base URL and model come from configuration.
#[derive(Clone)]
#[derive(Debug)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiProvider {
    /// Fails with a `Config` error if the API key is absent, before any
    /// network call is possible.
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        Ok(Self {
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            api_key: settings.openai_api_key()?.to_string(),
            model: settings.openai_model.clone(),
            client: Client::new(),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn stream_chat(
        &self,
        request: ChatRequest,
    ) -> Result<mpsc::Receiver<Result<String, PipelineError>>, PipelineError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": true,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::provider)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Provider(format!(
                "chat completion error ({status}): {text}"
            )));
        }

        let (tx, rx) = mpsc::channel(32);
        let mut stream = res.bytes_stream();

        tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        let chunk_str = String::from_utf8_lossy(&bytes);
                        for line in chunk_str.lines() {
                            let line = line.trim();
                            if line.is_empty() {
                                continue;
                            }
                            if line == "data: [DONE]" {
                                return;
                            }

                            if let Some(data) = line.strip_prefix("data: ") {
                                if let Ok(json) = serde_json::from_str::<Value>(data) {
                                    if let Some(content) =
                                        json["choices"][0]["delta"]["content"].as_str()
                                    {
                                        if !content.is_empty()
                                            && tx.send(Ok(content.to_string())).await.is_err()
                                        {
                                            return;
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(PipelineError::provider(e))).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_config_error_before_any_request() {
        let settings = Settings::empty();
        let err = OpenAiProvider::from_settings(&settings).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let settings = Settings::empty().with_openai_api_key("sk-test");
        let provider = OpenAiProvider::from_settings(&settings).unwrap();
        assert!(!provider.base_url.ends_with('/'));
    }
}
