//! Environment-backed configuration.
//!
//! The whole deployment surface is environment variables (an `.env` file is
//! loaded by the binary before `Settings::from_env` runs). Required values
//! are captured as `Option`s; the accessor for a missing one returns a
//! `Config` error naming the variable, so the failure is attributable
//! instead of a bare unwrap panic somewhere inside a request.

use std::env;

use crate::core::errors::PipelineError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone)]
pub struct Settings {
    gemini_api_key: Option<String>,
    openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub embedding_model: String,
    pinecone_api_key: Option<String>,
    pinecone_index: Option<String>,
    pub top_k: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: read_env("GEMINI_API_KEY"),
            openai_api_key: read_env("OPENAI_API_KEY"),
            openai_base_url: read_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: read_env("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            embedding_model: read_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            pinecone_api_key: read_env("PINECONE_API_KEY"),
            pinecone_index: read_env("PINECONE_INDEX"),
            top_k: read_env("RAG_TOP_K")
                .and_then(|val| val.parse().ok())
                .unwrap_or(DEFAULT_TOP_K),
        }
    }

    pub fn gemini_api_key(&self) -> Result<&str, PipelineError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| PipelineError::missing_env("GEMINI_API_KEY"))
    }

    pub fn openai_api_key(&self) -> Result<&str, PipelineError> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| PipelineError::missing_env("OPENAI_API_KEY"))
    }

    pub fn pinecone_api_key(&self) -> Result<&str, PipelineError> {
        self.pinecone_api_key
            .as_deref()
            .ok_or_else(|| PipelineError::missing_env("PINECONE_API_KEY"))
    }

    pub fn pinecone_index(&self) -> Result<&str, PipelineError> {
        self.pinecone_index
            .as_deref()
            .ok_or_else(|| PipelineError::missing_env("PINECONE_INDEX"))
    }
}

#[cfg(test)]
impl Settings {
    /// Empty settings with defaults only, for constructing test fixtures.
    pub fn empty() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            pinecone_api_key: None,
            pinecone_index: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_openai_api_key(mut self, key: &str) -> Self {
        self.openai_api_key = Some(key.to_string());
        self
    }
}

fn read_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|val| !val.trim().is_empty())
}
