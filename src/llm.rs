use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::retrieval::{Embedder, Embedding, Generator};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBED_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const CHAT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Provider settings, normally read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub base_url: String,
    pub embed_model: String,
    pub chat_model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            embed_model: DEFAULT_EMBED_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = dotenv::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url);
        let embed_model = dotenv::var("OPENAI_EMBED_MODEL").unwrap_or(defaults.embed_model);
        let chat_model = dotenv::var("OPENAI_CHAT_MODEL").unwrap_or(defaults.chat_model);
        let api_key = dotenv::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let timeout = dotenv::var("LLM_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            base_url,
            embed_model,
            chat_model,
            api_key,
            timeout,
        }
    }

    /// Resolve `path` (e.g. `chat/completions`) against the base URL.
    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with(path) {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/{}", base, path)
        } else {
            format!("{}/v1/{}", base, path)
        }
    }
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Embedding,
}

/// OpenAI-compatible client for both embeddings and chat completions.
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<String> {
        let mut req = self.client.post(self.config.endpoint(path)).json(&body);
        if let Some(key) = &self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("{} request failed", path))?;
        let status = resp.status();
        let text = resp.text().await.context("Failed to read response body")?;
        if !status.is_success() {
            bail!("{} returned {}: {}", path, status, text);
        }
        Ok(text)
    }

    /// Embed a batch of texts in one round trip, preserving input order.
    pub async fn embeddings(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let body = serde_json::json!({
            "model": self.config.embed_model,
            "input": texts,
        });
        let text = self.post_json("embeddings", body).await?;
        let vectors = parse_embeddings(&text)?;
        debug!(
            count = vectors.len(),
            dims = vectors.first().map(|v| v.len()).unwrap_or(0),
            "embeddings received"
        );
        Ok(vectors)
    }

    /// Non-streaming chat completion.
    pub async fn chat(&self, messages: &[Message]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.config.chat_model,
            "messages": messages,
            "temperature": CHAT_TEMPERATURE,
        });
        let text = self.post_json("chat/completions", body).await?;
        parse_chat_content(&text)
    }
}

/// Pull vectors out of an embeddings reply, ordered by `index` when the provider sends one.
fn parse_embeddings(text: &str) -> Result<Vec<Embedding>> {
    let resp: EmbeddingsResponse =
        serde_json::from_str(text).context("Failed to parse embeddings JSON")?;
    let mut data = resp.data;
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

/// `choices[0].message.content`, or `""` when it is absent or null.
fn parse_chat_content(text: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(text).context("Failed to parse LLM JSON")?;
    Ok(json["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .unwrap_or("")
        .to_string())
}

#[async_trait]
impl Embedder for LlmClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.embeddings(texts).await
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages = [
            Message {
                role: "system".to_string(),
                content: system.to_string(),
            },
            Message {
                role: "user".to_string(),
                content: user.to_string(),
            },
        ];
        self.chat(&messages).await
    }
}
