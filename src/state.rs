use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::docs::types::{AnswerResult, AskRequest, AskResponse};
use crate::error::AskError;
use crate::llm::LlmClient;
use crate::retrieval::{AnswerPipeline, RankedContext};

const DEFAULT_ASK_TIMEOUT_SECS: u64 = 60;

/// Everything a request handler needs: the pipeline and how long an ask may take.
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: Arc<AnswerPipeline>, request_timeout: Duration) -> Self {
        Self {
            pipeline,
            request_timeout,
        }
    }

    /// Wire an [`LlmClient`] from the environment in as both embedder and generator.
    pub fn from_env() -> Result<Self> {
        let llm = Arc::new(LlmClient::from_env()?);
        info!(
            embed_model = %llm.config().embed_model,
            chat_model = %llm.config().chat_model,
            "LLM client initialized"
        );

        let timeout = dotenv::var("ASK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_ASK_TIMEOUT_SECS);

        let pipeline = Arc::new(AnswerPipeline::new(llm.clone(), llm));
        Ok(Self::new(pipeline, Duration::from_secs(timeout)))
    }

    /// Answer a request within the configured timeout and shape the reply.
    pub async fn ask(&self, request: AskRequest) -> AskResponse {
        self.answer(request).await.into()
    }

    /// Like [`AppState::ask`], but keeps the typed error.
    pub async fn answer(&self, request: AskRequest) -> Result<AnswerResult, AskError> {
        let (question, notes) = request.into_parts()?;
        self.with_timeout(self.pipeline.answer(&question, notes))
            .await
    }

    /// Ranking only, under the same timeout.
    pub async fn rank(&self, request: AskRequest) -> Result<RankedContext, AskError> {
        let (question, notes) = request.into_parts()?;
        self.with_timeout(self.pipeline.retrieve(&question, notes))
            .await
    }

    async fn with_timeout<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, AskError>>,
    ) -> Result<T, AskError> {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.request_timeout, "ask timed out");
                Err(AskError::Timeout(self.request_timeout))
            }
        }
    }
}
