pub mod citations;
pub mod context;
pub mod prompts;
pub mod ranker;
pub mod vector;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use tracing::{debug, info, warn};

use crate::docs::types::{AnswerResult, Source};
use crate::docs::Document;
use crate::error::AskError;

pub use ranker::{ScoredDocument, TOP_K};
pub use vector::Embedding;

/// Turns text into vectors. One call per batch; the reply has the same length and order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> anyhow::Result<Vec<Embedding>>;
}

/// Produces an answer from a system instruction and a user message. May return `""`.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String>;
}

/// The top-ranked notes and the context block built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedContext {
    pub ranked: Vec<ScoredDocument>,
    pub context: String,
    /// `titles[i - 1]` is the note rendered as `[i]`.
    pub titles: Vec<String>,
}

/// Question + notes in, grounded answer with sources out.
///
/// Holds no per-request state, so one pipeline can serve concurrent asks.
pub struct AnswerPipeline {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
}

impl AnswerPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>) -> Self {
        Self {
            embedder,
            generator,
        }
    }

    /// Embed, rank and assemble, without calling the generator.
    pub async fn retrieve(
        &self,
        question: &str,
        notes: Vec<Document>,
    ) -> Result<RankedContext, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }

        let texts: Vec<String> = notes.iter().map(Document::text).collect();
        info!(note_count = notes.len(), "ranking notes");

        let (query, vectors) = future::try_join(
            self.embed_question(question),
            self.embed_notes(&texts),
        )
        .await?;

        let candidates = notes.into_iter().zip(vectors).collect();
        let ranked = ranker::rank(&query, candidates)?;
        let (context, titles) = context::assemble(&ranked);
        debug!(
            ranked = ranked.len(),
            context_len = context.len(),
            "context assembled"
        );

        Ok(RankedContext {
            ranked,
            context,
            titles,
        })
    }

    /// Run the whole pipeline: retrieve, then ask the generator with the context.
    pub async fn answer(
        &self,
        question: &str,
        notes: Vec<Document>,
    ) -> Result<AnswerResult, AskError> {
        let retrieved = self.retrieve(question, notes).await?;

        let user = prompts::user_message(question, &retrieved.context);
        let answer = self
            .generator
            .complete(prompts::SYSTEM_PROMPT, &user)
            .await
            .map_err(|e| {
                warn!(error = %e, "generator failed");
                AskError::generation(e)
            })?;

        if answer.trim().is_empty() {
            debug!("generator returned an empty answer");
        }
        info!(
            answer_len = answer.len(),
            source_count = retrieved.titles.len(),
            "answer ready"
        );

        Ok(AnswerResult {
            answer,
            sources: retrieved
                .titles
                .into_iter()
                .map(|title| Source { title })
                .collect(),
        })
    }

    async fn embed_question(&self, question: &str) -> Result<Embedding, AskError> {
        let mut vectors = self.embed_batch(&[question.to_string()]).await?;
        Ok(vectors.remove(0))
    }

    async fn embed_notes(&self, texts: &[String]) -> Result<Vec<Embedding>, AskError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_batch(texts).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, AskError> {
        let vectors = self.embedder.embed(texts).await.map_err(|e| {
            warn!(error = %e, batch = texts.len(), "embedder failed");
            AskError::embedding(e)
        })?;
        if vectors.len() != texts.len() {
            return Err(AskError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}
