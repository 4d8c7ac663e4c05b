use serde::{Deserialize, Serialize};

use super::Document;
use crate::error::AskError;
use crate::retrieval::citations;

/// A note as the caller sends it. Both fields may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Inbound request: `{ "question": "...", "notes": [{ "title": "...", "content": "..." }] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub notes: Option<Vec<NoteInput>>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, notes: Vec<NoteInput>) -> Self {
        Self {
            question: Some(question.into()),
            notes: Some(notes),
        }
    }

    /// Parse a request body. Anything that isn't the expected shape is an `InvalidRequest`.
    pub fn from_json(body: &str) -> Result<Self, AskError> {
        serde_json::from_str(body).map_err(|e| AskError::InvalidRequest(e.to_string()))
    }

    /// Split into a question and typed documents.
    pub fn into_parts(self) -> Result<(String, Vec<Document>), AskError> {
        let (Some(question), Some(notes)) = (self.question, self.notes) else {
            return Err(AskError::InvalidRequest(
                "question and notes[] required".to_string(),
            ));
        };
        if question.trim().is_empty() {
            return Err(AskError::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }
        Ok((question, notes.into_iter().map(Document::from).collect()))
    }
}

/// A cited note, title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
}

/// The grounded answer plus the sources its `[n]` markers point into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    /// `sources[i - 1]` is the note rendered as `[i]` in the context.
    pub sources: Vec<Source>,
}

impl AnswerResult {
    /// Sources the answer actually cites, in order of first citation.
    pub fn cited_sources(&self) -> Vec<&Source> {
        citations::cited_indices(&self.answer, self.sources.len())
            .into_iter()
            .map(|i| &self.sources[i - 1])
            .collect()
    }
}

/// Outbound result shape. `ok` tells the boundary which status to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn success(result: AnswerResult) -> Self {
        Self {
            ok: true,
            answer: Some(result.answer),
            sources: Some(result.sources),
            error: None,
        }
    }

    pub fn failure(err: &AskError) -> Self {
        Self {
            ok: false,
            answer: None,
            sources: None,
            error: Some(err.to_string()),
        }
    }
}

impl From<Result<AnswerResult, AskError>> for AskResponse {
    fn from(result: Result<AnswerResult, AskError>) -> Self {
        match result {
            Ok(r) => AskResponse::success(r),
            Err(e) => AskResponse::failure(&e),
        }
    }
}
