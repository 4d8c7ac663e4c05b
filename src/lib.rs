//! Answer questions from a handful of notes.
//!
//! Notes are embedded, ranked by cosine similarity against the question, and
//! the best few are rendered into a numbered context block. A chat model then
//! answers from that block, citing notes as `[1]`, `[2]`, ... which line up
//! with the returned sources. Nothing is kept between requests.

pub mod commands;
pub mod docs;
pub mod error;
pub mod llm;
pub mod retrieval;
pub mod state;

pub use docs::types::{AnswerResult, AskRequest, AskResponse, NoteInput, Source};
pub use docs::Document;
pub use error::AskError;
pub use llm::{LlmClient, LlmConfig};
pub use retrieval::{AnswerPipeline, Embedder, Embedding, Generator, RankedContext};
pub use state::AppState;
