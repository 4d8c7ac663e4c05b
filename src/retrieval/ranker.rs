use tracing::debug;

use super::vector::{similarity, Embedding};
use crate::docs::Document;
use crate::error::AskError;

/// How many notes make it into the context block.
pub const TOP_K: usize = 6;

/// A note with its embedding and its similarity to the question.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    pub document: Document,
    pub embedding: Embedding,
    pub score: f32,
}

/// Score every candidate against `query`, best first, keeping at most [`TOP_K`].
///
/// Equal scores keep their input order. A single mismatched embedding fails
/// the whole ranking, and so does a NaN or infinite score, which can only come
/// from a malformed embedding.
pub fn rank(
    query: &[f32],
    candidates: Vec<(Document, Embedding)>,
) -> Result<Vec<ScoredDocument>, AskError> {
    let mut scored = candidates
        .into_iter()
        .map(|(document, embedding)| -> Result<ScoredDocument, AskError> {
            let score = similarity(query, &embedding)?;
            if !score.is_finite() {
                return Err(AskError::Embedding(format!(
                    "non-finite similarity {} for {:?}",
                    score, document.title
                )));
            }
            Ok(ScoredDocument {
                document,
                embedding,
                score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(TOP_K);

    for (i, s) in scored.iter().enumerate() {
        debug!(rank = i + 1, title = %s.document.title, score = s.score, "ranked note");
    }

    Ok(scored)
}
