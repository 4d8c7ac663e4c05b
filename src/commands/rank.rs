use anyhow::Result;
use serde::Serialize;

use super::ask::emit;
use super::{exit_code, RequestArgs};
use crate::docs::types::AskResponse;
use crate::retrieval::RankedContext;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct RankedNote<'a> {
    rank: usize,
    title: &'a str,
    score: f32,
}

#[derive(Debug, Serialize)]
struct RankReport<'a> {
    ok: bool,
    ranked: Vec<RankedNote<'a>>,
    context: &'a str,
}

impl<'a> From<&'a RankedContext> for RankReport<'a> {
    fn from(ctx: &'a RankedContext) -> Self {
        Self {
            ok: true,
            ranked: ctx
                .ranked
                .iter()
                .enumerate()
                .map(|(i, s)| RankedNote {
                    rank: i + 1,
                    title: &s.document.title,
                    score: s.score,
                })
                .collect(),
            context: &ctx.context,
        }
    }
}

/// Print the ranking and the context block the generator would see.
pub async fn rank(state: &AppState, args: &RequestArgs) -> Result<i32> {
    let result = match args.load() {
        Ok(request) => state.rank(request).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(ctx) => {
            println!("{}", serde_json::to_string_pretty(&RankReport::from(&ctx))?);
            Ok(0)
        }
        Err(err) => emit(&AskResponse::failure(&err), exit_code(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Document;
    use crate::retrieval::ScoredDocument;

    #[test]
    fn test_report_shape() {
        let ctx = RankedContext {
            ranked: vec![ScoredDocument {
                document: Document::new("Pets", "My cat is named Whiskers."),
                embedding: vec![1.0],
                score: 0.5,
            }],
            context: "[1] Pets: My cat is named Whiskers.".into(),
            titles: vec!["Pets".into()],
        };
        let json = serde_json::to_value(RankReport::from(&ctx)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ok": true,
                "ranked": [{"rank": 1, "title": "Pets", "score": 0.5}],
                "context": "[1] Pets: My cat is named Whiskers."
            })
        );
    }
}
