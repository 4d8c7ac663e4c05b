use anyhow::Result;
use tracing::{info, warn};

use super::{exit_code, RequestArgs};
use crate::docs::types::AskResponse;
use crate::state::AppState;

/// Answer the request and print the response JSON on stdout.
pub async fn ask(state: &AppState, args: &RequestArgs) -> Result<i32> {
    let request = match args.load() {
        Ok(request) => request,
        Err(err) => return emit(&AskResponse::failure(&err), exit_code(&err)),
    };

    let note_count = request.notes.as_ref().map(Vec::len).unwrap_or(0);
    info!(note_count, "ask started");

    match state.answer(request).await {
        Ok(result) => {
            info!(
                sources = result.sources.len(),
                cited = result.cited_sources().len(),
                "ask complete"
            );
            emit(&AskResponse::success(result), 0)
        }
        Err(err) => {
            warn!(error = %err, "ask failed");
            emit(&AskResponse::failure(&err), exit_code(&err))
        }
    }
}

pub(super) fn emit(response: &AskResponse, code: i32) -> Result<i32> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(code)
}
