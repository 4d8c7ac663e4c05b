mod ask;
mod rank;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::docs::types::{AskRequest, NoteInput};
use crate::error::AskError;
use crate::state::AppState;

/// Ask questions about your notes.
#[derive(Debug, Parser)]
#[command(name = "second-brain", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer a question from the given notes, citing them
    Ask(RequestArgs),
    /// Show how the notes rank against a question (no answer is generated)
    Rank(RequestArgs),
}

/// Where the request comes from: a JSON body, or a question plus a notes file.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// JSON request `{"question": ..., "notes": [...]}`; `-` reads stdin
    #[arg(long, conflicts_with_all = ["question", "notes"])]
    pub request: Option<PathBuf>,
    /// The question to ask
    #[arg(long, short, requires = "notes")]
    pub question: Option<String>,
    /// JSON array of `{"title": ..., "content": ...}` notes
    #[arg(long, short, requires = "question")]
    pub notes: Option<PathBuf>,
}

impl RequestArgs {
    /// Build the request. With no flags at all, the request is read from stdin.
    ///
    /// Unreadable or malformed input is the caller's problem, so every failure
    /// here is an `InvalidRequest`.
    pub fn load(&self) -> Result<AskRequest, AskError> {
        if let (Some(question), Some(notes)) = (&self.question, &self.notes) {
            let body = read_source(notes)?;
            let notes: Vec<NoteInput> = serde_json::from_str(&body).map_err(|e| {
                AskError::InvalidRequest(format!("notes file must be a JSON array: {}", e))
            })?;
            return Ok(AskRequest::new(question.clone(), notes));
        }

        let path = self.request.clone().unwrap_or_else(|| PathBuf::from("-"));
        let body = read_source(&path)?;
        AskRequest::from_json(&body)
    }
}

fn read_source(path: &Path) -> Result<String, AskError> {
    let read = if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read stdin")
            .map(|_| body)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    };
    read.map_err(|e| AskError::InvalidRequest(format!("{:#}", e)))
}

/// Exit status for a failed ask: 2 when the caller is at fault, 1 otherwise.
fn exit_code(err: &AskError) -> i32 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}

/// Run a command; the returned code is the process exit status.
pub async fn run(cli: Cli, state: &AppState) -> Result<i32> {
    match cli.command {
        Command::Ask(args) => ask::ask(state, &args).await,
        Command::Rank(args) => rank::rank(state, &args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_question_and_notes() {
        let cli = Cli::try_parse_from([
            "second-brain",
            "ask",
            "--question",
            "What is my cat's name?",
            "--notes",
            "notes.json",
        ])
        .unwrap();
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.question.as_deref(), Some("What is my cat's name?"));
        assert_eq!(args.notes, Some(PathBuf::from("notes.json")));
        assert!(args.request.is_none());
    }

    #[test]
    fn test_question_requires_notes() {
        assert!(Cli::try_parse_from(["second-brain", "rank", "-q", "hi"]).is_err());
    }

    #[test]
    fn test_request_conflicts_with_question() {
        assert!(Cli::try_parse_from([
            "second-brain",
            "ask",
            "--request",
            "req.json",
            "-q",
            "hi",
            "-n",
            "notes.json"
        ])
        .is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&AskError::InvalidRequest("x".into())), 2);
        assert_eq!(exit_code(&AskError::Generation("x".into())), 1);
    }

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "second-brain-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn test_state() -> AppState {
        use crate::retrieval::testing::{FixedEmbedder, RecordingGenerator};
        use crate::retrieval::AnswerPipeline;
        use std::sync::Arc;

        let pipeline = AnswerPipeline::new(
            Arc::new(FixedEmbedder::default()),
            Arc::new(RecordingGenerator::default()),
        );
        AppState::new(Arc::new(pipeline), std::time::Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_non_array_notes_file_is_client_error() {
        let path = temp_file("not-array", r#""nope""#);
        let notes = path.to_str().unwrap().to_string();
        let state = test_state();

        for cmd in ["ask", "rank"] {
            let cli =
                Cli::try_parse_from(["second-brain", cmd, "-q", "hi", "-n", notes.as_str()])
                    .unwrap();
            assert_eq!(run(cli, &state).await.unwrap(), 2);
        }
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_request_file_is_client_error() {
        let cli = Cli::try_parse_from([
            "second-brain",
            "ask",
            "--request",
            "/nonexistent/second-brain/request.json",
        ])
        .unwrap();
        assert_eq!(run(cli, &test_state()).await.unwrap(), 2);
    }

    #[test]
    fn test_load_reports_notes_parse_error() {
        let path = temp_file("bad-notes", "{}");
        let args = RequestArgs {
            request: None,
            question: Some("hi".into()),
            notes: Some(path.clone()),
        };
        let err = args.load().unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(err.is_client_error());
        assert!(err.to_string().contains("notes file must be a JSON array"));
    }

    #[test]
    fn test_load_from_request_file() {
        let path = std::env::temp_dir().join(format!(
            "second-brain-req-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"question":"q","notes":[{"title":"A","content":"a"}]}"#,
        )
        .unwrap();

        let args = RequestArgs {
            request: Some(path.clone()),
            question: None,
            notes: None,
        };
        let (question, docs) = args.load().unwrap().into_parts().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(question, "q");
        assert_eq!(docs[0].title, "A");
    }
}
