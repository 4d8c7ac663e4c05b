use clap::Parser;
use tracing_subscriber::EnvFilter;

use second_brain::commands::{self, Cli};
use second_brain::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON reply, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    let state = AppState::from_env()?;
    let code = commands::run(cli, &state).await?;
    std::process::exit(code);
}
