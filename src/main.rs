use quizbank::cli::{parse_args, run_cli_command};
use quizbank::config::ClientConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizbank=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let command = parse_args(std::env::args());
    let config = ClientConfig::from_env();
    run_cli_command(command, &config).await
}
