//! CLI module for quizbank.
//!
//! - Argument parsing
//! - Version display
//! - Subcommand handlers over a [`QuizClient`]
//!
//! # Usage
//!
//! ```ignore
//! use quizbank::cli::{parse_args, run_cli_command};
//! use quizbank::config::ClientConfig;
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &ClientConfig::from_env()).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{handle_version_command, VERSION};

use std::io::{BufRead, Write};

use color_eyre::eyre::{eyre, Report, Result};

use crate::app::QuizClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorCategory};
use crate::models::Credentials;
use crate::session::AccessDenied;
use crate::validation::ValidationError;

/// Run a command against the configured server, on the process's stdin
/// and stdout.
pub async fn run_cli_command(command: CliCommand, config: &ClientConfig) -> Result<()> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Invalid(reason) => Err(eyre!("{}\n\n{}", reason, USAGE)),
        command => {
            let client = QuizClient::from_config(config);
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            let result = dispatch(command, &client, &mut input, &mut out).await;
            if let Some(hint) = result.as_ref().err().and_then(failure_hint) {
                eprintln!("{}", hint);
            }
            result
        }
    }
}

fn category_of(error: &Report) -> Option<ErrorCategory> {
    if let Some(error) = error.downcast_ref::<ClientError>() {
        return Some(error.category());
    }
    if error.downcast_ref::<AccessDenied>().is_some() {
        return Some(ErrorCategory::Auth);
    }
    if error.downcast_ref::<ValidationError>().is_some() {
        return Some(ErrorCategory::User);
    }
    None
}

/// A line of advice for a failed command, for failures the client
/// classifies.
pub fn failure_hint(error: &Report) -> Option<String> {
    let category = category_of(error)?;
    Some(format!("{}. {}.", category.description(), category.recovery_hint()))
}

/// Run a command that needs a client.
pub async fn dispatch<R: BufRead, W: Write>(
    command: CliCommand,
    client: &QuizClient,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    match command {
        CliCommand::Login { username, password } => {
            commands::login(client, Credentials::new(username, password), out).await
        }
        CliCommand::Register { username, password } => {
            commands::register(client, username, password, out).await
        }
        CliCommand::Logout => commands::logout(client, out),
        CliCommand::WhoAmI => commands::whoami(client, out),
        CliCommand::Quizzes => commands::list_quizzes(client, out).await,
        CliCommand::Questions => commands::list_questions(client, out).await,
        CliCommand::Take { quiz_id } => commands::take_quiz(client, &quiz_id, input, out).await,
        other => Err(eyre!("{:?} does not use the client", other)),
    }
}
