//! Command-line argument parsing for the quizbank CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,
    /// Show the signed-in user
    WhoAmI,
    /// List quizzes
    Quizzes,
    /// List the question bank
    Questions,
    /// Take a quiz interactively
    Take { quiz_id: String },
    /// Arguments that could not be parsed, with the reason
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: quizbank <command>

Commands:
  login <username> <password>     Sign in and save the session
  register <username> <password>  Create an account
  logout                          Forget the saved session
  whoami                          Show the signed-in user
  quizzes                         List quizzes
  questions                       List the question bank
  take <quiz-id>                  Take a quiz on the terminal

Options:
  -V, --version                   Print version
  -h, --help                      Print this help";

/// Parse command-line arguments (including the program name) into a
/// command.
///
/// # Examples
///
/// ```
/// use quizbank::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["quizbank".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return CliCommand::Help;
    }

    let Some((command, rest)) = args.split_first() else {
        return CliCommand::Help;
    };

    match (command.as_str(), rest) {
        ("login", [username, password]) => CliCommand::Login {
            username: username.clone(),
            password: password.clone(),
        },
        ("register", [username, password]) => CliCommand::Register {
            username: username.clone(),
            password: password.clone(),
        },
        ("login" | "register", _) => {
            CliCommand::Invalid(format!("{} expects <username> <password>", command))
        }
        ("logout", []) => CliCommand::Logout,
        ("whoami", []) => CliCommand::WhoAmI,
        ("quizzes", []) => CliCommand::Quizzes,
        ("questions", []) => CliCommand::Questions,
        ("take", [quiz_id]) => CliCommand::Take {
            quiz_id: quiz_id.clone(),
        },
        ("take", _) => CliCommand::Invalid("take expects <quiz-id>".to_string()),
        ("logout" | "whoami" | "quizzes" | "questions", _) => {
            CliCommand::Invalid(format!("{} takes no arguments", command))
        }
        (other, _) => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}
