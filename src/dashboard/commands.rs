//! Slash command parsing for the dashboard front end.
//!
//! Commands start with `/` and act on the session without submitting
//! anything, except `/submit`.

use crate::types::Mode;

/// A parsed dashboard command.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    /// Switch the active mode.
    Mode(Mode),

    /// Set the repository URL without submitting.
    RepositoryUrl(String),

    /// Append files to the selection.
    AddFiles(Vec<String>),

    /// List the selected files.
    ListFiles,

    /// Empty the file selection.
    ClearFiles,

    /// Submit the active mode's buffer.
    Submit,

    /// Show the session state and counters.
    Status,

    /// Probe the backend's health endpoint.
    Health,

    /// Display help information.
    Help,

    /// Exit the dashboard.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(DashboardCommand)` if the input is a command, or `None` if
/// it should be treated as input for the active mode.
///
/// # Examples
///
/// ```
/// # use reviewdash::dashboard::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/mode repo").is_some());
/// assert!(parse_command("Explain this traceback").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<DashboardCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "mode" => match argument {
            Some(arg) => match arg.parse::<Mode>() {
                Ok(mode) => DashboardCommand::Mode(mode),
                Err(err) => DashboardCommand::Invalid(err.to_string()),
            },
            None => DashboardCommand::Invalid("/mode requires chat, repo, or files".to_string()),
        },
        "chat" => DashboardCommand::Mode(Mode::Chat),
        "repo" => DashboardCommand::Mode(Mode::RepositoryReview),
        "url" => match argument {
            Some(url) => DashboardCommand::RepositoryUrl(url.to_string()),
            None => DashboardCommand::Invalid("/url requires a repository URL".to_string()),
        },
        "add" => match argument {
            Some(paths) => {
                DashboardCommand::AddFiles(paths.split_whitespace().map(String::from).collect())
            }
            None => DashboardCommand::Invalid("/add requires one or more file paths".to_string()),
        },
        "files" => match argument {
            Some(arg) if arg.eq_ignore_ascii_case("clear") => DashboardCommand::ClearFiles,
            Some(_) => DashboardCommand::Invalid("/files takes no argument except 'clear'".to_string()),
            None => DashboardCommand::ListFiles,
        },
        "unselect" => DashboardCommand::ClearFiles,
        "submit" | "send" => DashboardCommand::Submit,
        "status" | "stats" => DashboardCommand::Status,
        "health" => DashboardCommand::Health,
        "help" | "?" => DashboardCommand::Help,
        "quit" | "exit" | "q" => DashboardCommand::Quit,
        _ => DashboardCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /mode chat|repo|files  Switch interaction mode (/chat and /repo are shortcuts)
  /url <url>             Set the repository URL without submitting
  /add <path>...         Add files to the selection
  /files                 List selected files ('/files clear' empties them)
  /unselect              Empty the file selection
  /submit                Submit the active mode's input
  /status                Show mode, buffers, and request counters
  /health                Check that the backend is reachable
  /help                  Show this help message
  /quit                  Exit the dashboard

Any other line becomes the active mode's input and is submitted:
  chat   the line is the message
  repo   the line is the repository URL
  files  the line is a whitespace-separated list of paths"#
}
