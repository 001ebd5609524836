use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The interaction mode of a dashboard session.
///
/// The mode decides which buffer is submitted, which endpoint receives it,
/// and which field of the response carries the result.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Free-form chat with the backend.
    #[default]
    Chat,

    /// Whole-repository review by URL.
    RepositoryReview,

    /// Analysis of locally selected files.
    FileAnalysis,
}

impl Mode {
    /// All modes, in tab order.
    pub const ALL: [Mode; 3] = [Mode::Chat, Mode::RepositoryReview, Mode::FileAnalysis];

    /// The backend path that serves this mode.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Mode::Chat => "/chat",
            Mode::RepositoryReview => "/full-code-review",
            Mode::FileAnalysis => "/explain-file",
        }
    }

    /// The response field that carries a successful result.
    pub fn result_field(&self) -> &'static str {
        match self {
            Mode::Chat => "reply",
            Mode::RepositoryReview => "full_code_review",
            Mode::FileAnalysis => "analysis",
        }
    }

    /// Short human label, as shown on the dashboard tabs.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Chat => "Chat",
            Mode::RepositoryReview => "GitHub Repo",
            Mode::FileAnalysis => "File Upload",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Chat => write!(f, "chat"),
            Mode::RepositoryReview => write!(f, "repo"),
            Mode::FileAnalysis => write!(f, "files"),
        }
    }
}

/// Error returned when parsing an invalid mode string.
#[derive(Debug)]
pub struct ModeParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown mode: {} (expected chat, repo, or files)",
            self.invalid_value
        )
    }
}

impl std::error::Error for ModeParseError {}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(Mode::Chat),
            "repo" | "repository" | "review" => Ok(Mode::RepositoryReview),
            "files" | "file" | "analyze" => Ok(Mode::FileAnalysis),
            _ => Err(ModeParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
