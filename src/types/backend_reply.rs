use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Mode;

/// Success body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The model's answer.
    pub reply: String,
}

/// Success body of `POST /full-code-review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCodeReview {
    /// The review report.
    pub full_code_review: String,
}

/// Success body of `POST /explain-file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// The analysis of the uploaded files.
    pub analysis: String,
}

/// Success body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` when the backend is up.
    pub status: String,
}

/// A decoded success response, keyed by the mode that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendReply {
    /// Reply to a chat message.
    Chat(ChatReply),
    /// Repository review report.
    FullCodeReview(FullCodeReview),
    /// File analysis.
    FileAnalysis(FileAnalysis),
}

impl BackendReply {
    /// Decodes a success body for `mode`.
    ///
    /// Fails with a malformed-response error when the body is not JSON or
    /// lacks the mode's string field. Unknown fields are ignored.
    pub fn decode(mode: Mode, body: &[u8]) -> Result<Self> {
        match mode {
            Mode::Chat => decode_field(mode.result_field(), body).map(BackendReply::Chat),
            Mode::RepositoryReview => {
                decode_field(mode.result_field(), body).map(BackendReply::FullCodeReview)
            }
            Mode::FileAnalysis => {
                decode_field(mode.result_field(), body).map(BackendReply::FileAnalysis)
            }
        }
    }

    /// The mode this reply answers.
    pub fn mode(&self) -> Mode {
        match self {
            BackendReply::Chat(_) => Mode::Chat,
            BackendReply::FullCodeReview(_) => Mode::RepositoryReview,
            BackendReply::FileAnalysis(_) => Mode::FileAnalysis,
        }
    }

    /// The displayable result text.
    pub fn into_text(self) -> String {
        match self {
            BackendReply::Chat(reply) => reply.reply,
            BackendReply::FullCodeReview(review) => review.full_code_review,
            BackendReply::FileAnalysis(analysis) => analysis.analysis,
        }
    }
}

/// Decodes `body` as `T`, naming `field` in the error if the shape is wrong.
pub(crate) fn decode_field<T: DeserializeOwned>(field: &str, body: &[u8]) -> Result<T> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|err| {
        Error::malformed_response(
            format!("response is not valid JSON: {err}"),
            Some(Box::new(err)),
        )
    })?;
    serde_json::from_value(value).map_err(|err| {
        Error::malformed_response(
            format!("response has no string `{field}` field"),
            Some(Box::new(err)),
        )
    })
}
