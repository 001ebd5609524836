use serde::{Deserialize, Serialize};

use crate::types::{FileHandle, Mode};

/// Request body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

/// Request body for `POST /full-code-review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCodeReviewRequest {
    /// URL of the repository to review.
    pub repo_url: String,
}

/// A JSON request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonPayload {
    /// Chat message.
    Chat(ChatRequest),
    /// Repository review.
    FullCodeReview(FullCodeReviewRequest),
}

/// The body of a [`BackendCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Sent as `application/json`.
    Json(JsonPayload),
    /// Sent as `multipart/form-data`, one `files` part per handle, in order.
    Multipart(Vec<FileHandle>),
}

/// One outgoing request, tied to the mode that produced it.
///
/// Calls are only constructed through the per-mode constructors, so the
/// payload shape always matches the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCall {
    operation: Mode,
    payload: Payload,
}

impl BackendCall {
    /// A chat call carrying `text` verbatim.
    pub fn chat(text: impl Into<String>) -> Self {
        Self {
            operation: Mode::Chat,
            payload: Payload::Json(JsonPayload::Chat(ChatRequest {
                message: text.into(),
            })),
        }
    }

    /// A repository review call; the URL is not validated.
    pub fn review_repository(url: impl Into<String>) -> Self {
        Self {
            operation: Mode::RepositoryReview,
            payload: Payload::Json(JsonPayload::FullCodeReview(FullCodeReviewRequest {
                repo_url: url.into(),
            })),
        }
    }

    /// A file analysis call over a snapshot of `files`.
    pub fn analyze_files(files: Vec<FileHandle>) -> Self {
        Self {
            operation: Mode::FileAnalysis,
            payload: Payload::Multipart(files),
        }
    }

    /// The mode this call serves.
    pub fn operation(&self) -> Mode {
        self.operation
    }

    /// The request body.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consumes the call, returning its parts.
    pub fn into_parts(self) -> (Mode, Payload) {
        (self.operation, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_body_shape() {
        let call = BackendCall::chat("hello");
        assert_eq!(call.operation(), Mode::Chat);
        let Payload::Json(body) = call.payload() else {
            panic!("chat must be JSON");
        };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"message": "hello"}));
    }

    #[test]
    fn review_body_shape() {
        let call = BackendCall::review_repository("https://github.com/u/r");
        assert_eq!(call.operation(), Mode::RepositoryReview);
        let Payload::Json(body) = call.payload() else {
            panic!("review must be JSON");
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"repo_url": "https://github.com/u/r"})
        );
    }

    #[test]
    fn analyze_keeps_order() {
        let call = BackendCall::analyze_files(vec![
            FileHandle::from_bytes("a.py", "x"),
            FileHandle::from_bytes("b.py", "y"),
        ]);
        let (mode, payload) = call.into_parts();
        assert_eq!(mode, Mode::FileAnalysis);
        let Payload::Multipart(files) = payload else {
            panic!("analysis must be multipart");
        };
        let names: Vec<_> = files.iter().map(FileHandle::name).collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }
}
