use serde::Deserialize;
use serde_json::Value;

use crate::error::GENERIC_FAILURE_MESSAGE;

/// Failure body of a rejected request.
///
/// FastAPI reports `detail` as a string for `HTTPException` and as an array
/// of objects for request validation failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    /// The backend's explanation, if any.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// The `detail` field rendered as a message, if it is present and usable.
    ///
    /// `null` and blank strings count as absent.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Picks the user-facing message for a rejected request.
///
/// Prefers a JSON `detail`, then the raw body, then the generic message.
pub fn rejection_message(body: Option<&str>) -> String {
    let Some(body) = body else {
        return GENERIC_FAILURE_MESSAGE.to_string();
    };
    if let Some(detail) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail_message())
    {
        return detail;
    }
    if body.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}
