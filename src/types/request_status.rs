use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the most recent submission in a session.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Nothing submitted since the session started or the mode changed.
    #[default]
    Idle,

    /// A request is outstanding.
    InFlight,

    /// The last request produced a result.
    Succeeded,

    /// The last request produced an error message.
    Failed,
}

impl RequestStatus {
    /// Returns true while a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestStatus::InFlight)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::InFlight => write!(f, "in flight"),
            RequestStatus::Succeeded => write!(f, "succeeded"),
            RequestStatus::Failed => write!(f, "failed"),
        }
    }
}
