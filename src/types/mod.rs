// Public modules
pub mod backend_call;
pub mod backend_reply;
pub mod error_body;
pub mod file_handle;
pub mod mode;
pub mod request_status;

// Re-exports
pub use backend_call::{BackendCall, ChatRequest, FullCodeReviewRequest, JsonPayload, Payload};
pub use backend_reply::{BackendReply, ChatReply, FileAnalysis, FullCodeReview, HealthStatus};
pub use error_body::{ErrorBody, rejection_message};
pub use file_handle::{FileHandle, FileSource};
pub use mode::{Mode, ModeParseError};
pub use request_status::RequestStatus;
