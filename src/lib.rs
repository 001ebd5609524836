//! Request orchestration for an AI code-review backend.
//!
//! The crate turns dashboard input into exactly one of three backend calls
//! (chat, repository review, file analysis), tracks the call's lifecycle, and
//! normalizes every response shape into either result text or an error
//! message.
//!
//! ```rust,ignore
//! use reviewdash::{ClientConfig, Mode, ReviewClient, Session};
//!
//! let client = ReviewClient::new(&ClientConfig::new("http://localhost:8000"))?;
//! let mut session = Session::new(client);
//! session.set_mode(Mode::RepositoryReview);
//! session.set_repository_url("https://github.com/u/r");
//! session.submit().await;
//! println!("{:?}", session.state().result_text());
//! ```

// Public modules
pub mod client;
pub mod client_logger;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod session;
pub mod types;

mod observability;

// Re-exports
pub use client::{Backend, ReviewClient};
pub use client_logger::ClientLogger;
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use observability::register_biometrics;
pub use session::{
    Completion, GuardRejection, PendingSubmission, Session, SessionState, SessionStats,
    SubmitOutcome,
};
pub use types::*;
