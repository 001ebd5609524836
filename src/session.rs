//! Session orchestration.
//!
//! A [`Session`] owns the dashboard state: the active mode, one input buffer
//! per mode, and the result/error projection of the latest submission. It
//! turns a submit into exactly one backend call and allows at most one call
//! to be outstanding.
//!
//! Submission is split in three so a front end can keep editing buffers while
//! a call is suspended:
//!
//! 1. [`Session::begin_submit`] checks the guard, moves to `InFlight`, and
//!    snapshots the active buffer into a [`PendingSubmission`].
//! 2. [`PendingSubmission::run`] performs the exchange without borrowing the
//!    session.
//! 3. [`Session::complete`] projects the outcome and leaves `InFlight`.
//!
//! [`Session::submit`] chains the three.

use std::fmt;
use std::sync::Arc;

use crate::client::Backend;
use crate::error::Result;
use crate::observability::{SESSION_IGNORED, SESSION_STALE_COMPLETIONS, SESSION_SUBMISSIONS};
use crate::types::{BackendCall, FileHandle, Mode, RequestStatus};

/// Why a submission was dropped without contacting the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    /// Chat mode with blank input.
    BlankChatInput,
    /// Repository mode with a blank URL.
    BlankRepositoryUrl,
    /// File mode with nothing selected.
    NoFilesSelected,
    /// Another submission has not resolved yet.
    RequestOutstanding,
}

impl fmt::Display for GuardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardRejection::BlankChatInput => write!(f, "chat input is blank"),
            GuardRejection::BlankRepositoryUrl => write!(f, "repository URL is blank"),
            GuardRejection::NoFilesSelected => write!(f, "no files selected"),
            GuardRejection::RequestOutstanding => write!(f, "a request is already in flight"),
        }
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The result text was projected.
    Succeeded,
    /// The error message was projected.
    Failed,
    /// The guard dropped the submission; state is unchanged.
    Ignored(GuardRejection),
    /// The completion no longer matched the session and was dropped.
    Discarded,
}

/// The state shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    active_mode: Mode,
    chat_input: String,
    repository_url: String,
    selected_files: Vec<FileHandle>,
    request_status: RequestStatus,
    result_text: Option<String>,
    error_message: Option<String>,
}

impl SessionState {
    /// The active interaction mode.
    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    /// The chat buffer.
    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    /// The repository URL buffer.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// The files selected for analysis, in selection order.
    pub fn selected_files(&self) -> &[FileHandle] {
        &self.selected_files
    }

    /// Lifecycle of the latest submission.
    pub fn request_status(&self) -> RequestStatus {
        self.request_status
    }

    /// Result of the latest successful submission.
    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    /// Message of the latest failed submission.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Aggregated counters for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Submissions that reached the backend.
    pub submissions: u64,
    /// Submissions that projected a result.
    pub succeeded: u64,
    /// Submissions that projected an error.
    pub failed: u64,
    /// Submissions dropped by the guard.
    pub ignored: u64,
    /// Completions dropped because the mode changed while in flight.
    pub discarded: u64,
}

/// A submission that has left the session and awaits its exchange.
pub struct PendingSubmission<B: Backend> {
    ticket: u64,
    epoch: u64,
    call: BackendCall,
    backend: Arc<B>,
}

impl<B: Backend> PendingSubmission<B> {
    /// The call that will be sent.
    pub fn call(&self) -> &BackendCall {
        &self.call
    }

    /// Performs the exchange.
    pub async fn run(self) -> Completion {
        let mode = self.call.operation();
        let result = self.backend.execute(self.call).await;
        Completion {
            ticket: self.ticket,
            epoch: self.epoch,
            mode,
            result,
        }
    }
}

/// The resolved outcome of a [`PendingSubmission`].
#[derive(Debug)]
pub struct Completion {
    ticket: u64,
    epoch: u64,
    mode: Mode,
    result: Result<String>,
}

impl Completion {
    /// The mode the call was made for.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The backend outcome.
    pub fn result(&self) -> &Result<String> {
        &self.result
    }
}

/// The dashboard orchestrator.
pub struct Session<B: Backend> {
    backend: Arc<B>,
    state: SessionState,
    outstanding: Option<u64>,
    next_ticket: u64,
    epoch: u64,
    stats: SessionStats,
}

impl<B: Backend> Session<B> {
    /// Creates a session in chat mode with empty buffers.
    pub fn new(backend: B) -> Self {
        Self::with_shared_backend(Arc::new(backend))
    }

    /// Creates a session over a backend shared with other owners.
    pub fn with_shared_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: SessionState::default(),
            outstanding: None,
            next_ticket: 0,
            epoch: 0,
            stats: SessionStats::default(),
        }
    }

    /// The backend this session submits to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The current state projection.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Session counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Returns true while a submission has not resolved.
    ///
    /// This can be true while the status reads `Idle`, if the mode was
    /// switched after the request left.
    pub fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Switches the active mode.
    ///
    /// Clears the result and error, forces `Idle`, and leaves every input
    /// buffer untouched. A request already in flight keeps its slot but its
    /// completion will be discarded.
    pub fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(from = %self.state.active_mode, to = %mode, "switching mode");
        self.state.active_mode = mode;
        self.state.request_status = RequestStatus::Idle;
        self.state.result_text = None;
        self.state.error_message = None;
        self.epoch += 1;
    }

    /// Replaces the chat buffer.
    pub fn set_chat_input(&mut self, text: impl Into<String>) {
        self.state.chat_input = text.into();
    }

    /// Replaces the repository URL buffer.
    pub fn set_repository_url(&mut self, url: impl Into<String>) {
        self.state.repository_url = url.into();
    }

    /// Replaces the file selection.
    pub fn select_files(&mut self, files: Vec<FileHandle>) {
        self.state.selected_files = files;
    }

    /// Appends a file to the selection.
    pub fn add_file(&mut self, file: FileHandle) {
        self.state.selected_files.push(file);
    }

    /// Empties the file selection.
    pub fn clear_files(&mut self) {
        self.state.selected_files.clear();
    }

    /// Submits the active mode's buffer and waits for the outcome.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let completion = pending.run().await;
                self.complete(completion)
            }
            Err(reason) => SubmitOutcome::Ignored(reason),
        }
    }

    /// Starts a submission.
    ///
    /// On success the session is `InFlight` and the returned submission
    /// carries a snapshot of the active buffer. On guard failure nothing
    /// changes.
    pub fn begin_submit(&mut self) -> std::result::Result<PendingSubmission<B>, GuardRejection> {
        let call = match self.guard() {
            Ok(call) => call,
            Err(reason) => {
                tracing::debug!(mode = %self.state.active_mode, %reason, "submission ignored");
                SESSION_IGNORED.click();
                self.stats.ignored += 1;
                return Err(reason);
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding = Some(ticket);
        self.state.request_status = RequestStatus::InFlight;
        self.state.result_text = None;
        self.state.error_message = None;
        self.stats.submissions += 1;
        SESSION_SUBMISSIONS.click();
        tracing::debug!(mode = %call.operation(), ticket, "submission started");

        Ok(PendingSubmission {
            ticket,
            epoch: self.epoch,
            call,
            backend: Arc::clone(&self.backend),
        })
    }

    /// Projects a finished exchange into the session.
    ///
    /// This is the only way out of `InFlight`.
    pub fn complete(&mut self, completion: Completion) -> SubmitOutcome {
        if self.outstanding != Some(completion.ticket) {
            tracing::warn!(ticket = completion.ticket, "completion for unknown submission");
            return SubmitOutcome::Discarded;
        }
        self.outstanding = None;

        if completion.epoch != self.epoch {
            tracing::debug!(mode = %completion.mode, "discarding completion after mode switch");
            SESSION_STALE_COMPLETIONS.click();
            self.stats.discarded += 1;
            return SubmitOutcome::Discarded;
        }

        match completion.result {
            Ok(text) => {
                self.state.result_text = Some(text);
                self.state.error_message = None;
                self.state.request_status = RequestStatus::Succeeded;
                self.stats.succeeded += 1;
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                self.state.result_text = None;
                self.state.error_message = Some(err.message().to_string());
                self.state.request_status = RequestStatus::Failed;
                self.stats.failed += 1;
                SubmitOutcome::Failed
            }
        }
    }

    fn guard(&self) -> std::result::Result<BackendCall, GuardRejection> {
        if self.outstanding.is_some() {
            return Err(GuardRejection::RequestOutstanding);
        }
        match self.state.active_mode {
            Mode::Chat => {
                if self.state.chat_input.trim().is_empty() {
                    Err(GuardRejection::BlankChatInput)
                } else {
                    Ok(BackendCall::chat(self.state.chat_input.clone()))
                }
            }
            Mode::RepositoryReview => {
                if self.state.repository_url.trim().is_empty() {
                    Err(GuardRejection::BlankRepositoryUrl)
                } else {
                    Ok(BackendCall::review_repository(
                        self.state.repository_url.clone(),
                    ))
                }
            }
            Mode::FileAnalysis => {
                if self.state.selected_files.is_empty() {
                    Err(GuardRejection::NoFilesSelected)
                } else {
                    Ok(BackendCall::analyze_files(self.state.selected_files.clone()))
                }
            }
        }
    }
}
