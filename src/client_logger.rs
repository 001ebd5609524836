//! Logging trait for backend exchanges.
//!
//! This module provides the [`ClientLogger`] trait that allows callers to
//! capture every request passing through the [`ReviewClient`](crate::ReviewClient).

use crate::{BackendCall, Error, Mode};

/// A trait for observing backend exchanges.
///
/// Every method is called synchronously on the request path, so
/// implementations should not block.
///
/// # Example
///
/// ```rust,ignore
/// use reviewdash::{BackendCall, ClientLogger, Error, Mode};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, call: &BackendCall) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "-> {}", call.operation()).unwrap();
///     }
///
///     fn log_response(&self, mode: Mode, text: &str) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "<- {mode}: {} bytes", text.len()).unwrap();
///     }
///
///     fn log_error(&self, mode: Mode, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "!! {mode}: {error}").unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Called once per call, before any I/O.
    fn log_request(&self, call: &BackendCall);

    /// Called with the extracted result text of a successful call.
    fn log_response(&self, mode: Mode, text: &str);

    /// Called with the normalized error of a failed call.
    fn log_error(&self, mode: Mode, error: &Error);
}
