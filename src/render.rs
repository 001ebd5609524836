//! Output rendering for the dashboard front end.
//!
//! This module provides the renderer trait and a plain-text implementation
//! that projects a [`SessionState`] onto a terminal.

use std::io::{self, Stdout, Write};

use crate::session::SessionState;
use crate::types::{Mode, RequestStatus};

/// ANSI escape code for dim text (used for progress lines).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for mode headers).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering dashboard output.
pub trait Renderer: Send {
    /// Print a mode banner when the active mode changes.
    fn print_mode(&mut self, mode: Mode);

    /// Print the progress line shown while a request is in flight.
    fn print_processing(&mut self, mode: Mode);

    /// Print a successful result.
    fn print_result(&mut self, text: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print whatever the state's projection currently holds.
    ///
    /// Idle sessions print nothing.
    fn render_state(&mut self, state: &SessionState) {
        match state.request_status() {
            RequestStatus::Idle => {}
            RequestStatus::InFlight => self.print_processing(state.active_mode()),
            RequestStatus::Succeeded => {
                if let Some(text) = state.result_text() {
                    self.print_result(text);
                }
            }
            RequestStatus::Failed => {
                if let Some(error) = state.error_message() {
                    self.print_error(error);
                }
            }
        }
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            out: io::stdout(),
            use_color,
        }
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer over an arbitrary writer.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, style: &str, text: &str) {
        let _ = if self.use_color {
            writeln!(self.out, "{style}{text}{ANSI_RESET}")
        } else {
            writeln!(self.out, "{text}")
        };
        let _ = self.out.flush();
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_mode(&mut self, mode: Mode) {
        self.write_styled(ANSI_BOLD, &format!("[{}]", mode.label()));
    }

    fn print_processing(&mut self, _mode: Mode) {
        self.write_styled(ANSI_DIM, "Processing...");
    }

    fn print_result(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.write_styled(ANSI_RED, &format!("Error: {error}"));
    }

    fn print_info(&mut self, info: &str) {
        let _ = writeln!(self.out, "{info}");
        let _ = self.out.flush();
    }
}
