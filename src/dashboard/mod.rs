//! Terminal front end for the review dashboard.
//!
//! This module provides the pieces the `reviewdash` binary is built from:
//!
//! - [`config`]: CLI argument parsing and layered configuration
//! - [`commands`]: Slash command parsing
//! - [`input`]: Plain input routed into the active buffer
//!
//! The orchestration itself lives in [`crate::session`].

mod commands;
mod config;
mod input;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{DashboardCommand, help_text, parse_command};
pub use config::{
    BASE_URL_ENV, ConfigFile, DEFAULT_BASE_URL, DashboardArgs, DashboardConfig, ORIGIN_ENV,
};
pub use input::fill_active_buffer;
