//! Configuration types for the dashboard front end.
//!
//! Settings come from, in decreasing precedence: command-line flags parsed
//! with `arrrg`, an optional YAML file, `REVIEWDASH_*` environment
//! variables, and built-in defaults.

use std::path::Path;
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::Deserialize;

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

/// Backend location used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "REVIEWDASH_BASE_URL";

/// Environment variable holding the origin for a relative base URL.
pub const ORIGIN_ENV: &str = "REVIEWDASH_ORIGIN";

/// Command-line arguments for the reviewdash tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct DashboardArgs {
    /// Backend base URL or relative prefix.
    #[arrrg(optional, "Backend base URL or prefix (default: http://localhost:8000)", "URL")]
    pub base_url: Option<String>,

    /// Origin that a relative base URL is resolved against.
    #[arrrg(optional, "Origin for a relative base URL such as /api", "ORIGIN")]
    pub origin: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    pub timeout_secs: Option<u64>,

    /// YAML configuration file.
    #[arrrg(optional, "YAML configuration file", "FILE")]
    pub config: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Contents of a YAML configuration file.
///
/// ```yaml
/// base_url: /api
/// origin: https://dashboard.example.com
/// timeout_secs: 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Backend base URL or relative prefix.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Origin for a relative base URL.
    #[serde(default)]
    pub origin: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Disable ANSI colors and styles.
    #[serde(default)]
    pub no_color: Option<bool>,
}

impl ConfigFile {
    /// Reads and parses a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            Error::configuration(
                format!("failed to read config file {}: {err}", path.display()),
                Some(Box::new(err)),
            )
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Resolved configuration for a dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Configuration handed to the API client.
    pub client: ClientConfig,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl DashboardConfig {
    /// Resolves arguments against the config file and the process environment.
    pub fn from_args(args: DashboardArgs) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(args, file, |key| std::env::var(key).ok()))
    }

    /// Merges every configuration layer.
    ///
    /// `env` looks up environment variables; blank values count as unset.
    pub fn resolve<F>(args: DashboardArgs, file: ConfigFile, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let base_url = args
            .base_url
            .or(file.base_url)
            .or_else(|| env(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let origin = args.origin.or(file.origin).or_else(|| env(ORIGIN_ENV));
        let timeout = args
            .timeout_secs
            .or(file.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let no_color = args.no_color || file.no_color.unwrap_or(false);

        let mut client = ClientConfig::new(base_url).with_timeout(timeout);
        if let Some(origin) = origin {
            client = client.with_origin(origin);
        }

        DashboardConfig {
            client,
            use_color: !no_color,
        }
    }
}
