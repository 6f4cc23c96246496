//! Configuration and logging setup for the `sift` tools.
//!
//! Matcher behaviour is configured through [`MatcherOptions`], which lives in
//! `sift-matcher` so that library users do not need this crate. This crate adds
//! the TOML file format around it plus the `tracing` subscriber setup used by
//! binaries.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

pub use sift_matcher::MatcherOptions;

/// Environment variable naming a config file, used when no explicit path is given.
pub const CONFIG_ENV_VAR: &str = "SIFT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiftConfig {
    #[serde(default)]
    pub matcher: MatcherOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level for all sift crates.
    ///
    /// Either a simple level (`info`, `debug`, ...) or a full `EnvFilter`
    /// directive string such as `sift.matcher=trace,info`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to the given file path.
    ///
    /// If the file cannot be opened, file logging is disabled while stderr
    /// logging stays active.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// `level` as `EnvFilter` directives. Bare level names are matched
    /// case-insensitively, with `warning` and `none` as aliases of `warn` and
    /// `off`; an empty level means the default.
    fn directives(&self) -> String {
        let level = self.level.trim();
        match level.to_ascii_lowercase().as_str() {
            "" => Self::default_level(),
            "warning" => "warn".to_owned(),
            "none" => "off".to_owned(),
            name @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => name.to_owned(),
            _ => level.to_owned(),
        }
    }

    /// The effective filter: the configured directives with `RUST_LOG`
    /// appended, so the environment can override individual targets.
    ///
    /// Falls back to the configured directives alone when the combination does
    /// not parse, and to the default level when neither does.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let configured = self.directives();
        let rust_log = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| format!("{configured},{}", value.trim()));

        rust_log
            .into_iter()
            .chain([configured])
            .find_map(|directives| tracing_subscriber::EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(Self::default_level()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let directives = self.directives();
        tracing_subscriber::EnvFilter::try_new(&directives).map_err(|err| {
            ConfigError::Invalid(format!("logging.level `{directives}` is not valid: {err}"))
        })?;
        if self.file.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid(
                "logging.file must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Keep the message without the source snippet `Display` would add.
        let message = err.message().trim();
        match err.span() {
            Some(span) => ConfigError::Toml(format!("{message} (at byte {})", span.start)),
            None => ConfigError::Toml(message.to_owned()),
        }
    }
}

impl SiftConfig {
    /// Parse a config from TOML text.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: SiftConfig = toml::from_str(text)?;
        config.logging.validate()?;
        Ok(config)
    }

    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::load_from_str(&text)?;
        tracing::debug!(
            target: "sift.config",
            path = %path.display(),
            fuzzy = config.matcher.allow_fuzzy_matching,
            "loaded config"
        );
        Ok(config)
    }

    /// The config file to use: `explicit` if given, else `$SIFT_CONFIG` when set
    /// and non-empty.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Load the config named by [`SiftConfig::resolve_path`], or the defaults
    /// when there is none.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber described by `logging`.
///
/// Only the first call has an effect; later calls (and calls made after
/// another subscriber was installed) are ignored.
pub fn init_tracing(logging: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

        if logging.stderr {
            layers.push(if logging.json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .boxed()
            });
        }

        let file = logging.file.as_ref().and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        let file_open_failed = logging.file.is_some() && file.is_none();
        if let Some(file) = file {
            let writer = Mutex::new(file);
            layers.push(if logging.json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .boxed()
            });
        }

        let _ = tracing_subscriber::registry()
            .with(layers)
            .with(logging.env_filter())
            .try_init();

        if file_open_failed {
            tracing::warn!(
                target: "sift.config",
                path = ?logging.file,
                "failed to open log file; file logging disabled"
            );
        }
    });
}
