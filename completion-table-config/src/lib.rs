//! Shared configuration loader for the completion-table tools.
//!
//! `defaults/ctable.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CtableConfig`].

use completion_table::ChronoDateFormatter;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_TOML: &str = include_str!("../defaults/ctable.default.toml");

/// Top-level configuration consumed by the completion-table tools.
#[derive(Debug, Clone, Deserialize)]
pub struct CtableConfig {
    pub element: ElementConfig,
    pub dates: DatesConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

/// Authoring form knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementConfig {
    pub max_ranges: usize,
}

/// How timestamps without a matching range are printed.
#[derive(Debug, Clone, Deserialize)]
pub struct DatesConfig {
    pub format: String,
    pub utc_offset_minutes: i32,
}

impl From<&DatesConfig> for ChronoDateFormatter {
    fn from(config: &DatesConfig) -> Self {
        ChronoDateFormatter::new(config.format.clone(), config.utc_offset_minutes)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub preview: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl LogConfig {
    /// Configured level, `Warn` when the value is not a level name.
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.level).unwrap_or(log::LevelFilter::Warn)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CtableConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CtableConfig, ConfigError> {
    Loader::new().build()
}
