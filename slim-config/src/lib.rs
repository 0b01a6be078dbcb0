//! Shared configuration loader for the slim toolchain.
//!
//! `defaults/slim.default.toml` is embedded into every binary so that the documented defaults
//! and runtime behavior stay in sync. Applications layer user files and overrides on top of
//! those defaults via [`Loader`] before deserializing into [`SlimConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/slim.default.toml");

/// Top-level configuration consumed by slim applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SlimConfig {
    pub render: RenderConfig,
    pub context: ContextConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Written once per nesting level
    pub indent: String,
}

/// How render context files are read.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    pub format: ContextFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextFormat {
    /// By file extension
    Auto,
    Json,
    Yaml,
}

impl ContextFormat {
    /// Resolve `Auto` against a file name: `.yaml`/`.yml` are YAML, anything else JSON.
    pub fn for_path(self, path: &Path) -> ContextFormat {
        match self {
            ContextFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => ContextFormat::Yaml,
                _ => ContextFormat::Json,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
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
    pub fn build(self) -> Result<SlimConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SlimConfig, ConfigError> {
    Loader::new().build()
}
