//! Shared configuration loader for trellis tools.
//!
//! `defaults/trellis.default.toml` is embedded into every binary so the documented defaults and
//! the runtime ones cannot drift. Applications layer user files and flags on top of it via
//! [`Loader`] before deserializing into [`TrellisConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use trellis::trellis::lexing::LexerOptions;
use trellis::trellis::parsing::ParserOptions;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/trellis.default.toml");

/// Top-level configuration consumed by trellis applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TrellisConfig {
    pub lexer: LexerOptions,
    pub parser: ParserOptions,
    pub output: OutputConfig,
}

/// How parse results are printed
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Treeviz leaf content cut-off, in characters
    pub truncate: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Tokens,
    Graph,
    Treeviz,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Tokens => "tokens",
            OutputFormat::Graph => "graph",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
        }
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

    /// Layer an optional configuration file, skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TrellisConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<TrellisConfig, ConfigError> {
    Loader::new().build()
}
