// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix("CNA")
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Where a configuration layer came from, for `cna inis` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Required,
    Optional,
    Inline,
}

impl Source {
    const fn label(self) -> &'static str {
        match self {
            Self::Required => "file",
            Self::Optional => "optional",
            Self::Inline => "string",
        }
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<(Source, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML configuration file that must exist.
    ///
    /// The file is read when `build()` is called; a missing file or invalid
    /// TOML makes `build()` fail.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), Source::Required)
    }

    /// Adds a TOML configuration file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), Source::Optional)
    }

    fn add_file(mut self, path: &Path, source: Source) -> Self {
        use config::{File, FileFormat};
        self.builder = self.builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(source == Source::Required),
        );
        if source == Source::Required || path.exists() {
            self.sources.push((source, path.to_path_buf()));
        }
        self
    }

    /// Adds an in-memory TOML layer.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push((Source::Inline, PathBuf::from("<string>")));
        self
    }

    /// Lets `<PREFIX>_*` environment variables override file values.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required configuration file is missing or has invalid TOML syntax.
    /// - Environment variables cannot be parsed.
    /// - The merged configuration does not match the `Config` structure or
    ///   fails cross-field validation.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .separator("_")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let merged = builder.build().map_err(Self::to_config_error)?;
        let mut config: Config = merged.try_deserialize().map_err(Self::to_config_error)?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    fn to_config_error(error: config::ConfigError) -> ConfigError {
        ConfigError::ParseError {
            path: "<merged>".to_string(),
            message: error.to_string(),
        }
    }

    /// One line per loaded source, in load order.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, (source, path))| {
                format!("{}. [{}] {}", i + 1, source.label(), path.display())
            })
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
