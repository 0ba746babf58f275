// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Configuration management for cna-tool.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. cna.toml (cwd, optional)
//! 3. --config files (in order)
//! 4. CNA_* env vars
//! 5. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! CNA_GLOBAL_OUTPUT_LOG_LEVEL=4 → global.output_log_level = 4
//! CNA_PROXY_LISTEN=0.0.0.0:8080 → proxy.listen = "0.0.0.0:8080"
//! CNA_DIFF_FORMAT=json          → diff.format = "json"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{DiffConfig, GlobalConfig, ProxyConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Proxy options.
    pub proxy: ProxyConfig,
    /// Diff options.
    pub diff: DiffConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cna_tool::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("cna.toml")
    ///     .with_env_prefix("CNA")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of its valid range.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.proxy.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                section: "proxy".to_string(),
                key: "timeout_secs".to_string(),
                message: "timeout must be at least one second".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration
    /// options. Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_proxy_options(&mut options);
        self.format_diff_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_proxy_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("proxy.listen".into(), self.proxy.listen.to_string());
        options.insert(
            "proxy.concurrency".into(),
            self.proxy
                .concurrency
                .map_or_else(|| "auto".to_string(), |n| n.to_string()),
        );
        options.insert(
            "proxy.timeout_secs".into(),
            self.proxy.timeout_secs.to_string(),
        );
    }

    fn format_diff_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("diff.format".into(), self.diff.format.to_string());
        options.insert("diff.context".into(), self.diff.context.to_string());
    }
}
