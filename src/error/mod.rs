// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Error handling module.
//!
//! ```text
//!              CnaError (~24 bytes)
//!                     |
//!      +--------+-----+-----+--------+
//!      |    |   |     |     |    |   |
//!      v    v   v     v     v    v   v
//!    Bail Spec Schema Net  Cfg  Io Other
//!         Box  Box    Box  Box  Box Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Spec    DuplicateMethods, DuplicateParams, ParamOrder, BrokenRef
//!   Schema  Compile
//!   Network Reqwest, HttpError, Bind
//!   Config  ParseError, MissingKey, InvalidValue
//!
//! All variants boxed => CnaError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`CnaError`].
pub type CnaResult<T> = std::result::Result<T, CnaError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum CnaError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// OpenRPC document violates a structural rule.
    #[error("spec error: {0}")]
    Spec(#[from] Box<SpecError>),

    /// JSON Schema compilation failed.
    #[error("schema error: {0}")]
    Schema(#[from] Box<SchemaError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`CnaError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> CnaError {
    CnaError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for CnaError {
                fn from(err: $error) -> Self {
                    CnaError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SpecError => Spec,
    SchemaError => Schema,
    NetworkError => Network,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Spec Errors ---

/// Structural violations in an OpenRPC document.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The document could not be deserialized.
    #[error("failed to parse document '{path}': {message}")]
    Parse { path: String, message: String },

    /// The same method name appears more than once.
    #[error("the following method names are duplicated: {}", .names.join(", "))]
    DuplicateMethods { names: Vec<String> },

    /// The same parameter name appears more than once on one method.
    #[error("the following parameter names on method {method} are duplicated: {}", .names.join(", "))]
    DuplicateParams { method: String, names: Vec<String> },

    /// A required parameter is positioned after an optional one.
    #[error(
        "the following required parameters on method {method} follow the optional parameter {optional}: {}",
        .required.join(", ")
    )]
    RequiredAfterOptional {
        method: String,
        optional: String,
        required: Vec<String>,
    },

    /// A parameter is out of order for positional calls.
    #[error("parameter at index {index} in method {method} is out-of-order")]
    OutOfOrderParam { method: String, index: usize },

    /// A parameter is duplicated for by-name calls.
    #[error("parameter `{name}` in method {method} is duplicated")]
    DuplicateParam { method: String, name: String },

    /// A method is defined twice.
    #[error("duplicate method {name}")]
    DuplicateMethod { name: String },

    /// A `$ref` does not point at an existing component.
    #[error("error resolving `$ref`: {reference}")]
    BrokenRef { reference: String },
}

// --- Schema Errors ---

/// JSON Schema compilation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema in the document does not compile.
    #[error("failed to compile schema for {owner}: {message}")]
    Compile { owner: String, message: String },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Failed to bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// I/O error while serving.
    #[error("io error while serving: {0}")]
    Io(#[from] std::io::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests;
