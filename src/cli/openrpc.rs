// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! CLI arguments for the `openrpc` command.
//!
//! ```text
//! cna openrpc <operation>
//! validate → structural checks against the OpenRPC rules
//! diff     → structural diff of two document revisions
//! prune    → drop component schemas no method reaches
//!
//! USAGE:
//! $ cna openrpc validate spec.json
//! $ cna openrpc diff old.json new.json --format json
//! $ cna openrpc prune spec.json -o pruned.json
//! ```

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arguments for the `openrpc` command.
#[derive(Debug, Clone, Args)]
pub struct OpenrpcArgs {
    #[command(subcommand)]
    pub operation: OpenrpcOperation,
}

/// OpenRPC document operations.
#[derive(Debug, Clone, Subcommand)]
pub enum OpenrpcOperation {
    /// Validates a document.
    ///
    /// Does not validate:
    /// - that example pairings match schemas
    /// - that Example::value and Example::externalValue are mutually exclusive
    /// - links, runtime expressions
    /// - that component keys are idents
    Validate(ValidateArgs),

    /// Diffs two documents.
    Diff(DiffArgs),

    /// Drops component schemas unreachable from any method.
    Prune(PruneArgs),
}

/// Arguments for `openrpc validate`.
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the OpenRPC document.
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
}

/// Arguments for `openrpc diff`.
#[derive(Debug, Clone, Args)]
pub struct DiffArgs {
    /// The older document.
    #[arg(value_name = "BEFORE")]
    pub before: PathBuf,

    /// The newer document.
    #[arg(value_name = "AFTER")]
    pub after: PathBuf,

    /// Report format.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DiffFormat>,

    /// Exit with status 1 when the documents differ.
    #[arg(long = "exit-code")]
    pub exit_code: bool,
}

/// Output format for `openrpc diff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    /// Human-readable listing.
    Text,
    /// Machine-readable report.
    Json,
}

/// Arguments for `openrpc prune`.
#[derive(Debug, Clone, Args)]
pub struct PruneArgs {
    /// Path to the OpenRPC document.
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Write the pruned document here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}
