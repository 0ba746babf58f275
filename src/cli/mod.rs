// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! CLI module for cna-tool using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! cna [global options] <command>
//! openrpc validate <SPEC>
//! openrpc diff <BEFORE> <AFTER>
//! openrpc prune <SPEC>
//! proxy <REMOTE> --spec <SPEC> [--listen ADDR]
//! version | options | inis
//! ```

pub mod global;
pub mod openrpc;
pub mod proxy;


use crate::cli::global::GlobalOptions;
use crate::cli::openrpc::OpenrpcArgs;
use crate::cli::proxy::ProxyArgs;
use clap::{Parser, Subcommand};

/// Filecoin Common Node API Tool
///
/// A companion tool for the Common Node API OpenRPC document.
#[derive(Debug, Parser)]
#[command(
    name = "cna",
    author,
    version,
    about = "Filecoin Common Node API Tool",
    long_about = "A companion tool for the Filecoin Common Node API OpenRPC\n\
                  document. Validates documents against the structural rules\n\
                  of the OpenRPC specification, prunes unreachable component\n\
                  schemas, diffs two revisions of a document, and proxies\n\
                  live JSON-RPC traffic while checking it against the\n\
                  document. See `cna <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, cna will look for an optional `cna.toml` in the\n\
                  current directory. Additional TOML files can be specified\n\
                  with --config; those are loaded after the default and\n\
                  override it. Environment variables prefixed with CNA_\n\
                  override files, and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists the config files used by cna.
    Inis,

    /// Operates on OpenRPC documents.
    Openrpc(OpenrpcArgs),

    /// Runs the validating JSON-RPC proxy.
    Proxy(ProxyArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
