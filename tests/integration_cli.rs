// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use cna_tool::cli::openrpc::{DiffFormat, OpenrpcOperation};
use cna_tool::cli::{Cli, Command};
use std::path::PathBuf;

// =============================================================================
// Utility Commands
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["cna", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["cna", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_options_command() {
    let cli = Cli::try_parse_from(["cna", "options"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Options)));
}

#[test]
fn cli_inis_command() {
    let cli = Cli::try_parse_from(["cna", "inis", "--no-default-config"]).unwrap();
    assert!(cli.global.no_default_config);
    assert!(matches!(cli.command, Some(Command::Inis)));
}

// =============================================================================
// Openrpc Command
// =============================================================================

#[test]
fn cli_openrpc_requires_operation() {
    let result = Cli::try_parse_from(["cna", "openrpc"]);
    assert!(result.is_err());
}

#[test]
fn cli_openrpc_validate() {
    let cli = Cli::try_parse_from(["cna", "openrpc", "validate", "spec.json"]).unwrap();
    let Some(Command::Openrpc(args)) = cli.command else {
        panic!("expected openrpc command");
    };
    assert!(matches!(args.operation, OpenrpcOperation::Validate(_)));
}

#[test]
fn cli_openrpc_validate_requires_spec() {
    let result = Cli::try_parse_from(["cna", "openrpc", "validate"]);
    assert!(result.is_err());
}

#[test]
fn cli_openrpc_diff_defaults() {
    let cli = Cli::try_parse_from(["cna", "openrpc", "diff", "old.json", "new.json"]).unwrap();
    let Some(Command::Openrpc(args)) = cli.command else {
        panic!("expected openrpc command");
    };
    let OpenrpcOperation::Diff(args) = args.operation else {
        panic!("expected diff operation");
    };
    assert_eq!(args.format, None);
    assert!(!args.exit_code);
}

#[test]
fn cli_openrpc_diff_with_format() {
    let cli = Cli::try_parse_from([
        "cna",
        "openrpc",
        "diff",
        "old.json",
        "new.json",
        "--format",
        "text",
    ])
    .unwrap();
    let Some(Command::Openrpc(args)) = cli.command else {
        panic!("expected openrpc command");
    };
    let OpenrpcOperation::Diff(args) = args.operation else {
        panic!("expected diff operation");
    };
    assert_eq!(args.format, Some(DiffFormat::Text));
}

#[test]
fn cli_openrpc_diff_rejects_unknown_format() {
    let result = Cli::try_parse_from([
        "cna",
        "openrpc",
        "diff",
        "old.json",
        "new.json",
        "--format",
        "yaml",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_openrpc_prune_to_stdout() {
    let cli = Cli::try_parse_from(["cna", "openrpc", "prune", "spec.json"]).unwrap();
    let Some(Command::Openrpc(args)) = cli.command else {
        panic!("expected openrpc command");
    };
    let OpenrpcOperation::Prune(args) = args.operation else {
        panic!("expected prune operation");
    };
    assert_eq!(args.spec, PathBuf::from("spec.json"));
    assert_eq!(args.output, None);
}

// =============================================================================
// Proxy Command
// =============================================================================

#[test]
fn cli_proxy_minimal() {
    let cli = Cli::try_parse_from([
        "cna",
        "proxy",
        "http://localhost:1234/rpc/v1",
        "--spec",
        "spec.json",
    ])
    .unwrap();
    let Some(Command::Proxy(args)) = cli.command else {
        panic!("expected proxy command");
    };
    assert_eq!(args.listen, None);
    assert_eq!(args.concurrency, None);
}

#[test]
fn cli_proxy_rejects_bad_listen_addr() {
    let result = Cli::try_parse_from([
        "cna",
        "proxy",
        "http://localhost:1234/rpc/v1",
        "--spec",
        "spec.json",
        "--listen",
        "not-an-addr",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_proxy_rejects_zero_concurrency() {
    let result = Cli::try_parse_from([
        "cna",
        "proxy",
        "http://localhost:1234/rpc/v1",
        "--spec",
        "spec.json",
        "-j",
        "0",
    ]);
    assert!(result.is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_with_all_flags() {
    let cli = Cli::try_parse_from([
        "cna",
        "-l",
        "4",
        "--file-log-level",
        "6",
        "--log-file",
        "/tmp/cna.log",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "version",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.file_log_level, Some(6));
    assert_eq!(cli.global.log_file, Some(PathBuf::from("/tmp/cna.log")));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
}
