// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Openrpc {Validate | Diff | Prune} | Proxy | Options | Inis | Version
//! ```

use std::process::ExitCode;

use cna_tool::cli::global::GlobalOptions;
use cna_tool::cli::openrpc::OpenrpcOperation;
use cna_tool::cli::{self, Command};
use cna_tool::cmd::config::{run_inis_command, run_options_command};
use cna_tool::cmd::openrpc::{run_diff_command, run_prune_command, run_validate_command};
use cna_tool::cmd::proxy::run_proxy_command;
use cna_tool::config::Config;
use cna_tool::config::loader::ConfigLoader;
use cna_tool::logging::init_logging;
use cna_tool::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Openrpc(args)) => match &args.operation {
            OpenrpcOperation::Validate(args) => run_validate_command(args),
            OpenrpcOperation::Diff(args) => match load_config(&cli.global) {
                Ok(config) => match run_diff_command(args, &config) {
                    // `git diff --exit-code` semantics: differences are not
                    // an error, they are status 1.
                    Ok(unchanged) => {
                        if !unchanged && args.exit_code {
                            return ExitCode::FAILURE;
                        }
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            },
            OpenrpcOperation::Prune(args) => run_prune_command(args),
        },
        Some(Command::Proxy(args)) => match load_config(&cli.global) {
            Ok(config) => run_proxy_command(args, &config).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional("cna.toml");
    }
    for config_path in &global.configs {
        loader = loader.add_toml_file(config_path);
    }
    loader.with_env_prefix("CNA")
}

fn load_config(global: &GlobalOptions) -> cna_tool::error::Result<Config> {
    let loader = build_config_loader(global);
    loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
