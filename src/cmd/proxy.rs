// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Proxy command implementation for cna-tool.

use std::num::NonZeroUsize;
use std::time::Duration;

use tracing::info;

use crate::cli::proxy::ProxyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::openrpc::{resolved, validate};
use crate::proxy::check::MethodChecks;
use crate::proxy::{ProxyOptions, serve};

/// Main handler for the `proxy` command.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or compiled, or if the
/// server fails to start.
pub async fn run_proxy_command(args: &ProxyArgs, config: &Config) -> Result<()> {
    let document = validate::load_document(&args.spec)?;
    let document = resolved::OpenRPC::resolve(document)?;
    let checks = MethodChecks::compile(document)?;
    info!(
        target: "cna::serve",
        methods = checks.len(),
        spec = %args.spec.display(),
        "compiled method checks"
    );

    let concurrency = args
        .concurrency
        .or(config.proxy.concurrency)
        .map_or_else(default_concurrency, NonZeroUsize::get);

    let options = ProxyOptions {
        listen: args.listen.unwrap_or(config.proxy.listen),
        remote: args.remote.clone(),
        concurrency,
        timeout: Duration::from_secs(config.proxy.timeout_secs),
    };

    serve(options, checks).await
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism().map_or(4, NonZeroUsize::get)
}
