// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! CLI arguments for the `proxy` command.
//!
//! ```text
//! cna proxy <REMOTE> --spec spec.json [--listen ADDR]
//!
//! USAGE:
//! $ cna proxy http://localhost:1234/rpc/v1 --spec spec.json
//! $ cna proxy http://node:1234/rpc/v1 --spec spec.json --listen 0.0.0.0:8080 -j 64
//! ```

use clap::Args;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Arguments for the `proxy` command.
#[derive(Debug, Clone, Args)]
pub struct ProxyArgs {
    /// Origin URL requests are forwarded to.
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Path to the OpenRPC document traffic is checked against.
    #[arg(long, value_name = "SPEC")]
    pub spec: PathBuf,

    /// Address to listen on. Defaults to `proxy.listen` from the config.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    /// Maximum in-flight exchanges. Defaults to the number of CPUs.
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<NonZeroUsize>,
}
