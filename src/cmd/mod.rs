// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   openrpc (validate, diff, prune), proxy, config (options, inis)
//! ```

pub mod config;
pub mod openrpc;
pub mod proxy;
