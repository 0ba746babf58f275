// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          openrpc / proxy / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-----+-------------+-------'
//!                    |             |
//!                    v             v
//!                 openrpc        proxy
//!            model, resolve,   axum server,
//!            validate, gc,     MethodChecks
//!            diff                  |
//!                    |             v
//!                    |          jsonrpc
//!                    |        request/response
//!                    +-------------+
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod jsonrpc;
pub mod logging;
pub mod openrpc;
pub mod proxy;
