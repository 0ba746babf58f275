// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Config inspection commands (`options`, `inis`).

use crate::config::Config;

/// Main handler for the `options` command.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Main handler for the `inis` command.
pub fn run_inis_command(loaded_files: &[String]) {
    if loaded_files.is_empty() {
        println!("No config files loaded");
    } else {
        for line in loaded_files {
            println!("{line}");
        }
    }
}
