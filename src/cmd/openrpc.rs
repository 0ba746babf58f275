// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! OpenRPC command implementations for cna-tool.
//!
//! ```text
//! validate: load --> resolve --> check --> "document is valid"
//! diff:     load x2 --> resolve x2 --> DiffReport --> text | json
//! prune:    load --> resolve --> gc --> write (stdout | -o FILE)
//! ```

use std::fs::File;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::Context as _;
use tracing::info;

use crate::cli::openrpc::{DiffArgs, DiffFormat, PruneArgs, ValidateArgs};
use crate::config::Config;
use crate::config::types::DiffFormat as OutputFormat;
use crate::error::Result;
use crate::openrpc::diff::{DiffOptions, diff_documents, render_text};
use crate::openrpc::{gc, resolved, validate};

/// Main handler for `openrpc validate`.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or violates a
/// structural rule.
pub fn run_validate_command(args: &ValidateArgs) -> Result<()> {
    let document = validate::load_document(&args.spec)?;
    let document = validate::check_document(document)?;
    println!(
        "{}: document is valid ({} methods)",
        args.spec.display(),
        document.methods.len()
    );
    Ok(())
}

/// Main handler for `openrpc diff`.
///
/// Returns `true` when the documents are structurally identical.
///
/// # Errors
///
/// Returns an error if either document cannot be loaded or resolved.
pub fn run_diff_command(args: &DiffArgs, config: &Config) -> Result<bool> {
    let before = load_resolved(&args.before)?;
    let after = load_resolved(&args.after)?;

    let options = DiffOptions {
        context: config.diff.context,
    };
    let report = diff_documents(&before, &after, options);

    let format = match args.format {
        Some(DiffFormat::Text) => OutputFormat::Text,
        Some(DiffFormat::Json) => OutputFormat::Json,
        None => config.diff.format,
    };
    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("couldn't serialize diff report")?
            );
        }
    }

    Ok(report.is_empty())
}

/// Main handler for `openrpc prune`.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded, carries a broken
/// schema reference, or the output cannot be written.
pub fn run_prune_command(args: &PruneArgs) -> Result<()> {
    let mut document = load_resolved(&args.spec)?;
    let stats = gc::prune_schemas(&mut document)?;
    info!(
        kept = stats.kept,
        dropped = stats.dropped,
        "pruned component schemas"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("couldn't create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &document)
                .with_context(|| format!("couldn't write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &document)
                .context("couldn't write document")?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn load_resolved(path: &Path) -> Result<resolved::OpenRPC> {
    let document = validate::load_document(path)?;
    let document = resolved::OpenRPC::resolve(document)
        .with_context(|| format!("couldn't resolve {}", path.display()))?;
    Ok(document)
}
