// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Integration tests for the document diff pipeline.
//!
//! Runs the same load/resolve/diff path as `cna openrpc diff` against
//! document revisions written to temporary files.

use cna_tool::openrpc::diff::{Change, DiffOptions, diff_documents, render_text};
use cna_tool::openrpc::resolved;
use cna_tool::openrpc::validate::load_document;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

fn load_resolved(path: &Path) -> resolved::OpenRPC {
    resolved::OpenRPC::resolve(load_document(path).unwrap()).unwrap()
}

fn write_document(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn revision_one() -> Value {
    json!({
        "openrpc": "1.3.2",
        "info": {"title": "Filecoin Common Node API", "version": "0.1.0"},
        "methods": [
            {
                "name": "Filecoin.ChainHead",
                "params": [],
                "result": {"name": "tipset",
                           "schema": {"$ref": "#/components/schemas/TipSet"}},
            },
            {
                "name": "Filecoin.WalletBalance",
                "params": [{"name": "address", "required": true,
                            "schema": {"type": "string"}}],
                "result": {"name": "balance", "schema": {"type": "string"}},
            },
        ],
        "components": {
            "schemas": {
                "TipSet": {"type": "object", "properties": {"Height": {"type": "integer"}}},
            },
        },
    })
}

fn revision_two() -> Value {
    json!({
        "openrpc": "1.3.2",
        "info": {"title": "Filecoin Common Node API", "version": "0.2.0"},
        "methods": [
            {
                "name": "Filecoin.ChainHead",
                "params": [],
                // Renamed component, same content plus one new property.
                "result": {"name": "tipset",
                           "schema": {"$ref": "#/components/schemas/HeadTipSet"}},
            },
            {
                "name": "Filecoin.ChainGetTipSetByHeight",
                "params": [{"name": "height", "required": true,
                            "schema": {"type": "integer"}}],
                "result": {"name": "tipset",
                           "schema": {"$ref": "#/components/schemas/HeadTipSet"}},
            },
        ],
        "components": {
            "schemas": {
                "HeadTipSet": {"type": "object",
                               "properties": {"Height": {"type": "integer"},
                                              "Cids": {"type": "array"}}},
            },
        },
    })
}

#[test]
fn diff_between_revisions() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_document(&dir, "v1.json", &revision_one());
    let after = write_document(&dir, "v2.json", &revision_two());

    let report = diff_documents(
        &load_resolved(&before),
        &load_resolved(&after),
        DiffOptions::default(),
    );

    assert_eq!(report.added, ["Filecoin.ChainGetTipSetByHeight"]);
    assert_eq!(report.removed, ["Filecoin.WalletBalance"]);

    // ChainHead's result gained a property; the rename alone would not
    // have registered.
    assert_eq!(report.changed.len(), 1);
    assert_eq!(report.changed[0].method, "Filecoin.ChainHead");
    assert!(matches!(
        report.changed[0].changes.as_slice(),
        [Change::ResultSchemaChanged { .. }]
    ));
}

#[test]
fn diff_report_renders_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_document(&dir, "v1.json", &revision_one());
    let after = write_document(&dir, "v2.json", &revision_two());

    let report = diff_documents(
        &load_resolved(&before),
        &load_resolved(&after),
        DiffOptions::default(),
    );

    let text = render_text(&report);
    assert!(text.contains("+ added: Filecoin.ChainGetTipSetByHeight"));
    assert!(text.contains("- removed: Filecoin.WalletBalance"));
    assert!(text.contains("~ changed: Filecoin.ChainHead"));
    assert!(text.contains("result schema changed:"));
    assert!(text.contains("+"), "schema hunks render with +/- lines");

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["added"], json!(["Filecoin.ChainGetTipSetByHeight"]));
    assert_eq!(value["removed"], json!(["Filecoin.WalletBalance"]));
    assert_eq!(
        value["changed"][0]["changes"][0]["kind"],
        json!("result-schema-changed")
    );
}

#[test]
fn diff_same_file_reports_no_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(&dir, "v1.json", &revision_one());

    let report = diff_documents(
        &load_resolved(&path),
        &load_resolved(&path),
        DiffOptions::default(),
    );
    assert!(report.is_empty());
    assert_eq!(render_text(&report), "no changes\n");
}

#[test]
fn diff_respects_context_option() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_document(&dir, "v1.json", &revision_one());
    let after = write_document(&dir, "v2.json", &revision_two());

    let narrow = diff_documents(
        &load_resolved(&before),
        &load_resolved(&after),
        DiffOptions { context: 0 },
    );
    let wide = diff_documents(
        &load_resolved(&before),
        &load_resolved(&after),
        DiffOptions { context: 100 },
    );

    let hunk_len = |report: &cna_tool::openrpc::diff::DiffReport| match &report.changed[0].changes[0]
    {
        Change::ResultSchemaChanged { diff } => diff.lines().count(),
        other => panic!("expected result schema change, got {other:?}"),
    };
    assert!(hunk_len(&narrow) < hunk_len(&wide));
}
