// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Structural diff of two OpenRPC documents.
//!
//! ```text
//! before ---resolve---+
//!                     v
//!              diff_documents --> DiffReport
//!                     ^             added / removed / changed
//! after  ---resolve---+             per-method Change list
//!
//! Schema equality: canonical form with #/components/schemas/ refs
//! inlined; back-edges become {"$cycle": depth}. Renaming a component
//! without changing its content is not a change.
//! ```
//!
//! The report renders as a human-readable text listing or serializes to
//! JSON. Changed schemas are shown as unified diffs of the canonical
//! pretty-printed form.

use std::collections::BTreeMap;

use schemars::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use similar::TextDiff;

use crate::openrpc::{Components, ContentDescriptor, ParamStructure, resolved};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Options controlling report rendering.
#[derive(Debug, Clone, Copy)]
pub struct DiffOptions {
    /// Context lines around each hunk of a schema diff.
    pub context: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { context: 3 }
    }
}

/// Everything that differs between two documents, keyed by method.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiffReport {
    /// Methods present only in the newer document.
    pub added: Vec<String>,
    /// Methods present only in the older document.
    pub removed: Vec<String>,
    /// Methods present in both but not identical.
    pub changed: Vec<MethodDiff>,
}

impl DiffReport {
    /// True when the documents are structurally identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Changes to a single method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDiff {
    pub method: String,
    pub changes: Vec<Change>,
}

/// One observed difference on a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Change {
    ParamAdded {
        param: String,
    },
    ParamRemoved {
        param: String,
    },
    ParamsReordered {
        before: Vec<String>,
        after: Vec<String>,
    },
    ParamRequiredChanged {
        param: String,
        required: bool,
    },
    ParamDeprecatedChanged {
        param: String,
        deprecated: bool,
    },
    ParamSchemaChanged {
        param: String,
        diff: String,
    },
    ResultAdded,
    ResultRemoved,
    ResultSchemaChanged {
        diff: String,
    },
    ParamStructureChanged {
        before: ParamStructure,
        after: ParamStructure,
    },
    MethodDeprecatedChanged {
        deprecated: bool,
    },
}

/// Compare two resolved documents method-by-method.
#[must_use]
pub fn diff_documents(
    before: &resolved::OpenRPC,
    after: &resolved::OpenRPC,
    options: DiffOptions,
) -> DiffReport {
    let before_methods: BTreeMap<&str, &resolved::Method> = before
        .methods
        .iter()
        .map(|method| (method.name.as_str(), method))
        .collect();
    let after_methods: BTreeMap<&str, &resolved::Method> = after
        .methods
        .iter()
        .map(|method| (method.name.as_str(), method))
        .collect();

    let mut report = DiffReport::default();

    for name in after_methods.keys() {
        if !before_methods.contains_key(*name) {
            report.added.push((*name).to_string());
        }
    }
    for name in before_methods.keys() {
        if !after_methods.contains_key(*name) {
            report.removed.push((*name).to_string());
        }
    }

    for (name, old) in &before_methods {
        let Some(new) = after_methods.get(name) else {
            continue;
        };
        let changes = diff_method(
            old,
            before.components.as_ref(),
            new,
            after.components.as_ref(),
            options,
        );
        if !changes.is_empty() {
            report.changed.push(MethodDiff {
                method: (*name).to_string(),
                changes,
            });
        }
    }

    report
}

fn diff_method(
    old: &resolved::Method,
    old_components: Option<&Components>,
    new: &resolved::Method,
    new_components: Option<&Components>,
    options: DiffOptions,
) -> Vec<Change> {
    let mut changes = Vec::new();

    let old_params: BTreeMap<&str, &ContentDescriptor> = old
        .params
        .iter()
        .map(|param| (param.name.as_str(), param))
        .collect();
    let new_params: BTreeMap<&str, &ContentDescriptor> = new
        .params
        .iter()
        .map(|param| (param.name.as_str(), param))
        .collect();

    for param in &new.params {
        if !old_params.contains_key(param.name.as_str()) {
            changes.push(Change::ParamAdded {
                param: param.name.clone(),
            });
        }
    }
    for param in &old.params {
        if !new_params.contains_key(param.name.as_str()) {
            changes.push(Change::ParamRemoved {
                param: param.name.clone(),
            });
        }
    }

    // Params are positional on the wire, so relative order of the shared
    // names matters.
    let old_order: Vec<String> = old
        .params
        .iter()
        .filter(|param| new_params.contains_key(param.name.as_str()))
        .map(|param| param.name.clone())
        .collect();
    let new_order: Vec<String> = new
        .params
        .iter()
        .filter(|param| old_params.contains_key(param.name.as_str()))
        .map(|param| param.name.clone())
        .collect();
    if old_order != new_order {
        changes.push(Change::ParamsReordered {
            before: old_order,
            after: new_order,
        });
    }

    for (name, old_param) in &old_params {
        let Some(new_param) = new_params.get(name) else {
            continue;
        };
        if old_param.required.unwrap_or_default() != new_param.required.unwrap_or_default() {
            changes.push(Change::ParamRequiredChanged {
                param: (*name).to_string(),
                required: new_param.required.unwrap_or_default(),
            });
        }
        if old_param.deprecated.unwrap_or_default() != new_param.deprecated.unwrap_or_default() {
            changes.push(Change::ParamDeprecatedChanged {
                param: (*name).to_string(),
                deprecated: new_param.deprecated.unwrap_or_default(),
            });
        }
        if let Some(diff) = diff_schema(
            &old_param.schema,
            old_components,
            &new_param.schema,
            new_components,
            options,
        ) {
            changes.push(Change::ParamSchemaChanged {
                param: (*name).to_string(),
                diff,
            });
        }
    }

    match (&old.result, &new.result) {
        (None, Some(_)) => changes.push(Change::ResultAdded),
        (Some(_), None) => changes.push(Change::ResultRemoved),
        (Some(old_result), Some(new_result)) => {
            if let Some(diff) = diff_schema(
                &old_result.schema,
                old_components,
                &new_result.schema,
                new_components,
                options,
            ) {
                changes.push(Change::ResultSchemaChanged { diff });
            }
        }
        (None, None) => {}
    }

    let old_structure = old.param_structure.unwrap_or_default();
    let new_structure = new.param_structure.unwrap_or_default();
    if old_structure != new_structure {
        changes.push(Change::ParamStructureChanged {
            before: old_structure,
            after: new_structure,
        });
    }

    if old.deprecated.unwrap_or_default() != new.deprecated.unwrap_or_default() {
        changes.push(Change::MethodDeprecatedChanged {
            deprecated: new.deprecated.unwrap_or_default(),
        });
    }

    changes
}

fn diff_schema(
    old: &Schema,
    old_components: Option<&Components>,
    new: &Schema,
    new_components: Option<&Components>,
    options: DiffOptions,
) -> Option<String> {
    let old_canonical = canonical_schema(old, old_components);
    let new_canonical = canonical_schema(new, new_components);
    if old_canonical == new_canonical {
        return None;
    }

    let old_pretty = pretty(&old_canonical);
    let new_pretty = pretty(&new_canonical);
    let diff = TextDiff::from_lines(&old_pretty, &new_pretty)
        .unified_diff()
        .context_radius(options.context)
        .header("before", "after")
        .to_string();
    Some(diff)
}

/// Canonical, component-name-independent form of a schema.
///
/// `#/components/schemas/<key>` references are inlined; a reference back to
/// a schema currently being inlined becomes `{"$cycle": <depth>}` where the
/// depth counts from the innermost enclosing expansion. Two isomorphic
/// schema graphs therefore canonicalize identically no matter how their
/// components are named.
#[must_use]
pub fn canonical_schema(schema: &Schema, components: Option<&Components>) -> Value {
    let lookup: BTreeMap<&str, Value> = components
        .and_then(|components| components.schemas.as_ref())
        .map(|schemas| {
            schemas
                .iter()
                .map(|(key, schema)| (key.as_str(), schema_value(schema)))
                .collect()
        })
        .unwrap_or_default();

    let mut stack = Vec::new();
    canonicalize(&schema_value(schema), &lookup, &mut stack)
}

fn schema_value(schema: &Schema) -> Value {
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

fn canonicalize(value: &Value, lookup: &BTreeMap<&str, Value>, stack: &mut Vec<String>) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref")
                && let Some(key) = reference.strip_prefix(SCHEMA_REF_PREFIX)
            {
                if let Some(position) = stack.iter().rposition(|entry| entry.as_str() == key) {
                    return serde_json::json!({ "$cycle": stack.len() - position });
                }
                if let Some(target) = lookup.get(key) {
                    stack.push(key.to_owned());
                    let inlined = canonicalize(target, lookup, stack);
                    stack.pop();
                    return inlined;
                }
                // Broken refs are validate's concern; keep them verbatim so
                // the diff still renders.
            }
            Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), canonicalize(value, lookup, stack)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| canonicalize(item, lookup, stack))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Render a report for terminal consumption.
#[must_use]
pub fn render_text(report: &DiffReport) -> String {
    if report.is_empty() {
        return "no changes\n".to_string();
    }

    let mut out = String::new();
    for method in &report.added {
        out.push_str(&format!("+ added: {method}\n"));
    }
    for method in &report.removed {
        out.push_str(&format!("- removed: {method}\n"));
    }
    for diff in &report.changed {
        out.push_str(&format!("~ changed: {}\n", diff.method));
        for change in &diff.changes {
            render_change(&mut out, change);
        }
    }
    out
}

fn render_change(out: &mut String, change: &Change) {
    match change {
        Change::ParamAdded { param } => {
            out.push_str(&format!("    param `{param}` added\n"));
        }
        Change::ParamRemoved { param } => {
            out.push_str(&format!("    param `{param}` removed\n"));
        }
        Change::ParamsReordered { before, after } => {
            out.push_str(&format!(
                "    params reordered: {} -> {}\n",
                before.join(", "),
                after.join(", ")
            ));
        }
        Change::ParamRequiredChanged { param, required } => {
            out.push_str(&format!(
                "    param `{param}` is {} required\n",
                if *required { "now" } else { "no longer" }
            ));
        }
        Change::ParamDeprecatedChanged { param, deprecated } => {
            out.push_str(&format!(
                "    param `{param}` is {} deprecated\n",
                if *deprecated { "now" } else { "no longer" }
            ));
        }
        Change::ParamSchemaChanged { param, diff } => {
            out.push_str(&format!("    schema for param `{param}` changed:\n"));
            indent_diff(out, diff);
        }
        Change::ResultAdded => out.push_str("    result added (was a notification)\n"),
        Change::ResultRemoved => out.push_str("    result removed (now a notification)\n"),
        Change::ResultSchemaChanged { diff } => {
            out.push_str("    result schema changed:\n");
            indent_diff(out, diff);
        }
        Change::ParamStructureChanged { before, after } => {
            out.push_str(&format!(
                "    param structure changed: {before:?} -> {after:?}\n"
            ));
        }
        Change::MethodDeprecatedChanged { deprecated } => {
            out.push_str(&format!(
                "    method is {} deprecated\n",
                if *deprecated { "now" } else { "no longer" }
            ));
        }
    }
}

fn indent_diff(out: &mut String, diff: &str) {
    for line in diff.lines() {
        out.push_str("        ");
        out.push_str(line);
        out.push('\n');
    }
}
