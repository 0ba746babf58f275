// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Mark-and-sweep pruning of unreachable component schemas.
//!
//! ```text
//! roots: every resolved method's params + result schemas
//!    |
//!    v
//! mark  subschemas (allOf/anyOf/oneOf/not/if/then/else)
//!       array      (items/additionalItems/contains)
//!       object     (properties/patternProperties/
//!                   additionalProperties/propertyNames)
//!       $ref       #/components/schemas/<key>  (transitive, cycle-safe)
//!    |
//!    v
//! sweep retain marked keys in components.schemas
//! ```
//!
//! Any `$ref` that is not of the `#/components/schemas/` form, or that
//! names a missing schema, is a broken reference.

use std::collections::{BTreeMap, HashSet};
use std::iter;

use either::Either;
use schemars::schema::{
    ArrayValidation, ObjectValidation, Schema, SchemaObject, SingleOrVec, SubschemaValidation,
};

use crate::error::SpecError;
use crate::openrpc::resolved;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Outcome of a [`prune_schemas`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneStats {
    /// Component schemas reachable from some method.
    pub kept: usize,
    /// Component schemas removed from the document.
    pub dropped: usize,
}

/// Drop every component schema that no method's params or result reach.
///
/// # Errors
///
/// Returns [`SpecError::BrokenRef`] if any reachable schema carries a
/// reference that cannot be resolved. The document is not modified on error.
pub fn prune_schemas(document: &mut resolved::OpenRPC) -> Result<PruneStats, SpecError> {
    let alive = mark_reachable(document)?;

    let mut stats = PruneStats {
        kept: alive.len(),
        dropped: 0,
    };
    if let Some(schemas) = document
        .components
        .as_mut()
        .and_then(|components| components.schemas.as_mut())
    {
        let before = schemas.len();
        schemas.retain(|key, _| alive.contains(key));
        stats.kept = schemas.len();
        stats.dropped = before - schemas.len();
    }

    Ok(stats)
}

/// Walk every reachable schema without modifying the document.
///
/// # Errors
///
/// Returns [`SpecError::BrokenRef`] for the first unresolvable schema
/// reference.
pub fn check_references(document: &resolved::OpenRPC) -> Result<(), SpecError> {
    mark_reachable(document).map(drop)
}

fn mark_reachable(document: &resolved::OpenRPC) -> Result<HashSet<String>, SpecError> {
    let lookup = document
        .components
        .as_ref()
        .and_then(|components| components.schemas.as_ref());

    let mut alive = HashSet::new();
    for root in document
        .methods
        .iter()
        .flat_map(|method| method.params.iter().chain(method.result.as_ref()))
    {
        mark(&mut alive, lookup, &root.schema)?;
    }
    Ok(alive)
}

fn mark(
    alive: &mut HashSet<String>,
    lookup: Option<&BTreeMap<String, Schema>>,
    schema: &Schema,
) -> Result<(), SpecError> {
    let Schema::Object(object) = schema else {
        return Ok(());
    };

    // Exhaustive destructure: adding a schema facet upstream must be
    // accounted for here.
    let SchemaObject {
        metadata: _,
        instance_type: _,
        format: _,
        enum_values: _,
        const_value: _,
        subschemas,
        number: _,
        string: _,
        array,
        object,
        reference,
        extensions: _,
    } = object;

    if let Some(subschemas) = subschemas.as_deref() {
        for child in subschema_children(subschemas) {
            mark(alive, lookup, child)?;
        }
    }
    if let Some(array) = array.as_deref() {
        for child in array_children(array) {
            mark(alive, lookup, child)?;
        }
    }
    if let Some(object) = object.as_deref() {
        for child in object_children(object) {
            mark(alive, lookup, child)?;
        }
    }
    if let Some(reference) = reference {
        mark_reference(alive, lookup, reference)?;
    }

    Ok(())
}

fn mark_reference(
    alive: &mut HashSet<String>,
    lookup: Option<&BTreeMap<String, Schema>>,
    reference: &str,
) -> Result<(), SpecError> {
    let Some(key) = reference.strip_prefix(SCHEMA_REF_PREFIX) else {
        return Err(broken(reference));
    };
    // Mark before recursing so cyclic schemas terminate.
    if alive.insert(key.to_owned()) {
        match lookup.and_then(|schemas| schemas.get(key)) {
            Some(child) => mark(alive, lookup, child)?,
            None => return Err(broken(reference)),
        }
    }
    Ok(())
}

fn subschema_children(subschemas: &SubschemaValidation) -> impl Iterator<Item = &Schema> {
    let SubschemaValidation {
        all_of,
        any_of,
        one_of,
        not,
        if_schema,
        then_schema,
        else_schema,
    } = subschemas;
    iter::empty()
        .chain(all_of.iter().flatten())
        .chain(any_of.iter().flatten())
        .chain(one_of.iter().flatten())
        .chain(not.as_deref())
        .chain(if_schema.as_deref())
        .chain(then_schema.as_deref())
        .chain(else_schema.as_deref())
}

fn array_children(array: &ArrayValidation) -> impl Iterator<Item = &Schema> {
    let ArrayValidation {
        items,
        additional_items,
        max_items: _,
        min_items: _,
        unique_items: _,
        contains,
    } = array;
    items
        .iter()
        .flat_map(iter_single_or_vec)
        .chain(additional_items.as_deref())
        .chain(contains.as_deref())
}

fn object_children(object: &ObjectValidation) -> impl Iterator<Item = &Schema> {
    let ObjectValidation {
        max_properties: _,
        min_properties: _,
        required: _,
        properties,
        pattern_properties,
        additional_properties,
        property_names,
    } = object;
    properties
        .values()
        .chain(pattern_properties.values())
        .chain(additional_properties.as_deref())
        .chain(property_names.as_deref())
}

fn iter_single_or_vec<T>(value: &SingleOrVec<T>) -> impl Iterator<Item = &T> {
    match value {
        SingleOrVec::Single(single) => Either::Left(iter::once(&**single)),
        SingleOrVec::Vec(many) => Either::Right(many.iter()),
    }
}

fn broken(reference: &str) -> SpecError {
    SpecError::BrokenRef {
        reference: reference.to_owned(),
    }
}
