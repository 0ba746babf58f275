// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Structural validation of OpenRPC documents.
//!
//! ```text
//! load_document (serde_path_to_error)
//!        |
//!        v
//! resolved::OpenRPC::resolve    broken method-layer $refs
//!        |
//!        v
//! check_methods                 duplicate methods / params,
//!        |                      required-after-optional
//!        v
//! gc::check_references          broken schema $refs
//! ```
//!
//! Does not validate:
//! - that example pairings match schemas
//! - that `Example::value` and `Example::externalValue` are mutually exclusive
//! - links, runtime expressions
//! - that component keys are idents

use std::fs::File;
use std::path::Path;

use itertools::Itertools as _;

use crate::error::{CnaResult, SpecError};
use crate::openrpc::{OpenRPC, resolved};

/// Load an OpenRPC document from a JSON file.
///
/// Deserialization goes through `serde_path_to_error` so shape errors name
/// the JSON path at fault.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, or
/// [`SpecError::Parse`] if it is not a well-formed OpenRPC document.
pub fn load_document(path: &Path) -> CnaResult<OpenRPC> {
    let file = File::open(path)?;
    let document = serde_path_to_error::deserialize::<_, OpenRPC>(
        &mut serde_json::Deserializer::from_reader(file),
    )
    .map_err(|e| SpecError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(document)
}

/// Run every structural check against a document.
///
/// # Errors
///
/// Returns the first [`SpecError`] found: a broken reference, a duplicated
/// method or parameter name, or a required parameter positioned after an
/// optional one.
pub fn check_document(document: OpenRPC) -> Result<resolved::OpenRPC, SpecError> {
    let document = resolved::OpenRPC::resolve(document)?;
    check_methods(&document)?;
    super::gc::check_references(&document)?;
    Ok(document)
}

/// Check method-level naming and ordering rules.
///
/// # Errors
///
/// Returns [`SpecError::DuplicateMethods`], [`SpecError::DuplicateParams`]
/// or [`SpecError::RequiredAfterOptional`].
pub fn check_methods(document: &resolved::OpenRPC) -> Result<(), SpecError> {
    let duplicates = document
        .methods
        .iter()
        .map(|method| method.name.as_str())
        .duplicates()
        .map(String::from)
        .collect::<Vec<_>>();
    if !duplicates.is_empty() {
        return Err(SpecError::DuplicateMethods { names: duplicates });
    }

    for method in &document.methods {
        let duplicates = method
            .params
            .iter()
            .map(|param| param.name.as_str())
            .duplicates()
            .map(String::from)
            .collect::<Vec<_>>();
        if !duplicates.is_empty() {
            return Err(SpecError::DuplicateParams {
                method: method.name.clone(),
                names: duplicates,
            });
        }

        // Optional params must trail all required ones.
        if let Some((ix, optional)) = method.params.iter().enumerate().find_map(|(ix, param)| {
            (!param.required.unwrap_or_default()).then_some((ix, param.name.as_str()))
        }) {
            let out_of_order = method.params[ix..]
                .iter()
                .filter(|param| param.required.unwrap_or_default())
                .map(|param| param.name.clone())
                .collect::<Vec<_>>();
            if !out_of_order.is_empty() {
                return Err(SpecError::RequiredAfterOptional {
                    method: method.name.clone(),
                    optional: optional.to_string(),
                    required: out_of_order,
                });
            }
        }
    }

    Ok(())
}
