// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! `$ref`-free view of an OpenRPC document.
//!
//! ```text
//! openrpc::OpenRPC --resolve--> resolved::OpenRPC
//!   methods[].{tags,params,result,errors,examples}
//!     ReferenceOr<T> --#/components/<section>/<key>--> T
//! ```
//!
//! Only the method layer is inlined here. Schema-level `$ref`s stay in
//! place; [`crate::openrpc::gc`] and the proxy checker resolve those lazily.

use std::collections::BTreeMap;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::openrpc::{
    Components, ContentDescriptor, Error, ExamplePairing, ExternalDocumentation, Info, Method as RawMethod,
    OpenRPC as RawOpenRPC, ParamStructure, ReferenceOr, Server, SpecificationExtensions, Tag,
};

/// An OpenRPC document whose method layer contains no references.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRPC {
    pub openrpc: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    pub methods: Vec<Method>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

impl OpenRPC {
    /// Resolve every method-layer reference in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::BrokenRef`] for the first reference that does
    /// not point at an existing component.
    pub fn resolve(document: RawOpenRPC) -> Result<Self, SpecError> {
        let RawOpenRPC {
            openrpc,
            info,
            servers,
            methods,
            components,
            external_docs,
            extensions,
        } = document;
        let methods = resolve_methods(components.as_ref(), methods)?;
        Ok(Self {
            openrpc,
            info,
            servers,
            methods,
            components,
            external_docs,
            extensions,
        })
    }
}

/// A method whose `tags`, `params`, `result`, `errors` and `examples` are
/// all inline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    pub params: Vec<ContentDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ContentDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Error>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_structure: Option<ParamStructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ExamplePairing>>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Resolve a list of method references against `components`.
///
/// # Errors
///
/// Returns [`SpecError::BrokenRef`] for the first broken reference.
pub fn resolve_methods(
    components: Option<&Components>,
    methods: Vec<ReferenceOr<RawMethod>>,
) -> Result<Vec<Method>, SpecError> {
    methods
        .into_iter()
        .map(|method| {
            // The OpenRPC spec defines no `methods` component section, so a
            // reference in the methods array can never resolve.
            resolve_component(components, method, "methods", |_| None)
                .and_then(|method| resolve_method(components, method))
        })
        .collect()
}

fn resolve_method(components: Option<&Components>, method: RawMethod) -> Result<Method, SpecError> {
    let RawMethod {
        name,
        tags,
        summary,
        description,
        external_docs,
        params,
        result,
        deprecated,
        servers,
        errors,
        param_structure,
        examples,
        extensions,
    } = method;
    Ok(Method {
        name,
        tags: match tags {
            Some(tags) => Some(
                tags.into_iter()
                    .map(|tag| resolve_component(components, tag, "tags", |c| c.tags.as_ref()))
                    .try_collect()?,
            ),
            None => None,
        },
        summary,
        description,
        external_docs,
        params: params
            .into_iter()
            .map(|param| {
                resolve_component(components, param, "contentDescriptors", |c| {
                    c.content_descriptors.as_ref()
                })
            })
            .try_collect()?,
        result: match result {
            Some(result) => Some(resolve_component(components, result, "contentDescriptors", |c| {
                c.content_descriptors.as_ref()
            })?),
            None => None,
        },
        deprecated,
        servers,
        errors: match errors {
            Some(errors) => Some(
                errors
                    .into_iter()
                    .map(|error| resolve_component(components, error, "errors", |c| c.errors.as_ref()))
                    .try_collect()?,
            ),
            None => None,
        },
        param_structure,
        examples: match examples {
            Some(examples) => Some(
                examples
                    .into_iter()
                    .map(|example| {
                        resolve_component(components, example, "examplePairingObjects", |c| {
                            c.example_pairing_objects.as_ref()
                        })
                    })
                    .try_collect()?,
            ),
            None => None,
        },
        extensions,
    })
}

/// Look a reference up in its `#/components/<section>/` map, or pass an
/// inline item through.
fn resolve_component<T: Clone>(
    components: Option<&Components>,
    item: ReferenceOr<T>,
    section: &str,
    lookup: impl Fn(&Components) -> Option<&BTreeMap<String, T>>,
) -> Result<T, SpecError> {
    match item {
        ReferenceOr::Reference { reference } => reference
            .strip_prefix(&format!("#/components/{section}/"))
            .and_then(|key| components.and_then(&lookup).and_then(|map| map.get(key)))
            .cloned()
            .ok_or(SpecError::BrokenRef { reference }),
        ReferenceOr::Item(item) => Ok(item),
    }
}
