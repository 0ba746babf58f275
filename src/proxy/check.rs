// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Per-method validation tables compiled from an OpenRPC document.
//!
//! ```text
//! resolved::OpenRPC --compile--> MethodChecks
//!   method name -> MethodCheck
//!     params: name -> { required, deprecated, JSONSchema }
//!     result: JSONSchema
//!
//! MethodCheck::check(request, response) -> [Finding]
//! ```
//!
//! Schemas are compiled with the document's components bundled alongside so
//! that `#/components/schemas/...` references resolve inside the compiled
//! schema.

use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use either::Either;
use indexmap::IndexMap;
use jsonschema::JSONSchema;
use schemars::schema::{Schema, SchemaObject};
use serde::Serialize;
use serde_json::json;

use crate::error::{CnaResult, SchemaError, SpecError};
use crate::jsonrpc::{Request, RequestParameters, Response};
use crate::openrpc::{Components, ParamStructure, resolved};

/// Validation tables for every method in a document.
#[derive(Debug)]
pub struct MethodChecks {
    methods: HashMap<String, MethodCheck>,
}

impl MethodChecks {
    /// Compile the validation table for `document`.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when the document declares inconsistent
    /// parameters for its `paramStructure`, or a
    /// [`crate::error::SchemaError`] when a schema does not compile.
    pub fn compile(document: resolved::OpenRPC) -> CnaResult<Self> {
        let components = document.components.as_ref();
        let mut methods = HashMap::with_capacity(document.methods.len());

        for method in &document.methods {
            let param_structure = method.param_structure.unwrap_or_default();

            let mut params = IndexMap::with_capacity(method.params.len());
            let mut seen_optional = false;
            for (ix, param) in method.params.iter().enumerate() {
                let required = param.required.unwrap_or_default();

                // Positional calls cannot skip params, so a required param
                // after an optional one is unsatisfiable.
                if required
                    && seen_optional
                    && matches!(
                        param_structure,
                        ParamStructure::ByPosition | ParamStructure::Either
                    )
                {
                    return Err(SpecError::OutOfOrderParam {
                        method: method.name.clone(),
                        index: ix,
                    }
                    .into());
                }
                if !required {
                    seen_optional = true;
                }

                if params.contains_key(&param.name)
                    && matches!(
                        param_structure,
                        ParamStructure::ByName | ParamStructure::Either
                    )
                {
                    return Err(SpecError::DuplicateParam {
                        method: method.name.clone(),
                        name: param.name.clone(),
                    }
                    .into());
                }

                params.insert(
                    param.name.clone(),
                    ParamCheck {
                        required,
                        deprecated: param.deprecated.unwrap_or_default(),
                        schema: compile_schema(
                            &param.schema,
                            components,
                            &format!("param `{}` of method {}", param.name, method.name),
                        )?,
                    },
                );
            }

            if methods.contains_key(&method.name) {
                return Err(SpecError::DuplicateMethod {
                    name: method.name.clone(),
                }
                .into());
            }

            methods.insert(
                method.name.clone(),
                MethodCheck {
                    params,
                    param_structure,
                    deprecated: method.deprecated.unwrap_or_default(),
                    result: match &method.result {
                        Some(result) => Some(compile_schema(
                            &result.schema,
                            components,
                            &format!("result of method {}", method.name),
                        )?),
                        None => None,
                    },
                },
            );
        }

        Ok(Self { methods })
    }

    /// Number of methods in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Look up the check for a method name.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&MethodCheck> {
        self.methods.get(method)
    }
}

/// Compiled validation state for one method.
#[derive(Debug)]
pub struct MethodCheck {
    params: IndexMap<String, ParamCheck>,
    param_structure: ParamStructure,
    deprecated: bool,
    result: Option<JSONSchema>,
}

impl MethodCheck {
    /// Check one request/response exchange against this method.
    ///
    /// Returns every finding; an empty list means the exchange conforms.
    #[must_use]
    pub fn check(&self, request: &Request, response: Option<&Response>) -> Vec<Finding> {
        let mut findings = vec![];

        match (self.param_structure, &request.params) {
            (ParamStructure::ByName, Some(RequestParameters::ByPosition(_)))
            | (ParamStructure::ByPosition, Some(RequestParameters::ByName(_))) => {
                findings.push(Finding::IncorrectParamStructure);
            }
            _ => {}
        }

        let mut provided = match &request.params {
            None => Either::Left(VecDeque::new()),
            Some(RequestParameters::ByPosition(params)) => Either::Left(params.iter().collect()),
            Some(RequestParameters::ByName(params)) => Either::Right(
                params
                    .iter()
                    .map(|(name, value)| (Cow::Borrowed(&**name), value))
                    .collect::<HashMap<_, _>>(),
            ),
        };

        for (name, check) in &self.params {
            let value = match &mut provided {
                Either::Left(by_position) => by_position.pop_front(),
                Either::Right(by_name) => by_name.remove(&**name),
            };
            match (check.required, value) {
                (true, None) => findings.push(Finding::MissingRequiredParam {
                    param: name.clone(),
                }),
                (_, Some(value)) => {
                    if check.deprecated {
                        findings.push(Finding::DeprecatedParam {
                            param: name.clone(),
                        });
                    }
                    if !check.schema.is_valid(value) {
                        findings.push(Finding::InvalidParam {
                            param: name.clone(),
                        });
                    }
                }
                (false, None) => {}
            }
        }

        let leftover = match provided {
            Either::Left(by_position) => !by_position.is_empty(),
            Either::Right(by_name) => !by_name.is_empty(),
        };
        if leftover {
            findings.push(Finding::ExcessParams);
        }

        match (&request.id, &self.result, response) {
            // A notification of a notification-only method expects nothing back.
            (None, None, None) => {}

            (Some(request_id), Some(schema), Some(Response { outcome, id, .. })) => {
                if request_id != id {
                    findings.push(Finding::IdMismatch);
                }
                if let Ok(result) = outcome
                    && !schema.is_valid(result)
                {
                    findings.push(Finding::InvalidResult);
                }
            }
            _ => findings.push(Finding::BadNotification),
        }

        if self.deprecated {
            findings.push(Finding::DeprecatedMethod);
        }

        findings
    }
}

/// One way an exchange deviates from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Finding {
    /// Params were passed in a structure the method forbids.
    IncorrectParamStructure,
    MissingRequiredParam { param: String },
    DeprecatedParam { param: String },
    InvalidParam { param: String },
    /// More params than the method declares.
    ExcessParams,
    InvalidResult,
    /// Request/response shape does not match the method's notification-ness.
    BadNotification,
    /// Response `id` differs from the request `id`.
    IdMismatch,
    DeprecatedMethod,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncorrectParamStructure => write!(f, "incorrect param structure"),
            Self::MissingRequiredParam { param } => {
                write!(f, "missing required param `{param}`")
            }
            Self::DeprecatedParam { param } => write!(f, "use of deprecated param `{param}`"),
            Self::InvalidParam { param } => write!(f, "invalid param `{param}`"),
            Self::ExcessParams => write!(f, "excess params"),
            Self::InvalidResult => write!(f, "invalid result"),
            Self::BadNotification => write!(f, "request/response notification mismatch"),
            Self::IdMismatch => write!(f, "response id differs from request id"),
            Self::DeprecatedMethod => write!(f, "use of deprecated method"),
        }
    }
}

#[derive(Debug)]
struct ParamCheck {
    required: bool,
    deprecated: bool,
    schema: JSONSchema,
}

/// Compile a schema with the document components bundled alongside, so that
/// `#/components/schemas/...` refs resolve within the compiled schema.
fn compile_schema(
    schema: &Schema,
    components: Option<&Components>,
    owner: &str,
) -> CnaResult<JSONSchema> {
    #[derive(Serialize)]
    struct Bundle<'a> {
        #[serde(flatten)]
        schema: &'a SchemaObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        components: Option<&'a Components>,
    }

    let value = match schema {
        Schema::Bool(accept_all) => json!(accept_all),
        Schema::Object(schema) => {
            serde_json::to_value(Bundle { schema, components }).map_err(|e| {
                SchemaError::Compile {
                    owner: owner.to_string(),
                    message: e.to_string(),
                }
            })?
        }
    };

    JSONSchema::compile(&value).map_err(|e| {
        SchemaError::Compile {
            owner: owner.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
