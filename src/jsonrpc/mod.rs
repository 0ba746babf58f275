// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! JSON-RPC 2.0 wire types.
//!
//! ```text
//! --> {"jsonrpc":"2.0","method":"Filecoin.ChainHead","params":[...],"id":1}
//! <-- {"jsonrpc":"2.0","result":{...},"id":1}
//! <-- {"jsonrpc":"2.0","error":{"code":...,"message":"..."},"id":1}
//! ```
//!
//! A request without an `id` is a notification. A response carries exactly
//! one of `result`/`error`; `"result": null` is a success and is distinct
//! from an absent `result` field.

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The `jsonrpc` version marker, always the literal string `"2.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V2;

impl Serialize for V2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("2.0")
    }
}

impl<'de> Deserialize<'de> for V2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let version = Cow::<str>::deserialize(deserializer)?;
        if version == "2.0" {
            Ok(Self)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected jsonrpc version \"2.0\", got {version:?}"
            )))
        }
    }
}

/// A JSON-RPC request or notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: V2,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParameters>,
    /// Absent for notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
}

/// Request parameters, positional or named.
///
/// Named parameters keep their wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestParameters {
    ByPosition(Vec<Value>),
    ByName(IndexMap<String, Value>),
}

impl RequestParameters {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::ByPosition(params) => params.len(),
            Self::ByName(params) => params.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A request/response correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    String(String),
    Number(i64),
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(id) => write!(f, "{id}"),
            Self::Number(id) => write!(f, "{id}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub jsonrpc: V2,
    /// `Ok` for a `result` response, `Err` for an `error` response.
    pub outcome: Result<Value, Error>,
    pub id: Id,
}

/// On-the-wire shape of [`Response`]: optional `result`/`error` fields of
/// which exactly one must be present.
#[derive(Serialize, Deserialize)]
struct RawResponse {
    jsonrpc: V2,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_some"
    )]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
    id: Id,
}

/// Deserialize any value, including `null`, as `Some`.
///
/// With a plain `Option`, `"result": null` and an absent `result` would
/// collapse into the same `None`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (result, error) = match &self.outcome {
            Ok(result) => (Some(result.clone()), None),
            Err(error) => (None, Some(error.clone())),
        };
        RawResponse {
            jsonrpc: self.jsonrpc,
            result,
            error,
            id: self.id.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawResponse::deserialize(deserializer)?;
        let outcome = match (raw.result, raw.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(error),
            (Some(_), Some(_)) => {
                return Err(serde::de::Error::custom(
                    "response carries both `result` and `error`",
                ));
            }
            (None, None) => {
                return Err(serde::de::Error::custom(
                    "response carries neither `result` nor `error`",
                ));
            }
        };
        Ok(Self {
            jsonrpc: raw.jsonrpc,
            outcome,
            id: raw.id,
        })
    }
}
