// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! OpenRPC document model.
//!
//! ```text
//! OpenRPC
//!   info: Info
//!   servers: [Server]
//!   methods: [ReferenceOr<Method>]
//!     params: [ReferenceOr<ContentDescriptor>] -- schema: JSON Schema
//!     result:  ReferenceOr<ContentDescriptor>
//!   components: Components
//!     schemas / contentDescriptors / examples / tags / errors
//!
//! ReferenceOr<T> = { "$ref": "#/components/<section>/<key>" } | T
//! ```
//!
//! Serde model for OpenRPC 1.3.2 documents. Quoted doc comments are taken
//! from the OpenRPC specification. Unknown keys that do not carry the `x-`
//! extension prefix are dropped on deserialization.

pub mod diff;
pub mod gc;
pub mod resolved;
pub mod validate;


use std::collections::BTreeMap;

use schemars::schema::Schema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Root object of an OpenRPC document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRPC {
    /// > REQUIRED.
    /// > This string MUST be the semantic version number of the OpenRPC
    /// > Specification version that the OpenRPC document uses.
    pub openrpc: String,
    /// > REQUIRED.
    /// > Provides metadata about the API.
    pub info: Info,
    /// > An array of Server Objects, which provide connectivity information
    /// > to a target server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// > REQUIRED.
    /// > The available methods for the API.
    pub methods: Vec<ReferenceOr<Method>>,
    /// > An element to hold various schemas for the specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// > Additional external documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Metadata about the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// > REQUIRED.
    /// > The title of the application.
    pub title: String,
    /// > REQUIRED.
    /// > The version of the OpenRPC document.
    pub version: String,
    /// > A verbose description of the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// > A URL to the Terms of Service for the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// > The contact information for the exposed API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// > The license information for the exposed API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// License information for the exposed API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Connectivity information for a target server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// > REQUIRED.
    /// > A name to be used as the cannonical name for the server.
    pub name: String,
    /// > REQUIRED.
    /// > A URL to the target host. This URL supports Server Variables and
    /// > MAY be relative.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Describes the interface for a given method name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// > REQUIRED.
    /// > The cannonical name for the method.
    /// > The name MUST be unique within the methods array.
    pub name: String,
    /// > A list of tags for API documentation control.
    /// > Tags can be used for logical grouping of methods by resources or
    /// > any other qualifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ReferenceOr<Tag>>>,
    /// > A short summary of what the method does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// > A verbose explanation of the method behavior.
    /// > GitHub Flavored Markdown syntax MAY be used for rich text representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// > Additional external documentation for this method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    /// > REQUIRED.
    /// > A list of parameters that are applicable for this method.
    /// > The list MUST NOT include duplicated parameters and therefore
    /// > require name to be unique.
    /// > All optional params (content descriptor objects with "required": false)
    /// > MUST be positioned after all required params in the list.
    pub params: Vec<ReferenceOr<ContentDescriptor>>,
    /// > The description of the result returned by the method.
    /// > If undefined, the method MUST only be used as a notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ReferenceOr<ContentDescriptor>>,
    /// > Declares this method to be deprecated.
    /// > Consumers SHOULD refrain from usage of the declared method.
    /// > Default value is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// > An alternative servers array to service this method.
    /// > If an alternative servers array is specified at the Root level,
    /// > it will be overridden by this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// > A list of custom application defined errors that MAY be returned.
    /// > The Errors MUST have unique error codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ReferenceOr<Error>>>,
    /// > The expected format of the parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_structure: Option<ParamStructure>,
    /// > Array of Example Pairing Objects where each example includes a valid
    /// > params-to-result Content Descriptor pairing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ReferenceOr<ExamplePairing>>>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Reusable object to describe a method parameter or result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// > REQUIRED.
    /// > Name of the content that is being described.
    pub name: String,
    /// > A short summary of the content that is being described.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// > A verbose explanation of the content descriptor behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// > Determines if the content is a required field.
    /// > Default value is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// > REQUIRED.
    /// > Schema that describes the content.
    pub schema: Schema,
    /// > Specifies that the content is deprecated and SHOULD be transitioned
    /// > out of usage. Default value is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// The expected format of JSON-RPC parameters.
///
/// > Defaults to "either".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamStructure {
    ByName,
    ByPosition,
    #[default]
    Either,
}

/// Adds metadata to a single tag that is used by the Method Object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Reference to external resources for extended documentation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// > REQUIRED.
    /// > The URL for the target documentation.
    pub url: String,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Application-defined error that a method MAY return.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Error {
    /// > REQUIRED.
    /// > A Number that indicates the error type that occurred.
    pub code: i64,
    /// > REQUIRED.
    /// > A String providing a short description of the error.
    pub message: String,
    /// > A Primitive or Structured value that contains additional information
    /// > about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Example value for a parameter or result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// > Embedded literal example.
    /// > The `value` field and `externalValue` field are mutually exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// > A URL that points to the literal example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
    #[serde(flatten)]
    pub extensions: SpecificationExtensions,
}

/// Example params-to-result pairing for a method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePairing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ReferenceOr<Example>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ReferenceOr<Example>>,
}

/// Holds reusable objects for different aspects of the OpenRPC document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_descriptors: Option<BTreeMap<String, ContentDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<String, Example>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Error>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_pairing_objects: Option<BTreeMap<String, ExamplePairing>>,
}

/// Either a `{ "$ref": "..." }` object or an inline item.
///
/// A map that carries a `$ref` key deserializes as a reference; anything
/// else is tried as the item itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(T),
}

impl<T> ReferenceOr<T> {
    /// Wrap an inline item.
    pub const fn item(item: T) -> Self {
        Self::Item(item)
    }

    /// Build a reference to `#/components/<section>/<key>`.
    pub fn component_ref(section: &str, key: &str) -> Self {
        Self::Reference {
            reference: format!("#/components/{section}/{key}"),
        }
    }
}

/// Map of `x-` prefixed specification extensions, flattened into the parent
/// object on the wire.
///
/// Deserialization keeps only keys with the `x-` prefix; other unknown keys
/// are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecificationExtensions(pub BTreeMap<String, Value>);

impl SpecificationExtensions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SpecificationExtensions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SpecificationExtensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = BTreeMap::<String, Value>::deserialize(deserializer)?;
        map.retain(|key, _| key.starts_with("x-"));
        Ok(Self(map))
    }
}
