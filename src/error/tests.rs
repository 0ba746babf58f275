// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

use super::{CnaError, CnaResult, ConfigError, SpecError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "proxy".to_string(),
        key: "listen".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'listen' in section '[proxy]'"
    );
}

#[test]
fn test_spec_error_display_joins_names() {
    let err = SpecError::DuplicateMethods {
        names: vec!["Filecoin.ChainHead".to_string(), "Filecoin.ChainHead".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "the following method names are duplicated: Filecoin.ChainHead, Filecoin.ChainHead"
    );
}

#[test]
fn test_required_after_optional_display() {
    let err = SpecError::RequiredAfterOptional {
        method: "Filecoin.ChainGetTipSet".to_string(),
        optional: "limit".to_string(),
        required: vec!["key".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "the following required parameters on method Filecoin.ChainGetTipSet \
         follow the optional parameter limit: key"
    );
}

#[test]
fn test_broken_ref_carries_reference_verbatim() {
    let err = SpecError::BrokenRef {
        reference: "#/components/schemas/Missing".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "error resolving `$ref`: #/components/schemas/Missing"
    );
}

#[test]
fn test_cna_error_size() {
    // CnaError should be reasonably small
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<CnaError>();
    assert!(size <= 24, "CnaError is {size} bytes, expected <= 24");
}

#[test]
fn test_cna_result_size() {
    // Result<(), CnaError> should be reasonably small
    let size = std::mem::size_of::<CnaResult<()>>();
    assert!(size <= 24, "CnaResult<()> is {size} bytes, expected <= 24");
}
