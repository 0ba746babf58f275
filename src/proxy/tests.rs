// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

use super::check::{Finding, MethodChecks};
use crate::jsonrpc::{Request, Response};
use crate::openrpc::resolved;
use serde_json::{Value, json};

fn checks(document: Value) -> MethodChecks {
    let document = serde_json::from_value(document).expect("test document must deserialize");
    let document = resolved::OpenRPC::resolve(document).expect("test document must resolve");
    MethodChecks::compile(document).expect("test document must compile")
}

fn chain_head_checks() -> MethodChecks {
    checks(json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.ChainGetTipSetByHeight",
            "params": [
                {"name": "height", "required": true, "schema": {"type": "integer"}},
                {"name": "anchor", "schema": {"type": "array"}},
            ],
            "result": {"name": "tipset", "schema": {"type": "object"}},
        }],
    }))
}

fn request(value: Value) -> Request {
    serde_json::from_value(value).expect("test request must deserialize")
}

fn response(value: Value) -> Response {
    serde_json::from_value(value).expect("test response must deserialize")
}

fn ok_response() -> Response {
    response(json!({"jsonrpc": "2.0", "result": {"Height": 1024}, "id": 1}))
}

// =============================================================================
// Compilation
// =============================================================================

#[test]
fn test_compile_builds_table() {
    let checks = chain_head_checks();
    assert_eq!(checks.len(), 1);
    assert!(checks.get("Filecoin.ChainGetTipSetByHeight").is_some());
    assert!(checks.get("Filecoin.ChainHead").is_none());
}

#[test]
fn test_compile_rejects_out_of_order_params() {
    let document = json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.ChainGetTipSet",
            "params": [
                {"name": "limit", "schema": true},
                {"name": "key", "required": true, "schema": true},
            ],
        }],
    });
    let document: crate::openrpc::OpenRPC = serde_json::from_value(document).unwrap();
    let document = resolved::OpenRPC::resolve(document).unwrap();
    let error = MethodChecks::compile(document).unwrap_err();
    assert!(
        error.to_string().contains("out-of-order"),
        "unexpected error: {error}"
    );
}

#[test]
fn test_compile_allows_out_of_order_for_by_name() {
    let checks = checks(json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.StateCall",
            "paramStructure": "by-name",
            "params": [
                {"name": "trace", "schema": true},
                {"name": "message", "required": true, "schema": true},
            ],
        }],
    }));
    assert_eq!(checks.len(), 1);
}

#[test]
fn test_compile_resolves_schema_component_refs() {
    // The components bundle must make #/components/schemas/ refs resolvable
    // inside the compiled schema.
    let checks = checks(json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.WalletBalance",
            "params": [{"name": "address", "required": true,
                        "schema": {"$ref": "#/components/schemas/Address"}}],
        }],
        "components": {"schemas": {"Address": {"type": "string"}}},
    }));
    let check = checks.get("Filecoin.WalletBalance").unwrap();

    let valid = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.WalletBalance",
        "params": ["f01234"], "id": 1,
    }));
    let findings = check.check(&valid, None);
    assert!(
        !findings.contains(&Finding::InvalidParam {
            param: "address".to_string()
        }),
        "string address must satisfy the referenced schema: {findings:?}"
    );

    let invalid = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.WalletBalance",
        "params": [42], "id": 1,
    }));
    let findings = check.check(&invalid, None);
    assert!(findings.contains(&Finding::InvalidParam {
        param: "address".to_string()
    }));
}

// =============================================================================
// Exchange checking
// =============================================================================

#[test]
fn test_check_passes_conforming_exchange() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024], "id": 1,
    }));
    let findings = check.check(&request, Some(&ok_response()));
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_check_missing_required_param() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [], "id": 1,
    }));
    let findings = check.check(&request, Some(&ok_response()));
    assert_eq!(
        findings,
        [Finding::MissingRequiredParam {
            param: "height".to_string()
        }]
    );
}

#[test]
fn test_check_invalid_param_and_excess() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": ["not-a-height", [], "extra"], "id": 1,
    }));
    let findings = check.check(&request, Some(&ok_response()));
    assert!(findings.contains(&Finding::InvalidParam {
        param: "height".to_string()
    }));
    assert!(findings.contains(&Finding::ExcessParams));
}

#[test]
fn test_check_by_name_params() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": {"height": 1024}, "id": 1,
    }));
    let findings = check.check(&request, Some(&ok_response()));
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_check_param_structure_mismatch() {
    let checks = checks(json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.ChainHead",
            "paramStructure": "by-position",
            "params": [{"name": "key", "schema": true}],
            "result": {"name": "tipset", "schema": true},
        }],
    }));
    let check = checks.get("Filecoin.ChainHead").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainHead",
        "params": {"key": []}, "id": 1,
    }));
    let findings = check.check(
        &request,
        Some(&response(json!({"jsonrpc": "2.0", "result": {}, "id": 1}))),
    );
    assert!(findings.contains(&Finding::IncorrectParamStructure));
}

#[test]
fn test_check_invalid_result() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024], "id": 1,
    }));
    let bad_result = response(json!({"jsonrpc": "2.0", "result": "not-an-object", "id": 1}));
    let findings = check.check(&request, Some(&bad_result));
    assert_eq!(findings, [Finding::InvalidResult]);
}

#[test]
fn test_check_error_response_skips_result_schema() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024], "id": 1,
    }));
    let error = response(json!({
        "jsonrpc": "2.0",
        "error": {"code": -32000, "message": "tipset not found"},
        "id": 1,
    }));
    let findings = check.check(&request, Some(&error));
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_check_id_mismatch() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024], "id": 1,
    }));
    let wrong_id = response(json!({"jsonrpc": "2.0", "result": {}, "id": 2}));
    let findings = check.check(&request, Some(&wrong_id));
    assert_eq!(findings, [Finding::IdMismatch]);
}

#[test]
fn test_check_response_to_notification() {
    let checks = chain_head_checks();
    let check = checks.get("Filecoin.ChainGetTipSetByHeight").unwrap();
    // No id: a notification, but the method declares a result.
    let notification = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024],
    }));
    let findings = check.check(&notification, None);
    assert_eq!(findings, [Finding::BadNotification]);
}

#[test]
fn test_check_deprecated_method_and_param() {
    let checks = checks(json!({
        "openrpc": "1.3.2",
        "info": {"title": "t", "version": "v"},
        "methods": [{
            "name": "Filecoin.StateWaitMsgLimited",
            "deprecated": true,
            "params": [
                {"name": "cid", "required": true, "deprecated": true, "schema": true},
            ],
            "result": {"name": "lookup", "schema": true},
        }],
    }));
    let check = checks.get("Filecoin.StateWaitMsgLimited").unwrap();
    let request = request(json!({
        "jsonrpc": "2.0", "method": "Filecoin.StateWaitMsgLimited",
        "params": [{"/": "bafy..."}], "id": 1,
    }));
    let findings = check.check(
        &request,
        Some(&response(json!({"jsonrpc": "2.0", "result": {}, "id": 1}))),
    );
    assert!(findings.contains(&Finding::DeprecatedParam {
        param: "cid".to_string()
    }));
    assert!(findings.contains(&Finding::DeprecatedMethod));
}

#[test]
fn test_finding_serialization() {
    insta::assert_json_snapshot!(
        Finding::MissingRequiredParam {
            param: "height".to_string()
        },
        @r#"
    {
      "kind": "missing-required-param",
      "param": "height"
    }
    "#
    );
}

#[test]
fn test_finding_display() {
    assert_eq!(
        Finding::MissingRequiredParam {
            param: "height".to_string()
        }
        .to_string(),
        "missing required param `height`"
    );
    assert_eq!(Finding::ExcessParams.to_string(), "excess params");
}
