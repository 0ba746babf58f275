// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

use super::{Error, Id, Request, RequestParameters, Response};
use serde_json::json;

#[test]
fn test_request_by_position() {
    let request: Request = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "Filecoin.ChainGetTipSetByHeight",
        "params": [1024, null],
        "id": 1,
    }))
    .unwrap();
    assert_eq!(request.method, "Filecoin.ChainGetTipSetByHeight");
    assert_eq!(request.id, Some(Id::Number(1)));
    match request.params.unwrap() {
        RequestParameters::ByPosition(params) => assert_eq!(params.len(), 2),
        RequestParameters::ByName(_) => panic!("expected positional params"),
    }
}

#[test]
fn test_request_by_name_keeps_order() {
    let request: Request = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "Filecoin.WalletBalance",
        "params": {"zeta": 1, "alpha": 2},
        "id": "abc",
    }))
    .unwrap();
    match request.params.unwrap() {
        RequestParameters::ByName(params) => {
            let keys: Vec<&str> = params.keys().map(String::as_str).collect();
            assert_eq!(keys, ["zeta", "alpha"]);
        }
        RequestParameters::ByPosition(_) => panic!("expected named params"),
    }
}

#[test]
fn test_notification_has_no_id() {
    let request: Request = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "Filecoin.NetDisconnect",
    }))
    .unwrap();
    assert_eq!(request.id, None);
    assert_eq!(request.params, None);
}

#[test]
fn test_request_rejects_wrong_version() {
    let result = serde_json::from_value::<Request>(json!({
        "jsonrpc": "1.0",
        "method": "Filecoin.ChainHead",
        "id": 1,
    }));
    assert!(result.is_err());
}

#[test]
fn test_response_result() {
    let response: Response = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "result": {"Height": 1024},
        "id": 1,
    }))
    .unwrap();
    assert_eq!(response.outcome, Ok(json!({"Height": 1024})));
    assert_eq!(response.id, Id::Number(1));
}

#[test]
fn test_response_null_result_is_success() {
    let response: Response = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "result": null,
        "id": 1,
    }))
    .unwrap();
    assert_eq!(response.outcome, Ok(serde_json::Value::Null));
}

#[test]
fn test_response_error() {
    let response: Response = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "error": {"code": -32601, "message": "method not found"},
        "id": null,
    }))
    .unwrap();
    assert_eq!(
        response.outcome,
        Err(Error {
            code: -32601,
            message: "method not found".to_string(),
            data: None,
        })
    );
    assert_eq!(response.id, Id::Null);
}

#[test]
fn test_response_rejects_both_and_neither() {
    let both = serde_json::from_value::<Response>(json!({
        "jsonrpc": "2.0",
        "result": 1,
        "error": {"code": 0, "message": ""},
        "id": 1,
    }));
    assert!(both.is_err());

    let neither = serde_json::from_value::<Response>(json!({
        "jsonrpc": "2.0",
        "id": 1,
    }));
    assert!(neither.is_err());
}

#[test]
fn test_response_round_trip() {
    let response = Response {
        jsonrpc: super::V2,
        outcome: Err(Error {
            code: 1,
            message: "bad tipset".to_string(),
            data: Some(json!(["detail"])),
        }),
        id: Id::String("req-7".to_string()),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({
            "jsonrpc": "2.0",
            "error": {"code": 1, "message": "bad tipset", "data": ["detail"]},
            "id": "req-7",
        })
    );
    let back: Response = serde_json::from_value(value).unwrap();
    assert_eq!(back, response);
}
