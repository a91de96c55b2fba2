use langkey::mcp::{
    LangkeyMcpServer,
    types::{CompleteKeysParams, LookupKeyParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::{
    McpTestFixture, assert_pagination, extract_tool_result_json, fixture_flat, fixture_nested,
};

fn keys_of(result: &Value) -> Vec<String> {
    result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// complete_keys tests
// ============================================================================

#[tokio::test]
async fn test_complete_keys_filters_in_order() {
    let fixture = fixture_nested().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(CompleteKeysParams {
        project_root_path: fixture.root(),
        partial_key: Some("com".to_string()),
        offset: None,
        limit: None,
    });

    let result = server.complete_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    assert_eq!(keys_of(&json_result), vec!["common.ok", "common.cancel"]);
    assert_eq!(json_result["items"][0]["value"], "OK");
    assert_pagination(&json_result, 0, 20, false);
}

#[tokio::test]
async fn test_complete_keys_renders_non_string_values() {
    let fixture = fixture_nested().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(CompleteKeysParams {
        project_root_path: fixture.root(),
        partial_key: Some("limits".to_string()),
        offset: None,
        limit: None,
    });

    let result = server.complete_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["items"],
        json!([
            {"key": "limits.max", "value": "2"},
            {"key": "limits.enabled", "value": "true"},
            {"key": "limits.missing", "value": "null"}
        ])
    );
}

#[tokio::test]
async fn test_complete_keys_pagination() {
    let fixture = fixture_nested().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(CompleteKeysParams {
        project_root_path: fixture.root(),
        partial_key: None,
        offset: Some(1),
        limit: Some(2),
    });

    let result = server.complete_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 6);
    assert_eq!(keys_of(&json_result), vec!["common.cancel", "errors.notFound"]);
    assert_pagination(&json_result, 1, 2, true);
}

#[tokio::test]
async fn test_complete_keys_limit_is_capped() {
    let fixture = fixture_flat().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(CompleteKeysParams {
        project_root_path: fixture.root(),
        partial_key: None,
        offset: None,
        limit: Some(1000),
    });

    let result = server.complete_keys(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 100, false);
}

#[tokio::test]
async fn test_complete_keys_without_translation_file() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(CompleteKeysParams {
        project_root_path: fixture.root(),
        partial_key: None,
        offset: None,
        limit: None,
    });

    let err = server.complete_keys(params).await.unwrap_err();
    assert_eq!(err.message, "Could not find en.json file in the workspace");
}

// ============================================================================
// lookup_key tests
// ============================================================================

#[tokio::test]
async fn test_lookup_key_flat() {
    let fixture = fixture_flat().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(LookupKeyParams {
        project_root_path: fixture.root(),
        key: "common.cancel".to_string(),
    });

    let result = server.lookup_key(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["value"], "Cancel");
    assert_eq!(json_result["definition"], json!({"line": 3, "column": 3}));
}

#[tokio::test]
async fn test_lookup_key_nested_has_no_definition() {
    let fixture = fixture_nested().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(LookupKeyParams {
        project_root_path: fixture.root(),
        key: "common.ok".to_string(),
    });

    let result = server.lookup_key(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["value"], "OK");
    assert!(json_result["definition"].is_null());
}

#[tokio::test]
async fn test_lookup_key_missing() {
    let fixture = fixture_flat().unwrap();
    let server = LangkeyMcpServer::new();

    let params = Parameters(LookupKeyParams {
        project_root_path: fixture.root(),
        key: "missing.key".to_string(),
    });

    let result = server.lookup_key(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["found"], false);
    assert!(json_result["value"].is_null());
    assert!(json_result["definition"].is_null());
}
