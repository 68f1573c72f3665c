mod support;

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};
use support::{call, registry};

use cloudmcp::CloudMcpService;

async fn empty_service() -> (tempfile::TempDir, CloudMcpService) {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir.path().join("config.toml")).await.unwrap();
    let service = CloudMcpService::new(std::sync::Arc::new(registry)).unwrap();
    (dir, service)
}

fn placeholder(property: Option<&Value>) -> Value {
    let kind = property
        .and_then(|p| p.get("type"))
        .and_then(|t| match t {
            Value::String(s) => Some(s.as_str()),
            Value::Array(list) => list.iter().filter_map(Value::as_str).find(|k| *k != "null"),
            _ => None,
        })
        .unwrap_or("string");
    match kind {
        "integer" | "number" => json!(1),
        "boolean" => json!(true),
        "array" => json!([]),
        "object" => json!({}),
        _ => json!("x"),
    }
}

fn required_arguments(schema: &Map<String, Value>) -> Value {
    let properties = schema.get("properties").and_then(Value::as_object);
    let mut arguments = Map::new();
    for field in schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
    {
        let property = properties.and_then(|p| p.get(field));
        arguments.insert(field.to_string(), placeholder(property));
    }
    Value::Object(arguments)
}

fn schema_rejection(text: &str) -> bool {
    text.ends_with("': is required")
        || text.contains("is required (got null)")
        || text.contains("': expected ")
        || text.contains("invalid type")
        || text.contains("missing field `")
        || text.contains("unknown field `")
}

#[tokio::test]
async fn every_tool_publishes_an_object_schema() {
    let (_dir, service) = empty_service().await;
    let tools = service.tools();
    assert!(tools.len() >= 90, "only {} tools registered", tools.len());

    let names: BTreeSet<String> = tools.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(names.len(), tools.len());
    for expected in [
        "cloudmcp_version",
        "cloudmcp_version_json",
        "cloudmcp_cache_stats",
        "cloudmcp_account_add",
        "linode_account_switch",
        "linode_instances_list",
        "linode_images_list",
        "linode_volumes_list",
        "linode_firewall_rules_update",
        "linode_domain_record_create",
        "linode_lke_kubeconfig_get",
        "linode_database_credentials_get",
        "linode_objectstorage_key_create",
        "linode_support_ticket_reply",
        "linode_ip_get",
    ] {
        assert!(names.contains(expected), "missing tool {expected}");
    }

    for tool in &tools {
        assert_eq!(
            tool.input_schema.get("type"),
            Some(&json!("object")),
            "{}",
            tool.name
        );
        assert!(!tool.description.as_deref().unwrap_or_default().is_empty());
    }
}

#[tokio::test]
async fn required_fields_alone_pass_schema_checks() {
    let (_dir, service) = empty_service().await;
    for tool in service.tools() {
        let name = tool.name.to_string();
        // These verify their credentials against the real API.
        if name == "cloudmcp_account_add" || name == "cloudmcp_account_update" {
            continue;
        }
        let arguments = required_arguments(&tool.input_schema);
        let (_, text) = call(&service, &name, arguments.clone()).await;
        assert!(
            !schema_rejection(&text),
            "{name} rejected its own required fields {arguments}: {text}"
        );
    }
}

#[tokio::test]
async fn missing_and_mistyped_arguments_are_reported() {
    let (_dir, service) = empty_service().await;

    let (is_error, text) = call(&service, "linode_instance_get", json!({})).await;
    assert!(is_error);
    assert_eq!(text, "Error: Invalid argument 'instance_id': is required");

    let (is_error, text) = call(&service, "linode_instance_get", json!({"instance_id": null})).await;
    assert!(is_error);
    assert_eq!(text, "Error: Invalid argument 'instance_id': is required (got null)");

    let (is_error, text) =
        call(&service, "linode_instance_get", json!({"instance_id": "101"})).await;
    assert!(is_error);
    assert_eq!(text, "Error: Invalid argument 'instance_id': expected integer, got string");
}

#[tokio::test]
async fn account_scoped_tools_need_a_current_account() {
    let (_dir, service) = empty_service().await;

    let (is_error, text) = call(&service, "linode_instances_list", json!({})).await;
    assert!(is_error);
    assert_eq!(
        text,
        "Error: No current account available from the account manager: no account is selected or configured"
    );

    let (is_error, text) = call(&service, "linode_account_list", json!({})).await;
    assert!(!is_error);
    assert_eq!(text, "No configured accounts found.");
}
