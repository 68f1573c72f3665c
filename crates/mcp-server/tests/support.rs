#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use cloudmcp::{AccountRegistry, CloudMcpService};
use cloudmcp_config::{AccountConfig, Config};
use cloudmcp_linode::TransportProfile;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::{json, Value};

pub const PROD_TOKEN: &str = "prod-token-0123456789abcdef";
pub const STAGING_TOKEN: &str = "staging-token-0123456789abcdef";
pub const DEV_TOKEN: &str = "dev-token-0123456789abcdef";
pub const REJECTED_TOKEN: &str = "rejected-token-0123456789abcdef";

pub const OBJECT_STORAGE_SECRET: &str = "obj-secret-key-value-42";
pub const LONGVIEW_API_KEY: &str = "LONGVIEW-API-KEY-42";

struct Tenant {
    username: &'static str,
    instances: Value,
}

fn tenants() -> HashMap<&'static str, Tenant> {
    let instance = |id: u64, label: &str, region: &str| {
        json!({
            "id": id,
            "label": label,
            "status": "running",
            "region": region,
            "type": "g6-standard-1",
            "ipv4": [format!("192.0.2.{id}")],
            "specs": {"disk": 51200, "memory": 2048, "vcpus": 1, "transfer": 2000},
            "created": "2024-01-15T10:30:00",
        })
    };
    HashMap::from([
        (
            PROD_TOKEN,
            Tenant {
                username: "prod-admin",
                instances: json!([instance(101, "prod-web-01", "us-east")]),
            },
        ),
        (
            STAGING_TOKEN,
            Tenant {
                username: "staging-admin",
                instances: json!([instance(201, "staging-app-01", "eu-west")]),
            },
        ),
        (
            DEV_TOKEN,
            Tenant {
                username: "dev-admin",
                instances: json!([instance(301, "dev-test-01", "us-east")]),
            },
        ),
    ])
}

#[derive(Default)]
struct Recorded {
    hits: Mutex<HashMap<String, usize>>,
}

struct MockState {
    tenants: HashMap<&'static str, Tenant>,
    recorded: Recorded,
}

fn page(data: Value) -> Response {
    let results = data.as_array().map_or(0, Vec::len);
    Json(json!({"data": data, "page": 1, "pages": 1, "results": results})).into_response()
}

fn error(status: StatusCode, reason: &str) -> Response {
    (status, Json(json!({"errors": [{"reason": reason}]}))).into_response()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path().trim_start_matches("/v4").to_string();
    *state
        .recorded
        .hits
        .lock()
        .unwrap()
        .entry(format!("{method} {path}"))
        .or_default() += 1;

    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    let Some(tenant) = state.tenants.get(token) else {
        return error(StatusCode::UNAUTHORIZED, "Invalid Token");
    };

    match (method.as_str(), path.as_str()) {
        ("GET", "/profile") => Json(json!({
            "uid": 1,
            "username": tenant.username,
            "email": format!("{}@example.com", tenant.username),
            "timezone": "UTC",
        }))
        .into_response(),
        ("GET", "/account") => Json(json!({
            "company": "Example Corp",
            "email": "billing@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "country": "US",
            "balance": 12.5,
            "active_since": "2020-03-01T00:00:00",
            "capabilities": ["Linodes", "Block Storage"],
        }))
        .into_response(),
        ("GET", "/regions") => page(json!([
            {"id": "us-east", "label": "Newark, NJ", "country": "us", "status": "ok"},
            {"id": "eu-west", "label": "London, UK", "country": "gb", "status": "ok"},
        ])),
        ("GET", "/linode/types") => page(json!([
            {"id": "g6-nanode-1", "label": "Nanode 1GB", "class": "nanode", "memory": 1024,
             "disk": 25600, "vcpus": 1, "price": {"hourly": 0.0075, "monthly": 5.0}},
        ])),
        ("GET", "/linode/kernels") => page(json!([
            {"id": "linode/grub2", "label": "GRUB 2", "architecture": "x86_64"},
        ])),
        ("GET", "/linode/instances") => page(tenant.instances.clone()),
        ("GET", "/images") => page(json!([
            {"id": "linode/debian12", "label": "Debian 12", "is_public": true, "size": 1500,
             "status": "available", "regions": [{"region": "us-east", "status": "available"}]},
        ])),
        ("GET", "/object-storage/keys") => page(json!([
            {"id": 7, "label": "backups", "access_key": "OBJACCESS7",
             "secret_key": OBJECT_STORAGE_SECRET},
        ])),
        ("GET", "/object-storage/keys/7") => Json(json!({
            "id": 7, "label": "backups", "access_key": "OBJACCESS7",
            "secret_key": OBJECT_STORAGE_SECRET,
        }))
        .into_response(),
        ("GET", "/longview/clients") => page(json!([
            {"id": 9, "label": "monitor", "api_key": LONGVIEW_API_KEY},
        ])),
        ("GET", "/networking/ips/192.0.2.101") => Json(json!({
            "address": "192.0.2.101", "type": "ipv4", "public": true,
            "rdns": "prod-web-01.example.com", "linode_id": 101, "region": "us-east",
        }))
        .into_response(),
        ("GET", "/lke/clusters/5/kubeconfig") => {
            Json(json!({"kubeconfig": "not base64!!"})).into_response()
        }
        ("GET", "/lke/clusters/6/kubeconfig") => {
            Json(json!({"kubeconfig": "YXBpVmVyc2lvbjogdjEK"})).into_response()
        }
        _ => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// In-process stand-in for the Linode API: fixtures keyed by bearer token, hit counters by
/// `"<METHOD> <path>"` (without the `/v4` prefix).
pub struct MockLinode {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockLinode {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            tenants: tenants(),
            recorded: Recorded::default(),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}/v4"),
            state,
        }
    }

    pub fn hits(&self, key: &str) -> usize {
        self.state
            .recorded
            .hits
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.recorded.hits.lock().unwrap().values().sum()
    }
}

/// Write a config document with `accounts` (name, label, token) pointing at `mock`.
pub fn write_config(
    dir: &Path,
    mock: &MockLinode,
    accounts: &[(&str, &str, &str)],
    default_account: &str,
) -> PathBuf {
    let mut config = Config::default();
    config.system.default_account = default_account.to_string();
    for (name, label, token) in accounts {
        config.accounts.insert(
            name.to_string(),
            AccountConfig {
                token: token.to_string(),
                label: label.to_string(),
                api_url: Some(mock.base_url.clone()),
            },
        );
    }
    let path = dir.join("config.toml");
    config.save(&path).unwrap();
    path
}

pub async fn registry(path: &Path) -> Result<AccountRegistry> {
    let config = Config::load(path)?;
    Ok(AccountRegistry::initialize(
        config.clone(),
        config,
        path.to_path_buf(),
        TransportProfile::LowLatency.config(),
    )
    .await?)
}

/// A registry whose effective configuration has `env` applied on top of the file, the way
/// the binary applies the process environment.
pub async fn registry_with_env(path: &Path, env: &[(&str, &str)]) -> Result<AccountRegistry> {
    let document = Config::load(path)?;
    let vars: HashMap<String, String> = env
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    let mut config = document.clone();
    config.apply_overrides(|key| vars.get(key).cloned())?;
    Ok(AccountRegistry::initialize(
        document,
        config,
        path.to_path_buf(),
        TransportProfile::LowLatency.config(),
    )
    .await?)
}

pub async fn service(path: &Path) -> CloudMcpService {
    let registry = registry(path).await.unwrap();
    CloudMcpService::new(Arc::new(registry)).unwrap()
}

pub fn args(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap_or_default()
}

pub fn text(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

/// Call a tool and return `(is_error, text)`.
pub async fn call(service: &CloudMcpService, name: &str, arguments: Value) -> (bool, String) {
    let result = service.call(name, args(arguments)).await.unwrap();
    (result.is_error == Some(true), text(&result))
}

/// Path to the built `cloudmcp` binary.
pub fn locate_cloudmcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_cloudmcp") {
        return Ok(PathBuf::from(path));
    }
    let exe = std::env::current_exe()?;
    if let Some(profile_dir) = exe.parent().and_then(|p| p.parent()) {
        let candidate = profile_dir.join("cloudmcp");
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    anyhow::bail!("failed to locate cloudmcp binary; build with: cargo build -p cloudmcp")
}
