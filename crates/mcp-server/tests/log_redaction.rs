mod support;

use std::sync::{Arc, Mutex, Once};

use cloudmcp::accounts::AccountUpdate;
use cloudmcp::{AccountError, CloudMcpService};
use log::{LevelFilter, Log, Metadata, Record};
use serde_json::json;
use support::{
    call, registry_with_env, write_config, MockLinode, DEV_TOKEN, PROD_TOKEN, REJECTED_TOKEN,
    STAGING_TOKEN,
};

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Records every message our own crates emit, at every level.
struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("cloudmcp")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            LINES
                .lock()
                .unwrap()
                .push(format!("{} {}: {}", record.level(), record.target(), record.args()));
        }
    }

    fn flush(&self) {}
}

fn capture_logs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_boxed_logger(Box::new(Capture)).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn captured() -> Vec<String> {
    LINES.lock().unwrap().clone()
}

#[tokio::test]
async fn account_lifecycle_logs_never_contain_tokens() {
    capture_logs();
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = Arc::new(
        registry_with_env(&path, &[("LINODE_TOKEN", PROD_TOKEN)])
            .await
            .unwrap(),
    );

    registry
        .add("staging", "Staging", STAGING_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap();
    registry
        .update(
            "staging",
            AccountUpdate {
                token: Some(DEV_TOKEN.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    registry.switch("staging").await.unwrap();
    let err = registry
        .add("broken", "Broken", REJECTED_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Auth { .. }), "{err}");
    log::warn!(target: "cloudmcp::test", "{err}");
    log::debug!(target: "cloudmcp::test", "{:?}", registry.current().await.unwrap());

    let service = CloudMcpService::new(registry.clone()).unwrap();
    call(&service, "linode_instances_list", json!({})).await;
    call(&service, "linode_account_switch", json!({"account_name": "primary"})).await;
    let (is_error, text) = call(
        &service,
        "cloudmcp_account_add",
        json!({"name": "dev", "label": "Dev", "token": DEV_TOKEN, "apiurl": mock.base_url}),
    )
    .await;
    assert!(!is_error, "{text}");
    let (is_error, text) = call(
        &service,
        "cloudmcp_account_update",
        json!({"name": "dev", "token": REJECTED_TOKEN}),
    )
    .await;
    assert!(is_error, "{text}");
    assert!(!text.contains(REJECTED_TOKEN), "{text}");
    call(
        &service,
        "cloudmcp_account_update",
        json!({"name": "dev", "token": STAGING_TOKEN}),
    )
    .await;

    let lines = captured();
    for expected in [
        "Added account 'staging'",
        "Updated account 'staging'",
        "Switched to account 'staging'",
        "Linode API request: GET /profile",
    ] {
        assert!(
            lines.iter().any(|line| line.contains(expected)),
            "no log line contains {expected:?}: {lines:#?}"
        );
    }
    for token in [PROD_TOKEN, STAGING_TOKEN, DEV_TOKEN, REJECTED_TOKEN] {
        let leaks: Vec<&String> = lines.iter().filter(|line| line.contains(token)).collect();
        assert!(leaks.is_empty(), "token leaked into logs: {leaks:#?}");
    }
}
