mod support;

use cloudmcp::accounts::AccountUpdate;
use cloudmcp::AccountError;
use cloudmcp_config::Config;
use pretty_assertions::assert_eq;
use support::{
    registry, registry_with_env, write_config, MockLinode, DEV_TOKEN, PROD_TOKEN, REJECTED_TOKEN,
    STAGING_TOKEN,
};

fn names(summaries: &[cloudmcp::AccountSummary]) -> Vec<&str> {
    summaries.iter().map(|s| s.name.as_str()).collect()
}

#[tokio::test]
async fn initialize_fails_when_any_account_is_rejected() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &mock,
        &[("good", "Good", PROD_TOKEN), ("bad", "Bad", REJECTED_TOKEN)],
        "good",
    );

    let err = registry(&path).await.err().unwrap();
    let err = err.downcast::<AccountError>().unwrap();
    assert!(matches!(err, AccountError::Auth { ref name, .. } if name == "bad"), "{err}");
}

#[tokio::test]
async fn empty_configuration_starts_without_current_account() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry(&dir.path().join("missing.toml")).await.unwrap();
    assert!(registry.list().await.is_empty());
    assert!(matches!(
        registry.current().await,
        Err(AccountError::NoCurrentAccount)
    ));
}

#[tokio::test]
async fn first_added_account_becomes_default_and_current() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let registry = registry(&path).await.unwrap();

    registry
        .add("primary", "Primary", PROD_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap();

    assert_eq!(registry.current_name().await.as_deref(), Some("primary"));
    assert_eq!(registry.default_name().await, "primary");
    let saved = Config::load(&path).unwrap();
    assert_eq!(saved.system.default_account, "primary");
    assert_eq!(saved.accounts["primary"].token, PROD_TOKEN);
}

#[tokio::test]
async fn add_rejects_duplicates_and_bad_names_without_probing() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry(&path).await.unwrap();
    let checks = mock.hits("GET /profile");

    let err = registry
        .add("primary", "Again", STAGING_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::NameConflict(ref n) if n == "primary"));

    let err = registry
        .add("has space", "Label", STAGING_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidArgument(_)), "{err}");

    assert_eq!(mock.hits("GET /profile"), checks);
}

#[tokio::test]
async fn default_account_cannot_be_removed() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &mock,
        &[("primary", "Primary", PROD_TOKEN), ("staging", "Staging", STAGING_TOKEN)],
        "primary",
    );
    let registry = registry(&path).await.unwrap();

    let err = registry.remove("primary").await.unwrap_err();
    assert!(matches!(err, AccountError::CannotRemoveDefault(ref n) if n == "primary"));
    assert_eq!(names(&registry.list().await), vec!["primary", "staging"]);

    let err = registry.remove("ghost").await.unwrap_err();
    assert!(matches!(err, AccountError::NotFound(_)));
}

#[tokio::test]
async fn removing_the_current_account_falls_back_to_default() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        &mock,
        &[
            ("primary", "Primary", PROD_TOKEN),
            ("staging", "Staging", STAGING_TOKEN),
            ("dev", "Dev", DEV_TOKEN),
        ],
        "primary",
    );
    let registry = registry(&path).await.unwrap();
    registry.switch("staging").await.unwrap();

    registry.remove("staging").await.unwrap();

    assert_eq!(registry.current_name().await.as_deref(), Some("primary"));
    assert_eq!(names(&registry.list().await), vec!["dev", "primary"]);
    let saved = Config::load(&path).unwrap();
    assert!(!saved.accounts.contains_key("staging"));
}

#[tokio::test]
async fn label_only_update_does_not_reverify() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry(&path).await.unwrap();
    let checks = mock.hits("GET /profile");

    let account = registry
        .update(
            "primary",
            AccountUpdate {
                label: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(account.label, "Renamed");
    assert_eq!(mock.hits("GET /profile"), checks);
    assert_eq!(Config::load(&path).unwrap().accounts["primary"].label, "Renamed");
}

#[tokio::test]
async fn failed_token_update_leaves_everything_unchanged() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry(&path).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = registry
        .update(
            "primary",
            AccountUpdate {
                token: Some(REJECTED_TOKEN.into()),
                label: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::Auth { .. }), "{err}");
    assert_eq!(std::fs::read(&path).unwrap(), before);
    let current = registry.current().await.unwrap();
    assert_eq!(current.label, "Primary");
    current.client.profile().await.unwrap();
}

#[tokio::test]
async fn token_update_reconnects_with_fresh_cache() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry(&path).await.unwrap();
    registry.current().await.unwrap().regions().await.unwrap();

    let account = registry
        .update(
            "primary",
            AccountUpdate {
                token: Some(DEV_TOKEN.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let profile = account.client.profile().await.unwrap();
    assert_eq!(profile.username, "dev-admin");
    assert!(!account.catalog.stats().await.regions.populated);
    assert_eq!(Config::load(&path).unwrap().accounts["primary"].token, DEV_TOKEN);
}

#[tokio::test]
async fn environment_overrides_never_reach_the_file() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry_with_env(
        &path,
        &[
            ("LINODE_TOKEN", STAGING_TOKEN),
            ("CLOUDMCP_LOG_LEVEL", "trace"),
            ("CLOUDMCP_CACHE_TTL_SECS", "5"),
            ("CLOUDMCP_TRANSPORT_PROFILE", "high-throughput"),
        ],
    )
    .await
    .unwrap();
    let profile = registry.current().await.unwrap().client.profile().await.unwrap();
    assert_eq!(profile.username, "staging-admin");

    registry
        .add("dev", "Dev", DEV_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap();
    registry
        .update(
            "primary",
            AccountUpdate {
                label: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let saved = Config::load(&path).unwrap();
    assert_eq!(saved.accounts["primary"].token, PROD_TOKEN);
    assert_eq!(saved.accounts["primary"].label, "Renamed");
    assert_eq!(saved.accounts["dev"].token, DEV_TOKEN);
    assert_eq!(saved.system.log_level, None);
    assert_eq!(saved.system.cache_ttl_secs, None);
    assert_eq!(saved.transport, None);

    let current = registry.current().await.unwrap();
    assert_eq!(current.label, "Renamed");
    assert_eq!(current.client.profile().await.unwrap().username, "staging-admin");
    assert_eq!(registry.config_snapshot().await.accounts["primary"].token, STAGING_TOKEN);
}

#[tokio::test]
async fn first_add_replaces_a_default_that_names_no_account() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let registry = registry_with_env(&path, &[("CLOUDMCP_DEFAULT_ACCOUNT", "work")])
        .await
        .unwrap();

    registry
        .add("primary", "Primary", PROD_TOKEN, Some(mock.base_url.clone()))
        .await
        .unwrap();

    assert_eq!(registry.default_name().await, "primary");
    assert_eq!(registry.current_name().await.as_deref(), Some("primary"));
    let saved = Config::load(&path).unwrap();
    assert_eq!(saved.system.default_account, "primary");
    saved.validate().unwrap();
}

#[tokio::test]
async fn concurrent_updates_to_different_fields_both_land() {
    let mock = MockLinode::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), &mock, &[("primary", "Primary", PROD_TOKEN)], "primary");
    let registry = registry(&path).await.unwrap();

    let (token_change, label_change) = tokio::join!(
        registry.update(
            "primary",
            AccountUpdate {
                token: Some(STAGING_TOKEN.into()),
                ..Default::default()
            },
        ),
        registry.update(
            "primary",
            AccountUpdate {
                label: Some("Renamed".into()),
                ..Default::default()
            },
        ),
    );
    token_change.unwrap();
    label_change.unwrap();

    let current = registry.current().await.unwrap();
    assert_eq!(current.label, "Renamed");
    assert_eq!(current.client.profile().await.unwrap().username, "staging-admin");
    let saved = Config::load(&path).unwrap();
    assert_eq!(saved.accounts["primary"].label, "Renamed");
    assert_eq!(saved.accounts["primary"].token, STAGING_TOKEN);
}
