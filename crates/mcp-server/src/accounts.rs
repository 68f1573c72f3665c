//! Account registry: the set of configured tenants and the current-account pointer.
//!
//! Every mutation follows the same order: validate, verify the credential on a fresh client
//! (outside the lock), take the write lock once, re-check preconditions, persist a cloned
//! file document, and only then commit in memory. A failed check or write leaves both the
//! registry and the document untouched. Environment overrides live in the in-memory view
//! only and never reach the file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cloudmcp_config::{validate_account_name, AccountConfig, Config, ConfigError};
use cloudmcp_linode::models::{Kernel, LinodeType, Region};
use cloudmcp_linode::{ApiError, Credential, LinodeClient, TransportConfig};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::reference_cache::ReferenceCache;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("account '{0}' already exists")]
    NameConflict(String),

    #[error("account '{0}' not found")]
    NotFound(String),

    #[error("cannot remove default account '{0}'")]
    CannotRemoveDefault(String),

    #[error("no current account selected")]
    NoCurrentAccount,

    #[error("authentication failed for account '{name}': {message}")]
    Auth { name: String, message: String },

    #[error("failed to reach Linode API for account '{name}': {source}")]
    Upstream {
        name: String,
        #[source]
        source: ApiError,
    },

    #[error("account '{0}' was changed by another request; retry the update")]
    Contended(String),

    #[error("failed to build HTTP client: {0}")]
    Client(ApiError),

    #[error("failed to save configuration: {0}")]
    Persist(#[from] ConfigError),
}

/// One tenant. Cheap to clone; the client and cache are shared.
#[derive(Clone, Debug)]
pub struct Account {
    pub name: String,
    pub label: String,
    pub api_url: Option<String>,
    pub client: Arc<LinodeClient>,
    pub catalog: Arc<ReferenceCache>,
}

impl Account {
    pub async fn regions(&self) -> Result<Vec<Region>, ApiError> {
        self.catalog.regions(self.client.as_ref()).await
    }

    pub async fn types(&self) -> Result<Vec<LinodeType>, ApiError> {
        self.catalog.types(self.client.as_ref()).await
    }

    pub async fn kernels(&self) -> Result<Vec<Kernel>, ApiError> {
        self.catalog.kernels(self.client.as_ref()).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub name: String,
    pub label: String,
    pub api_url: Option<String>,
    pub is_default: bool,
    pub is_current: bool,
}

/// Fields to change in [`AccountRegistry::update`]. `api_url: Some("")` clears the override.
#[derive(Debug, Default, Clone)]
pub struct AccountUpdate {
    pub label: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
}

impl AccountUpdate {
    fn apply(&self, entry: &mut AccountConfig) {
        if let Some(label) = &self.label {
            entry.label = label.clone();
        }
        if let Some(token) = &self.token {
            entry.token = token.clone();
        }
        if let Some(api_url) = &self.api_url {
            entry.api_url = normalize_url(Some(api_url.clone()));
        }
    }
}

struct RegistryState {
    accounts: BTreeMap<String, Account>,
    current: Option<String>,
    /// The file document with environment overrides applied. In memory only.
    config: Config,
    /// The file document as loaded. Account changes are applied here and saved.
    document: Config,
}

/// Verification rounds an `update` may spend when another request keeps changing the same credential.
const UPDATE_ATTEMPTS: usize = 3;

pub struct AccountRegistry {
    state: RwLock<RegistryState>,
    config_path: PathBuf,
    transport: TransportConfig,
    cache_ttl: Duration,
}

fn normalize_url(api_url: Option<String>) -> Option<String> {
    api_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Point the default at `name` unless it already names a configured account.
fn adopt_default(config: &mut Config, name: &str) {
    let default = config.system.default_account.as_str();
    if default.is_empty() || !config.accounts.contains_key(default) {
        config.system.default_account = name.to_string();
    }
}

impl AccountRegistry {
    /// Build a client for every account of `config` and verify them all concurrently. Any
    /// failure aborts.
    ///
    /// `document` is the file as loaded and `config` the same document after environment
    /// overrides. Clients follow `config`; account changes are written to `document` only.
    pub async fn initialize(
        document: Config,
        config: Config,
        config_path: PathBuf,
        transport: TransportConfig,
    ) -> Result<Self, AccountError> {
        let cache_ttl = config.cache_ttl();
        let registry = Self {
            state: RwLock::new(RegistryState {
                accounts: BTreeMap::new(),
                current: None,
                config: Config::default(),
                document: Config::default(),
            }),
            config_path,
            transport,
            cache_ttl,
        };

        let checks = config.accounts.iter().map(|(name, account)| {
            let registry = &registry;
            async move {
                let client = registry.build_client(&account.token, account.api_url.as_deref())?;
                registry.verify(name, &client).await?;
                Ok::<_, AccountError>(registry.make_account(name, account, client))
            }
        });
        let accounts = futures::future::try_join_all(checks).await?;

        {
            let mut state = registry.state.write().await;
            state.accounts = accounts
                .into_iter()
                .map(|account| (account.name.clone(), account))
                .collect();
            state.current = config.default_account_name().map(str::to_string);
            state.config = config;
            state.document = document;
            match &state.current {
                Some(current) => log::info!(
                    "Loaded {} account(s); current account '{current}'",
                    state.accounts.len()
                ),
                None if state.accounts.is_empty() => log::warn!("No accounts configured"),
                None => log::warn!("No default account configured; use linode_account_switch"),
            }
        }
        Ok(registry)
    }

    fn build_client(&self, token: &str, api_url: Option<&str>) -> Result<LinodeClient, AccountError> {
        let credential =
            Credential::new(token).map_err(|err| AccountError::InvalidArgument(err.to_string()))?;
        let mut builder = LinodeClient::builder(credential).transport(self.transport.clone());
        if let Some(url) = api_url {
            builder = builder.base_url(url);
        }
        builder.build().map_err(|err| match err {
            ApiError::InvalidBaseUrl { .. } | ApiError::InvalidCredential(_) => {
                AccountError::InvalidArgument(err.to_string())
            }
            other => AccountError::Client(other),
        })
    }

    async fn verify(&self, name: &str, client: &LinodeClient) -> Result<(), AccountError> {
        match client.profile().await {
            Ok(profile) => {
                log::debug!("Account '{name}' authenticated as '{}'", profile.username);
                Ok(())
            }
            Err(err) if err.is_auth_failure() => Err(AccountError::Auth {
                name: name.to_string(),
                message: err.to_string(),
            }),
            Err(err) => Err(AccountError::Upstream {
                name: name.to_string(),
                source: err,
            }),
        }
    }

    fn make_account(&self, name: &str, config: &AccountConfig, client: LinodeClient) -> Account {
        Account {
            name: name.to_string(),
            label: config.label.clone(),
            api_url: config.api_url.clone(),
            client: Arc::new(client),
            catalog: Arc::new(ReferenceCache::new(self.cache_ttl)),
        }
    }

    fn persist(&self, next: &Config) -> Result<(), AccountError> {
        next.save(&self.config_path)?;
        Ok(())
    }

    pub async fn add(
        &self,
        name: &str,
        label: &str,
        token: &str,
        api_url: Option<String>,
    ) -> Result<Account, AccountError> {
        let name = name.trim();
        let label = label.trim();
        validate_account_name(name).map_err(|err| match err {
            ConfigError::Invalid(message) => AccountError::InvalidArgument(message),
            other => AccountError::InvalidArgument(other.to_string()),
        })?;
        if label.is_empty() {
            return Err(AccountError::InvalidArgument("label must not be empty".into()));
        }
        if token.trim().is_empty() {
            return Err(AccountError::InvalidArgument("token must not be empty".into()));
        }
        if self.state.read().await.accounts.contains_key(name) {
            return Err(AccountError::NameConflict(name.to_string()));
        }

        let api_url = normalize_url(api_url);
        let client = self.build_client(token, api_url.as_deref())?;
        self.verify(name, &client).await?;

        let mut state = self.state.write().await;
        if state.accounts.contains_key(name) {
            return Err(AccountError::NameConflict(name.to_string()));
        }
        let entry = AccountConfig {
            token: token.trim().to_string(),
            label: label.to_string(),
            api_url,
        };
        let mut document = state.document.clone();
        document.accounts.insert(name.to_string(), entry.clone());
        adopt_default(&mut document, name);
        self.persist(&document)?;

        let account = self.make_account(name, &entry, client);
        state.accounts.insert(name.to_string(), account.clone());
        state.config.accounts.insert(name.to_string(), entry);
        adopt_default(&mut state.config, name);
        if state.current.is_none() {
            state.current = Some(name.to_string());
        }
        state.document = document;
        log::info!("Added account '{name}'");
        Ok(account)
    }

    pub async fn remove(&self, name: &str) -> Result<(), AccountError> {
        let mut state = self.state.write().await;
        if !state.accounts.contains_key(name) {
            return Err(AccountError::NotFound(name.to_string()));
        }
        if state.config.system.default_account == name
            || state.document.system.default_account == name
        {
            return Err(AccountError::CannotRemoveDefault(name.to_string()));
        }

        if state.document.accounts.contains_key(name) {
            let mut document = state.document.clone();
            document.accounts.remove(name);
            self.persist(&document)?;
            state.document = document;
        } else {
            log::info!("Account '{name}' comes from the environment; removed for this session only");
        }

        state.accounts.remove(name);
        state.config.accounts.remove(name);
        if state.current.as_deref() == Some(name) {
            state.current = state.config.default_account_name().map(str::to_string);
        }
        log::info!("Removed account '{name}'");
        Ok(())
    }

    /// Change an account's label, token or API URL. A new token or URL is verified on a fresh
    /// client first; the entry is then re-read under the write lock and only the fields named
    /// in `update` are merged, so concurrent updates to other fields survive.
    pub async fn update(&self, name: &str, update: AccountUpdate) -> Result<Account, AccountError> {
        let update = AccountUpdate {
            label: update.label.map(|label| label.trim().to_string()),
            token: update.token.map(|token| token.trim().to_string()),
            api_url: update.api_url,
        };
        if update.label.as_deref() == Some("") {
            return Err(AccountError::InvalidArgument("label must not be empty".into()));
        }
        if update.token.as_deref() == Some("") {
            return Err(AccountError::InvalidArgument("token must not be empty".into()));
        }

        let mut verified: Option<(AccountConfig, LinodeClient)> = None;
        for _ in 0..UPDATE_ATTEMPTS {
            let target = {
                let mut state = self.state.write().await;
                let latest = state
                    .config
                    .accounts
                    .get(name)
                    .cloned()
                    .ok_or_else(|| AccountError::NotFound(name.to_string()))?;
                let mut next = latest.clone();
                update.apply(&mut next);

                if next.token == latest.token && next.api_url == latest.api_url {
                    return self.commit_update(&mut state, name, &update, next, None);
                }
                if let Some((checked, client)) = verified.take() {
                    if checked.token == next.token && checked.api_url == next.api_url {
                        return self.commit_update(&mut state, name, &update, next, Some(client));
                    }
                }
                next
            };

            let client = self.build_client(&target.token, target.api_url.as_deref())?;
            self.verify(name, &client).await?;
            verified = Some((target, client));
        }
        Err(AccountError::Contended(name.to_string()))
    }

    fn commit_update(
        &self,
        state: &mut RegistryState,
        name: &str,
        update: &AccountUpdate,
        next: AccountConfig,
        client: Option<LinodeClient>,
    ) -> Result<Account, AccountError> {
        let live = state
            .accounts
            .get(name)
            .cloned()
            .ok_or_else(|| AccountError::NotFound(name.to_string()))?;

        match state.document.accounts.get(name) {
            Some(on_disk) => {
                let mut entry = on_disk.clone();
                update.apply(&mut entry);
                let mut document = state.document.clone();
                document.accounts.insert(name.to_string(), entry);
                self.persist(&document)?;
                state.document = document;
            }
            None => log::info!(
                "Account '{name}' comes from the environment; update applies to this session only"
            ),
        }

        let reconnected = client.is_some();
        let account = match client {
            Some(client) => self.make_account(name, &next, client),
            None => Account {
                label: next.label.clone(),
                ..live
            },
        };
        state.accounts.insert(name.to_string(), account.clone());
        state.config.accounts.insert(name.to_string(), next);
        log::info!(
            "Updated account '{name}'{}",
            if reconnected { " (credentials re-verified)" } else { "" }
        );
        Ok(account)
    }

    /// Snapshot of every account, sorted by name.
    pub async fn list(&self) -> Vec<AccountSummary> {
        let state = self.state.read().await;
        state
            .accounts
            .values()
            .map(|account| AccountSummary {
                name: account.name.clone(),
                label: account.label.clone(),
                api_url: account.api_url.clone(),
                is_default: state.config.system.default_account == account.name,
                is_current: state.current.as_deref() == Some(account.name.as_str()),
            })
            .collect()
    }

    pub async fn get(&self, name: &str) -> Result<Account, AccountError> {
        self.state
            .read()
            .await
            .accounts
            .get(name)
            .cloned()
            .ok_or_else(|| AccountError::NotFound(name.to_string()))
    }

    pub async fn current(&self) -> Result<Account, AccountError> {
        let state = self.state.read().await;
        state
            .current
            .as_ref()
            .and_then(|name| state.accounts.get(name))
            .cloned()
            .ok_or(AccountError::NoCurrentAccount)
    }

    pub async fn current_name(&self) -> Option<String> {
        self.state.read().await.current.clone()
    }

    /// Point the registry at another account. No credential check.
    pub async fn switch(&self, name: &str) -> Result<Account, AccountError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get(name)
            .cloned()
            .ok_or_else(|| AccountError::NotFound(name.to_string()))?;
        state.current = Some(name.to_string());
        log::info!("Switched to account '{name}'");
        Ok(account)
    }

    pub async fn default_name(&self) -> String {
        self.state.read().await.config.system.default_account.clone()
    }

    pub async fn config_snapshot(&self) -> Config {
        self.state.read().await.config.clone()
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// An empty registry that never persists.
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                accounts: BTreeMap::new(),
                current: None,
                config: Config::default(),
                document: Config::default(),
            }),
            config_path: PathBuf::from("/nonexistent/cloudmcp/config.toml"),
            transport: TransportConfig::default(),
            cache_ttl: Config::default().cache_ttl(),
        }
    }
}
