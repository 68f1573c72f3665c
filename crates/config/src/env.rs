use crate::document::{AccountConfig, Config};
use crate::error::{ConfigError, Result};

pub const ENV_CONFIG_PATH: &str = "CLOUDMCP_CONFIG";
pub const ENV_TOKEN: &str = "LINODE_TOKEN";
pub const ENV_API_URL: &str = "LINODE_API_URL";
pub const ENV_ACCOUNT_LABEL: &str = "LINODE_ACCOUNT_LABEL";
pub const ENV_DEFAULT_ACCOUNT: &str = "CLOUDMCP_DEFAULT_ACCOUNT";
pub const ENV_LOG_LEVEL: &str = "CLOUDMCP_LOG_LEVEL";
pub const ENV_CACHE_TTL: &str = "CLOUDMCP_CACHE_TTL_SECS";
pub const ENV_TRANSPORT_PROFILE: &str = "CLOUDMCP_TRANSPORT_PROFILE";

const FALLBACK_ACCOUNT_NAME: &str = "default";

impl Config {
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(name) = get(ENV_DEFAULT_ACCOUNT) {
            self.system.default_account = name;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.system.log_level = Some(level);
        }
        if let Some(raw) = get(ENV_CACHE_TTL) {
            let secs = raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_CACHE_TTL} must be a whole number of seconds"))
            })?;
            self.system.cache_ttl_secs = Some(secs);
        }
        if let Some(profile) = get(ENV_TRANSPORT_PROFILE) {
            self.transport.get_or_insert_with(Default::default).profile = Some(profile);
        }

        if let Some(token) = get(ENV_TOKEN) {
            let name = if self.system.default_account.is_empty() {
                FALLBACK_ACCOUNT_NAME.to_string()
            } else {
                self.system.default_account.clone()
            };
            let label = get(ENV_ACCOUNT_LABEL);
            let api_url = get(ENV_API_URL);
            let account = self
                .accounts
                .entry(name.clone())
                .or_insert_with(|| AccountConfig {
                    token: String::new(),
                    label: name.clone(),
                    api_url: None,
                });
            account.token = token;
            if let Some(label) = label {
                account.label = label;
            }
            if api_url.is_some() {
                account.api_url = api_url;
            }
            if self.system.default_account.is_empty() {
                self.system.default_account = name.clone();
            }
            log::debug!("Account '{name}' taken from {ENV_TOKEN}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn token_bootstraps_default_account() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                (ENV_TOKEN, "env-token"),
                (ENV_ACCOUNT_LABEL, "From Env"),
            ]))
            .unwrap();

        assert_eq!(config.system.default_account, "default");
        let account = &config.accounts["default"];
        assert_eq!(account.token, "env-token");
        assert_eq!(account.label, "From Env");
        assert_eq!(account.api_url, None);
        config.validate().unwrap();
    }

    #[test]
    fn token_overrides_named_default_and_keeps_label() {
        let mut config: Config = toml::from_str(
            r#"
            [system]
            default_account = "primary"
            [accounts.primary]
            token = "file-token"
            label = "Production"
            "#,
        )
        .unwrap();
        config
            .apply_overrides(lookup(&[
                (ENV_TOKEN, "env-token"),
                (ENV_API_URL, "http://localhost:1/v4"),
            ]))
            .unwrap();

        let account = &config.accounts["primary"];
        assert_eq!(account.token, "env-token");
        assert_eq!(account.label, "Production");
        assert_eq!(account.api_url.as_deref(), Some("http://localhost:1/v4"));
    }

    #[test]
    fn scalar_overrides_apply_and_bad_ttl_fails() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup(&[
                (ENV_LOG_LEVEL, "debug"),
                (ENV_CACHE_TTL, "90"),
                (ENV_TRANSPORT_PROFILE, "low-latency"),
                (ENV_DEFAULT_ACCOUNT, "  "),
            ]))
            .unwrap();
        assert_eq!(config.system.log_level.as_deref(), Some("debug"));
        assert_eq!(config.system.cache_ttl_secs, Some(90));
        assert_eq!(
            config.transport.unwrap().profile.as_deref(),
            Some("low-latency")
        );
        assert!(config.system.default_account.is_empty());

        let mut config = Config::default();
        assert!(config
            .apply_overrides(lookup(&[(ENV_CACHE_TTL, "soon")]))
            .is_err());
    }
}
