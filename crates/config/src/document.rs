use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env::ENV_CONFIG_PATH;
use crate::error::{ConfigError, Result};
use crate::transport::TransportSection;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportSection>,
    #[serde(default)]
    pub accounts: BTreeMap<String, AccountConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub default_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub token: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token", &"***REDACTED***")
            .field("label", &self.label)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// `--config` flag, then `CLOUDMCP_CONFIG`, then `<config dir>/cloudmcp/config.toml`.
pub fn resolve_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(ENV_CONFIG_PATH).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("cloudmcp").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Account names double as TOML table keys and tool arguments.
pub fn validate_account_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("account name must not be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Invalid(format!(
            "account name '{name}' may only contain letters, digits, '_' and '-'"
        )));
    }
    Ok(())
}

impl Config {
    /// Read the document at `path`. A missing file yields an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Config file {} not found; starting empty", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::io(path, err)),
        };
        toml::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }

    /// Serialize and atomically replace `path`: temp file in the same directory, fsync, rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self)
            .map_err(|err| ConfigError::Serialize(err.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|err| ConfigError::io(&dir, err))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|err| ConfigError::io(&dir, err))?;
        tmp.write_all(body.as_bytes())
            .map_err(|err| ConfigError::io(tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| ConfigError::io(tmp.path(), err))?;
        tmp.persist(path)
            .map_err(|err| ConfigError::io(path, err.error))?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, account) in &self.accounts {
            validate_account_name(name)?;
            if account.token.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "account '{name}' has an empty token"
                )));
            }
            if account.label.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "account '{name}' has an empty label"
                )));
            }
        }
        let default = &self.system.default_account;
        if !self.accounts.is_empty() && !default.is_empty() && !self.accounts.contains_key(default)
        {
            return Err(ConfigError::Invalid(format!(
                "default account '{default}' is not configured"
            )));
        }
        Ok(())
    }

    /// The configured default, or the only account when exactly one exists.
    pub fn default_account_name(&self) -> Option<&str> {
        let default = self.system.default_account.as_str();
        if !default.is_empty() && self.accounts.contains_key(default) {
            return Some(default);
        }
        if self.accounts.len() == 1 {
            return self.accounts.keys().next().map(String::as_str);
        }
        None
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.system.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Config {
        toml::from_str(
            r#"
            [system]
            default_account = "primary"
            cache_ttl_secs = 60

            [accounts.primary]
            token = "tok-primary"
            label = "Production"

            [accounts.dev-1]
            token = "tok-dev"
            label = "Development"
            api_url = "http://127.0.0.1:9000/v4"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn parses_accounts_and_system() {
        let config = sample();
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.default_account_name(), Some("primary"));
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(
            config.accounts["dev-1"].api_url.as_deref(),
            Some("http://127.0.0.1:9000/v4")
        );
        config.validate().unwrap();
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("tok-primary"));
        assert!(rendered.contains("***REDACTED***"));
    }

    #[test]
    fn single_account_is_default_without_explicit_default() {
        let mut config = sample();
        config.accounts.remove("dev-1");
        config.system.default_account.clear();
        assert_eq!(config.default_account_name(), Some("primary"));
    }

    #[test]
    fn validation_rejects_bad_names_and_dangling_default() {
        assert!(validate_account_name("ok_name-1").is_ok());
        assert!(validate_account_name("has space").is_err());
        assert!(validate_account_name("").is_err());

        let mut config = sample();
        config.system.default_account = "missing".into();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.accounts.get_mut("primary").unwrap().label = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_ttl_is_thirty_minutes() {
        assert_eq!(Config::default().cache_ttl(), Duration::from_secs(1800));
    }
}
