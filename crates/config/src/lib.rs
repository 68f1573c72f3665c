//! CloudMCP configuration document.
//!
//! The TOML file is the credential store: it holds every account's token in clear text and is
//! always rewritten atomically with owner-only permissions.

mod document;
mod env;
mod error;
mod transport;

pub use document::{
    resolve_path, validate_account_name, AccountConfig, Config, SystemConfig,
    DEFAULT_CACHE_TTL_SECS,
};
pub use env::{
    ENV_ACCOUNT_LABEL, ENV_API_URL, ENV_CACHE_TTL, ENV_CONFIG_PATH, ENV_DEFAULT_ACCOUNT,
    ENV_LOG_LEVEL, ENV_TOKEN, ENV_TRANSPORT_PROFILE,
};
pub use error::{ConfigError, Result};
pub use transport::TransportSection;
