use serde::{Deserialize, Serialize};

/// `GET /profile`: the identity behind a token. Used as the credential check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub uid: u64,
    pub username: String,
    pub email: String,
    pub timezone: String,
    pub restricted: bool,
    pub two_factor_auth: bool,
}

/// `GET /account`: billing and contact profile of the tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub company: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub balance: f64,
    pub balance_uninvoiced: f64,
    pub euuid: String,
    pub active_since: Option<String>,
    pub capabilities: Vec<String>,
}
