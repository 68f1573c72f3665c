//! Typed Linode API v4 resources.
//!
//! Decoding is lenient: every struct defaults missing fields so that partial payloads (and
//! fields added upstream later) never fail a whole listing.

mod account;
mod compute;
mod networking;
mod platform;
mod reference;
mod storage;

pub use account::*;
pub use compute::*;
pub use networking::*;
pub use platform::*;
pub use reference::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub results: u32,
}

/// Identifier + label of an entity that another resource points at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRef {
    pub id: u64,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}
