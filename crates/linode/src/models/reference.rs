use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: String,
    pub label: String,
    pub country: String,
    pub status: String,
    pub site_type: String,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub hourly: f64,
    pub monthly: f64,
}

/// A machine type (plan). Disk and memory are in MB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinodeType {
    pub id: String,
    pub label: String,
    pub class: String,
    pub disk: u64,
    pub memory: u64,
    pub vcpus: u32,
    pub gpus: u32,
    pub transfer: u64,
    pub network_out: u64,
    pub price: Price,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kernel {
    pub id: String,
    pub label: String,
    pub version: String,
    pub architecture: String,
    pub kvm: bool,
    pub pvops: bool,
    pub deprecated: bool,
    pub built: Option<String>,
}
