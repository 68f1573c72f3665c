use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_ip, require_non_empty, require_one_of, ToolParams};
use crate::tools::ToolError;

const RECORD_TYPES: &[&str] = &["A", "AAAA", "NS", "MX", "CNAME", "TXT", "SRV", "CAA"];

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DomainIdRequest {
    /// Domain ID
    pub domain_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DomainCreateRequest {
    /// Domain name, e.g. "example.com"
    pub domain: String,
    /// master or slave
    #[serde(rename = "type")]
    pub kind: String,
    /// Start of Authority email; required for master zones
    #[serde(default)]
    pub soa_email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Default TTL in seconds
    #[serde(default)]
    pub ttl_sec: Option<u32>,
    /// Primary name servers to transfer from; required for slave zones
    #[serde(default)]
    pub master_ips: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for DomainCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("domain", &self.domain)?;
        require_one_of("type", &self.kind, &["master", "slave"])?;
        if self.kind == "master" && self.soa_email.as_deref().map_or(true, str::is_empty) {
            return Err(ToolError::invalid("soa_email", "is required for master domains"));
        }
        if self.kind == "slave" {
            let ips = self.master_ips.as_deref().unwrap_or_default();
            if ips.is_empty() {
                return Err(ToolError::invalid("master_ips", "is required for slave domains"));
            }
        }
        for ip in self.master_ips.as_deref().unwrap_or_default() {
            require_ip("master_ips", ip)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DomainUpdateRequest {
    /// Domain ID
    pub domain_id: u64,
    #[serde(default)]
    pub soa_email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// active or disabled
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ttl_sec: Option<u32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for DomainUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if let Some(status) = &self.status {
            require_one_of("status", status, &["active", "disabled"])?;
        }
        if self.soa_email.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.ttl_sec.is_none()
            && self.tags.is_none()
        {
            return Err(ToolError::invalid("domain_id", "nothing to update"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DomainRecordCreateRequest {
    /// Domain ID
    pub domain_id: u64,
    /// Record type: A, AAAA, NS, MX, CNAME, TXT, SRV or CAA
    #[serde(rename = "type")]
    pub kind: String,
    /// Hostname or subdomain; empty for the zone apex
    #[serde(default)]
    pub name: Option<String>,
    /// Record target: an address, hostname or text value
    #[serde(default)]
    pub target: Option<String>,
    /// Priority for MX and SRV records
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub ttl_sec: Option<u32>,
}

impl ToolParams for DomainRecordCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_one_of("type", &self.kind, RECORD_TYPES)?;
        if matches!(self.kind.as_str(), "A" | "AAAA") {
            let target = self.target.as_deref().unwrap_or_default();
            require_ip("target", target)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DomainRecordDeleteRequest {
    /// Domain ID
    pub domain_id: u64,
    /// Record ID
    pub record_id: u64,
}

plain_params!(DomainIdRequest, DomainRecordDeleteRequest);
