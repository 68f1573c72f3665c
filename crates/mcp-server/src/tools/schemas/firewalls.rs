use rmcp::schemars;
use serde::Deserialize;

use crate::tools::params::{plain_params, require_non_empty, require_one_of, ToolParams};
use crate::tools::ToolError;

const POLICIES: &[&str] = &["ACCEPT", "DROP"];
const PROTOCOLS: &[&str] = &["TCP", "UDP", "ICMP", "IPENCAP"];

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct FirewallRuleParam {
    /// ACCEPT or DROP
    pub action: String,
    /// TCP, UDP, ICMP or IPENCAP
    pub protocol: String,
    /// Ports or ranges, e.g. "22, 80, 443" or "1000-2000"
    #[serde(default)]
    pub ports: Option<String>,
    /// IPv4 addresses or CIDRs this rule matches
    #[serde(default)]
    pub ipv4: Option<Vec<String>>,
    /// IPv6 addresses or CIDRs this rule matches
    #[serde(default)]
    pub ipv6: Option<Vec<String>>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FirewallRuleParam {
    fn check(&self, field: &str) -> Result<(), ToolError> {
        require_one_of(&format!("{field}.action"), &self.action, POLICIES)?;
        require_one_of(&format!("{field}.protocol"), &self.protocol, PROTOCOLS)
    }
}

fn check_rules(field: &str, rules: Option<&[FirewallRuleParam]>) -> Result<(), ToolError> {
    for (i, rule) in rules.unwrap_or_default().iter().enumerate() {
        rule.check(&format!("{field}[{i}]"))?;
    }
    Ok(())
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FirewallIdRequest {
    /// Firewall ID
    pub firewall_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FirewallCreateRequest {
    pub label: String,
    /// Default action for inbound traffic: ACCEPT or DROP
    pub inbound_policy: String,
    /// Default action for outbound traffic: ACCEPT or DROP
    pub outbound_policy: String,
    #[serde(default)]
    pub inbound: Option<Vec<FirewallRuleParam>>,
    #[serde(default)]
    pub outbound: Option<Vec<FirewallRuleParam>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for FirewallCreateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_non_empty("label", &self.label)?;
        require_one_of("inbound_policy", &self.inbound_policy, POLICIES)?;
        require_one_of("outbound_policy", &self.outbound_policy, POLICIES)?;
        check_rules("inbound", self.inbound.as_deref())?;
        check_rules("outbound", self.outbound.as_deref())
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FirewallUpdateRequest {
    /// Firewall ID
    pub firewall_id: u64,
    #[serde(default)]
    pub label: Option<String>,
    /// enabled or disabled
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ToolParams for FirewallUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        if let Some(status) = &self.status {
            require_one_of("status", status, &["enabled", "disabled"])?;
        }
        if self.label.is_none() && self.status.is_none() && self.tags.is_none() {
            return Err(ToolError::invalid(
                "firewall_id",
                "nothing to update; pass label, status or tags",
            ));
        }
        Ok(())
    }
}

/// Replaces the whole rule set.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FirewallRulesUpdateRequest {
    /// Firewall ID
    pub firewall_id: u64,
    pub inbound_policy: String,
    pub outbound_policy: String,
    #[serde(default)]
    pub inbound: Option<Vec<FirewallRuleParam>>,
    #[serde(default)]
    pub outbound: Option<Vec<FirewallRuleParam>>,
}

impl ToolParams for FirewallRulesUpdateRequest {
    fn validate(&self) -> Result<(), ToolError> {
        require_one_of("inbound_policy", &self.inbound_policy, POLICIES)?;
        require_one_of("outbound_policy", &self.outbound_policy, POLICIES)?;
        check_rules("inbound", self.inbound.as_deref())?;
        check_rules("outbound", self.outbound.as_deref())
    }
}

plain_params!(FirewallIdRequest);
