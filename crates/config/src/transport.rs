use std::time::Duration;

use cloudmcp_linode::{TransportConfig, TransportProfile};
use serde::{Deserialize, Serialize};

/// `[transport]`: a profile name plus optional per-field overrides. Durations are in
/// milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_conns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_conns_per_host: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_conns_per_host: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_conn_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_handshake_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_header_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_continue_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_keep_alives: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_compression: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_tls_verify: Option<bool>,
}

impl TransportSection {
    pub fn profile(&self) -> TransportProfile {
        self.profile
            .as_deref()
            .map(TransportProfile::from_name)
            .unwrap_or(TransportProfile::Default)
    }

    /// The named profile with every present override applied on top.
    pub fn resolve(&self) -> TransportConfig {
        let mut config = self.profile().config();
        let ms = Duration::from_millis;

        if let Some(v) = self.max_idle_conns {
            config.max_idle_conns = v;
        }
        if let Some(v) = self.max_idle_conns_per_host {
            config.max_idle_conns_per_host = v;
        }
        if let Some(v) = self.max_conns_per_host {
            config.max_conns_per_host = v;
        }
        if let Some(v) = self.idle_conn_timeout_ms {
            config.idle_conn_timeout = ms(v);
        }
        if let Some(v) = self.overall_timeout_ms {
            config.overall_timeout = ms(v);
        }
        if let Some(v) = self.dial_timeout_ms {
            config.dial_timeout = ms(v);
        }
        if let Some(v) = self.tls_handshake_timeout_ms {
            config.tls_handshake_timeout = ms(v);
        }
        if let Some(v) = self.response_header_timeout_ms {
            config.response_header_timeout = ms(v);
        }
        if let Some(v) = self.keep_alive_interval_ms {
            config.keep_alive_interval = ms(v);
        }
        if let Some(v) = self.expect_continue_timeout_ms {
            config.expect_continue_timeout = ms(v);
        }
        if let Some(v) = self.disable_keep_alives {
            config.disable_keep_alives = v;
        }
        if let Some(v) = self.disable_compression {
            config.disable_compression = v;
        }
        if let Some(v) = self.skip_tls_verify {
            config.skip_tls_verify = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_named_profile() {
        let section: TransportSection = toml::from_str(
            r#"
            profile = "batch-processing"
            overall_timeout_ms = 45000
            skip_tls_verify = true
            "#,
        )
        .unwrap();
        let config = section.resolve();
        let batch = TransportProfile::BatchProcessing.config();

        assert_eq!(config.overall_timeout, Duration::from_secs(45));
        assert!(config.skip_tls_verify);
        assert_eq!(config.max_idle_conns, batch.max_idle_conns);
        assert_eq!(config.response_header_timeout, batch.response_header_timeout);
    }

    #[test]
    fn missing_or_unknown_profile_is_default() {
        assert_eq!(
            TransportSection::default().resolve(),
            TransportProfile::Default.config()
        );
        let section = TransportSection {
            profile: Some("hyperdrive".into()),
            ..Default::default()
        };
        assert_eq!(section.profile(), TransportProfile::Default);
    }
}
