//! HTTP transport profiles.
//!
//! A [`TransportConfig`] describes the connection pool and timeout budget of one upstream
//! client. Five presets cover the common deployment shapes; [`validate`] reports settings that
//! are likely to hurt in production without rejecting them.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub max_idle_conns: usize,
    pub max_idle_conns_per_host: usize,
    /// Upper bound on in-flight requests per client. `0` disables the bound.
    pub max_conns_per_host: usize,
    pub idle_conn_timeout: Duration,
    pub overall_timeout: Duration,
    pub dial_timeout: Duration,
    pub tls_handshake_timeout: Duration,
    pub response_header_timeout: Duration,
    pub keep_alive_interval: Duration,
    pub disable_keep_alives: bool,
    pub disable_compression: bool,
    pub skip_tls_verify: bool,
    /// Carried for completeness; reqwest has no `Expect: 100-continue` support.
    pub expect_continue_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportProfile::Default.config()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportProfile {
    Default,
    HighThroughput,
    LowLatency,
    ResourceConstrained,
    BatchProcessing,
}

impl TransportProfile {
    pub const ALL: [TransportProfile; 5] = [
        TransportProfile::Default,
        TransportProfile::HighThroughput,
        TransportProfile::LowLatency,
        TransportProfile::ResourceConstrained,
        TransportProfile::BatchProcessing,
    ];

    pub fn builtin(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "high-throughput" | "high_throughput" => Some(Self::HighThroughput),
            "low-latency" | "low_latency" => Some(Self::LowLatency),
            "resource-constrained" | "resource_constrained" => Some(Self::ResourceConstrained),
            "batch-processing" | "batch_processing" => Some(Self::BatchProcessing),
            _ => None,
        }
    }

    /// Resolve a profile name, falling back to `default` for unknown names.
    pub fn from_name(name: &str) -> Self {
        match Self::builtin(name) {
            Some(profile) => profile,
            None => {
                log::warn!("Unknown transport profile '{name}', falling back to 'default'");
                Self::Default
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::HighThroughput => "high-throughput",
            Self::LowLatency => "low-latency",
            Self::ResourceConstrained => "resource-constrained",
            Self::BatchProcessing => "batch-processing",
        }
    }

    pub fn config(self) -> TransportConfig {
        let secs = Duration::from_secs;
        match self {
            Self::Default => TransportConfig {
                max_idle_conns: 100,
                max_idle_conns_per_host: 10,
                max_conns_per_host: 50,
                idle_conn_timeout: secs(90),
                overall_timeout: secs(30),
                dial_timeout: secs(10),
                tls_handshake_timeout: secs(10),
                response_header_timeout: secs(30),
                keep_alive_interval: secs(30),
                disable_keep_alives: false,
                disable_compression: false,
                skip_tls_verify: false,
                expect_continue_timeout: secs(1),
            },
            Self::HighThroughput => TransportConfig {
                max_idle_conns: 200,
                max_idle_conns_per_host: 50,
                max_conns_per_host: 100,
                idle_conn_timeout: secs(120),
                overall_timeout: secs(60),
                dial_timeout: secs(10),
                tls_handshake_timeout: secs(10),
                response_header_timeout: secs(30),
                keep_alive_interval: secs(30),
                disable_keep_alives: false,
                disable_compression: false,
                skip_tls_verify: false,
                expect_continue_timeout: secs(1),
            },
            Self::LowLatency => TransportConfig {
                max_idle_conns: 50,
                max_idle_conns_per_host: 10,
                max_conns_per_host: 10,
                idle_conn_timeout: secs(60),
                overall_timeout: secs(15),
                dial_timeout: secs(2),
                tls_handshake_timeout: secs(3),
                response_header_timeout: secs(5),
                keep_alive_interval: secs(15),
                disable_keep_alives: false,
                disable_compression: false,
                skip_tls_verify: false,
                expect_continue_timeout: Duration::from_millis(500),
            },
            Self::ResourceConstrained => TransportConfig {
                max_idle_conns: 10,
                max_idle_conns_per_host: 2,
                max_conns_per_host: 20,
                idle_conn_timeout: secs(30),
                overall_timeout: secs(30),
                dial_timeout: secs(5),
                tls_handshake_timeout: secs(5),
                response_header_timeout: secs(15),
                keep_alive_interval: secs(30),
                disable_keep_alives: false,
                disable_compression: false,
                skip_tls_verify: false,
                expect_continue_timeout: secs(1),
            },
            Self::BatchProcessing => TransportConfig {
                max_idle_conns: 500,
                max_idle_conns_per_host: 20,
                max_conns_per_host: 50,
                idle_conn_timeout: secs(300),
                overall_timeout: secs(300),
                dial_timeout: secs(10),
                tls_handshake_timeout: secs(10),
                response_header_timeout: secs(120),
                keep_alive_interval: secs(60),
                disable_keep_alives: false,
                disable_compression: false,
                skip_tls_verify: false,
                expect_continue_timeout: secs(2),
            },
        }
    }
}

/// Advisory checks for a transport configuration. Never fails.
pub fn validate(config: &TransportConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.overall_timeout < Duration::from_secs(5) {
        warnings.push(format!(
            "overall timeout {:?} is below 5s; slow API calls will fail",
            config.overall_timeout
        ));
    }
    if config.dial_timeout < Duration::from_secs(1) {
        warnings.push(format!(
            "dial timeout {:?} is below 1s; connections may fail on slow networks",
            config.dial_timeout
        ));
    }
    if config.max_idle_conns > 1000 {
        warnings.push(format!(
            "max idle connections {} exceeds 1000; this may exhaust file descriptors",
            config.max_idle_conns
        ));
    }
    if config.max_conns_per_host > 100 {
        warnings.push(format!(
            "max connections per host {} exceeds 100; the API may rate-limit this client",
            config.max_conns_per_host
        ));
    }
    if config.disable_keep_alives {
        warnings.push("keep-alives are disabled; every request opens a new connection".into());
    }
    if config.disable_compression {
        warnings.push("compression is disabled; responses will use more bandwidth".into());
    }
    if config.skip_tls_verify {
        warnings.push("TLS verification is disabled; this is insecure outside development".into());
    }
    if config.idle_conn_timeout < Duration::from_secs(30) {
        warnings.push(format!(
            "idle connection timeout {:?} is below 30s; pooled connections will churn",
            config.idle_conn_timeout
        ));
    }
    warnings
}

impl TransportConfig {
    pub(crate) fn idle_per_host(&self) -> usize {
        if self.disable_keep_alives {
            0
        } else {
            self.max_idle_conns_per_host.min(self.max_idle_conns)
        }
    }

    pub(crate) fn apply(&self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        let builder = builder
            .pool_max_idle_per_host(self.idle_per_host())
            .pool_idle_timeout(self.idle_conn_timeout)
            .connect_timeout(self.dial_timeout + self.tls_handshake_timeout)
            .read_timeout(self.response_header_timeout)
            .timeout(self.overall_timeout)
            .tcp_nodelay(true)
            .gzip(!self.disable_compression)
            .danger_accept_invalid_certs(self.skip_tls_verify);

        if self.disable_keep_alives {
            builder.tcp_keepalive(None::<Duration>)
        } else {
            builder
                .tcp_keepalive(self.keep_alive_interval)
                .http2_keep_alive_interval(self.keep_alive_interval)
                .http2_keep_alive_while_idle(true)
                .http2_adaptive_window(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<(TransportProfile, TransportConfig)> {
        TransportProfile::ALL
            .into_iter()
            .map(|p| (p, p.config()))
            .collect()
    }

    #[test]
    fn low_latency_has_tightest_timeouts_and_per_host_cap() {
        let low = TransportProfile::LowLatency.config();
        for (profile, cfg) in configs() {
            if profile == TransportProfile::LowLatency {
                continue;
            }
            assert!(low.dial_timeout < cfg.dial_timeout, "{profile:?}");
            assert!(low.tls_handshake_timeout < cfg.tls_handshake_timeout, "{profile:?}");
            assert!(low.response_header_timeout < cfg.response_header_timeout, "{profile:?}");
            assert!(low.max_conns_per_host < cfg.max_conns_per_host, "{profile:?}");
        }
    }

    #[test]
    fn batch_processing_has_largest_overall_timeout_and_idle_cap() {
        let batch = TransportProfile::BatchProcessing.config();
        for (profile, cfg) in configs() {
            if profile == TransportProfile::BatchProcessing {
                continue;
            }
            assert!(batch.overall_timeout > cfg.overall_timeout, "{profile:?}");
            assert!(batch.max_idle_conns > cfg.max_idle_conns, "{profile:?}");
        }
    }

    #[test]
    fn resource_constrained_has_smallest_idle_caps() {
        let small = TransportProfile::ResourceConstrained.config();
        for (profile, cfg) in configs() {
            if profile == TransportProfile::ResourceConstrained {
                continue;
            }
            assert!(small.max_idle_conns < cfg.max_idle_conns, "{profile:?}");
            assert!(
                small.max_idle_conns_per_host < cfg.max_idle_conns_per_host,
                "{profile:?}"
            );
        }
    }

    #[test]
    fn unknown_profile_falls_back_to_default() {
        assert_eq!(
            TransportProfile::from_name("warp-speed"),
            TransportProfile::Default
        );
        assert_eq!(
            TransportProfile::from_name("Low-Latency"),
            TransportProfile::LowLatency
        );
    }

    #[test]
    fn presets_pass_validation() {
        for (profile, cfg) in configs() {
            assert!(validate(&cfg).is_empty(), "{profile:?}: {:?}", validate(&cfg));
        }
    }

    #[test]
    fn validator_reports_every_risky_setting() {
        let cfg = TransportConfig {
            max_idle_conns: 2000,
            max_idle_conns_per_host: 10,
            max_conns_per_host: 500,
            idle_conn_timeout: Duration::from_secs(5),
            overall_timeout: Duration::from_secs(2),
            dial_timeout: Duration::from_millis(200),
            tls_handshake_timeout: Duration::from_secs(1),
            response_header_timeout: Duration::from_secs(1),
            keep_alive_interval: Duration::from_secs(30),
            disable_keep_alives: true,
            disable_compression: true,
            skip_tls_verify: true,
            expect_continue_timeout: Duration::from_secs(1),
        };
        let warnings = validate(&cfg);
        assert_eq!(warnings.len(), 8, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("TLS verification")));
        assert!(warnings.iter().any(|w| w.contains("keep-alives")));
    }

    #[test]
    fn disabled_keep_alives_drop_idle_pool() {
        let mut cfg = TransportProfile::Default.config();
        assert_eq!(cfg.idle_per_host(), 10);
        cfg.max_idle_conns = 4;
        assert_eq!(cfg.idle_per_host(), 4);
        cfg.disable_keep_alives = true;
        assert_eq!(cfg.idle_per_host(), 0);
    }
}
