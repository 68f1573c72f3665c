//! Build metadata reported by the version tools.

use serde::Serialize;
use std::collections::BTreeMap;

pub const API_VERSION: &str = "v4";
pub const SERVICE_NAME: &str = "cloudmcp";

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub api_version: &'static str,
    pub build_date: &'static str,
    pub git_commit: &'static str,
    pub git_branch: &'static str,
    pub rust_version: &'static str,
    pub platform: String,
    pub features: BTreeMap<&'static str, bool>,
}

impl BuildInfo {
    /// Values injected at build time via `CLOUDMCP_*` environment variables; `unknown` otherwise.
    pub fn current() -> Self {
        let features = [
            ("multi_account", true),
            ("reference_cache", true),
            ("transport_profiles", true),
            ("account_persistence", true),
            ("request_cancellation", true),
        ]
        .into_iter()
        .collect();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            api_version: API_VERSION,
            build_date: option_env!("CLOUDMCP_BUILD_DATE").unwrap_or("unknown"),
            git_commit: option_env!("CLOUDMCP_GIT_COMMIT").unwrap_or("unknown"),
            git_branch: option_env!("CLOUDMCP_GIT_BRANCH").unwrap_or("unknown"),
            rust_version: option_env!("CLOUDMCP_RUSTC_VERSION").unwrap_or("unknown"),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_package_version_and_platform() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.api_version, "v4");
        assert!(info.platform.contains('/'));
        assert_eq!(info.features.get("multi_account"), Some(&true));
    }
}
