use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.geonames.org";
const DEFAULT_USER_AGENT: &str = "geonames-client-rs/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by every request a lookup client makes
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl LookupConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let base_url =
            env::var("GEONAMES_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("GEONAMES_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let user_agent =
            env::var("GEONAMES_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Self {
            base_url,
            timeout,
            user_agent,
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
