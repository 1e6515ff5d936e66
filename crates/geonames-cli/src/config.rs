use std::env;

use geonames_client::LookupConfig;

use crate::error::{CliError, Result};

/// Host configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub language: Option<String>,
    pub lookup: LookupConfig,
}

impl Config {
    /// Parse configuration from the environment; `username` overrides `GEONAMES_USERNAME`
    pub fn from_env(username: Option<String>) -> Result<Self> {
        let username = match username.or_else(|| env::var("GEONAMES_USERNAME").ok()) {
            Some(u) if !u.trim().is_empty() => u,
            _ => {
                return Err(CliError::Config(
                    "GEONAMES_USERNAME environment variable or --username is required"
                        .to_string(),
                ))
            }
        };

        let language = env::var("GEONAMES_LANGUAGE")
            .ok()
            .filter(|l| !l.trim().is_empty());

        Ok(Self {
            username,
            language,
            lookup: LookupConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_username_wins() {
        let config = Config::from_env(Some("alice".to_string())).unwrap();
        assert_eq!(config.username, "alice");
    }

    #[test]
    fn test_blank_username_rejected() {
        let err = Config::from_env(Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
