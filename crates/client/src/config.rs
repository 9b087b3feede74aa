//! Client configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without trailing slash. `VETFORUM_API_URL`.
    pub api_url: String,
    /// Credential file override. `VETFORUM_CREDENTIALS`.
    pub credentials_path: Option<PathBuf>,
    /// Per-request timeout. `VETFORUM_TIMEOUT_SECS`.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = match lookup("VETFORUM_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => {
                tracing::warn!("VETFORUM_API_URL not set; using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        let credentials_path = lookup("VETFORUM_CREDENTIALS")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout = match lookup("VETFORUM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid VETFORUM_TIMEOUT_SECS; using default");
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self {
            api_url,
            credentials_path,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), ClientConfig::default());
    }

    #[test]
    fn reads_overrides_and_strips_trailing_slash() {
        let cfg = config_from(&[
            ("VETFORUM_API_URL", "https://forum.example.org/api/"),
            ("VETFORUM_CREDENTIALS", "/tmp/creds.json"),
            ("VETFORUM_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(cfg.api_url, "https://forum.example.org/api");
        assert_eq!(cfg.credentials_path, Some(PathBuf::from("/tmp/creds.json")));
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        for bad in ["zero", "0", "-1"] {
            let cfg = config_from(&[("VETFORUM_TIMEOUT_SECS", bad)]);
            assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }
}
