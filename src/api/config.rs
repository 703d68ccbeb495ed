// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::browser::LOGIN_PATH;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::storage::DEFAULT_TOKEN_KEY;

/// Environment variable prefix read by [`ClientConfig::from_env`]
pub const ENV_PREFIX: &str = "TOKENGUARD_";

/// Client configuration
///
/// Built once at startup and handed to [`crate::api::ApiClient::new`]; the
/// client never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL relative request paths are joined onto
    pub base_url: String,
    /// Per-request timeout
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
    /// Headers sent with every request unless overridden per call
    pub default_headers: Vec<(String, String)>,
    /// Where to send the user on 401
    pub login_path: String,
    /// Storage key holding the token
    pub token_key: String,
    /// User agent string
    pub user_agent: String,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Log request and response bodies at `debug`
    pub log_bodies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            login_path: LOGIN_PATH.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            log_bodies: false,
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add or replace a default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.default_headers
            .retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
        self
    }

    /// Drop all default headers
    pub fn without_default_headers(mut self) -> Self {
        self.default_headers.clear();
        self
    }

    /// Set login location
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set token storage key
    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable body logging
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// Defaults overridden by `TOKENGUARD_*` environment variables
    ///
    /// Reads `BASE_URL`, `TIMEOUT_MS`, `LOGIN_PATH`, `TOKEN_KEY`, `USER_AGENT`,
    /// `PROXY` and `LOG_BODIES`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(format!("{}{}", ENV_PREFIX, name)).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("BASE_URL") {
            config.base_url = v;
        }
        if let Some(v) = lookup("TIMEOUT_MS") {
            let ms: u64 = v.trim().parse().map_err(|_| {
                Error::config(format!("{}TIMEOUT_MS must be an integer, got '{}'", ENV_PREFIX, v))
            })?;
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(v) = lookup("LOGIN_PATH") {
            config.login_path = v;
        }
        if let Some(v) = lookup("TOKEN_KEY") {
            config.token_key = v;
        }
        if let Some(v) = lookup("USER_AGENT") {
            config.user_agent = v;
        }
        if let Some(v) = lookup("PROXY") {
            config.proxy = Some(v);
        }
        if let Some(v) = lookup("LOG_BODIES") {
            config.log_bodies = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(Error::config(format!(
                        "{}LOG_BODIES must be a boolean, got '{}'",
                        ENV_PREFIX, v
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a transport cannot be built without
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        self.header_map()?;
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        if self.token_key.is_empty() {
            return Err(Error::config("token key must not be empty"));
        }
        Ok(())
    }

    fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if !url.has_host() {
            return Err(Error::config(format!("base URL '{}' has no host", self.base_url)));
        }
        Ok(url)
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::config(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::config(format!("invalid value for header '{}': {}", name, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        Ok(HttpClientConfig {
            base_url: self.parsed_base_url()?,
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            default_headers: self.header_map()?,
            proxy: self.proxy.clone(),
        })
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.login_path, "/login.html");
        assert!(!config.log_bodies);
        assert_eq!(config.token_key, "jtck");

        let http = config.http_config().unwrap();
        assert_eq!(
            http.default_headers.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_header_replaces_case_insensitively() {
        let config = ClientConfig::new()
            .header("content-type", "text/plain")
            .header("X-Client", "cli");
        assert_eq!(config.default_headers.len(), 2);
        assert_eq!(
            config.default_headers[0],
            ("content-type".to_string(), "text/plain".to_string())
        );
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("BASE_URL", "http://localhost:8080/api"),
            ("TIMEOUT_MS", "2500"),
            ("TOKEN_KEY", "token"),
            ("LOG_BODIES", "true"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.token_key, "token");
        assert_eq!(config.login_path, "/login.html");
        assert!(config.log_bodies);
    }

    #[test]
    fn test_invalid_values() {
        let bad_timeout = ClientConfig::from_lookup(|k| (k == "TIMEOUT_MS").then(|| "soon".into()));
        assert!(matches!(bad_timeout, Err(Error::Config(_))));

        let bad_flag = ClientConfig::from_lookup(|k| (k == "LOG_BODIES").then(|| "maybe".into()));
        assert!(matches!(bad_flag, Err(Error::Config(_))));

        let bad_url = ClientConfig::from_lookup(|k| (k == "BASE_URL").then(|| "/relative".into()));
        assert!(matches!(bad_url, Err(Error::Config(_))));

        assert!(ClientConfig::new().header("bad header", "x").validate().is_err());
        assert!(ClientConfig::new().timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        std::fs::write(
            &path,
            r#"{"base_url": "https://staging.example.com", "timeout_ms": 500}"#,
        )
        .unwrap();

        let config = ClientConfig::from_json_file(&path).unwrap();
        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.token_key, "jtck");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout_ms"], 500);
    }
}
