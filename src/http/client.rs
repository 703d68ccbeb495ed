// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use url::Url;

use super::request::{Body, Request};
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Transport configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL relative request paths are joined onto
    pub base_url: Url,
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Headers applied to every request unless the request overrides them
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("content-type", HeaderValue::from_static("application/json"));

        Self {
            base_url: Url::parse(super::DEFAULT_BASE_URL).expect("valid default base URL"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            default_headers,
            proxy: None,
        }
    }
}

/// reqwest-backed transport with a fixed base URL and default headers
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Resolve a request path against the base URL
    ///
    /// Absolute URLs pass through. Relative paths are appended to the base
    /// path, so `/users` on `https://host/api` gives `https://host/api/users`.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(path) {
            if url.has_host() {
                return Ok(url);
            }
        }

        let base = self.config.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Ok(Url::parse(base)?);
        }
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// Start a request with the resolved URL and the default headers
    pub fn prepare(&self, method: Method, path: &str) -> Result<Request> {
        let mut request = Request::from_url(method, self.resolve(path)?);
        request.headers = self.config.default_headers.clone();
        Ok(request)
    }

    /// Send a request
    ///
    /// Any status is returned as a response; only transport failures are
    /// errors here.
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        let start = Instant::now();
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .timeout(timeout);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        match &request.body {
            Some(Body::Bytes(bytes)) => builder = builder.body(bytes.clone()),
            Some(Body::Multipart(form)) => builder = builder.multipart(form.to_reqwest()?),
            None => {}
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout_with_url(
                    format!("{} request", request.method),
                    timeout.as_millis() as u64,
                    request.url.as_str(),
                )
            } else {
                Error::from(e)
            }
        })?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body, final_url, response_time))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> HttpClient {
        HttpClient::with_config(HttpClientConfig {
            base_url: Url::parse(base).unwrap(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client.config().timeout, Duration::from_secs(10));
        assert_eq!(
            client.config().default_headers.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_resolve() {
        let client = client_with_base("https://api.example.com/v1/");
        assert_eq!(
            client.resolve("/users").unwrap().as_str(),
            "https://api.example.com/v1/users"
        );
        assert_eq!(
            client.resolve("users?page=2").unwrap().as_str(),
            "https://api.example.com/v1/users?page=2"
        );
        assert_eq!(
            client.resolve("https://other.example.com/x").unwrap().as_str(),
            "https://other.example.com/x"
        );
    }

    #[test]
    fn test_prepare_carries_defaults() {
        let client = client_with_base("https://api.example.com");
        let req = client.prepare(Method::DELETE, "/users/1").unwrap();
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.header_value("content-type"), Some("application/json"));
    }

    #[test]
    fn test_invalid_proxy() {
        let result = HttpClient::with_config(HttpClientConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
