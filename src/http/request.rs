// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::headers::CONTENT_TYPE;
use super::multipart::MultipartForm;
use crate::error::Result;

/// Request body
#[derive(Debug, Clone)]
pub enum Body {
    /// Pre-encoded bytes (JSON, url-encoded form, raw)
    Bytes(Bytes),
    /// Multipart form, encoded by the transport
    Multipart(MultipartForm),
}

impl Body {
    /// Check if this is a multipart body
    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }

    /// Body bytes, if already encoded
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Bytes(b) => Some(b),
            Body::Multipart(_) => None,
        }
    }
}

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL, query included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Body>,
    /// Per-request timeout, overrides the client default
    pub timeout: Option<Duration>,
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::from_url(method, Url::parse(url.as_ref())?))
    }

    /// Create a request for an already-resolved URL
    pub fn from_url(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Set a header, invalid names or values are ignored
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Merge headers, replacing existing values with the same name
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Append query parameters
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = params.into_iter().peekable();
        if params.peek().is_some() {
            let mut pairs = self.url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k.as_ref(), v.as_ref());
            }
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(Body::Bytes(body.into()));
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Body::Bytes(Bytes::from(json)));
        Ok(self.header(CONTENT_TYPE, "application/json"))
    }

    /// Set url-encoded form body
    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.body = Some(Body::Bytes(Bytes::from(body)));
        self.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    /// Set multipart body
    ///
    /// Any `content-type` already on the request is dropped so the transport can
    /// emit its own boundary-bearing value.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.headers.remove(CONTENT_TYPE);
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get a header value as string
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the request body as lossy text, for diagnostics
    pub fn body_text(&self) -> Option<String> {
        match self.body.as_ref()? {
            Body::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            Body::Multipart(form) => Some(format!("<multipart: {} parts>", form.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("x-custom", "value")
            .header("x-custom", "override");
        assert_eq!(req.header_value("x-custom"), Some("override"));
    }

    #[test]
    fn test_query_params() {
        let req = Request::get("https://example.com/users")
            .unwrap()
            .query([("page", "2"), ("q", "a b")]);
        assert_eq!(req.url.query(), Some("page=2&q=a+b"));
    }

    #[test]
    fn test_json_body() {
        let req = Request::post("https://example.com/users")
            .unwrap()
            .json(&serde_json::json!({"name": "Alice"}))
            .unwrap();
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body_text().as_deref(), Some(r#"{"name":"Alice"}"#));
    }

    #[test]
    fn test_multipart_drops_content_type() {
        let req = Request::post("https://example.com/upload")
            .unwrap()
            .header("content-type", "application/json")
            .multipart(MultipartForm::new().text("name", "Alice"));
        assert!(req.header_value("content-type").is_none());
        assert!(req.body.as_ref().unwrap().is_multipart());
    }

    #[test]
    fn test_form_body() {
        let req = Request::post("https://example.com/login")
            .unwrap()
            .form([("user", "alice"), ("pass", "p&w")]);
        assert_eq!(req.body_text().as_deref(), Some("user=alice&pass=p%26w"));
    }
}
