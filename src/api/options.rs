// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call request options

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::http::MultipartForm;

/// Request payload
#[derive(Debug, Clone)]
pub enum RequestData {
    /// JSON document
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// `multipart/form-data`; the transport chooses the boundary
    Multipart(MultipartForm),
}

/// Description of one call: `{method, url, data, params, headers}`
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Path relative to the base URL, or an absolute URL
    pub url: String,
    pub data: Option<RequestData>,
    /// Query parameters
    pub params: Vec<(String, String)>,
    /// Headers merged over the client defaults; these win on conflict
    pub headers: Vec<(String, String)>,
    /// Overrides the client timeout for this call
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// GET `url` with nothing else set
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            data: None,
            params: Vec::new(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::POST)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::PUT)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::PATCH)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::DELETE)
    }

    /// Set method
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set payload
    pub fn data(mut self, data: RequestData) -> Self {
        self.data = Some(data);
        self
    }

    /// Set a JSON payload from any serializable value
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.data(RequestData::Json(serde_json::to_value(value)?)))
    }

    /// Set a url-encoded form payload
    pub fn form<I, K, V>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.data(RequestData::Form(
            fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    /// Set a multipart payload
    pub fn multipart(self, form: MultipartForm) -> Self {
        self.data(RequestData::Multipart(form))
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set timeout for this call
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
