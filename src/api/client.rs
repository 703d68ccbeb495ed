// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated request client

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::ClientConfig;
use super::options::{RequestData, RequestOptions};
use crate::browser::Navigator;
use crate::error::{Error, Result};
use crate::http::headers::CONTENT_TYPE;
use crate::http::{Body, HttpClient, Request, Response};
use crate::network::{
    BearerTokenInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    UnauthorizedHandler,
};
use crate::storage::{Storage, StorageTokenProvider, TokenProvider};

/// HTTP client that authenticates every request with the stored token
///
/// Every call runs through the interceptor chain: the bearer token is read
/// from the [`TokenProvider`] right before sending, and a 401 clears it and
/// navigates to the login page before the error reaches the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    config: Arc<ClientConfig>,
    interceptors: InterceptorChain,
}

impl ApiClient {
    /// Create a client from an explicit token provider and navigator
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_config()?)?;

        let mut interceptors = InterceptorChain::new();
        interceptors.add(BearerTokenInjector::new(tokens.clone()));
        interceptors.add(
            UnauthorizedHandler::new(tokens, navigator).login_path(config.login_path.clone()),
        );
        interceptors.add(RequestLogger::new().log_bodies(config.log_bodies));

        let timeout_ms = config.timeout.as_millis() as u64;
        tracing::debug!(base_url = %config.base_url, timeout_ms, "API client ready");

        Ok(Self {
            http,
            config: Arc::new(config),
            interceptors,
        })
    }

    /// Create a client reading the token from `config.token_key` in `storage`
    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let tokens = Arc::new(StorageTokenProvider::new(storage, config.token_key.clone()));
        Self::new(config, tokens, navigator)
    }

    /// Add an interceptor to the chain
    pub fn with_interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.add(interceptor);
        self
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the outgoing request for `options`
    ///
    /// The payload sets its content type first, then caller headers are merged
    /// over it and the configured defaults. Multipart payloads drop any
    /// `content-type` so the transport sets the boundary.
    pub fn build_request(&self, options: RequestOptions) -> Result<Request> {
        let RequestOptions {
            method,
            url,
            data,
            params,
            headers,
            timeout,
        } = options;

        let mut request = self.http.prepare(method, &url)?.query(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        match data {
            Some(RequestData::Json(value)) => {
                request.body = Some(Body::Bytes(Bytes::from(serde_json::to_vec(&value)?)));
                request
                    .headers
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static("application/json"));
            }
            Some(RequestData::Form(fields)) => request = request.form(fields),
            Some(RequestData::Multipart(form)) => request = request.multipart(form),
            None => {}
        }

        for (name, value) in headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::other(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::other(format!("invalid value for header '{}': {}", name, e)))?;
            request.headers.insert(name, value);
        }

        if request.body.as_ref().is_some_and(Body::is_multipart) {
            request.headers.remove(CONTENT_TYPE);
        }

        Ok(request)
    }

    /// Send a request and return the full response envelope
    ///
    /// Non-2xx statuses become errors after the interceptors have seen the
    /// response; 401 becomes [`Error::Unauthorized`].
    pub async fn send(&self, options: RequestOptions) -> Result<Response> {
        let mut request = self.build_request(options)?;

        let mut response = match self.interceptors.process_request(&mut request).await {
            InterceptAction::Continue => match self.http.execute(&request).await {
                Ok(response) => response,
                Err(e) => {
                    self.interceptors.notify_error(&request, &e).await;
                    return Err(e);
                }
            },
            InterceptAction::Abort(reason) => return Err(Error::Aborted(reason)),
            InterceptAction::MockResponse(response) => response,
        };

        self.interceptors
            .process_response(&request, &mut response)
            .await?;

        response.error_for_status()
    }

    /// Send a request and return only the decoded body
    ///
    /// Failures are logged with the request and any response body, then
    /// returned unchanged.
    pub async fn request<T: DeserializeOwned>(&self, options: RequestOptions) -> Result<T> {
        let method = options.method.clone();
        let url = options.url.clone();

        let result = match self.send(options).await {
            Ok(response) => response.json::<T>(),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            tracing::error!(
                method = %method,
                url = %url,
                status = ?e.status_code(),
                response = ?e.response_body(),
                error = %e,
                "HTTP Request Failed"
            );
        }
        result
    }

    /// [`request`](Self::request) with an error-first callback
    ///
    /// `callback` runs exactly once after the request settles; the result is
    /// also returned.
    pub async fn request_with_callback<T, F>(&self, options: RequestOptions, callback: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(std::result::Result<&T, &Error>) + Send,
    {
        let result = self.request(options).await;
        callback(result.as_ref());
        result
    }

    /// Send several requests concurrently
    ///
    /// Each request is independent; results come back in input order.
    pub async fn request_all<T: DeserializeOwned>(
        &self,
        requests: Vec<RequestOptions>,
    ) -> Vec<Result<T>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.request(r)).collect();
        futures::future::join_all(futures).await
    }

    /// GET `url`
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request(RequestOptions::get(url)).await
    }

    /// POST a JSON body to `url`
    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestOptions::post(url).json(body)?).await
    }

    /// PUT a JSON body to `url`
    pub async fn put<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestOptions::put(url).json(body)?).await
    }

    /// PATCH `url` with a JSON body
    pub async fn patch<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(RequestOptions::patch(url).json(body)?).await
    }

    /// DELETE `url`
    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request(RequestOptions::delete(url)).await
    }
}
