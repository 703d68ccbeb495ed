// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interceptor trait
//!
//! Middleware run by [`crate::api::ApiClient`] around every request.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderValue;

use crate::browser::{Navigator, LOGIN_PATH};
use crate::error::{Error, Result};
use crate::http::headers::AUTHORIZATION;
use crate::http::{Request, Response};
use crate::storage::TokenProvider;

/// Request interceptor trait
///
/// # Example
///
/// ```rust,no_run
/// use tokenguard::network::{RequestInterceptor, InterceptAction};
/// use tokenguard::http::Request;
/// use async_trait::async_trait;
///
/// struct TenantHeader {
///     tenant: String,
/// }
///
/// #[async_trait]
/// impl RequestInterceptor for TenantHeader {
///     async fn before_request(&self, req: &mut Request) -> InterceptAction {
///         req.headers.insert("x-tenant", self.tenant.parse().unwrap());
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Called immediately before a request is sent
    ///
    /// Can modify the request or abort it entirely.
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Called for every response, whatever its status
    async fn after_response(&self, _request: &Request, _response: &mut Response) -> Result<()> {
        Ok(())
    }

    /// Called when the transport fails without a response
    async fn on_error(&self, _request: &Request, _error: &Error) {}

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after interception
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with an error
    Abort(String),
    /// Return this response instead of making the actual request
    MockResponse(Response),
}

/// Sets `Authorization: Bearer <token>` from the provider on every request
///
/// The provider is read at send time, so logins and logouts between requests
/// take effect immediately. Without a token no `Authorization` header is sent.
pub struct BearerTokenInjector {
    tokens: Arc<dyn TokenProvider>,
}

impl BearerTokenInjector {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl RequestInterceptor for BearerTokenInjector {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        let Some(token) = self.tokens.get() else {
            request.headers.remove(AUTHORIZATION);
            return InterceptAction::Continue;
        };

        match HeaderValue::try_from(format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("Stored token is not a valid header value, sending without it");
                request.headers.remove(AUTHORIZATION);
            }
        }
        InterceptAction::Continue
    }

    fn priority(&self) -> i32 {
        100 // High priority - run auth injection early
    }
}

/// Logs the user out when the server answers 401
///
/// Clears the stored token and navigates to the login page. The response is
/// left untouched, so the request still fails for the caller.
pub struct UnauthorizedHandler {
    tokens: Arc<dyn TokenProvider>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl UnauthorizedHandler {
    pub fn new(tokens: Arc<dyn TokenProvider>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            tokens,
            navigator,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    /// Set the login location
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }
}

#[async_trait]
impl RequestInterceptor for UnauthorizedHandler {
    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        if !response.is_unauthorized() {
            return Ok(());
        }

        tracing::error!(
            method = %request.method,
            url = %request.url,
            "Unauthorized access. Redirecting to login."
        );
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
        self.navigator.navigate(&self.login_path);
        Ok(())
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Request logger interceptor
///
/// Logs method, URL and status of every call. Bodies are logged at `debug`
/// only when enabled.
#[derive(Debug, Default)]
pub struct RequestLogger {
    log_bodies: bool,
}

impl RequestLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request and response bodies
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            authenticated = request.headers.contains_key(AUTHORIZATION),
            "Request"
        );

        if self.log_bodies {
            if let Some(body) = request.body_text() {
                tracing::debug!(body = %body, "Request body");
            }
        }

        InterceptAction::Continue
    }

    async fn after_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        tracing::info!(
            url = %request.url,
            status = %response.status,
            time_ms = response.response_time_ms,
            "Response"
        );

        if self.log_bodies {
            tracing::debug!(body = %response.text_lossy(), "Response body");
        }

        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        tracing::warn!(method = %request.method, url = %request.url, error = %error, "Request failed");
    }

    fn priority(&self) -> i32 {
        -100 // Low priority - run logging last
    }
}

/// Interceptor chain - manages multiple interceptors
#[derive(Default, Clone)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_arc(Arc::new(interceptor));
    }

    /// Add a shared interceptor
    pub fn add_arc(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.push(interceptor);
        // Stable sort keeps insertion order among equal priorities
        self.interceptors
            .sort_by_key(|i| std::cmp::Reverse(i.priority()));
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Process request through all interceptors
    pub async fn process_request(&self, request: &mut Request) -> InterceptAction {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }

            match interceptor.before_request(request).await {
                InterceptAction::Continue => continue,
                action => return action,
            }
        }
        InterceptAction::Continue
    }

    /// Process response through all interceptors
    pub async fn process_response(&self, request: &Request, response: &mut Response) -> Result<()> {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }
            interceptor.after_response(request, response).await?;
        }
        Ok(())
    }

    /// Notify interceptors of a transport error
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        for interceptor in &self.interceptors {
            if interceptor.should_intercept(request) {
                interceptor.on_error(request, error).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::BrowsingContext;
    use crate::storage::StaticTokenProvider;
    use reqwest::StatusCode;

    fn request() -> Request {
        Request::get("https://api.example.com/users").unwrap()
    }

    fn response(status: StatusCode) -> Response {
        Response::mock_json(
            status,
            url::Url::parse("https://api.example.com/users").unwrap(),
            &serde_json::json!({}),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_bearer_injection_reads_provider_each_time() {
        let tokens = Arc::new(StaticTokenProvider::new("first"));
        let injector = BearerTokenInjector::new(tokens.clone());

        let mut req = request();
        injector.before_request(&mut req).await;
        assert_eq!(req.header_value("authorization"), Some("Bearer first"));

        tokens.set("second").unwrap();
        let mut req = request();
        injector.before_request(&mut req).await;
        assert_eq!(req.header_value("authorization"), Some("Bearer second"));

        tokens.clear().unwrap();
        let mut req = request().header("authorization", "Bearer stale");
        injector.before_request(&mut req).await;
        assert!(req.header_value("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_handler() {
        let tokens = Arc::new(StaticTokenProvider::new("token"));
        let ctx = Arc::new(BrowsingContext::new("/app.html"));
        let handler = UnauthorizedHandler::new(tokens.clone(), ctx.clone());

        let req = request();
        handler
            .after_response(&req, &mut response(StatusCode::OK))
            .await
            .unwrap();
        assert!(tokens.get().is_some());
        assert_eq!(ctx.redirect_count(), 0);

        let mut resp = response(StatusCode::UNAUTHORIZED);
        handler.after_response(&req, &mut resp).await.unwrap();
        assert!(tokens.get().is_none());
        assert_eq!(ctx.location(), "/login.html");
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_is_not_logout() {
        let tokens = Arc::new(StaticTokenProvider::new("token"));
        let ctx = Arc::new(BrowsingContext::default());
        let handler = UnauthorizedHandler::new(tokens.clone(), ctx.clone());

        tokio_test::block_on(handler.after_response(&request(), &mut response(StatusCode::FORBIDDEN)))
            .unwrap();
        assert!(tokens.get().is_some());
        assert_eq!(ctx.redirect_count(), 0);
    }

    #[tokio::test]
    async fn test_logger_leaves_request_alone() {
        let logger = RequestLogger::new().log_bodies(true);
        assert_eq!(format!("{:?}", logger), "RequestLogger { log_bodies: true }");

        let mut req = request().body("secret=1");
        assert!(matches!(logger.before_request(&mut req).await, InterceptAction::Continue));
        assert_eq!(req.body_text().as_deref(), Some("secret=1"));
        logger
            .after_response(&req, &mut response(StatusCode::OK))
            .await
            .unwrap();
    }

    struct Abort;

    #[async_trait]
    impl RequestInterceptor for Abort {
        async fn before_request(&self, _request: &mut Request) -> InterceptAction {
            InterceptAction::Abort("blocked".to_string())
        }
    }

    #[tokio::test]
    async fn test_chain_order_and_short_circuit() {
        let mut chain = InterceptorChain::new();
        chain.add(RequestLogger::default());
        chain.add(Abort);
        chain.add(BearerTokenInjector::new(Arc::new(StaticTokenProvider::new("t"))));
        assert_eq!(chain.len(), 3);

        let mut req = request();
        let action = chain.process_request(&mut req).await;

        // Injector (100) runs before Abort (0); logger (-100) never runs
        assert!(matches!(action, InterceptAction::Abort(ref r) if r == "blocked"));
        assert_eq!(req.header_value("authorization"), Some("Bearer t"));
    }
}
