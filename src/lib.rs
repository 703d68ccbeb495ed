// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # tokenguard - Bearer-token HTTP client and session guard
//!
//! Two independent pieces built on reqwest:
//!
//! - [`SessionGuard`]: run once when a protected page loads. Reads the stored
//!   JWT, checks its `exp` claim, and navigates to `/login.html` when the token
//!   is missing, undecodable or expired.
//! - [`ApiClient`]: base URL, timeout and default headers fixed at
//!   construction. Sends `Authorization: Bearer <token>` read from storage at
//!   send time, clears the token and redirects to login on 401, and resolves
//!   to the response body only.
//!
//! Storage and navigation are injected through the [`TokenProvider`],
//! [`Storage`] and [`Navigator`] traits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tokenguard::{ApiClient, BrowsingContext, ClientConfig, MemoryStorage, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(MemoryStorage::new());
//!     let navigator = Arc::new(BrowsingContext::default());
//!     let client = ApiClient::with_storage(ClientConfig::default(), storage, navigator)?;
//!
//!     let created: serde_json::Value = client
//!         .request(RequestOptions::post("/users").json(&serde_json::json!({"name": "Alice", "age": 30}))?)
//!         .await?;
//!     println!("{}", created);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod browser;
pub mod error;
pub mod http;
pub mod network;
pub mod storage;

// Re-exports for convenience

// Client
pub use api::{ApiClient, ClientConfig, RequestData, RequestOptions};

// Guard and token inspection
pub use auth::{decode_claims, is_expired, is_expired_at, Claims, GuardOutcome, RedirectReason, SessionGuard};

// Navigation
pub use browser::{BrowsingContext, LoggingNavigator, Navigator, LOGIN_PATH};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, MultipartForm, Request, Response};

// Network
pub use network::{
    BearerTokenInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    UnauthorizedHandler,
};

// Storage
pub use storage::{
    FileStorage, MemoryStorage, StaticTokenProvider, Storage, StorageTokenProvider, TokenProvider,
    DEFAULT_TOKEN_KEY,
};

/// tokenguard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
