// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer
//!
//! A thin reqwest wrapper with a fixed base URL, timeout and default headers.
//! Authentication and error policy live in the interceptors on top of it.

mod client;
mod multipart;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use multipart::{MultipartForm, Part, PartContent};
pub use request::{Body, Request};
pub use response::Response;

/// Default base URL
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("tokenguard/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const AUTHORIZATION: &str = "authorization";
}
