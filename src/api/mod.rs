// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated request client
//!
//! [`ApiClient`] wraps the transport with bearer-token injection and 401
//! handling, and hands callers the response body only.

mod client;
mod config;
mod options;

pub use client::ApiClient;
pub use config::{ClientConfig, ENV_PREFIX};
pub use options::{RequestData, RequestOptions};
