// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interception
//!
//! Cross-cutting client behaviour (bearer injection, 401 handling, logging)
//! is expressed as interceptors run around every request.

mod interceptor_trait;

pub use interceptor_trait::{
    BearerTokenInjector, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    UnauthorizedHandler,
};
