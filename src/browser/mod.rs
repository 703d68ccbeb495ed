// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browsing context
//!
//! Redirecting to the login page is the only navigation this crate performs.
//! [`Navigator`] abstracts it so hosts can plug in their own routing.

mod navigator;

pub use navigator::{BrowsingContext, LoggingNavigator, Navigator};

/// Default login location
pub const LOGIN_PATH: &str = "/login.html";
