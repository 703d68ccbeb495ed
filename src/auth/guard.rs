// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page-load session guard

use std::sync::Arc;

use super::token::{is_expired_at, now_secs};
use crate::browser::{Navigator, LOGIN_PATH};
use crate::storage::TokenProvider;

/// Result of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Token present and not expired
    Allowed,
    /// Navigated to the login page
    Redirected(RedirectReason),
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed)
    }
}

/// Why the guard redirected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No token in storage
    Missing,
    /// Token expired, undecodable, or without `exp`
    Expired,
}

/// Synchronous gate run once before a protected page does anything else
///
/// Reads the stored token and sends the user to the login page when it is
/// missing or expired. There is no retry and nothing to await.
pub struct SessionGuard {
    tokens: Arc<dyn TokenProvider>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    clear_on_expiry: bool,
}

impl SessionGuard {
    /// Create a guard redirecting to `/login.html`
    pub fn new(tokens: Arc<dyn TokenProvider>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            tokens,
            navigator,
            login_path: LOGIN_PATH.to_string(),
            clear_on_expiry: false,
        }
    }

    /// Set the login location
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Remove an expired token from storage before redirecting
    pub fn clear_on_expiry(mut self, clear: bool) -> Self {
        self.clear_on_expiry = clear;
        self
    }

    /// Run the check against the current clock
    pub fn check(&self) -> GuardOutcome {
        self.check_at(now_secs())
    }

    /// Run the check at `now` (seconds since the Unix epoch)
    pub fn check_at(&self, now: i64) -> GuardOutcome {
        let Some(token) = self.tokens.get() else {
            tracing::info!(login = %self.login_path, "No token stored, redirecting to login");
            self.navigator.navigate(&self.login_path);
            return GuardOutcome::Redirected(RedirectReason::Missing);
        };

        let expired = is_expired_at(&token, now);

        if !expired {
            return GuardOutcome::Allowed;
        }

        if self.clear_on_expiry {
            if let Err(e) = self.tokens.clear() {
                tracing::warn!(error = %e, "Failed to clear expired token");
            }
        }
        tracing::info!(login = %self.login_path, "Token expired, redirecting to login");
        self.navigator.navigate(&self.login_path);
        GuardOutcome::Redirected(RedirectReason::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::make_token;
    use crate::browser::BrowsingContext;
    use crate::storage::StaticTokenProvider;

    fn guard_with(
        tokens: StaticTokenProvider,
    ) -> (SessionGuard, Arc<StaticTokenProvider>, Arc<BrowsingContext>) {
        let tokens = Arc::new(tokens);
        let ctx = Arc::new(BrowsingContext::new("/app.html"));
        (SessionGuard::new(tokens.clone(), ctx.clone()), tokens, ctx)
    }

    #[test]
    fn test_missing_token_redirects() {
        let (guard, _, ctx) = guard_with(StaticTokenProvider::empty());

        assert_eq!(
            guard.check(),
            GuardOutcome::Redirected(RedirectReason::Missing)
        );
        assert_eq!(ctx.location(), "/login.html");
    }

    #[test]
    fn test_valid_token_allowed() {
        let token = make_token(serde_json::json!({ "exp": 2_000 }));
        let (guard, _, ctx) = guard_with(StaticTokenProvider::new(token));

        assert!(guard.check_at(1_000).is_allowed());
        assert_eq!(ctx.location(), "/app.html");
        assert_eq!(ctx.redirect_count(), 0);
    }

    #[test]
    fn test_expired_token_redirects_and_keeps_token() {
        let token = make_token(serde_json::json!({ "exp": 500 }));
        let (guard, tokens, ctx) = guard_with(StaticTokenProvider::new(token));

        assert_eq!(
            guard.check_at(1_000),
            GuardOutcome::Redirected(RedirectReason::Expired)
        );
        assert_eq!(ctx.location(), "/login.html");
        assert!(tokens.get().is_some());
    }

    #[test]
    fn test_clear_on_expiry() {
        let token = make_token(serde_json::json!({ "exp": 500 }));
        let (guard, tokens, ctx) = guard_with(StaticTokenProvider::new(token));
        let guard = guard.clear_on_expiry(true).login_path("/signin");

        assert!(!guard.check_at(1_000).is_allowed());
        assert!(tokens.get().is_none());
        assert_eq!(ctx.location(), "/signin");
    }

    #[test]
    fn test_malformed_and_expless_tokens_redirect() {
        for token in ["garbage".to_string(), make_token(serde_json::json!({}))] {
            let (guard, _, ctx) = guard_with(StaticTokenProvider::new(token));
            assert_eq!(
                guard.check_at(0),
                GuardOutcome::Redirected(RedirectReason::Expired)
            );
            assert_eq!(ctx.location(), "/login.html");
        }
    }
}
