// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Navigation targets

use parking_lot::RwLock;

/// Something that can move the user to another location
pub trait Navigator: Send + Sync {
    /// Navigate to `location`
    fn navigate(&self, location: &str);
}

/// Recording browsing context
///
/// Keeps the current location and every location visited, in order.
#[derive(Debug)]
pub struct BrowsingContext {
    state: RwLock<History>,
}

#[derive(Debug)]
struct History {
    current: String,
    visited: Vec<String>,
}

impl BrowsingContext {
    /// Create a context sitting at `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            state: RwLock::new(History {
                current: initial.clone(),
                visited: vec![initial],
            }),
        }
    }

    /// Current location
    pub fn location(&self) -> String {
        self.state.read().current.clone()
    }

    /// Every location visited, initial one first
    pub fn history(&self) -> Vec<String> {
        self.state.read().visited.clone()
    }

    /// Number of navigations since creation
    pub fn redirect_count(&self) -> usize {
        self.state.read().visited.len() - 1
    }
}

impl Default for BrowsingContext {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for BrowsingContext {
    fn navigate(&self, location: &str) {
        let mut state = self.state.write();
        state.current = location.to_string();
        state.visited.push(location.to_string());
    }
}

/// Navigator that only reports the redirect
///
/// For headless hosts such as the CLI, where there is no page to move.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, location: &str) {
        tracing::warn!(location, "Redirecting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browsing_context() {
        let ctx = BrowsingContext::new("/dashboard.html");
        assert_eq!(ctx.location(), "/dashboard.html");
        assert_eq!(ctx.redirect_count(), 0);

        ctx.navigate("/login.html");
        assert_eq!(ctx.location(), "/login.html");
        assert_eq!(ctx.history(), vec!["/dashboard.html", "/login.html"]);
        assert_eq!(ctx.redirect_count(), 1);
    }

    #[test]
    fn test_default_context() {
        assert_eq!(BrowsingContext::default().location(), "/");
    }
}
