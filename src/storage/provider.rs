// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token providers

use std::sync::Arc;

use parking_lot::RwLock;

use super::{Storage, DEFAULT_TOKEN_KEY};
use crate::error::Result;

/// Source of the current bearer token
///
/// Implementations are read on every request, never cached by callers.
pub trait TokenProvider: Send + Sync {
    /// Current token, `None` when logged out
    fn get(&self) -> Option<String>;

    /// Store a new token
    fn set(&self, token: &str) -> Result<()>;

    /// Forget the token
    fn clear(&self) -> Result<()>;
}

/// Token kept under one key of a [`Storage`]
#[derive(Clone)]
pub struct StorageTokenProvider {
    storage: Arc<dyn Storage>,
    key: String,
}

impl StorageTokenProvider {
    /// Provider reading `key` from `storage`
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Provider using the default `jtck` key
    pub fn with_default_key(storage: Arc<dyn Storage>) -> Self {
        Self::new(storage, DEFAULT_TOKEN_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for StorageTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageTokenProvider")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl TokenProvider for StorageTokenProvider {
    fn get(&self) -> Option<String> {
        // An empty string is as good as no token
        self.storage.get_item(&self.key).filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) -> Result<()> {
        self.storage.set_item(&self.key, token)
    }

    fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}

/// In-memory token holder
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl TokenProvider for StaticTokenProvider {
    fn get(&self) -> Option<String> {
        self.token.read().clone().filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_storage_provider_reads_live_value() {
        let storage = Arc::new(MemoryStorage::new());
        let provider = StorageTokenProvider::with_default_key(storage.clone());
        assert_eq!(provider.key(), "jtck");
        assert!(provider.get().is_none());

        storage.set_item("jtck", "first").unwrap();
        assert_eq!(provider.get().as_deref(), Some("first"));

        provider.set("second").unwrap();
        assert_eq!(storage.get_item("jtck").as_deref(), Some("second"));

        provider.clear().unwrap();
        assert!(storage.get_item("jtck").is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let storage = Arc::new(MemoryStorage::with_items([("token", "")]));
        let provider = StorageTokenProvider::new(storage, "token");
        assert!(provider.get().is_none());
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.get().as_deref(), Some("abc"));
        provider.clear().unwrap();
        assert!(provider.get().is_none());
        provider.set("def").unwrap();
        assert_eq!(provider.get().as_deref(), Some("def"));
    }
}
