// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token persistence
//!
//! [`Storage`] mirrors the browser `localStorage` API. [`TokenProvider`] is the
//! narrow view the guard and the client need: read the token, write it after
//! login, drop it when the server rejects it.

mod file;
mod memory;
mod provider;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use provider::{StaticTokenProvider, StorageTokenProvider, TokenProvider};

use crate::error::Result;

/// Default storage key holding the token
pub const DEFAULT_TOKEN_KEY: &str = "jtck";

/// Key/value string storage
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove every key
    fn clear(&self) -> Result<()>;

    /// Number of stored keys
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
