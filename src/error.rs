// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for tokenguard
//!
//! Transport failures keep their context (URL, status, response body) so that
//! callers can decide how to handle them. Token decode failures are surfaced
//! by [`crate::auth::decode_claims`] but swallowed by the guard predicate.

use thiserror::Error;

/// Result type alias for tokenguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tokenguard
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Token could not be decoded
    #[error("Token decode error: {0}")]
    TokenDecode(String),

    /// Server rejected the credentials (401)
    #[error("Unauthorized: {url}")]
    Unauthorized { url: String, body: Option<String> },

    /// Non-success status other than 401
    #[error("Request to {url} failed with status {status}")]
    Status {
        url: String,
        status: u16,
        body: Option<String>,
    },

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Request aborted by an interceptor
    #[error("Request aborted: {0}")]
    Aborted(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a token decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::TokenDecode(msg.into())
    }

    /// Create an error for a non-success HTTP status
    ///
    /// 401 maps to [`Error::Unauthorized`], everything else to [`Error::Status`].
    pub fn from_status(url: impl Into<String>, status: u16, body: Option<String>) -> Self {
        let url = url.into();
        if status == 401 {
            Error::Unauthorized { url, body }
        } else {
            Error::Status { url, status, body }
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: None,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a 401
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Unauthorized { .. } => true,
            Error::Http(e) => e.status().map(|s| s.as_u16() == 401).unwrap_or(false),
            _ => false,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { .. } => Some(401),
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Unauthorized { url, .. } => Some(url),
            Error::Status { url, .. } => Some(url),
            Error::Timeout { url: Some(u), .. } => Some(u),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }

    /// Get the response body carried by a status error
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Unauthorized { body, .. } | Error::Status { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add URL context to error
    fn with_url(self, url: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_url(self, url: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::Timeout {
                    operation,
                    duration_ms,
                    ..
                } => Error::Timeout {
                    operation,
                    duration_ms,
                    url: Some(url.to_string()),
                },
                other => other,
            }
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = Error::from_status("https://api.example.com/users", 401, None);
        assert!(err.is_unauthorized());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), Some(401));

        let err = Error::from_status(
            "https://api.example.com/users",
            503,
            Some("down".to_string()),
        );
        assert!(!err.is_unauthorized());
        assert!(err.is_server_error());
        assert_eq!(err.response_body(), Some("down"));
        assert_eq!(err.url(), Some("https://api.example.com/users"));
    }

    #[test]
    fn test_timeout_context() {
        let res: std::result::Result<(), Error> = Err(Error::timeout("request", 10_000));
        let err = res.with_url("https://api.example.com/slow").unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.url(), Some("https://api.example.com/slow"));
    }

    #[test]
    fn test_context_message() {
        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("loading storage").unwrap_err();
        assert_eq!(err.to_string(), "loading storage: boom");
    }
}
