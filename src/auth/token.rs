// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JWT payload decoding
//!
//! Only the payload segment is decoded. Signatures are not checked; the
//! server verifies them, the client only needs the expiry to decide whether a
//! stored token is worth sending.

use std::collections::HashMap;

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seconds since the Unix epoch; fractional values are allowed
pub type NumericDate = f64;

/// Decoded JWT claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<NumericDate>,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<NumericDate>,
    /// Not before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<NumericDate>,
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Everything else
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Expiry as a timestamp
    ///
    /// `None` when there is no `exp` or it lies outside chrono's date range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        if !exp.is_finite() {
            return None;
        }
        let secs = exp.floor();
        let nanos = (((exp - secs) * 1e9) as u32).min(999_999_999);
        Utc.timestamp_opt(secs as i64, nanos).single()
    }

    /// Whole seconds left before expiry at `now`, negative once expired
    ///
    /// Saturates at the `i64` bounds.
    pub fn remaining(&self, now: i64) -> Option<i64> {
        self.exp.map(|exp| (exp - now as f64) as i64)
    }

    /// Expiry check at `now`; a token without `exp` counts as expired
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.exp {
            Some(exp) => exp < now as f64,
            None => true,
        }
    }
}

/// Current time in whole seconds since the Unix epoch
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Decode the payload of a JWT
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::decode("expected three dot-separated segments"));
    };

    if payload.is_empty() {
        return Err(Error::decode("empty payload segment"));
    }

    let bytes = if payload.ends_with('=') {
        URL_SAFE.decode(payload)
    } else {
        URL_SAFE_NO_PAD.decode(payload)
    }
    .map_err(|e| Error::decode(format!("invalid base64 payload: {}", e)))?;

    serde_json::from_slice(&bytes).map_err(|e| Error::decode(format!("invalid JSON payload: {}", e)))
}

/// Whether `token` is expired now
///
/// Fails closed: tokens that cannot be decoded, or that carry no `exp`, are
/// reported as expired.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_secs())
}

/// Whether `token` is expired at `now` (seconds since the Unix epoch)
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => {
            if claims.exp.is_none() {
                tracing::warn!("Token has no exp claim, treating as expired");
            }
            claims.is_expired_at(now)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error decoding token");
            true
        }
    }
}
