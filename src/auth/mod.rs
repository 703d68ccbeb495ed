// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token inspection and the session guard

mod guard;
mod token;

pub use guard::{GuardOutcome, RedirectReason, SessionGuard};
pub use token::{decode_claims, is_expired, is_expired_at, now_secs, Claims, NumericDate};

#[cfg(test)]
pub(crate) use token::tests::make_token;
