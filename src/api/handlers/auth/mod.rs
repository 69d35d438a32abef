//! OTP-gated account lifecycle handlers.
//!
//! Two transitions are gated by short-lived 6-digit codes:
//!
//! - **Registration** stages the signup (name, email, password digest, code,
//!   expiry) in `pending_registrations`; the account exists only after the
//!   code is verified. Re-requesting replaces the staged row atomically, so
//!   the old code dies the moment a new one is issued.
//! - **Password reset** appends a challenge row per request; only the newest
//!   row counts, and a successful reset purges every challenge for the
//!   account so no stale code can ever be replayed.
//!
//! Verification orderings differ deliberately between the two flows:
//! registration checks the submitted code before expiry, the reset path
//! checks expiry before the code. Both orderings are load-bearing and each
//! has its own tests.
//!
//! No handler keeps state between requests; every invariant is re-derived
//! from Postgres, and the conflict points (replace-on-reissue,
//! delete-on-consume, purge-on-reset) are single statements or transactions.

pub mod error;
pub mod login;
mod otp;
mod password;
pub mod register;
pub mod reset;
mod storage;
pub mod types;
mod utils;

pub use error::AuthError;

const DEFAULT_OTP_TTL_SECONDS: i64 = 10 * 60;

/// Tunables for the lifecycle handlers.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    otp_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            otp_ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
        }
    }

    #[must_use]
    pub const fn with_otp_ttl_seconds(mut self, seconds: i64) -> Self {
        self.otp_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub const fn otp_ttl_seconds(&self) -> i64 {
        self.otp_ttl_seconds
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}
