//! # Varco (OTP-Gated Account Lifecycle)
//!
//! `varco` gates two sensitive identity transitions behind short-lived
//! one-time codes: turning an unverified signup into an active account, and
//! resetting a forgotten password. It also performs plain credential
//! verification at login.
//!
//! ## Lifecycle
//!
//! - **Registration:** a signup is staged in `pending_registrations` together
//!   with its code and expiry; the account row is created only when the code
//!   is verified. Deleting the staging row *is* the consumption of the code.
//! - **Password reset:** each request appends a challenge row; only the newest
//!   row for an account is ever consulted, and a successful reset purges the
//!   whole challenge history so no earlier code can be replayed.
//!
//! All cross-request coordination lives in Postgres: staging rows are replaced
//! with a single upsert and consumed with `DELETE .. RETURNING` inside a
//! transaction, so concurrent requests for the same email are resolved by the
//! storage layer rather than in-process locks.
//!
//! Passwords are hashed with Argon2id before they are staged or stored;
//! plaintext never reaches the database.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
