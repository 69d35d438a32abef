//! Failure taxonomy for the lifecycle operations.
//!
//! Kinds are stable machine-readable strings; callers branch on `error`,
//! humans read `message`. Precondition and credential failures are final;
//! `dispatch_failed` and `storage` are transient and safe to retry because
//! the flows never partially commit.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    AlreadyRegistered,
    #[error("No pending registration found")]
    NoPendingRegistration,
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error("OTP expired")]
    OtpExpired,
    // Unknown email and wrong password collapse into this one kind so the
    // login endpoint cannot be used for account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email not found")]
    EmailNotFound,
    #[error("No OTP found. Request a new one.")]
    NoOtpFound,
    #[error("{0}")]
    Validation(String),
    #[error("Failed to send one-time code")]
    Dispatch(#[source] anyhow::Error),
    #[error("Storage error")]
    Storage(#[from] anyhow::Error),
}

/// JSON error payload.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl AuthError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "already_registered",
            Self::NoPendingRegistration => "no_pending_registration",
            Self::InvalidOtp => "invalid_otp",
            Self::OtpExpired => "otp_expired",
            Self::InvalidCredentials => "invalid_credentials",
            Self::EmailNotFound => "email_not_found",
            Self::NoOtpFound => "no_otp_found",
            Self::Validation(_) => "validation",
            Self::Dispatch(_) => "dispatch_failed",
            Self::Storage(_) => "storage",
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::AlreadyRegistered => StatusCode::CONFLICT,
            Self::NoPendingRegistration | Self::EmailNotFound | Self::NoOtpFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidOtp | Self::OtpExpired | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Dispatch(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether a caller may retry without risking duplicate side effects.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Dispatch(_) | Self::Storage(_))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::Dispatch(source) => error!("OTP dispatch failed: {source:#}"),
            Self::Storage(source) => error!("Storage failure: {source:#}"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(AuthError::AlreadyRegistered.kind(), "already_registered");
        assert_eq!(
            AuthError::NoPendingRegistration.kind(),
            "no_pending_registration"
        );
        assert_eq!(AuthError::InvalidOtp.kind(), "invalid_otp");
        assert_eq!(AuthError::OtpExpired.kind(), "otp_expired");
        assert_eq!(AuthError::InvalidCredentials.kind(), "invalid_credentials");
        assert_eq!(AuthError::EmailNotFound.kind(), "email_not_found");
        assert_eq!(AuthError::NoOtpFound.kind(), "no_otp_found");
        assert_eq!(AuthError::Validation(String::new()).kind(), "validation");
        assert_eq!(AuthError::Dispatch(anyhow!("x")).kind(), "dispatch_failed");
        assert_eq!(AuthError::Storage(anyhow!("x")).kind(), "storage");
    }

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(AuthError::AlreadyRegistered.status(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::NoPendingRegistration.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AuthError::EmailNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::NoOtpFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::InvalidOtp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::OtpExpired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Dispatch(anyhow!("x")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AuthError::Storage(anyhow!("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_dispatch_and_storage_are_transient() {
        assert!(AuthError::Dispatch(anyhow!("x")).is_transient());
        assert!(AuthError::Storage(anyhow!("x")).is_transient());
        assert!(!AuthError::InvalidOtp.is_transient());
        assert!(!AuthError::AlreadyRegistered.is_transient());
    }

    #[test]
    fn login_failure_message_does_not_leak_which_check_failed() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
