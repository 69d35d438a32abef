//! Request and response payloads for the auth endpoints.
//!
//! Password fields deserialize into [`SecretString`] so the plaintext never
//! shows up in `Debug` output or traces; everything else round-trips through
//! serde as plain strings.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterVerifyRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    #[schema(value_type = String)]
    pub new_password: SecretString,
}

/// Generic success envelope for operations that only confirm.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn register_request_deserializes() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Alice","email":"alice@example.com","password":"pw123456"}"#,
        )
        .expect("deserialize");
        assert_eq!(payload.name, "Alice");
        assert_eq!(payload.email, "alice@example.com");
        assert_eq!(payload.password.expose_secret(), "pw123456");
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let payload: LoginRequest =
            serde_json::from_str(r#"{"email":"a@example.com","password":"hunter2"}"#)
                .expect("deserialize");
        let rendered = format!("{payload:?}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn login_response_serializes_all_fields() {
        let response = LoginResponse {
            message: "Login successful".to_string(),
            user_id: Uuid::nil(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["message"], "Login successful");
        assert_eq!(value["user_id"], Uuid::nil().to_string());
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "alice@example.com");
    }

    #[test]
    fn message_response_serializes() {
        let value = serde_json::to_value(MessageResponse {
            message: "OTP sent to alice@example.com".to_string(),
        })
        .expect("serialize");
        assert_eq!(value["message"], "OTP sent to alice@example.com");
    }
}
