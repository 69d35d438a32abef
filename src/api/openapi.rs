//! OpenAPI document for the service, served by Swagger UI.

use utoipa::OpenApi;

use super::handlers::auth::error::ErrorBody;
use super::handlers::auth::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterVerifyRequest, ResetPasswordRequest, VerifyOtpRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "varco",
        description = "OTP-gated account registration, login and password reset"
    ),
    paths(
        crate::api::handlers::root::root,
        crate::api::handlers::health::health,
        crate::api::handlers::auth::register::register_request,
        crate::api::handlers::auth::register::register_verify,
        crate::api::handlers::auth::login::login,
        crate::api::handlers::auth::reset::forgot_password,
        crate::api::handlers::auth::reset::verify_otp,
        crate::api::handlers::auth::reset::reset_password,
    ),
    components(schemas(
        RegisterRequest,
        RegisterVerifyRequest,
        LoginRequest,
        LoginResponse,
        ForgotPasswordRequest,
        VerifyOtpRequest,
        ResetPasswordRequest,
        MessageResponse,
        ErrorBody,
    )),
    tags(
        (name = "auth", description = "OTP-gated account lifecycle"),
        (name = "health", description = "Service health and build info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_all_auth_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/v1/auth/register-request",
            "/v1/auth/register-verify",
            "/v1/auth/login",
            "/v1/auth/forgot-password",
            "/v1/auth/verify-otp",
            "/v1/auth/reset-password",
            "/health",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
