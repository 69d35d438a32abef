//! Outbound one-time code delivery.
//!
//! Issuing handlers build an `OtpMessage` and hand it to an `OtpSender`
//! before acknowledging the request; a sender failure is surfaced to the
//! caller as a dispatch error, so no code is silently lost. The default
//! sender for local dev is `LogOtpSender`, which logs and returns `Ok(())`.

use anyhow::Result;
use tracing::info;

/// Which identity transition a code is gating. Affects subject/body wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpPurpose {
    Register,
    Reset,
}

impl OtpPurpose {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Reset => "reset",
        }
    }
}

#[derive(Clone, Debug)]
pub struct OtpMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

/// Build the outbound message for a freshly issued code.
#[must_use]
pub fn build_otp_message(recipient: &str, code: &str, purpose: OtpPurpose) -> OtpMessage {
    let (subject, body) = match purpose {
        OtpPurpose::Register => (
            "Your Registration OTP Code",
            format!(
                "<h2>Account Verification OTP</h2>\
                 <p>Welcome! Your 6-digit OTP code for registration is:</p>\
                 <h1>{code}</h1>\
                 <p>This code will expire in 10 minutes.</p>"
            ),
        ),
        OtpPurpose::Reset => (
            "Your Password Reset OTP",
            format!(
                "<h2>Password Reset OTP</h2>\
                 <p>Your 6-digit OTP code is:</p>\
                 <h1>{code}</h1>\
                 <p>This code will expire in 10 minutes.</p>"
            ),
        ),
    };

    OtpMessage {
        to_email: recipient.to_string(),
        subject: subject.to_string(),
        body,
        code: code.to_string(),
        purpose,
    }
}

/// Delivery abstraction; implementations decide the transport.
pub trait OtpSender: Send + Sync {
    /// Deliver a message or return an error to fail the issuing request.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery fails; the caller reports it as a
    /// dispatch failure
    fn send(&self, message: &OtpMessage) -> Result<()>;
}

/// Local dev sender that logs the message instead of delivering it.
#[derive(Clone, Debug)]
pub struct LogOtpSender;

impl OtpSender for LogOtpSender {
    fn send(&self, message: &OtpMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            purpose = message.purpose.as_str(),
            subject = %message.subject,
            code = %message.code,
            "otp send stub"
        );
        Ok(())
    }
}
