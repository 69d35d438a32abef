//! Input validation helpers shared by the auth handlers.

use regex::Regex;

pub(super) const NAME_MIN_LENGTH: usize = 2;
pub(super) const NAME_MAX_LENGTH: usize = 100;
pub(super) const PASSWORD_MIN_LENGTH: usize = 6;
pub(super) const PASSWORD_MAX_LENGTH: usize = 100;
pub(super) const OTP_MIN_LENGTH: usize = 4;
pub(super) const OTP_MAX_LENGTH: usize = 6;

/// Trim surrounding whitespace. Addresses are stored and matched
/// case-sensitively, so no case folding happens here.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Basic email format check on already-normalized input.
pub(super) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

pub(super) fn valid_name(name: &str) -> bool {
    let length = name.chars().count();
    (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length)
}

pub(super) fn valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length)
}

/// Length check only; a wrong-but-well-formed code is reported as an OTP
/// mismatch by the flow itself, not as a validation failure.
pub(super) fn valid_otp(otp: &str) -> bool {
    let length = otp.chars().count();
    (OTP_MIN_LENGTH..=OTP_MAX_LENGTH).contains(&length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_only() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "Alice@Example.COM");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn valid_name_bounds() {
        assert!(!valid_name("a"));
        assert!(valid_name("ab"));
        assert!(valid_name(&"x".repeat(100)));
        assert!(!valid_name(&"x".repeat(101)));
    }

    #[test]
    fn valid_password_bounds() {
        assert!(!valid_password("short"));
        assert!(valid_password("pw1234"));
        assert!(valid_password(&"p".repeat(100)));
        assert!(!valid_password(&"p".repeat(101)));
    }

    #[test]
    fn valid_otp_bounds() {
        assert!(!valid_otp("123"));
        assert!(valid_otp("1234"));
        assert!(valid_otp("482910"));
        assert!(!valid_otp("1234567"));
    }
}
