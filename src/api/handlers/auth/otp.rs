//! One-time code generation.

use rand::{rngs::OsRng, Rng};

/// Generate a 6-digit code, uniform over 000000-999999, zero-padded.
/// `OsRng` is the OS CSPRNG, so codes are not guessable from prior output.
pub(super) fn generate_code() -> String {
    let value: u32 = OsRng.gen_range(0..1_000_000);
    format!("{value:06}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn codes_stay_in_range() {
        for _ in 0..100 {
            let value: u32 = generate_code().parse().expect("numeric code");
            assert!(value < 1_000_000);
        }
    }

    #[test]
    fn codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
        assert!(codes.len() > 1, "100 draws should not all collide");
    }
}
