//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    static ref CO_MOBILE_REGEX: Regex = Regex::new(r"^3[0-9]{9}$").unwrap();
}

/// Characters tolerated as visual separators in a typed phone number.
const PHONE_SEPARATORS: [char; 4] = ['-', '(', ')', '.'];

/// Returns true if the string looks like `localpart@domain.tld`.
///
/// The check is purely structural: no trimming, no case folding, and the
/// final label must be at least two ASCII letters.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Strips whitespace and the usual separators (`-`, `(`, `)`, `.`) from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !PHONE_SEPARATORS.contains(c))
        .collect()
}

/// Returns true for a Colombian mobile number: exactly 10 digits starting with `3`
/// once separators are removed. Country prefixes are not accepted.
pub fn is_valid_colombian_phone(phone: &str) -> bool {
    CO_MOBILE_REGEX.is_match(&normalize_phone(phone))
}

/// Validates the email shape, producing a user-facing message on failure.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Por favor ingresa un correo electrónico válido".into());
        Err(err)
    }
}

/// Validates a Colombian mobile number, producing a user-facing message on failure.
pub fn validate_colombian_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_colombian_phone(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some(
            "Por favor ingresa un número de WhatsApp colombiano válido (10 dígitos, ej: 3001234567)"
                .into(),
        );
        Err(err)
    }
}
