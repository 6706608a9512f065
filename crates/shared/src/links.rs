//! Outbound link helpers (WhatsApp click-to-chat, mailto).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::validation::normalize_phone;

/// Colombia's international dialling code, prepended to local mobile numbers.
pub const COLOMBIA_DIAL_CODE: &str = "57";

/// Everything except the characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use inside a URL query component.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds a `wa.me` link for a local Colombian number, optionally with a prefilled message.
pub fn whatsapp_link(local_phone: &str, text: Option<&str>) -> String {
    let base = format!(
        "https://wa.me/{}{}",
        COLOMBIA_DIAL_CODE,
        normalize_phone(local_phone)
    );
    match text {
        Some(text) => format!("{}?text={}", base, encode_uri_component(text)),
        None => base,
    }
}

/// Builds a `mailto:` link.
pub fn mailto_link(email: &str) -> String {
    format!("mailto:{}", email)
}
