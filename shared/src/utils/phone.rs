//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a national subscriber number without country code
pub const NATIONAL_NUMBER_LENGTH: usize = 10;

// Indian mobile numbers: 10 digits starting with 6-9
static NATIONAL_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[6-9]\d{9}$").unwrap()
});

/// Canonicalize a phone number into the key used for OTP records.
///
/// All non-digit characters are removed (including a leading `+`). A bare
/// 10-digit national number gets `country_code` prefixed; any other length
/// is kept as-is. The result is empty when the input has no digits.
pub fn normalize_phone_number(phone: &str, country_code: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == NATIONAL_NUMBER_LENGTH {
        format!("{}{}", country_code, digits)
    } else {
        digits
    }
}

/// Check if a phone number is a valid 10-digit national mobile number
pub fn is_valid_national_mobile(phone: &str) -> bool {
    NATIONAL_MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs (e.g., 919****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 7 {
        format!("{}****{}", &digits[0..3], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}
