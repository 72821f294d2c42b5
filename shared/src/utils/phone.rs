//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Subscriber number: exactly 10 digits, leading 9 (national mobile range)
static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^9[0-9]{9}$").unwrap()
});

/// Check if a phone number is a valid 10-digit mobile subscriber number
pub fn is_valid_phone(phone: &str) -> bool {
    MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for display (e.g. 912****678)
pub fn mask_phone(phone: &str) -> String {
    if phone.len() >= 7 && phone.chars().all(|c| c.is_ascii_digit()) {
        format!("{}****{}", &phone[0..3], &phone[phone.len() - 3..])
    } else {
        "****".to_string()
    }
}
