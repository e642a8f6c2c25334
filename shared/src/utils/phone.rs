//! Phone number utilities

/// Number of digits in an accepted mobile number
pub const PHONE_DIGITS: usize = 10;

/// Keep only ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a phone number by removing every non-digit character
pub fn normalize_phone_number(phone: &str) -> String {
    digits_only(phone)
}

/// Check if a phone number has exactly ten digits once formatting is stripped
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone_number(phone).len() == PHONE_DIGITS
}

/// Mask a phone number for display and logs (e.g., 987****210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 3..]
        )
    } else {
        "****".to_string()
    }
}
