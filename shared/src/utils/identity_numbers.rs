//! Government identity number formats
//!
//! Two identifiers are collected during intake: a 12-digit national (civil)
//! ID and an alphanumeric tax ID laid out as five letters, four digits and a
//! trailing letter (for example `ABCDE1234F`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::phone::digits_only;

/// Number of digits in a national ID
pub const NATIONAL_ID_DIGITS: usize = 12;

static TAX_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap()
});

/// Strip formatting from a national ID
pub fn normalize_national_id(value: &str) -> String {
    digits_only(value)
}

/// Check if a national ID has exactly twelve digits once formatting is stripped
pub fn is_valid_national_id(value: &str) -> bool {
    normalize_national_id(value).len() == NATIONAL_ID_DIGITS
}

/// Tax IDs are compared in upper case
pub fn normalize_tax_id(value: &str) -> String {
    value.to_uppercase()
}

/// Check a tax ID against the 5 letters / 4 digits / 1 letter layout
pub fn is_valid_tax_id(value: &str) -> bool {
    TAX_ID_REGEX.is_match(&normalize_tax_id(value))
}
