//! Common validation utilities

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string is exactly `len` ASCII digits
    pub fn is_digits_of_len(value: &str, len: usize) -> bool {
        value.len() == len && value.chars().all(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::validators;

    #[test]
    fn test_not_empty() {
        assert!(validators::not_empty(" a "));
        assert!(!validators::not_empty(""));
        assert!(!validators::not_empty("   "));
    }

    #[test]
    fn test_is_digits_of_len() {
        assert!(validators::is_digits_of_len("123456", 6));
        assert!(!validators::is_digits_of_len("12345a", 6));
        assert!(!validators::is_digits_of_len("1234567", 6));
        assert!(!validators::is_digits_of_len("", 6));
    }
}
