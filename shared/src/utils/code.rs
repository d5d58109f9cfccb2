//! Verification code format utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Six decimal digits from an authenticator app
static TOTP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

// Eight alphanumeric characters once separators are removed
static BACKUP_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{8}$").unwrap());

/// Strip hyphens and whitespace a user may have typed or pasted
pub fn normalize_backup_code(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Check if a code is a well-formed authenticator code
pub fn is_valid_totp(code: &str) -> bool {
    TOTP_REGEX.is_match(code.trim())
}

/// Check if a code is a well-formed backup code
pub fn is_valid_backup_code(code: &str) -> bool {
    BACKUP_CODE_REGEX.is_match(&normalize_backup_code(code))
}

/// Check that every character is an ASCII digit
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Mask a code for display or logs (e.g., 12****)
pub fn mask_code(code: &str) -> String {
    let visible = code.chars().count().min(2);
    let head: String = code.chars().take(visible).collect();
    format!("{}{}", head, "*".repeat(code.chars().count() - visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totp_format() {
        assert!(is_valid_totp("123456"));
        assert!(is_valid_totp(" 000000 "));
        assert!(!is_valid_totp("12345"));
        assert!(!is_valid_totp("1234567"));
        assert!(!is_valid_totp("12a456"));
        assert!(!is_valid_totp("１２３４５６"));
    }

    #[test]
    fn test_backup_code_normalization() {
        assert_eq!(normalize_backup_code("abcd-1234"), "abcd1234");
        assert_eq!(normalize_backup_code(" AB CD-12 34 "), "ABCD1234");
        assert!(is_valid_backup_code("ABCD-1234"));
        assert!(is_valid_backup_code("ab cd 12 34"));
        assert!(!is_valid_backup_code("ABCD-123"));
        assert!(!is_valid_backup_code("ABCD_1234"));
    }

    #[test]
    fn test_mask_code() {
        assert_eq!(mask_code("123456"), "12****");
        assert_eq!(mask_code("7"), "7");
        assert_eq!(mask_code(""), "");
    }

    #[test]
    fn test_is_all_digits() {
        assert!(is_all_digits("42"));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("4 2"));
    }
}
