//! Unit tests for verification attempt validation

use crate::domain::entities::verification_attempt::*;
use crate::errors::ValidationError;

#[test]
fn test_totp_accepts_six_digits() {
    let attempt = VerificationAttempt::totp("012345").unwrap();
    assert_eq!(attempt.code(), "012345");
    assert_eq!(attempt.mode, VerificationMode::Totp);
}

#[test]
fn test_totp_trims_surrounding_whitespace() {
    let attempt = VerificationAttempt::totp("  654321\n").unwrap();
    assert_eq!(attempt.code(), "654321");
}

#[test]
fn test_totp_rejects_wrong_length() {
    for code in ["12345", "1234567", "1"] {
        match VerificationAttempt::totp(code) {
            Err(ValidationError::InvalidLength { expected, actual, .. }) => {
                assert_eq!(expected, TOTP_CODE_LENGTH);
                assert_eq!(actual, code.len());
            }
            other => panic!("Expected length error for {code:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_totp_rejects_non_digits() {
    assert!(matches!(
        VerificationAttempt::totp("12a456"),
        Err(ValidationError::InvalidCharacters { .. })
    ));
    assert!(matches!(
        VerificationAttempt::totp("12 456"),
        Err(ValidationError::InvalidCharacters { .. })
    ));
}

#[test]
fn test_empty_codes_rejected() {
    assert!(matches!(
        VerificationAttempt::totp("   "),
        Err(ValidationError::EmptyCode { .. })
    ));
    assert!(matches!(
        VerificationAttempt::backup_code(" - - "),
        Err(ValidationError::EmptyCode { .. })
    ));
}

#[test]
fn test_backup_code_normalizes_separators() {
    let attempt = VerificationAttempt::backup_code("ab12-CD34").unwrap();
    assert_eq!(attempt.code(), "ab12CD34");

    let attempt = VerificationAttempt::backup_code("AB12 CD34").unwrap();
    assert_eq!(attempt.code(), "AB12CD34");
    assert!(attempt.mode.is_backup());
}

#[test]
fn test_backup_code_rejects_wrong_length_after_normalization() {
    match VerificationAttempt::backup_code("AB12-CD3") {
        Err(ValidationError::InvalidLength { expected, actual, .. }) => {
            assert_eq!(expected, BACKUP_CODE_LENGTH);
            assert_eq!(actual, 7);
        }
        other => panic!("Expected length error, got {other:?}"),
    }
}

#[test]
fn test_backup_code_rejects_symbols() {
    assert!(matches!(
        VerificationAttempt::backup_code("AB12_CD3"),
        Err(ValidationError::InvalidCharacters { .. })
    ));
}

#[test]
fn test_debug_masks_code() {
    let attempt = VerificationAttempt::totp("987654").unwrap();
    let debug = format!("{attempt:?}");
    assert!(!debug.contains("987654"));
    assert!(debug.contains("98****"));
}

#[test]
fn test_mode_toggle() {
    assert_eq!(VerificationMode::Totp.toggled(), VerificationMode::BackupCode);
    assert_eq!(VerificationMode::BackupCode.toggled(), VerificationMode::Totp);
    assert_eq!(VerificationMode::default(), VerificationMode::Totp);
}

#[test]
fn test_accepts_exactly_the_shared_code_formats() {
    for code in ["123456", " 000000 ", "12345", "１２３４５６", "12a456", ""] {
        assert_eq!(
            VerificationAttempt::totp(code).is_ok(),
            ts_shared::code::is_valid_totp(code),
            "totp {code:?}"
        );
    }
    for code in ["ABCD-1234", "ab cd 12 34", "ÄBCD1234", "ABCD_123", "ABCD123", ""] {
        assert_eq!(
            VerificationAttempt::backup_code(code).is_ok(),
            ts_shared::code::is_valid_backup_code(code),
            "backup {code:?}"
        );
    }
}
