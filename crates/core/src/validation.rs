//! Input validation rules shared by the API and the worker.
//!
//! Each function returns `Ok(())` (or the normalized value) on success and
//! `CoreError::Validation` with a human-readable message otherwise.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Minimum length of a domain name after trimming.
pub const MIN_DOMAIN_NAME_LENGTH: usize = 2;

/// Maximum length of a domain name after trimming.
pub const MAX_DOMAIN_NAME_LENGTH: usize = 100;

/// Maximum length of a deck name.
pub const MAX_DECK_NAME_LENGTH: usize = 100;

/// Maximum length of a flashcard front.
pub const MAX_FLASHCARD_FRONT_LENGTH: usize = 500;

/// Maximum length of a flashcard back.
pub const MAX_FLASHCARD_BACK_LENGTH: usize = 2_000;

/// Minimum length of generation source text.
pub const MIN_SOURCE_TEXT_LENGTH: usize = 100;

/// Maximum length of generation source text.
pub const MAX_SOURCE_TEXT_LENGTH: usize = 10_000;

/// Minimum password length for registration and reset.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Review ratings run from 0 (complete blackout) to 3 (easy recall).
pub const MAX_REVIEW_RATING: i16 = 3;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Trim and validate a domain name. Returns the trimmed name.
///
/// Length bounds apply to the trimmed value, counted in characters.
pub fn validate_domain_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if !(MIN_DOMAIN_NAME_LENGTH..=MAX_DOMAIN_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Domain name must be between {MIN_DOMAIN_NAME_LENGTH} and \
             {MAX_DOMAIN_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a deck name: non-empty after trimming, capped length.
pub fn validate_deck_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Deck name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_DECK_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Deck name must be at most {MAX_DECK_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate flashcard content: both sides non-empty, capped lengths.
pub fn validate_flashcard(front: &str, back: &str) -> Result<(), CoreError> {
    if front.trim().is_empty() {
        return Err(CoreError::Validation(
            "Flashcard front must not be empty".into(),
        ));
    }
    if back.trim().is_empty() {
        return Err(CoreError::Validation(
            "Flashcard back must not be empty".into(),
        ));
    }
    if front.chars().count() > MAX_FLASHCARD_FRONT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Flashcard front must be at most {MAX_FLASHCARD_FRONT_LENGTH} characters"
        )));
    }
    if back.chars().count() > MAX_FLASHCARD_BACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Flashcard back must be at most {MAX_FLASHCARD_BACK_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate generation source text length.
pub fn validate_source_text(text: &str) -> Result<(), CoreError> {
    let len = text.chars().count();
    if !(MIN_SOURCE_TEXT_LENGTH..=MAX_SOURCE_TEXT_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Source text must be between {MIN_SOURCE_TEXT_LENGTH} and \
             {MAX_SOURCE_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a review rating (0..=3).
pub fn validate_review_rating(rating: i16) -> Result<(), CoreError> {
    if !(0..=MAX_REVIEW_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between 0 and {MAX_REVIEW_RATING}"
        )));
    }
    Ok(())
}

/// Normalize and validate an email address. Returns the lowercased address.
///
/// Shape check only: exactly one `@`, non-empty local part, and a dot in the
/// domain part. Deliverability is the mail server's problem.
pub fn validate_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    let invalid = || CoreError::Validation("Invalid email address".to_string());

    let (local, domain) = normalized.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || normalized.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(normalized)
}

/// Validate password strength (minimum length only).
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_name_bounds() {
        assert!(validate_domain_name("a").is_err());
        assert!(validate_domain_name(" a ").is_err());
        assert!(validate_domain_name(&"x".repeat(101)).is_err());

        assert_eq!(validate_domain_name("ab").unwrap(), "ab");
        assert_eq!(validate_domain_name(&"x".repeat(100)).unwrap(), "x".repeat(100));
    }

    #[test]
    fn test_domain_name_is_trimmed_before_length_check() {
        // 101 chars raw, 100 after trimming: valid.
        let padded = format!(" {}", "x".repeat(100));
        assert_eq!(validate_domain_name(&padded).unwrap(), "x".repeat(100));

        // Whitespace alone never passes.
        assert!(validate_domain_name("   ").is_err());
    }

    #[test]
    fn test_flashcard_content() {
        assert!(validate_flashcard("Q", "A").is_ok());
        assert!(validate_flashcard("", "A").is_err());
        assert!(validate_flashcard("Q", "  ").is_err());
        assert!(validate_flashcard(&"q".repeat(501), "A").is_err());
        assert!(validate_flashcard("Q", &"a".repeat(2001)).is_err());
    }

    #[test]
    fn test_source_text_bounds() {
        assert!(validate_source_text(&"s".repeat(99)).is_err());
        assert!(validate_source_text(&"s".repeat(100)).is_ok());
        assert!(validate_source_text(&"s".repeat(10_000)).is_ok());
        assert!(validate_source_text(&"s".repeat(10_001)).is_err());
    }

    #[test]
    fn test_review_rating_range() {
        for rating in 0..=3 {
            assert!(validate_review_rating(rating).is_ok());
        }
        assert!(validate_review_rating(-1).is_err());
        assert!(validate_review_rating(4).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert_eq!(validate_email(" User@Example.COM ").unwrap(), "user@example.com");
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }
}
