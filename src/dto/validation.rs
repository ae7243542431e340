//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest abbreviation accepted for a player.
const MAX_ABBREVIATION_LEN: usize = 16;

/// Validates that a player abbreviation is non-blank, short, and free of whitespace.
///
/// # Examples
///
/// ```ignore
/// validate_abbreviation("JSM")  // Ok
/// validate_abbreviation("")     // Err - empty
/// validate_abbreviation("J SM") // Err - whitespace
/// ```
pub fn validate_abbreviation(abbreviation: &str) -> Result<(), ValidationError> {
    if abbreviation.is_empty() {
        let mut err = ValidationError::new("abbreviation_empty");
        err.message = Some("Player abbreviation must not be empty".into());
        return Err(err);
    }

    let length = abbreviation.chars().count();
    if length > MAX_ABBREVIATION_LEN {
        let mut err = ValidationError::new("abbreviation_length");
        err.message = Some(
            format!(
                "Player abbreviation must be at most {MAX_ABBREVIATION_LEN} characters (got {length})"
            )
            .into(),
        );
        return Err(err);
    }

    if abbreviation.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("abbreviation_format");
        err.message = Some("Player abbreviation must not contain whitespace".into());
        return Err(err);
    }

    Ok(())
}
