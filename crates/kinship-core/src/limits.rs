//! Input validation limits for person records and traversal requests

/// Maximum length for a person's name (256 chars)
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length for a date of birth (64 chars)
pub const MAX_DATE_LEN: usize = 64;

/// Maximum length for a birthplace (256 chars)
pub const MAX_PLACE_LEN: usize = 256;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyDateOfBirth,
    NameTooLong { len: usize, max: usize },
    DateTooLong { len: usize, max: usize },
    PlaceTooLong { len: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::EmptyDateOfBirth => write!(f, "Date of birth cannot be empty"),
            Self::NameTooLong { len, max } => {
                write!(f, "Name too long: {} chars (max {})", len, max)
            }
            Self::DateTooLong { len, max } => {
                write!(f, "Date of birth too long: {} chars (max {})", len, max)
            }
            Self::PlaceTooLong { len, max } => {
                write!(f, "Birthplace too long: {} chars (max {})", len, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a person's name
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validate a date of birth
pub fn validate_date_of_birth(date: &str) -> Result<(), ValidationError> {
    if date.trim().is_empty() {
        return Err(ValidationError::EmptyDateOfBirth);
    }
    if date.len() > MAX_DATE_LEN {
        return Err(ValidationError::DateTooLong {
            len: date.len(),
            max: MAX_DATE_LEN,
        });
    }
    Ok(())
}

/// Validate a birthplace (may be empty)
pub fn validate_birthplace(place: &str) -> Result<(), ValidationError> {
    if place.len() > MAX_PLACE_LEN {
        return Err(ValidationError::PlaceTooLong {
            len: place.len(),
            max: MAX_PLACE_LEN,
        });
    }
    Ok(())
}

/// Validate a generation count for ancestor/descendant expansion.
///
/// Returns a human readable reason on failure; the engine wraps it in
/// `Error::InvalidArgument`.
pub fn validate_generations(generations: u32) -> Result<(), String> {
    if generations == 0 {
        return Err(NON_POSITIVE_GENERATIONS.to_string());
    }
    Ok(())
}

/// Convert a signed count taken from user input into a generation count
pub fn generations_from_signed(raw: i64) -> Result<u32, String> {
    if raw <= 0 {
        return Err(NON_POSITIVE_GENERATIONS.to_string());
    }
    u32::try_from(raw).map_err(|_| format!("generation count out of range: {}", raw))
}

const NON_POSITIVE_GENERATIONS: &str = "generation count must be a positive, non-zero integer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Alice").is_ok());
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert!(validate_name(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_date_and_place() {
        assert!(validate_date_of_birth("1980-01-01").is_ok());
        assert!(validate_date_of_birth("").is_err());
        assert!(validate_birthplace("").is_ok());
        assert!(validate_birthplace(&"y".repeat(1000)).is_err());
    }

    #[test]
    fn test_validate_generations() {
        assert!(validate_generations(0).is_err());
        assert!(validate_generations(1).is_ok());
        assert!(validate_generations(129).is_ok());
        assert!(validate_generations(u32::MAX).is_ok());
    }

    #[test]
    fn test_generations_from_signed() {
        assert_eq!(generations_from_signed(3), Ok(3));
        assert!(generations_from_signed(0).is_err());
        assert!(generations_from_signed(-1)
            .unwrap_err()
            .contains("positive"));
        assert!(generations_from_signed(i64::MAX).is_err());
    }
}
