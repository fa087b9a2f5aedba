use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must be no more than 128 characters long")]
    TooLong,
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;

/// Validate password length bounds
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_LENGTH {
        return Err(PasswordError::TooShort);
    }

    if password.len() > MAX_LENGTH {
        return Err(PasswordError::TooLong);
    }

    Ok(())
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    hash(password, DEFAULT_COST).map_err(|_| PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_validation() {
        assert!(matches!(
            validate_password("short"),
            Err(PasswordError::TooShort)
        ));

        assert!(matches!(
            validate_password(&"x".repeat(129)),
            Err(PasswordError::TooLong)
        ));

        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn test_password_hashing() {
        let password = "TestPassword123";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("WrongPassword", &hash).unwrap());
    }
}
