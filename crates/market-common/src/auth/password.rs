//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password strength
///
/// Requirements:
/// - 8 to 128 characters
/// - not entirely numeric
/// - at least one letter and one digit
/// - not the username
///
/// # Errors
/// Returns a validation error describing the first failed rule
pub fn validate_password_strength(password: &str, username: &str) -> Result<(), AppError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "This password is too long. It must contain at most {MAX_PASSWORD_LENGTH} characters."
        )));
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "This password is entirely numeric.".to_string(),
        ));
    }

    if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(AppError::Validation(
            "Password must contain at least one letter and one digit.".to_string(),
        ));
    }

    if !username.is_empty() && password.eq_ignore_ascii_case(username) {
        return Err(AppError::Validation(
            "The password is too similar to the username.".to_string(),
        ));
    }

    Ok(())
}
