use crate::error::{AppError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Hashing cost used for both generated and user-chosen passwords.
const BCRYPT_COST: u32 = 12;

/// Length of the password generated at registration and mailed to the user.
const GENERATED_PASSWORD_LEN: usize = 10;

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AppError::InternalError)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|_| AppError::Authentication("Invalid password".to_string()))
}

/// Generate the random alphanumeric password mailed to a new user.
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password();
        assert_eq!(password.len(), 10);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }

    #[test]
    fn test_hash_verifies_against_plaintext() {
        let password = generate_password();
        let hash = hash_password(&password).unwrap();
        // The stored hash is never the plaintext, but verifies against it.
        assert_ne!(hash, password);
        assert!(verify_password(&password, &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
