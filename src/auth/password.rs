use crate::error::AppError;
use bcrypt::{hash, verify};

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, 12) // bcrypt default cost is 12
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "secret123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "secret123";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        // Each derivation uses a fresh salt, so the digests differ.
        assert_ne!(first, second);
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("secret123", "invalidhashformat") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"));
            }
            Ok(false) => {
                // bcrypt may also report a malformed hash as a plain mismatch.
            }
            Ok(true) => panic!("verification must fail for an invalid hash format"),
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
