//! Password hashing utilities

use bcrypt::{hash, verify};

/// Hash a password using bcrypt with the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash_password("Password1", 4).unwrap();
        assert_ne!(hashed, "Password1");
        assert!(verify_password("Password1", &hashed).unwrap());
        assert!(!verify_password("password1", &hashed).unwrap());
    }
}
