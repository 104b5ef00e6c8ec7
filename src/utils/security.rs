//! Security Utilities
//!
//! Password hashing and reset-token generation.

use rand::RngCore;

/// bcrypt cost factor for password hashing
pub const BCRYPT_COST: u32 = 12;

/// Number of random bytes in a password-reset token
pub const RESET_TOKEN_BYTES: usize = 32;

/// Hash a password using bcrypt at the default cost
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash_password_with_cost(password, BCRYPT_COST)
}

/// Hash a password with a custom bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Generate a single-use password-reset token: 32 bytes of cryptographic
/// randomness, hex-encoded.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
