//! Password hashing with bcrypt.

use anyhow::{Context, Result};

/// Fixed bcrypt work factor, matching the credential format already
/// persisted in the users table.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, BCRYPT_COST).context("Failed to hash password")
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(plaintext, hash).context("Failed to verify password")
}
