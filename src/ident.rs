// SPDX-License-Identifier: MIT

//! Random identifiers and hashing.
//!
//! Entity IDs are 128-bit random values, access tokens 192-bit; both are
//! stored as lowercase hex. Only the SHA-256 hash of an access token is
//! ever persisted. File hashes are content-addressed over (bytes, mime).

use crate::error::AppError;
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

fn random_hex(byte_len: usize) -> Result<String, AppError> {
    let mut bytes = vec![0u8; byte_len];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("system random generator failure")))?;
    Ok(hex::encode(bytes))
}

/// Generate a fresh 128-bit entity ID (32 hex chars).
///
/// IDs are generated client-side before the write; creation is a blind
/// insert that is expected to never collide in practice.
pub fn generate_id() -> Result<String, AppError> {
    random_hex(16)
}

/// Generate a fresh 192-bit access token (48 hex chars).
pub fn generate_access_token() -> Result<String, AppError> {
    random_hex(24)
}

/// Hash an access token for storage or lookup.
///
/// The hash is computed over the raw token bytes, so a token that is not
/// valid hex can never match any stored hash.
pub fn hash_access_token(token: &str) -> Result<String, AppError> {
    let bytes = hex::decode(token).map_err(|_| AppError::InvalidCredential)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Content hash of a stored file: SHA-256 over the bytes followed by the
/// mime type. Identical (bytes, mime) pairs always yield the same hash,
/// which makes storage writes idempotent.
pub fn file_hash(bytes: &[u8], mime_type: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(mime_type.as_bytes());
    hex::encode(hasher.finalize())
}
