//! The two-stage salted digest that decides whether a candidate matches.
//!
//! `outer = SHA-256(hex(SHA-256(candidate)) || salt)`, where the inner digest
//! is lowercase hex text and the salt is appended as raw UTF-8 text. The
//! construction is fixed: targets were produced with exactly this scheme.

use sha2::{Digest, Sha256};

/// Length in bytes of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Hashing scheme used by the engine to test candidates.
///
/// Implementations must be deterministic. The engine compares the returned
/// bytes against the decoded target digest.
pub trait DigestTransform: Send + Sync {
    fn digest(&self, candidate: &str, salt: &str) -> [u8; DIGEST_LEN];
}

/// `SHA-256(hex(SHA-256(candidate)) + salt)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedSha256;

impl DigestTransform for SaltedSha256 {
    #[inline]
    fn digest(&self, candidate: &str, salt: &str) -> [u8; DIGEST_LEN] {
        let inner = Sha256::digest(candidate.as_bytes());
        let mut outer = Sha256::new();
        outer.update(hex::encode(inner));
        outer.update(salt.as_bytes());
        outer.finalize().into()
    }
}

/// Hex digest of `candidate` under the salted scheme.
pub fn transform(candidate: &str, salt: &str) -> String {
    hex::encode(SaltedSha256.digest(candidate, salt))
}
