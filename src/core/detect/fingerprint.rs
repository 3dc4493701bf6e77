//! Content fingerprints

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 fingerprint of raw content
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 digest (64 characters).
///
/// # Examples
///
/// ```
/// use legtrack::core::detect::fingerprint;
///
/// let digest = fingerprint(b"<html></html>");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    format!("{result:x}")
}
