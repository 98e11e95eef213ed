//! Metadata linker — binds opaque blobs to records by content hash.
//!
//! The digest is fixed (SHA-256 with a domain-separation prefix) so every
//! node computes the identical hash for the identical blob. Both
//! registries use it the same way; the core never interprets blob
//! contents.

use escrowreg_types::ContentHash;
use sha2::{Digest, Sha256};

/// Domain separator so registry content hashes never collide with other
/// SHA-256 uses of the same bytes.
const DOMAIN: &[u8] = b"escrowreg:metadata:v1:";

/// Compute the content hash binding `blob` to a record.
#[must_use]
pub fn bind(blob: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN);
    hasher.update(blob);
    let digest = hasher.finalize();
    let bytes: [u8; 32] = digest.into();
    ContentHash::from_bytes(bytes)
}

/// Check that `blob` is the exact content bound to `hash`.
#[must_use]
pub fn verify(hash: &ContentHash, blob: &[u8]) -> bool {
    bind(blob) == *hash
}
