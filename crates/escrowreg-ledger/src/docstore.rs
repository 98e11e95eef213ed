//! Content-addressed document store.
//!
//! The registries never persist metadata blobs themselves: they hand the
//! blob to the document store, keep only the content hash, and trust the
//! store to return exactly the blob matching a given hash. The in-memory
//! implementation backs tests and single-process deployments.

use std::collections::HashMap;

use escrowreg_types::{ContentHash, RegistryError, Result};

use crate::linker;

/// Content-addressed blob persistence.
pub trait DocumentStore {
    /// Persist `blob` and return its content hash. Storing the same blob
    /// twice is idempotent.
    ///
    /// # Errors
    /// Implementations may fail on storage faults; the in-memory store
    /// only fails if a stored blob no longer matches its hash (corruption).
    fn put(&mut self, blob: &[u8]) -> Result<ContentHash>;

    /// Fetch the blob stored under `hash`, if any.
    fn get(&self, hash: &ContentHash) -> Option<&[u8]>;
}

/// In-memory content-addressed store keyed by [`ContentHash`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDocStore {
    documents: HashMap<ContentHash, Vec<u8>>,
}

impl MemoryDocStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Whether a blob is stored under `hash`.
    #[must_use]
    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.documents.contains_key(hash)
    }

    /// Number of distinct blobs stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryDocStore {
    fn put(&mut self, blob: &[u8]) -> Result<ContentHash> {
        let hash = linker::bind(blob);
        if let Some(existing) = self.documents.get(&hash) {
            // Hash-consistency check: a collision here means corruption,
            // which must abort the transition.
            if existing != blob {
                return Err(RegistryError::HashMismatch {
                    expected: hash,
                    actual: linker::bind(existing),
                });
            }
            return Ok(hash);
        }
        self.documents.insert(hash, blob.to_vec());
        Ok(hash)
    }

    fn get(&self, hash: &ContentHash) -> Option<&[u8]> {
        self.documents.get(hash).map(Vec::as_slice)
    }
}
