//! Store identity registry.
//!
//! Maps validated store identifiers to records binding an owner address
//! and a content-addressed metadata blob. Identifiers are created exactly
//! once; a second registration under the same id is an error, never an
//! overwrite.

use std::collections::HashMap;

use escrowreg_ledger::{DocumentStore, TxContext};
use escrowreg_types::{RegistryError, Result, StoreId, StoreRecord};

/// Registry of unique store identities.
pub struct StoreRegistry {
    stores: HashMap<StoreId, StoreRecord>,
}

impl StoreRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Register a new store under `raw_id` with the given metadata blob.
    ///
    /// Validation (identifier grammar, uniqueness) completes before any
    /// mutation, and the blob is persisted before the record is inserted,
    /// so a failure at any step leaves no partial state.
    ///
    /// # Errors
    /// - `InvalidStoreId` if `raw_id` fails the identifier grammar
    /// - `StoreAlreadyRegistered` if a record already exists
    /// - document-store errors from persisting the blob
    pub fn register(
        &mut self,
        ctx: &TxContext,
        docstore: &mut impl DocumentStore,
        raw_id: &str,
        metadata: &[u8],
    ) -> Result<&StoreRecord> {
        let id = StoreId::parse(raw_id)?;
        if self.stores.contains_key(&id) {
            return Err(RegistryError::StoreAlreadyRegistered(id));
        }

        let metadata_hash = docstore.put(metadata)?;
        let record = StoreRecord {
            id: id.clone(),
            owner: ctx.caller,
            metadata_hash,
        };

        tracing::info!(
            store_id = %id,
            owner = %ctx.caller.short(),
            metadata_hash = %metadata_hash,
            "store registered"
        );

        Ok(self.stores.entry(id).or_insert(record))
    }

    /// Look up the record for `id`. Pure read.
    #[must_use]
    pub fn lookup(&self, id: &StoreId) -> Option<&StoreRecord> {
        self.stores.get(id)
    }

    /// Fetch the registered metadata blob back from the document store.
    ///
    /// # Errors
    /// - `StoreNotFound` if no record exists for `id`
    /// - `DocumentMissing` if the store cannot produce the bound blob
    pub fn metadata<'a>(
        &self,
        docstore: &'a impl DocumentStore,
        id: &StoreId,
    ) -> Result<&'a [u8]> {
        let record = self
            .lookup(id)
            .ok_or_else(|| RegistryError::StoreNotFound(id.clone()))?;
        docstore
            .get(&record.metadata_hash)
            .ok_or(RegistryError::DocumentMissing(record.metadata_hash))
    }

    /// Number of registered stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}
